//! Font chain setup.
//! egui's built-in fonts have no Hangul, so system faces from the configured
//! family chain are installed ahead of them.

use egui::{FontData, FontDefinitions, FontFamily};
use std::path::{Path, PathBuf};

/// Known locations for each family in the chain. `sans-serif` maps to egui's
/// own fonts and needs no file.
const FONT_FILES: &[(&str, &[&str])] = &[
    (
        "Apple SD Gothic Neo",
        &["/System/Library/Fonts/AppleSDGothicNeo.ttc"],
    ),
    (
        "Noto Sans KR",
        &[
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/noto/NotoSansKR-Regular.ttf",
        ],
    ),
    (
        "Malgun Gothic",
        &["C:\\Windows\\Fonts\\malgun.ttf"],
    ),
    (
        "Segoe UI",
        &["C:\\Windows\\Fonts\\segoeui.ttf"],
    ),
    (
        "Roboto",
        &[
            "/usr/share/fonts/truetype/roboto/unhinted/RobotoTTF/Roboto-Regular.ttf",
            "/usr/share/fonts/TTF/Roboto-Regular.ttf",
        ],
    ),
    (
        "Helvetica Neue",
        &["/System/Library/Fonts/HelveticaNeue.ttc"],
    ),
    (
        "Arial",
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
            "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
        ],
    ),
];

/// First existing file for each family, in chain order.
pub fn resolve_font_chain(
    families: &[String],
    exists: impl Fn(&Path) -> bool,
) -> Vec<(String, PathBuf)> {
    families
        .iter()
        .filter_map(|family| {
            let (_, paths) = FONT_FILES
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(family.trim()))?;
            paths
                .iter()
                .map(|p| PathBuf::from(*p))
                .find(|p| exists(p.as_path()))
                .map(|p| (family.trim().to_string(), p))
        })
        .collect()
}

/// Install the resolved chain ahead of egui's defaults. Returns the families
/// that were loaded.
pub fn install_font_chain(ctx: &egui::Context, families: &[String]) -> Vec<String> {
    let mut fonts = FontDefinitions::default();
    let mut installed = Vec::new();

    for (family, path) in resolve_font_chain(families, Path::exists) {
        match std::fs::read(&path) {
            Ok(bytes) => {
                fonts
                    .font_data
                    .insert(family.clone(), FontData::from_owned(bytes).into());
                installed.push(family);
            }
            Err(e) => {
                tracing::warn!(family = %family, path = %path.display(), error = %e, "font unreadable");
            }
        }
    }

    for (slot, family) in installed.iter().enumerate() {
        if let Some(list) = fonts.families.get_mut(&FontFamily::Proportional) {
            list.insert(slot, family.clone());
        }
        if let Some(list) = fonts.families.get_mut(&FontFamily::Monospace) {
            list.push(family.clone());
        }
    }

    if installed.is_empty() {
        tracing::warn!("no font from the family chain found; Hangul may not render");
    } else {
        tracing::info!(fonts = ?installed, "font chain installed");
    }

    ctx.set_fonts(fonts);
    installed
}
