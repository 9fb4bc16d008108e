//! Header Widget
//! Top bar with the page title, dashboard actions and a status line.

use egui::{Color32, RichText};

const READY: &str = "준비됨";
const REFRESH_LABEL: &str = "🔄 새로고침";
const COPY_LABEL: &str = "📋 사양 JSON 복사";
pub const NOTHING_TO_COPY: &str = "복사할 대시보드가 없습니다";
pub const SPEC_COPIED: &str = "사양 JSON을 클립보드에 복사했습니다";

/// Status line after a successful rebuild
pub fn ready_status(cells: usize, refresh: u64) -> String {
    format!("차트 {}개 준비됨 (새로고침 #{})", cells, refresh)
}

/// Top panel with title and refresh/export buttons.
pub struct Header {
    pub title: String,
    pub status: String,
    pub is_error: bool,
}

impl Header {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            status: READY.to_string(),
            is_error: false,
        }
    }

    /// Draw the header
    pub fn show(&mut self, ui: &mut egui::Ui) -> HeaderAction {
        let mut action = HeaderAction::None;

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(&self.title)
                    .size(26.0)
                    .strong()
                    .color(Color32::from_rgb(100, 149, 237)),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let copy = egui::Button::new(RichText::new(COPY_LABEL).size(13.0))
                    .min_size(egui::vec2(140.0, 28.0));
                if ui.add(copy).clicked() {
                    action = HeaderAction::CopySpecJson;
                }

                let refresh = egui::Button::new(RichText::new(REFRESH_LABEL).size(13.0))
                    .min_size(egui::vec2(100.0, 28.0));
                if ui.add(refresh).clicked() {
                    action = HeaderAction::Refresh;
                }

                let status_color = if self.is_error {
                    Color32::from_rgb(220, 53, 69)
                } else {
                    Color32::GRAY
                };
                ui.label(RichText::new(&self.status).size(11.0).color(status_color));
            });
        });
        ui.add_space(6.0);

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("오류: {}", error);
        self.is_error = true;
    }
}

/// Actions triggered from the header
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderAction {
    None,
    Refresh,
    CopySpecJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hangul(text: &str) -> bool {
        text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
    }

    #[test]
    fn test_header_text_is_korean() {
        let texts = [
            READY.to_string(),
            REFRESH_LABEL.to_string(),
            COPY_LABEL.to_string(),
            NOTHING_TO_COPY.to_string(),
            SPEC_COPIED.to_string(),
            ready_status(6, 1),
        ];
        for text in &texts {
            assert!(is_hangul(text), "{}", text);
        }
    }

    #[test]
    fn test_status_and_error() {
        let mut header = Header::new("매출 대시보드");
        assert_eq!(header.status, READY);
        assert!(!header.is_error);

        header.set_error(NOTHING_TO_COPY);
        assert!(header.is_error);
        assert_eq!(header.status, "오류: 복사할 대시보드가 없습니다");

        header.set_status(&ready_status(6, 2));
        assert!(!header.is_error);
        assert_eq!(header.status, "차트 6개 준비됨 (새로고침 #2)");
    }
}
