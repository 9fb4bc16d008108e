//! Dashboard configuration.
//! Page chrome, font chain and card geometry. Only defaults are used at runtime.

use serde::{Deserialize, Serialize};

/// Font families tried in order; Hangul-capable faces come first.
pub const FONT_FAMILY_CHAIN: [&str; 8] = [
    "Apple SD Gothic Neo",
    "Noto Sans KR",
    "Malgun Gothic",
    "Segoe UI",
    "Roboto",
    "Helvetica Neue",
    "Arial",
    "sans-serif",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page_title: String,
    pub caption: String,
    pub font_family: Vec<String>,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Height of the plot area inside each grid card
    pub plot_height: f32,
    pub card_spacing: f32,
    /// Largest bubble diameter in points
    pub bubble_size_max: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_title: "매출 대시보드".to_string(),
            caption: "데이터 출처: 업로드한 엑셀 파일 (요약 반영) · 한글 폰트는 시스템 기본 폰트를 사용합니다."
                .to_string(),
            font_family: FONT_FAMILY_CHAIN.iter().map(|f| f.to_string()).collect(),
            window_size: [1500.0, 900.0],
            min_window_size: [1000.0, 650.0],
            plot_height: 300.0,
            card_spacing: 12.0,
            bubble_size_max: 20.0,
        }
    }
}

impl DashboardConfig {
    /// Comma-separated font chain, as carried by each chart specification.
    pub fn font_family_css(&self) -> String {
        self.font_family.join(", ")
    }
}
