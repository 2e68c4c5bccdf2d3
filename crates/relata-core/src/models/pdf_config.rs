use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A user's stored PDF configuration.
///
/// Every field is optional: rows created before a field existed, and
/// partial updates from the settings page, leave gaps that the renderer
/// fills with defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct PdfConfigRecord {
    pub company_name: Option<String>,
    pub company_logo_url: Option<String>,
    pub header_text: Option<String>,
    pub header_image_url: Option<String>,
    pub header_image_placement: Option<HeaderImagePlacement>,
    pub footer_text: Option<String>,
    pub footer_image_url: Option<String>,
    /// Letterhead drawn behind every page.
    pub page_background_url: Option<String>,
    pub show_page_numbers: Option<bool>,
    /// Hex color, e.g. `#2563eb`.
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    /// `A4`, `Letter`, ...
    pub paper_size: Option<String>,
    /// Margins in centimetres.
    pub margin_top: Option<f64>,
    pub margin_bottom: Option<f64>,
    pub margin_left: Option<f64>,
    pub margin_right: Option<f64>,
}

/// Where the running header image sits in the page margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum HeaderImagePlacement {
    #[default]
    TopRight,
    FullWidth,
}
