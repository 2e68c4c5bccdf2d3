use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use relata_core::models::pdf_config::{HeaderImagePlacement, PdfConfigRecord};

use crate::error::ExportError;

/// Fully resolved styling configuration for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub company_name: String,

    /// Kept for the settings page; the PDF layout does not draw the logo.
    pub company_logo_url: String,

    /// Plain text shown under the title caption.
    pub header_text: String,

    /// Running header image repeated on every page. Empty disables it.
    pub header_image_url: String,

    pub header_image_placement: HeaderImagePlacement,

    pub footer_text: String,

    pub footer_image_url: String,

    /// Letterhead image drawn behind every page. Empty disables it.
    pub page_background_url: String,

    /// Running "page N of M" footer and company name header.
    pub show_page_numbers: bool,

    /// Hex color used for titles, borders and accents.
    pub primary_color: String,

    /// Hex color, stored but not referenced by any rule yet.
    pub secondary_color: String,

    pub font_family: String,

    /// Paper size name; validated when the stylesheet is synthesized.
    pub paper_size: String,

    /// Page margins in centimetres. The top margin is further inflated by
    /// the header reservation at synthesis time.
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            company_name: "Empresa".to_string(),
            company_logo_url: String::new(),
            header_text: String::new(),
            header_image_url: String::new(),
            header_image_placement: HeaderImagePlacement::TopRight,
            footer_text: String::new(),
            footer_image_url: String::new(),
            page_background_url: String::new(),
            show_page_numbers: true,
            primary_color: "#2563eb".to_string(),
            secondary_color: "#1e40af".to_string(),
            font_family: "Helvetica".to_string(),
            paper_size: "A4".to_string(),
            margin_top: 2.0,
            margin_bottom: 2.0,
            margin_left: 2.0,
            margin_right: 2.0,
        }
    }
}

/// A [`StyleConfig`] field that can be defaulted during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleField {
    CompanyName,
    CompanyLogoUrl,
    HeaderText,
    HeaderImageUrl,
    HeaderImagePlacement,
    FooterText,
    FooterImageUrl,
    PageBackgroundUrl,
    ShowPageNumbers,
    PrimaryColor,
    SecondaryColor,
    FontFamily,
    PaperSize,
    MarginTop,
    MarginBottom,
    MarginLeft,
    MarginRight,
}

impl StyleField {
    pub fn name(self) -> &'static str {
        match self {
            StyleField::CompanyName => "company_name",
            StyleField::CompanyLogoUrl => "company_logo_url",
            StyleField::HeaderText => "header_text",
            StyleField::HeaderImageUrl => "header_image_url",
            StyleField::HeaderImagePlacement => "header_image_placement",
            StyleField::FooterText => "footer_text",
            StyleField::FooterImageUrl => "footer_image_url",
            StyleField::PageBackgroundUrl => "page_background_url",
            StyleField::ShowPageNumbers => "show_page_numbers",
            StyleField::PrimaryColor => "primary_color",
            StyleField::SecondaryColor => "secondary_color",
            StyleField::FontFamily => "font_family",
            StyleField::PaperSize => "paper_size",
            StyleField::MarginTop => "margin_top",
            StyleField::MarginBottom => "margin_bottom",
            StyleField::MarginLeft => "margin_left",
            StyleField::MarginRight => "margin_right",
        }
    }
}

impl fmt::Display for StyleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of resolving a stored configuration.
///
/// `defaulted` lists, in field declaration order, every field that was
/// absent and received its default. It is informational only.
#[derive(Debug, Clone)]
pub struct ResolvedStyle {
    pub config: StyleConfig,
    pub defaulted: Vec<StyleField>,
}

impl StyleConfig {
    /// Fill every gap in `record` with the documented default.
    ///
    /// Blank strings count as missing for fields that cannot meaningfully be
    /// empty (company name, colors, font, paper size).
    pub fn resolve(record: &PdfConfigRecord) -> ResolvedStyle {
        let d = StyleConfig::default();
        let mut defaulted = Vec::new();
        let required = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

        let config = StyleConfig {
            company_name: pick(
                StyleField::CompanyName,
                required(&record.company_name),
                d.company_name,
                &mut defaulted,
            ),
            company_logo_url: pick(
                StyleField::CompanyLogoUrl,
                record.company_logo_url.clone(),
                d.company_logo_url,
                &mut defaulted,
            ),
            header_text: pick(
                StyleField::HeaderText,
                record.header_text.clone(),
                d.header_text,
                &mut defaulted,
            ),
            header_image_url: pick(
                StyleField::HeaderImageUrl,
                record.header_image_url.clone(),
                d.header_image_url,
                &mut defaulted,
            ),
            header_image_placement: pick(
                StyleField::HeaderImagePlacement,
                record.header_image_placement,
                d.header_image_placement,
                &mut defaulted,
            ),
            footer_text: pick(
                StyleField::FooterText,
                record.footer_text.clone(),
                d.footer_text,
                &mut defaulted,
            ),
            footer_image_url: pick(
                StyleField::FooterImageUrl,
                record.footer_image_url.clone(),
                d.footer_image_url,
                &mut defaulted,
            ),
            page_background_url: pick(
                StyleField::PageBackgroundUrl,
                record.page_background_url.clone(),
                d.page_background_url,
                &mut defaulted,
            ),
            show_page_numbers: pick(
                StyleField::ShowPageNumbers,
                record.show_page_numbers,
                d.show_page_numbers,
                &mut defaulted,
            ),
            primary_color: pick(
                StyleField::PrimaryColor,
                required(&record.primary_color),
                d.primary_color,
                &mut defaulted,
            ),
            secondary_color: pick(
                StyleField::SecondaryColor,
                required(&record.secondary_color),
                d.secondary_color,
                &mut defaulted,
            ),
            font_family: pick(
                StyleField::FontFamily,
                required(&record.font_family),
                d.font_family,
                &mut defaulted,
            ),
            paper_size: pick(
                StyleField::PaperSize,
                required(&record.paper_size),
                d.paper_size,
                &mut defaulted,
            ),
            margin_top: pick(StyleField::MarginTop, record.margin_top, d.margin_top, &mut defaulted),
            margin_bottom: pick(
                StyleField::MarginBottom,
                record.margin_bottom,
                d.margin_bottom,
                &mut defaulted,
            ),
            margin_left: pick(
                StyleField::MarginLeft,
                record.margin_left,
                d.margin_left,
                &mut defaulted,
            ),
            margin_right: pick(
                StyleField::MarginRight,
                record.margin_right,
                d.margin_right,
                &mut defaulted,
            ),
        };

        ResolvedStyle { config, defaulted }
    }

    pub fn has_header_image(&self) -> bool {
        !self.header_image_url.trim().is_empty()
    }
}

fn pick<T: fmt::Debug>(
    field: StyleField,
    value: Option<T>,
    fallback: T,
    defaulted: &mut Vec<StyleField>,
) -> T {
    match value {
        Some(v) => v,
        None => {
            debug!(field = field.name(), default = ?fallback, "style field missing, using default");
            defaulted.push(field);
            fallback
        }
    }
}

/// Paper sizes understood by the page box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// CSS `size` keyword.
    pub fn css_keyword(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
        }
    }
}

impl FromStr for PaperSize {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(PaperSize::A3),
            "a4" => Ok(PaperSize::A4),
            "a5" => Ok(PaperSize::A5),
            "letter" => Ok(PaperSize::Letter),
            "legal" => Ok(PaperSize::Legal),
            _ => Err(ExportError::Style {
                field: "paper_size",
                reason: format!("unrecognized paper size {s:?}"),
            }),
        }
    }
}
