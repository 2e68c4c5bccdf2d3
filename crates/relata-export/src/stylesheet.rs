//! Paged-media stylesheet synthesis.
//!
//! A [`Stylesheet`] is a pure function of a [`StyleConfig`] and is built from
//! three named parts, always emitted in this order:
//!
//! 1. the `@page` rule (page box, margins, running elements),
//! 2. the **base** layer: general document styling,
//! 3. the **overrides** layer: table and image rules. Every declaration in
//!    this layer is emitted with `!important`, so it wins over the base layer
//!    and over anything the Markdown fragment implies, whatever the selector
//!    specificity.

use std::fmt;

use relata_core::models::pdf_config::HeaderImagePlacement;

use crate::error::ExportError;
use crate::labels::Labels;
use crate::styles::{PaperSize, StyleConfig};

/// Height reserved above the body on every page for the running header,
/// added on top of the configured top margin.
pub const HEADER_RESERVATION_CM: f64 = 1.8;

/// Tallest an image inside block content may render.
pub const IMAGE_MAX_HEIGHT_CM: f64 = 12.0;

/// Name of the running element holding the header image.
pub const HEADER_IMAGE_ELEMENT: &str = "headerimg";

const MUTED_TEXT: &str = "#666";
const BODY_TEXT: &str = "#333";
const RULE_GRAY: &str = "#e5e7eb";
const SURFACE: &str = "#f8fafc";
const CODE_SURFACE: &str = "#f1f5f9";
const TABLE_BORDER: &str = "2px solid #000";
const TABLE_STRIPE: &str = "#f3f4f6";

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    pub fn decl(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property,
            value: value.into(),
        });
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Base,
    Overrides,
}

/// Page-margin boxes used for running content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginBox {
    TopLeft,
    TopCenter,
    TopRight,
    BottomCenter,
}

impl MarginBox {
    pub fn at_rule(self) -> &'static str {
        match self {
            MarginBox::TopLeft => "@top-left",
            MarginBox::TopCenter => "@top-center",
            MarginBox::TopRight => "@top-right",
            MarginBox::BottomCenter => "@bottom-center",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarginBoxRule {
    pub position: MarginBox,
    pub declarations: Vec<Declaration>,
}

impl MarginBoxRule {
    fn new(position: MarginBox) -> Self {
        Self {
            position,
            declarations: Vec::new(),
        }
    }

    fn decl(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property,
            value: value.into(),
        });
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }
}

/// The `@page` rule. Margins are effective values in centimetres, i.e. the
/// top margin already includes [`HEADER_RESERVATION_CM`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageRule {
    pub size: PaperSize,
    pub margin_top_cm: f64,
    pub margin_right_cm: f64,
    pub margin_bottom_cm: f64,
    pub margin_left_cm: f64,
    pub background_url: Option<String>,
    pub margin_boxes: Vec<MarginBoxRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub page: PageRule,
    base: Vec<Rule>,
    overrides: Vec<Rule>,
}

impl Stylesheet {
    pub fn rules(&self, layer: Layer) -> &[Rule] {
        match layer {
            Layer::Base => &self.base,
            Layer::Overrides => &self.overrides,
        }
    }

    /// The last rule in `layer` with exactly this selector.
    pub fn rule(&self, layer: Layer, selector: &str) -> Option<&Rule> {
        self.rules(layer).iter().rev().find(|r| r.selector == selector)
    }

    pub fn margin_box(&self, position: MarginBox) -> Option<&MarginBoxRule> {
        self.page
            .margin_boxes
            .iter()
            .find(|b| b.position == position)
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = &self.page;
        writeln!(f, "@page {{")?;
        writeln!(f, "  size: {};", page.size.css_keyword())?;
        writeln!(f, "  margin-top: {};", cm(page.margin_top_cm))?;
        writeln!(f, "  margin-right: {};", cm(page.margin_right_cm))?;
        writeln!(f, "  margin-bottom: {};", cm(page.margin_bottom_cm))?;
        writeln!(f, "  margin-left: {};", cm(page.margin_left_cm))?;
        if let Some(url) = &page.background_url {
            writeln!(f, "  background: url({}) no-repeat center center;", css_string(url))?;
            writeln!(f, "  background-size: cover;")?;
        }
        for margin_box in &page.margin_boxes {
            writeln!(f, "  {} {{", margin_box.position.at_rule())?;
            for d in &margin_box.declarations {
                writeln!(f, "    {}: {};", d.property, d.value)?;
            }
            writeln!(f, "  }}")?;
        }
        writeln!(f, "}}")?;

        write_layer(f, &self.base, false)?;
        write_layer(f, &self.overrides, true)
    }
}

fn write_layer(f: &mut fmt::Formatter<'_>, rules: &[Rule], important: bool) -> fmt::Result {
    let suffix = if important { " !important" } else { "" };
    for rule in rules {
        writeln!(f)?;
        writeln!(f, "{} {{", rule.selector)?;
        for d in &rule.declarations {
            writeln!(f, "  {}: {}{};", d.property, d.value, suffix)?;
        }
        writeln!(f, "}}")?;
    }
    Ok(())
}

/// Build the stylesheet for `config` with the default labels.
pub fn synthesize(config: &StyleConfig) -> Result<Stylesheet, ExportError> {
    synthesize_with_labels(config, &Labels::default())
}

/// Build the stylesheet for `config`.
///
/// Fails on an unknown paper size, a negative or non-finite margin, or a
/// primary color that is not `#rgb` / `#rrggbb`.
pub fn synthesize_with_labels(
    config: &StyleConfig,
    labels: &Labels,
) -> Result<Stylesheet, ExportError> {
    let size: PaperSize = config.paper_size.parse()?;
    let margin_top = margin("margin_top", config.margin_top)?;
    let margin_right = margin("margin_right", config.margin_right)?;
    let margin_bottom = margin("margin_bottom", config.margin_bottom)?;
    let margin_left = margin("margin_left", config.margin_left)?;
    let primary = Rgb::parse(&config.primary_color).ok_or_else(|| ExportError::Style {
        field: "primary_color",
        reason: format!("expected #rgb or #rrggbb, got {:?}", config.primary_color),
    })?;

    let page = PageRule {
        size,
        margin_top_cm: margin_top + HEADER_RESERVATION_CM,
        margin_right_cm: margin_right,
        margin_bottom_cm: margin_bottom,
        margin_left_cm: margin_left,
        background_url: non_empty(&config.page_background_url),
        margin_boxes: margin_boxes(config, labels),
    };

    Ok(Stylesheet {
        page,
        base: base_layer(config, primary),
        overrides: override_layer(primary),
    })
}

fn margin(field: &'static str, value: f64) -> Result<f64, ExportError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ExportError::Style {
            field,
            reason: format!("margin must be a non-negative length in cm, got {value}"),
        });
    }
    Ok(value)
}

fn margin_boxes(config: &StyleConfig, labels: &Labels) -> Vec<MarginBoxRule> {
    let full_width_header =
        config.has_header_image() && config.header_image_placement == HeaderImagePlacement::FullWidth;
    let mut boxes = Vec::new();

    if config.show_page_numbers {
        let company_box = if full_width_header {
            MarginBox::TopLeft
        } else {
            MarginBox::TopCenter
        };
        boxes.push(
            MarginBoxRule::new(company_box)
                .decl("content", css_string(&config.company_name))
                .decl("font-size", "10pt")
                .decl("color", MUTED_TEXT),
        );
        boxes.push(
            MarginBoxRule::new(MarginBox::BottomCenter)
                .decl(
                    "content",
                    format!(
                        "{} counter(page) {} counter(pages)",
                        css_string(&format!("{} ", labels.page_word)),
                        css_string(&format!(" {} ", labels.page_of_word)),
                    ),
                )
                .decl("font-size", "10pt")
                .decl("color", MUTED_TEXT),
        );
    }

    if config.has_header_image() {
        let header_box = match config.header_image_placement {
            HeaderImagePlacement::TopRight => MarginBoxRule::new(MarginBox::TopRight),
            HeaderImagePlacement::FullWidth => {
                MarginBoxRule::new(MarginBox::TopCenter).decl("width", "100%")
            }
        };
        boxes.push(
            header_box
                .decl("content", format!("element({HEADER_IMAGE_ELEMENT})"))
                .decl("vertical-align", "top")
                .decl("padding", "0"),
        );
    }

    boxes
}

fn base_layer(config: &StyleConfig, primary: Rgb) -> Vec<Rule> {
    let primary = primary.to_hex();
    let accent_border = format!("2px solid {primary}");
    let side_border = format!("4px solid {primary}");

    let mut rules = vec![
        Rule::new("body")
            .decl(
                "font-family",
                format!("{}, 'Arial', sans-serif", css_string(&config.font_family)),
            )
            .decl("line-height", "1.6")
            .decl("color", BODY_TEXT)
            .decl("margin", "0")
            .decl("padding", "0"),
        Rule::new(".header")
            .decl("text-align", "center")
            .decl("margin-bottom", "2em")
            .decl("border-bottom", accent_border)
            .decl("padding-bottom", "1em"),
        Rule::new(".title")
            .decl("font-size", "2em")
            .decl("font-weight", "bold")
            .decl("color", &primary)
            .decl("margin-top", "4em")
            .decl("margin-bottom", "0.5em"),
        Rule::new(".subtitle")
            .decl("font-size", "1.2em")
            .decl("color", MUTED_TEXT)
            .decl("margin-bottom", "1em"),
        Rule::new(".header-text")
            .decl("margin-top", "8em")
            .decl("white-space", "pre-line"),
        Rule::new(".client-info")
            .decl("text-align", "right")
            .decl("background-color", SURFACE)
            .decl("padding", "1em")
            .decl("border-radius", "8px")
            .decl("margin-bottom", "2em")
            .decl("border-left", side_border.clone()),
        Rule::new(".client-name")
            .decl("font-weight", "bold")
            .decl("color", &primary),
        Rule::new(".date")
            .decl("color", MUTED_TEXT)
            .decl("font-style", "italic"),
        Rule::new(".block")
            .decl("margin-bottom", "2em")
            .decl("page-break-inside", "avoid"),
        Rule::new(".block.page-break")
            .decl("page-break-before", "always")
            .decl("break-before", "page"),
        Rule::new(".block-title")
            .decl("font-size", "1.3em")
            .decl("font-weight", "bold")
            .decl("color", &primary)
            .decl("margin-bottom", "1em")
            .decl("border-bottom", format!("1px solid {RULE_GRAY}"))
            .decl("padding-bottom", "0.5em"),
        Rule::new(".block-content").decl("line-height", "1.8"),
        Rule::new(".block-content h1, .block-content h2, .block-content h3")
            .decl("color", &primary)
            .decl("margin-top", "1.5em")
            .decl("margin-bottom", "0.5em"),
        Rule::new(".block-content h1").decl("font-size", "1.5em"),
        Rule::new(".block-content h2").decl("font-size", "1.3em"),
        Rule::new(".block-content h3").decl("font-size", "1.1em"),
        Rule::new(".block-content p").decl("margin-bottom", "1em"),
        Rule::new(".block-content ul, .block-content ol")
            .decl("margin-bottom", "1em")
            .decl("padding-left", "2em"),
        Rule::new(".block-content li").decl("margin-bottom", "0.5em"),
        Rule::new(".block-content strong").decl("color", &primary),
        Rule::new(".block-content em").decl("color", MUTED_TEXT),
        Rule::new(".block-content code")
            .decl("background-color", CODE_SURFACE)
            .decl("padding", "0.2em 0.4em")
            .decl("border-radius", "3px")
            .decl("font-family", "'Courier New', monospace"),
        Rule::new(".block-content pre")
            .decl("background-color", CODE_SURFACE)
            .decl("padding", "1em")
            .decl("border-radius", "5px")
            .decl("white-space", "pre-wrap")
            .decl("margin-bottom", "1em"),
        Rule::new(".block-content pre code")
            .decl("padding", "0")
            .decl("background-color", "transparent"),
        Rule::new(".block-content blockquote")
            .decl("border-left", side_border)
            .decl("padding-left", "1em")
            .decl("margin-left", "0")
            .decl("color", MUTED_TEXT)
            .decl("font-style", "italic"),
        Rule::new(".footer")
            .decl("margin-top", "3em")
            .decl("text-align", "center")
            .decl("color", MUTED_TEXT)
            .decl("font-size", "0.9em")
            .decl("border-top", format!("1px solid {RULE_GRAY}"))
            .decl("padding-top", "1em"),
        Rule::new(".footer-image")
            .decl("max-width", "100%")
            .decl("max-height", "80px")
            .decl("margin-top", "1em"),
    ];

    if config.has_header_image() {
        let image_width = match config.header_image_placement {
            HeaderImagePlacement::TopRight => "auto",
            HeaderImagePlacement::FullWidth => "100%",
        };
        rules.push(
            Rule::new(".header-image")
                .decl("position", format!("running({HEADER_IMAGE_ELEMENT})"))
                .decl("display", "block")
                .decl("height", cm(HEADER_RESERVATION_CM))
                .decl("width", image_width),
        );
        rules.push(
            Rule::new(".header-image img")
                .decl("max-height", "100%")
                .decl("width", image_width),
        );
    }

    rules
}

fn override_layer(primary: Rgb) -> Vec<Rule> {
    vec![
        Rule::new(".block-content img, .block-content table img")
            .decl("max-width", "100%")
            .decl("max-height", cm(IMAGE_MAX_HEIGHT_CM))
            .decl("height", "auto")
            .decl("display", "block")
            .decl("margin", "0 auto"),
        Rule::new(".block-content table")
            .decl("width", "100%")
            .decl("border-collapse", "collapse")
            .decl("border", TABLE_BORDER)
            .decl("margin-bottom", "1.5em"),
        Rule::new(".block-content th, .block-content td")
            .decl("border", TABLE_BORDER)
            .decl("padding", "8px 12px")
            .decl("text-align", "left")
            .decl("background-color", "#fff"),
        Rule::new(".block-content tr:nth-child(even) td").decl("background-color", TABLE_STRIPE),
        Rule::new(".block-content th")
            .decl("background-color", primary.tint(0.85).to_hex())
            .decl("color", primary.to_hex())
            .decl("font-weight", "bold"),
    ]
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `3.8cm`, without float noise or trailing zeros.
fn cm(value: f64) -> String {
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0cm".to_string(),
        _ => format!("{trimmed}cm"),
    }
}

/// Quote `raw` as a CSS string literal.
pub fn css_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\A "),
            '\r' => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    fn parse(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self {
                    r: pair(0)?,
                    g: pair(2)?,
                    b: pair(4)?,
                })
            }
            _ => None,
        }
    }

    /// Mix towards white by `amount` (0 = unchanged, 1 = white).
    fn tint(self, amount: f64) -> Self {
        let mix = |c: u8| (c as f64 + (255.0 - c as f64) * amount).round() as u8;
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }

    fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
