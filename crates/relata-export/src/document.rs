//! Document assembly.
//!
//! The report is first built as a [`DocumentModel`] tree with named slots and
//! then rendered through an HTML template with autoescaping, so user text
//! (titles, client names, header/footer text) can never break out of the
//! markup. Only block bodies, already produced by the Markdown converter,
//! are inserted unescaped.

use std::fmt;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::ExportError;
use crate::labels::Labels;
use crate::markdown::to_markup;
use crate::placeholders::{PlaceholderContext, resolve};
use crate::request::ReportRenderRequest;

const TEMPLATE_NAME: &str = "report.html";

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{{ doc.title }}</title>
</head>
<body>
{% if doc.header_image %}<div class="header-image"><img src="{{ doc.header_image.url }}" alt="{{ doc.header_image.alt }}"></div>
{% endif %}<div class="header">
<h1 class="title">{{ doc.caption }}</h1>
{% if doc.title %}<div class="subtitle">{{ doc.title }}</div>
{% endif %}{% if doc.header_text %}<div class="header-text">{{ doc.header_text }}</div>
{% endif %}</div>
<div class="client-info">
<div class="client-name">{{ doc.client_name }}</div>
<div class="date">{{ doc.date_label }}: {{ doc.date }}</div>
</div>
{% for section in doc.sections %}<div class="block{% if section.page_break_before %} page-break{% endif %}" id="block-{{ section.index }}">
<div class="block-title">{{ section.title }}</div>
<div class="block-content">{{ section.body_html | safe }}</div>
</div>
{% endfor %}<div class="footer">
{% if doc.footer_image %}<img class="footer-image" src="{{ doc.footer_image.url }}" alt="{{ doc.footer_image.alt }}">
{% endif %}{% if doc.footer_text %}<p class="footer-text">{{ doc.footer_text }}</p>
{% endif %}{% for line in doc.attribution %}<p>{{ line }}</p>
{% endfor %}</div>
</body>
</html>
"#;

/// Where an external resource URL came from, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceOrigin {
    StyleField { field: &'static str },
    Block { index: usize, field: &'static str },
}

impl fmt::Display for ResourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceOrigin::StyleField { field } => write!(f, "style field `{field}`"),
            ResourceOrigin::Block { index, field } => write!(f, "block {index}, field `{field}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRef {
    pub url: String,
    pub origin: ResourceOrigin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

/// One block, ready for layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Position in the request's block list.
    pub index: usize,
    /// Resolved plain-text title.
    pub title: String,
    /// Resolved and converted block body.
    pub body_html: String,
    pub page_break_before: bool,
}

/// The report as a tree of named slots, all placeholders already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentModel {
    pub title: String,
    pub caption: String,
    pub header_image: Option<Image>,
    pub header_text: Option<String>,
    pub client_name: String,
    pub date_label: String,
    pub date: String,
    pub sections: Vec<Section>,
    pub footer_image: Option<Image>,
    pub footer_text: Option<String>,
    pub attribution: Vec<String>,
}

/// An assembled report: the model, its HTML rendering, and every external
/// resource the HTML or stylesheet points at.
#[derive(Debug, Clone)]
pub struct Document {
    pub model: DocumentModel,
    pub html: String,
    pub resources: Vec<ResourceRef>,
}

impl Document {
    /// Indexes of the sections that start on a new page.
    pub fn forced_page_breaks(&self) -> Vec<usize> {
        self.model
            .sections
            .iter()
            .filter(|s| s.page_break_before)
            .map(|s| s.index)
            .collect()
    }

    /// Origin of the resource the engine reported as `url`.
    ///
    /// Engines report relative URLs resolved against their base, so when no
    /// recorded URL matches exactly, the longest recorded URL that is a
    /// whole-segment suffix of `url` wins. Candidates of equal strength
    /// pointing at different origins give `None`.
    pub fn resource_origin(&self, url: &str) -> Option<&ResourceOrigin> {
        let mut best: Option<(usize, &ResourceOrigin)> = None;
        let mut ambiguous = false;

        for resource in &self.resources {
            let Some(strength) = match_strength(url, &resource.url) else {
                continue;
            };
            match best {
                Some((current, _)) if current > strength => {}
                Some((current, origin)) if current == strength => {
                    ambiguous |= origin != &resource.origin;
                }
                _ => {
                    best = Some((strength, &resource.origin));
                    ambiguous = false;
                }
            }
        }

        if ambiguous { None } else { best.map(|(_, origin)| origin) }
    }
}

/// How well a recorded resource URL explains a reported one: exact matches
/// beat any suffix, longer suffixes beat shorter ones.
fn match_strength(reported: &str, recorded: &str) -> Option<usize> {
    if recorded.is_empty() {
        return None;
    }
    if reported == recorded {
        return Some(usize::MAX);
    }
    let relative = recorded.trim_start_matches("./");
    if relative.is_empty() {
        return None;
    }
    let prefix = reported.strip_suffix(relative)?;
    prefix.ends_with('/').then_some(relative.len())
}

/// Assemble the full report document for `request`.
///
/// Missing titles or bodies produce empty sections and an empty block list
/// produces a document with only the header, client and footer regions.
pub fn assemble(request: &ReportRenderRequest, labels: &Labels) -> Result<Document, ExportError> {
    let mut resources = style_resources(request);
    let model = build_model(request, labels, &mut resources);
    let html = render_html(&model)?;

    debug!(
        sections = model.sections.len(),
        resources = resources.len(),
        "document assembled"
    );

    Ok(Document {
        model,
        html,
        resources,
    })
}

fn build_model(
    request: &ReportRenderRequest,
    labels: &Labels,
    resources: &mut Vec<ResourceRef>,
) -> DocumentModel {
    let ctx = PlaceholderContext::from_request(request);
    let style = &request.style;

    let mut sections = Vec::with_capacity(request.blocks.len());
    for (index, block) in request.blocks.iter().enumerate() {
        let markup = to_markup(&resolve(&block.content, &ctx));
        resources.extend(markup.image_urls.into_iter().map(|url| ResourceRef {
            url,
            origin: ResourceOrigin::Block {
                index,
                field: "content",
            },
        }));
        sections.push(Section {
            index,
            title: resolve(&block.title, &ctx),
            body_html: markup.html,
            page_break_before: block.page_break_before,
        });
    }

    DocumentModel {
        title: resolve(&request.title, &ctx),
        caption: labels.title_caption.clone(),
        header_image: image(&style.header_image_url, &labels.header_image_alt),
        header_text: optional_text(&resolve(&style.header_text, &ctx)),
        client_name: resolve(&request.client_name, &ctx),
        date_label: labels.date_label.clone(),
        date: request.created_at.display_date(),
        sections,
        footer_image: image(&style.footer_image_url, &labels.footer_image_alt),
        footer_text: optional_text(&resolve(&style.footer_text, &ctx)),
        attribution: labels.attribution.clone(),
    }
}

fn image(url: &str, alt: &str) -> Option<Image> {
    let url = url.trim();
    (!url.is_empty()).then(|| Image {
        url: url.to_string(),
        alt: alt.to_string(),
    })
}

fn optional_text(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

fn style_resources(request: &ReportRenderRequest) -> Vec<ResourceRef> {
    let style = &request.style;
    [
        ("header_image_url", &style.header_image_url),
        ("footer_image_url", &style.footer_image_url),
        ("page_background_url", &style.page_background_url),
    ]
    .into_iter()
    .filter(|(_, url)| !url.trim().is_empty())
    .map(|(field, url)| ResourceRef {
        url: url.trim().to_string(),
        origin: ResourceOrigin::StyleField { field },
    })
    .collect()
}

fn render_html(model: &DocumentModel) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, REPORT_TEMPLATE)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let mut context = Context::new();
    context.insert("doc", model);

    Ok(tera.render(TEMPLATE_NAME, &context)?)
}
