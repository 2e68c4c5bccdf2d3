//! Markdown to HTML fragment conversion for block content.
//!
//! Fenced code is highlighted with inline styles so the fragment needs no
//! companion stylesheet. Raw HTML in the source is escaped and shown as text.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use tracing::debug;

const CODE_THEME: &str = "InspiredGitHub";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// An HTML fragment plus the non-empty image URLs it references, in
/// document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markup {
    pub html: String,
    pub image_urls: Vec<String>,
}

/// Convert Markdown to an embeddable HTML fragment. Never fails; anything
/// the parser does not recognize comes out as ordinary text.
pub fn to_markup(markdown: &str) -> Markup {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut events: Vec<Event<'_>> = Vec::new();
    let mut image_urls = Vec::new();
    // (language, accumulated source) while inside a code block
    let mut code: Option<(String, String)> = None;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info).to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((lang, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, source)) = code.take() {
                    events.push(Event::Html(CowStr::from(highlight(&lang, &source))));
                }
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, source)) = code.as_mut() {
                    source.push_str(&text);
                }
            }
            Event::Start(Tag::HtmlBlock) => events.push(Event::Start(Tag::Paragraph)),
            Event::End(TagEnd::HtmlBlock) => events.push(Event::End(TagEnd::Paragraph)),
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                if !dest_url.trim().is_empty() {
                    image_urls.push(dest_url.trim().to_string());
                }
                events.push(Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());

    Markup {
        html: out,
        image_urls,
    }
}

/// First word of a fence info string: "rust,ignore" and "python title=x"
/// both name their language first.
fn fence_language(info: &str) -> &str {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or_default()
}

fn highlight(lang: &str, source: &str) -> String {
    let syntax = SYNTAXES
        .find_syntax_by_token(lang)
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());

    let Some(theme) = THEMES.themes.get(CODE_THEME) else {
        return plain_code_block(lang, source);
    };

    match highlighted_html_for_string(source, &SYNTAXES, syntax, theme) {
        Ok(highlighted) => highlighted,
        Err(e) => {
            debug!(lang, error = %e, "syntax highlighting failed, using plain code block");
            plain_code_block(lang, source)
        }
    }
}

fn plain_code_block(lang: &str, source: &str) -> String {
    if lang.is_empty() {
        format!("<pre><code>{}</code></pre>\n", tera::escape_html(source))
    } else {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            tera::escape_html(lang),
            tera::escape_html(source)
        )
    }
}
