use std::path::PathBuf;

use jiff::civil::date;

use relata_core::models::report::CreatedAt;
use relata_export::document::{Document, ResourceOrigin, assemble};
use relata_export::error::{ErrorKind, ExportError};
use relata_export::labels::Labels;
use relata_export::pdf::{PDF_MAGIC, RenderEngine, WeasyPrint, WeasyPrintConfig, failed_resources};
use relata_export::stylesheet::{Stylesheet, synthesize};
use relata_export::{BlockView, ReportRenderRequest, ReportRenderer, StyleConfig};

const MISSING: &str = "https://cdn.example.com/missing.png";

fn request() -> ReportRenderRequest {
    ReportRenderRequest {
        report_number: "4002506".to_string(),
        title: "Pentest".to_string(),
        client_name: "Acme Corp".to_string(),
        created_at: CreatedAt::Text("26/06/2025".to_string()),
        blocks: vec![
            BlockView {
                title: "Resumo".to_string(),
                content: "**Olá** {{CLIENT_NAME}}".to_string(),
                page_break_before: false,
            },
            BlockView {
                title: "Evidência".to_string(),
                content: format!("![print]({MISSING})"),
                page_break_before: true,
            },
        ],
        style: StyleConfig::default(),
        render_date: date(2025, 6, 26),
    }
}

fn inputs() -> (Document, Stylesheet) {
    let req = request();
    (
        assemble(&req, &Labels::default()).unwrap(),
        synthesize(&req.style).unwrap(),
    )
}

#[test]
fn failed_resource_lines_are_extracted() {
    let stderr = "\
WARNING: Ignored `break-before: page` at 3:1, unknown property.
ERROR: Failed to load image at 'https://cdn.example.com/missing.png': HTTP Error 404
WARNING: Failed to load stylesheet at \"file:///tmp/x/extra.css\": No such file
Failed to load font at 'https://fonts.example.com/a.woff2'
";
    assert_eq!(
        failed_resources(stderr),
        vec![
            "https://cdn.example.com/missing.png".to_string(),
            "file:///tmp/x/extra.css".to_string(),
            "https://fonts.example.com/a.woff2".to_string(),
        ]
    );
}

#[test]
fn unrelated_log_lines_are_ignored() {
    assert!(failed_resources("").is_empty());
    assert!(failed_resources("WARNING: Anchor defined twice: top\n").is_empty());
    assert!(failed_resources("ERROR: Failed to load image at unquoted-url\n").is_empty());
}

#[test]
fn default_config_is_strict() {
    let config = WeasyPrintConfig::default();
    assert_eq!(config.binary, PathBuf::from("weasyprint"));
    assert_eq!(config.base_url, None);
    assert!(config.strict_resources);
}

#[cfg(unix)]
fn fake_engine(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\nfor last; do :; done\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
fn engine(binary: PathBuf, strict_resources: bool) -> WeasyPrint {
    WeasyPrint::new(WeasyPrintConfig {
        binary,
        base_url: None,
        strict_resources,
    })
}

// Every scenario that spawns a process lives in this one test, so no other
// test in this binary forks while a script is being written.
#[cfg(unix)]
#[test]
fn engine_outcomes_with_fake_binaries() {
    let dir = tempfile::tempdir().unwrap();
    let (document, stylesheet) = inputs();

    let missing = engine(dir.path().join("no-such-weasyprint"), true)
        .render(&document, &stylesheet)
        .unwrap_err();
    assert!(matches!(missing, ExportError::EngineUnavailable(_)));
    assert_eq!(missing.kind(), ErrorKind::RenderEngine);

    let ok = fake_engine(dir.path(), "ok", "printf '%s' '%PDF-1.4 fake' > \"$last\"");
    let bytes = engine(ok, true).render(&document, &stylesheet).unwrap();
    assert!(bytes.starts_with(PDF_MAGIC));

    let warns = fake_engine(
        dir.path(),
        "warns",
        &format!(
            "printf '%s' '%PDF-1.4 fake' > \"$last\"\n\
             echo \"ERROR: Failed to load image at '{MISSING}': 404\" >&2"
        ),
    );
    let strict = engine(warns.clone(), true)
        .render(&document, &stylesheet)
        .unwrap_err();
    match strict {
        ExportError::RenderEngine { origin, message } => {
            assert_eq!(
                origin,
                Some(ResourceOrigin::Block {
                    index: 1,
                    field: "content"
                })
            );
            assert!(message.contains(MISSING));
        }
        other => panic!("unexpected error: {other}"),
    }
    let lenient = engine(warns, false).render(&document, &stylesheet).unwrap();
    assert!(lenient.starts_with(PDF_MAGIC));

    let crashes = fake_engine(dir.path(), "crashes", "echo 'boom' >&2\nexit 2");
    let err = engine(crashes, true)
        .render(&document, &stylesheet)
        .unwrap_err();
    assert!(matches!(err, ExportError::RenderEngine { origin: None, .. }));
    assert!(err.to_string().contains("boom"));

    let not_pdf = fake_engine(dir.path(), "not-pdf", "printf 'hello' > \"$last\"");
    let err = engine(not_pdf, true)
        .render(&document, &stylesheet)
        .unwrap_err();
    assert!(err.to_string().contains("not a PDF"));
}

#[test]
#[ignore = "requires a local weasyprint install"]
fn renders_with_installed_weasyprint() {
    let mut req = request();
    req.blocks.pop();

    let renderer = ReportRenderer::new(WeasyPrint::new(WeasyPrintConfig::from_env()));
    let report = renderer.render(&req).unwrap();
    assert!(report.bytes.starts_with(PDF_MAGIC));
    assert_eq!(report.filename, "relatorio_Pentest_Acme_Corp.pdf");
}
