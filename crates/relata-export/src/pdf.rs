//! PDF rendering through an external paged-media engine.

use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use tracing::{debug, warn};

use crate::document::Document;
use crate::error::ExportError;
use crate::stylesheet::Stylesheet;

/// Every PDF file starts with this header.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

const BINARY_ENV: &str = "RELATA_WEASYPRINT_BIN";
const BASE_URL_ENV: &str = "RELATA_BASE_URL";
const LENIENT_ENV: &str = "RELATA_LENIENT_RESOURCES";

/// Turns an assembled document and its stylesheet into PDF bytes.
///
/// Implementations must not keep per-render state, so one engine can serve
/// concurrent renders.
pub trait RenderEngine: Send + Sync {
    fn render(&self, document: &Document, stylesheet: &Stylesheet) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeasyPrintConfig {
    /// Executable name or path.
    pub binary: PathBuf,
    /// Base for relative URLs in the document and stylesheet.
    pub base_url: Option<String>,
    /// Fail the render when any referenced resource cannot be loaded.
    pub strict_resources: bool,
}

impl Default for WeasyPrintConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("weasyprint"),
            base_url: None,
            strict_resources: true,
        }
    }
}

impl WeasyPrintConfig {
    /// Defaults overridden by `RELATA_WEASYPRINT_BIN`, `RELATA_BASE_URL` and
    /// `RELATA_LENIENT_RESOURCES`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(binary) = env_non_empty(BINARY_ENV) {
            config.binary = PathBuf::from(binary);
        }
        if let Some(base_url) = env_non_empty(BASE_URL_ENV) {
            config.base_url = Some(base_url);
        }
        if let Some(lenient) = env_non_empty(LENIENT_ENV) {
            config.strict_resources = !is_truthy(&lenient);
        }
        config
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Renders with the `weasyprint` command-line tool.
#[derive(Debug, Clone, Default)]
pub struct WeasyPrint {
    config: WeasyPrintConfig,
}

impl WeasyPrint {
    pub fn new(config: WeasyPrintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeasyPrintConfig {
        &self.config
    }
}

impl RenderEngine for WeasyPrint {
    fn render(&self, document: &Document, stylesheet: &Stylesheet) -> Result<Vec<u8>, ExportError> {
        let dir = tempfile::tempdir()?;
        let html_path = dir.path().join("document.html");
        let css_path = dir.path().join("report.css");
        let pdf_path = dir.path().join("report.pdf");

        std::fs::write(&html_path, &document.html)?;
        std::fs::write(&css_path, stylesheet.to_css())?;

        let mut cmd = Command::new(&self.config.binary);
        cmd.arg("--encoding").arg("utf-8").arg("-s").arg(&css_path);
        if let Some(base_url) = &self.config.base_url {
            cmd.arg("-u").arg(base_url);
        }
        cmd.arg(&html_path).arg(&pdf_path);

        debug!(
            binary = %self.config.binary.display(),
            base_url = self.config.base_url.as_deref(),
            "invoking weasyprint"
        );
        let started = Instant::now();

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExportError::EngineUnavailable(format!(
                    "`{}` not found; install WeasyPrint or set {BINARY_ENV}",
                    self.config.binary.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        let failed = failed_resources(&stderr);

        if !output.status.success() {
            let origin = failed
                .first()
                .and_then(|url| document.resource_origin(url))
                .cloned();
            return Err(ExportError::RenderEngine {
                origin,
                message: format!("weasyprint exited with {}: {}", output.status, stderr.trim()),
            });
        }

        if let Some(url) = failed.first() {
            if self.config.strict_resources {
                return Err(ExportError::RenderEngine {
                    origin: document.resource_origin(url).cloned(),
                    message: format!("could not load resource {url}"),
                });
            }
            for url in &failed {
                warn!(url = url.as_str(), origin = ?document.resource_origin(url), "resource failed to load");
            }
        }

        let bytes = std::fs::read(&pdf_path)?;
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ExportError::RenderEngine {
                origin: None,
                message: "engine output is not a PDF".to_string(),
            });
        }

        debug!(
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "weasyprint finished"
        );
        Ok(bytes)
    }
}

/// URLs named by "Failed to load ..." lines in WeasyPrint's log output, in
/// the order they appear.
///
/// WeasyPrint logs e.g. `ERROR: Failed to load image at 'https://x/a.png': ...`.
pub fn failed_resources(stderr: &str) -> Vec<String> {
    stderr
        .lines()
        .filter_map(|line| {
            let rest = &line[line.find("Failed to load")?..];
            let rest = &rest[rest.find(" at ")? + 4..];
            let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
            let rest = &rest[1..];
            let end = rest.find(quote)?;
            Some(rest[..end].to_string())
        })
        .collect()
}
