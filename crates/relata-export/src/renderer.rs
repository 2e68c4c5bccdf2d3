use std::time::Instant;

use serde::Serialize;
use tracing::info;

use relata_core::filenames;
use relata_core::models::pdf_config::PdfConfigRecord;
use relata_core::models::report::ReportRecord;

use crate::document::assemble;
use crate::error::ExportError;
use crate::labels::Labels;
use crate::pdf::{RenderEngine, WeasyPrint};
use crate::request::ReportRenderRequest;
use crate::styles::StyleConfig;
use crate::stylesheet::synthesize_with_labels;

/// A finished PDF and the name it should be downloaded under.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// The engine inputs, for inspecting a report without rendering it.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub html: String,
    pub css: String,
}

/// Runs the whole pipeline: placeholder resolution, Markdown conversion,
/// document assembly, stylesheet synthesis, then the engine.
///
/// Holds no per-render state; share one instance across threads.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer<E = WeasyPrint> {
    engine: E,
    labels: Labels,
}

impl<E: RenderEngine> ReportRenderer<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            labels: Labels::default(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Render `request` to PDF. Nothing is returned on failure.
    pub fn render(&self, request: &ReportRenderRequest) -> Result<RenderedReport, ExportError> {
        let started = Instant::now();

        let stylesheet = synthesize_with_labels(&request.style, &self.labels)?;
        let document = assemble(request, &self.labels)?;
        let bytes = self.engine.render(&document, &stylesheet)?;

        info!(
            report_number = request.report_number.as_str(),
            blocks = request.blocks.len(),
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report rendered"
        );

        Ok(RenderedReport {
            bytes,
            filename: filenames::report_pdf(&request.title, &request.client_name),
        })
    }

    /// Convenience wrapper building the request from stored records.
    pub fn render_records(
        &self,
        report: &ReportRecord,
        config: &PdfConfigRecord,
    ) -> Result<RenderedReport, ExportError> {
        let style = StyleConfig::resolve(config).config;
        self.render(&ReportRenderRequest::from_records(report, style)?)
    }

    /// The HTML and CSS the engine would receive.
    pub fn render_preview(&self, request: &ReportRenderRequest) -> Result<Preview, ExportError> {
        let stylesheet = synthesize_with_labels(&request.style, &self.labels)?;
        let document = assemble(request, &self.labels)?;
        Ok(Preview {
            html: document.html,
            css: stylesheet.to_css(),
        })
    }
}
