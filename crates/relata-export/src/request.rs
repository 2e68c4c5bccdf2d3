use jiff::civil::Date;

use relata_core::models::block::BlockRecord;
use relata_core::models::report::{CreatedAt, ReportRecord};

use crate::error::ExportError;
use crate::styles::StyleConfig;

/// One block as seen by the renderer. Its position in
/// [`ReportRenderRequest::blocks`] is its order.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub title: String,
    /// Markdown source.
    pub content: String,
    pub page_break_before: bool,
}

impl From<&BlockRecord> for BlockView {
    fn from(block: &BlockRecord) -> Self {
        Self {
            title: block.title.clone(),
            content: block.content.clone(),
            page_break_before: block.page_break_before,
        }
    }
}

/// Everything one render needs, built fresh per call and only read afterwards.
#[derive(Debug, Clone)]
pub struct ReportRenderRequest {
    pub report_number: String,
    pub title: String,
    pub client_name: String,
    pub created_at: CreatedAt,
    pub blocks: Vec<BlockView>,
    pub style: StyleConfig,
    /// Date substituted for the `CURRENT_*` placeholders.
    pub render_date: Date,
}

impl ReportRenderRequest {
    /// Build a request from stored records, rendering as of today.
    ///
    /// Fails only when the report has no block container at all; an empty
    /// block list is a valid report.
    pub fn from_records(report: &ReportRecord, style: StyleConfig) -> Result<Self, ExportError> {
        let blocks = report
            .ordered_blocks()?
            .into_iter()
            .map(BlockView::from)
            .collect();

        Ok(Self {
            report_number: report.number().to_string(),
            title: report.title.clone(),
            client_name: report.client_name.clone(),
            created_at: report.created_at.clone(),
            blocks,
            style,
            render_date: jiff::Zoned::now().date(),
        })
    }

    /// Pin the date used for `CURRENT_*` placeholders.
    pub fn with_render_date(mut self, date: Date) -> Self {
        self.render_date = date;
        self
    }
}
