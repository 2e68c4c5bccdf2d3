use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::block::BlockRecord;

/// Number handed to the very first report of an installation.
pub const FIRST_REPORT_NUMBER: &str = "4002506";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportRecord {
    #[ts(type = "number")]
    pub id: i64,
    #[serde(default)]
    pub report_number: String,
    /// Legacy key still sent by older frontends. Only read when
    /// `report_number` is empty.
    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub proposal_number: Option<String>,
    pub title: String,
    pub client_name: String,
    #[ts(type = "string")]
    pub created_at: CreatedAt,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub template_id: Option<i64>,
    /// `None` when the record arrived without a block container at all,
    /// which is distinct from a report with zero blocks.
    #[serde(default)]
    pub blocks: Option<Vec<BlockRecord>>,
}

impl ReportRecord {
    /// The report number, falling back to the legacy `proposal_number` key.
    pub fn number(&self) -> &str {
        if !self.report_number.is_empty() {
            return &self.report_number;
        }
        self.proposal_number.as_deref().unwrap_or_default()
    }

    /// Blocks sorted by their `order` field. Equal orders keep their
    /// position in the stored list.
    pub fn ordered_blocks(&self) -> Result<Vec<&BlockRecord>, CoreError> {
        let blocks = self
            .blocks
            .as_ref()
            .ok_or_else(|| CoreError::MissingField("blocks".to_string()))?;
        let mut ordered: Vec<&BlockRecord> = blocks.iter().collect();
        ordered.sort_by_key(|b| b.order);
        Ok(ordered)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Rejected,
}

/// Creation date as supplied by the storage layer.
///
/// Older exports carry naive ISO datetimes without an offset, and some
/// callers hand over an already formatted date string which is shown as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    Timestamp(jiff::Timestamp),
    Civil(jiff::civil::DateTime),
    Text(String),
}

impl CreatedAt {
    /// `DD/MM/YYYY` for real dates (timestamps are read in UTC), verbatim
    /// text otherwise.
    pub fn display_date(&self) -> String {
        match self {
            CreatedAt::Timestamp(ts) => ts
                .to_zoned(jiff::tz::TimeZone::UTC)
                .date()
                .strftime("%d/%m/%Y")
                .to_string(),
            CreatedAt::Civil(dt) => dt.date().strftime("%d/%m/%Y").to_string(),
            CreatedAt::Text(text) => text.clone(),
        }
    }
}

impl From<jiff::Timestamp> for CreatedAt {
    fn from(ts: jiff::Timestamp) -> Self {
        CreatedAt::Timestamp(ts)
    }
}

/// Next sequential report number: one past the largest numeric number in
/// `existing`, or [`FIRST_REPORT_NUMBER`] when none of them parse.
pub fn next_report_number<I, S>(existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    existing
        .into_iter()
        .filter_map(|n| n.as_ref().trim().parse::<u64>().ok())
        .max()
        .map(|last| (last + 1).to_string())
        .unwrap_or_else(|| FIRST_REPORT_NUMBER.to_string())
}
