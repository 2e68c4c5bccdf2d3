use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_BLOCK_TYPE: &str = "text";

fn default_block_type() -> String {
    DEFAULT_BLOCK_TYPE.to_string()
}

/// One titled Markdown section of a report or template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BlockRecord {
    #[serde(default)]
    pub title: String,
    /// Markdown source.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_block_type")]
    pub block_type: String,
    #[serde(default)]
    pub page_break_before: bool,
}

/// A user's saved block, reusable across templates and reports.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BlockFavorite {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub title: String,
    pub content: String,
    #[serde(default = "default_block_type")]
    pub block_type: String,
    #[serde(default)]
    pub page_break_before: bool,
}

impl BlockFavorite {
    /// Copy this favorite into a block placed at `order`.
    pub fn to_block(&self, order: i32) -> BlockRecord {
        BlockRecord {
            title: self.title.clone(),
            content: self.content.clone(),
            order,
            block_type: self.block_type.clone(),
            page_break_before: self.page_break_before,
        }
    }
}
