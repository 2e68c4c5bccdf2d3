use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::block::BlockRecord;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Template {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

impl Template {
    /// Blocks for a new report created from this template, in template order.
    pub fn instantiate(&self) -> Vec<BlockRecord> {
        let mut blocks = self.blocks.clone();
        blocks.sort_by_key(|b| b.order);
        blocks
    }

    pub fn to_export(&self) -> TemplateExport {
        TemplateExport {
            name: self.name.clone(),
            description: self.description.clone(),
            blocks: self.instantiate(),
        }
    }
}

/// Portable template file: name, description and the ordered block list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateExport {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub blocks: Vec<BlockRecord>,
}

#[derive(Deserialize)]
struct RawTemplateExport {
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    blocks: Option<Vec<BlockRecord>>,
}

impl TemplateExport {
    /// Parse an exported template file.
    ///
    /// The name and the block list are required. Block `order` values are
    /// rewritten to the position in the file, so hand-edited files with
    /// duplicate or missing orders still import deterministically.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: RawTemplateExport = serde_json::from_str(json)?;

        let name = raw
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CoreError::InvalidTemplate("missing template name".to_string()))?;
        let mut blocks = raw
            .blocks
            .ok_or_else(|| CoreError::InvalidTemplate("missing block list".to_string()))?;

        for (position, block) in blocks.iter_mut().enumerate() {
            block.order = position as i32;
        }

        Ok(Self {
            name,
            description: raw.description.unwrap_or_default(),
            blocks,
        })
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
