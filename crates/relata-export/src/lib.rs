//! relata-export
//!
//! PDF rendering of reports: placeholder resolution, Markdown conversion,
//! document assembly, paged-media stylesheet synthesis and the render engine.

pub mod document;
pub mod error;
pub mod labels;
pub mod markdown;
pub mod pdf;
pub mod placeholders;
pub mod renderer;
pub mod request;
pub mod styles;
pub mod stylesheet;

pub use error::{ErrorKind, ErrorReport, ExportError};
pub use renderer::{Preview, RenderedReport, ReportRenderer};
pub use request::{BlockView, ReportRenderRequest};
pub use styles::StyleConfig;
