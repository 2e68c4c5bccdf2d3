pub mod block;
pub mod pdf_config;
pub mod placeholder;
pub mod report;
pub mod template;
