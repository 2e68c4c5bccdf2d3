//! relata-core
//!
//! Pure domain types for reports, templates and PDF configuration, plus the
//! placeholder catalog and download filename conventions.
//! No rendering dependency; this is the shared vocabulary of the Relata system.

pub mod error;
pub mod filenames;
pub mod models;
