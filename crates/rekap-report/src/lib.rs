//! # rekap-report: Report Rendering for Rekap POS
//!
//! Turns an [`Aggregation`](rekap_core::Aggregation) into something a person
//! reads: a table view for the terminal or a paginated PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Aggregation + Snapshot + ReportOptions + printed_at                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportDocument::build    (every cell formatted once)                  │
//! │       │                                                                 │
//! │       ├──────────────► render_text ──► String (screen)                 │
//! │       │                                                                 │
//! │       └──────────────► render_pdf  ──► RenderedPdf                     │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                        export_pdf  ──► report-YYYY-MM-DD.pdf           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - Report model shared by both renderers
//! - [`text`] - Terminal rendering
//! - [`pdf`] - PDF layout and pagination
//! - [`export`] - Writing the PDF artifact
//! - [`error`] - Export errors

pub mod document;
pub mod error;
pub mod export;
pub mod pdf;
pub mod text;

#[cfg(test)]
mod test_support;

pub use document::{Align, Column, ReportDocument, ReportOptions, SummaryLine, Table, DEFAULT_TITLE};
pub use error::{ExportError, ExportResult};
pub use export::{export_pdf, file_name_for, ExportArtifact, ExportTarget};
pub use pdf::{render_pdf, RenderedPdf};
pub use text::{render_table, render_text};
