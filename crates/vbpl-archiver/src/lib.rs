//! vbpl-archiver — archive legal-document pages and original PDFs from the
//! vbpl.vn portal.
//!
//! This library crate exposes the runtime modules for integration testing.

pub mod cli;
pub mod config;
pub mod endpoints;
pub mod http_client;
pub mod persist;
pub mod pipeline;
pub mod renderer;

pub use config::ArchiverConfig;
pub use endpoints::Endpoints;
pub use http_client::{DownloadOutcome, HttpClient};
pub use persist::{Persister, SaveOutcome};
pub use pipeline::{FetchStatus, ItemReport, Orchestrator, RunSummary};
pub use renderer::PageRenderer;
