//! # ccommits-lsp
//!
//! Language server that validates Conventional Commits headers while the
//! commit message is being edited.
//!
//! Edits arrive incrementally and are replayed onto a per-document
//! [`buffer::TextBuffer`]; after every change the full content is analysed
//! and at most one diagnostic, pointing at the first violation, is published.

pub mod backend;
pub mod buffer;
pub mod config;
pub mod diagnostics;
pub mod document;

pub use backend::{CommitLanguageServer, LspClient};
pub use buffer::{Edit, RangeError, TextBuffer, TextPosition, TextRange};
pub use config::Config;
pub use diagnostics::analyze;
pub use document::{Document, DocumentStore};
