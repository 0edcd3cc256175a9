//! Bridge from the UI thread to the async prediction worker.

pub mod commands;
pub mod runtime;
