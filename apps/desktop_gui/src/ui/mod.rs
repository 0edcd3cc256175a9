//! UI layer for desktop GUI: the single-window prediction form.

pub mod app;

pub use app::PredictorApp;
