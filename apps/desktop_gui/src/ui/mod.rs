//! UI layer for the desktop GUI: search bar, error and results regions, viewer window.

pub mod app;

pub use app::DocSearchApp;
