//! Bridge between the egui thread and the backend worker that owns the search controller.

pub mod binding;
pub mod commands;
pub mod runtime;
