//! Generator settings and the Go build context

pub mod build_context;
mod settings;

// Re-export main types
pub use build_context::BuildContext;
pub use settings::GeneratorConfig;
