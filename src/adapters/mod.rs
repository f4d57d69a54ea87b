// Adapters layer: concrete implementations for external systems.

pub mod model_file;
