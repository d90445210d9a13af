pub mod editor;
pub mod error;
pub mod export;
pub mod library;
pub mod model;
pub mod validate;
pub mod wasm;

pub use error::{Result, WorkflowError};
pub use validate::{ValidationResult, can_connect, has_cycle, validate_node, validate_workflow};
