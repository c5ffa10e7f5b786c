//! Tool catalog and argument validation.

pub mod arguments;
pub mod catalog;
pub mod requests;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use catalog::{all_tools, ToolDefinition};
pub use requests::{validate, Operation, TrelloRequest};
pub use types::ToolParameters;
