//! Engine module: CLI surface, filter predicate, path tools, progress and summary output

pub mod arg_parser;
pub mod filter;
pub mod handlers;
pub mod progress;
pub mod summary;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use filter::{FilterCriteria, dotted_extension, is_hidden};
pub use handlers::handle_run;
pub use summary::print_summary;
pub use tools::{format_bytes, path_relative_to, path_to_display_string};
