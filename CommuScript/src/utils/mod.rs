//! Utility functions

pub mod json;
pub mod path;

pub use json::{to_pretty_json, write_pretty_json};
pub use path::{expand_path, file_stem_str};
