//! Map persistence.

pub mod json_format;

pub use json_format::{load_json, read_json, save_json, write_json};
