//! Infrastructure layer for filesystem and environment interactions.

pub mod color_scheme;
pub mod paths;

pub use color_scheme::host_prefers_dark;
pub use paths::{expand_tilde, get_data_dir, LOG_FILE_NAME, STORE_FILE_NAME};
