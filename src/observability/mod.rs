//! Structured logging to a rotating file.
//!
//! The binary draws its UI on stdout, so log records go to a file in the data
//! directory instead:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → recipebox.log(.<timestamp>)
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
