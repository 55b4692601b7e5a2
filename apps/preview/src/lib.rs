//! # gstdesk Preview Library
//!
//! Configuration, logging and record handling behind the `gstdesk-preview`
//! binary. All document logic lives in `gstdesk-core`.
//!
//! ## Module Organization
//! ```text
//! gstdesk_preview/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── config.rs       ◄─── PreviewConfig: defaults, preview.toml, GSTDESK_* env
//! ├── preview.rs      ◄─── record → header + lines → pages → HTML / JSON
//! └── error.rs        ◄─── PreviewError for the whole app
//! ```

pub mod config;
pub mod error;
pub mod preview;

pub use config::PreviewConfig;
pub use error::{PreviewError, PreviewResult};
pub use preview::{render_preview, OutputFormat};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so the preview on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=gstdesk_core=trace` - Trace every pagination decision
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gstdesk_core=info,gstdesk_preview=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
