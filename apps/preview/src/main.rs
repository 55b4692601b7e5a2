//! # gstdesk Preview Entry Point
//!
//! Reads one document record and writes its print preview.
//!
//! ## Usage
//! ```text
//! gstdesk-preview invoice.json --kind invoice > invoice.html
//! cat quote.json | gstdesk-preview - --kind quotation --format json
//! gstdesk-preview po.json --kind purchase-order --config ./preview.toml --strict -o po.html
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Load configuration (defaults → preview.toml → GSTDESK_* env)
//! 3. Read the record (file or stdin)
//! 4. Render and write the preview (file or stdout)

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use gstdesk_core::DocumentKind;
use gstdesk_preview::{init_tracing, render_preview, OutputFormat, PreviewConfig, PreviewResult};

#[derive(Debug, Parser)]
#[command(name = "gstdesk-preview", version, about = "Render a GST document record as paginated print preview")]
struct Cli {
    /// Document record (JSON); `-` reads stdin.
    input: String,

    /// Document type: invoice, quotation, purchase-order, eway-bill.
    #[arg(short, long, default_value = "invoice")]
    kind: DocumentKind,

    /// Config file; defaults to preview.toml in the user config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "html")]
    format: OutputFormat,

    /// Reject negative amounts, out-of-range rates and malformed HSN codes.
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Preview failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> PreviewResult<()> {
    let mut config = PreviewConfig::load(cli.config)?;
    if cli.strict {
        config.validation.strict = true;
    }

    let input = if cli.input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&cli.input)?
    };

    let today = chrono::Local::now().date_naive();
    let rendered = render_preview(&input, cli.kind, cli.format, &config, today)?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!(?path, "Preview written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
