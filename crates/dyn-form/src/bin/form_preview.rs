//! form-preview
//!
//! Loads a form configuration, applies field values and prints the
//! resulting form as text. With `--submit` the values are submitted and
//! the record and its summary are printed.

use anyhow::{bail, Context, Result};
use clap::Parser;
use dyn_form::summary::build_summary;
use dyn_form::text::render_text;
use dyn_form::{
    FieldType, FileHandle, FormConfig, FormSession, FormValue, HiddenValuePolicy, LogSink,
    SessionOptions, UnsupportedFieldPolicy,
};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "form-preview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render and submit a JSON-configured form", long_about = None)]
struct Cli {
    /// Configuration file, or `-` for stdin
    config: String,

    /// Set a field value (repeatable). File fields take a path.
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Submit after applying values
    #[arg(long)]
    submit: bool,

    /// Show placeholders for unsupported field types
    #[arg(long)]
    diagnostics: bool,

    /// Drop values of fields that become hidden
    #[arg(long)]
    clear_hidden: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got \"{s}\"")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = load_config(&cli.config)?;
    info!(fields = config.len(), "configuration loaded");

    let mut options = SessionOptions::new();
    if cli.clear_hidden {
        options = options.hidden_values(HiddenValuePolicy::Clear);
    }
    if cli.diagnostics {
        options = options.unsupported(UnsupportedFieldPolicy::Diagnostic);
    }
    let mut session = FormSession::with_options(config, options);

    for (key, raw) in &cli.set {
        apply(&mut session, key, raw).with_context(|| format!("Cannot set {key}"))?;
    }

    print!("{}", render_text(&session.view()));

    if cli.submit {
        let submission = session.submit(&mut LogSink)?;
        println!();
        println!("{}", serde_json::to_string_pretty(&submission)?);
        for section in build_summary(session.config(), &submission) {
            println!();
            println!("{}", section.name);
            for entry in &section.entries {
                println!("  {}: {}", entry.label, entry.display);
            }
        }
    }

    Ok(())
}

fn load_config(source: &str) -> Result<FormConfig> {
    let text = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read configuration from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))?
    };
    FormConfig::from_json_str(&text).with_context(|| format!("Invalid form configuration in {source}"))
}

fn apply(session: &mut FormSession, key: &str, raw: &str) -> Result<()> {
    let Some(field) = session.config().field(key) else {
        bail!("no field with key \"{key}\"");
    };

    if field.field_type == FieldType::FileUpload {
        let handle = file_handle(Path::new(raw))?;
        debug!(field = %key, file = %handle.name, "file selected");
        session.select_files(key, [handle])?;
        return Ok(());
    }

    let value = FormValue::parse_for(field, raw)?;
    session.handle_input_change(key, value)?;
    Ok(())
}

fn file_handle(path: &Path) -> Result<FileHandle> {
    let meta = fs::metadata(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut handle = FileHandle::new(name).with_size(meta.len());
    if let Some(mime) = guess_mime(path) {
        handle = handle.with_mime_type(mime);
    }
    Ok(handle)
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => return None,
    };
    Some(mime)
}
