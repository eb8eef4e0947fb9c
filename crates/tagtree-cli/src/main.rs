//! `tagtree` CLI — convert save-tree JSON between lossless and plain forms.
//!
//! ## Usage
//!
//! ```sh
//! # Lossless (tag-annotated) JSON → plain hand-editable JSON
//! tagtree plain -i quests.json -o quests.plain.json
//!
//! # Plain JSON back to lossless form (types recovered by inference)
//! tagtree tagged -i quests.plain.json
//!
//! # Decode a file and report every anomaly the decoder had to paper over
//! tagtree check -i quests.json
//! echo '{"x": 1, "x:3": 2}' | tagtree check
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use tagtree_core::{CollectSink, FormatMode, LogSink, Severity};

#[derive(Parser)]
#[command(name = "tagtree", version, about = "Tagged save-tree JSON converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert lossless (tag-annotated) JSON to plain editable JSON
    Plain {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert plain JSON back to lossless (tag-annotated) JSON
    Tagged {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode a file and report decoder diagnostics
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Which form the input is in
        #[arg(long, value_enum, default_value_t = Mode::Lossless)]
        mode: Mode,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Lossless,
    Plain,
}

impl From<Mode> for FormatMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Lossless => FormatMode::Lossless,
            Mode::Plain => FormatMode::Plain,
        }
    }
}

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .init()
        .ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plain { input, output } => {
            convert(input.as_deref(), output.as_deref(), FormatMode::Lossless, FormatMode::Plain)
        }
        Commands::Tagged { input, output } => {
            convert(input.as_deref(), output.as_deref(), FormatMode::Plain, FormatMode::Lossless)
        }
        Commands::Check { input, mode } => check(input.as_deref(), mode.into()),
    }
}

/// Decode the input in `from` mode and re-encode it in `to` mode. Decoder
/// warnings go to the logger (stderr).
fn convert(
    input: Option<&str>,
    output: Option<&str>,
    from: FormatMode,
    to: FormatMode,
) -> Result<()> {
    let text = read_input(input)?;
    let root = tagtree_core::decode_from_str(&text, from, &mut LogSink)
        .context("Failed to decode input")?;
    let rendered =
        tagtree_core::encode_to_string_pretty(&root, to).context("Failed to encode output")?;
    write_output(output, &rendered)
}

/// Decode the input and print every diagnostic the decoder emitted.
fn check(input: Option<&str>, mode: FormatMode) -> Result<()> {
    let text = read_input(input)?;
    let mut sink = CollectSink::new();
    tagtree_core::decode_from_str(&text, mode, &mut sink).context("Failed to decode input")?;

    if sink.diagnostics.is_empty() {
        println!("no issues found");
        return Ok(());
    }

    for diagnostic in &sink.diagnostics {
        let label = match diagnostic.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("{label}: {}", diagnostic.message);
    }
    println!("{} issue(s) found", sink.diagnostics.len());
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
