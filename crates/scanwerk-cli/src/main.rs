// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanwerk: command-line QR image decoder.
//
// Entry point. Initialises logging, parses arguments, runs the decode
// pipeline, and prints the payload (or the full report as JSON).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use scanwerk_core::config::DecodeConfig;
use scanwerk_core::human_errors::humanize_error;
use scanwerk_core::types::ImageKind;
use scanwerk_decode::DecodePipeline;

#[derive(Parser)]
#[command(name = "scanwerk")]
#[command(about = "Decode the text payload of a QR code image")]
#[command(version)]
struct Cli {
    /// Path to the image file to decode.
    image: PathBuf,

    /// Print the full scan report as JSON instead of the bare payload.
    #[arg(long)]
    json: bool,

    /// Override the text-encoding fallback order (repeatable, in priority order).
    #[arg(long = "encoding", value_name = "LABEL")]
    encodings: Vec<String>,

    /// Skip the quadrant-crop stages of the cascade.
    #[arg(long)]
    no_quadrants: bool,

    /// Longest image side above which a downscaled variant is also tried.
    #[arg(long, value_name = "PIXELS")]
    max_dimension: Option<u32>,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries nothing but the payload.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "decode failed");
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> scanwerk_core::error::Result<()> {
    let mut config = DecodeConfig::default();
    if !cli.encodings.is_empty() {
        config.encodings = cli.encodings.clone();
    }
    if cli.no_quadrants {
        config.try_quadrants = false;
    }
    if let Some(max_dimension) = cli.max_dimension {
        config.max_dimension = max_dimension;
    }

    if let Some(ext) = cli.image.extension().and_then(|e| e.to_str()) {
        if ImageKind::from_extension(ext).is_none() {
            tracing::warn!(
                extension = ext,
                "unrecognized image extension, relying on content sniffing"
            );
        }
    }

    let pipeline = DecodePipeline::new(config)?;
    let report = pipeline.decode_path(&cli.image)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.payload.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn encodings_flag_repeats() {
        let cli = Cli::parse_from([
            "scanwerk",
            "tag.png",
            "--encoding",
            "utf-8",
            "--encoding",
            "big5",
        ]);
        assert_eq!(cli.encodings, ["utf-8", "big5"]);
        assert!(!cli.json);
    }
}
