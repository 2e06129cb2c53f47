//! CLI command structure using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cardlab_core::scale::Viewport;

#[derive(Parser)]
#[command(name = "cardlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the regions and institutions of a template store
    Catalog {
        #[command(flatten)]
        store: StoreArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a document preview from a template store
    Render {
        #[command(flatten)]
        store: StoreArgs,

        /// Region id
        #[arg(long)]
        region: String,

        /// Institution id
        #[arg(long)]
        institution: String,

        /// Document id (defaults to the institution's first available document)
        #[arg(long)]
        document: Option<String>,

        /// TOML file of form field values (`fieldId = "value"`)
        #[arg(long)]
        fields: Option<PathBuf>,

        /// Attach a file to a file input, as `inputId=path` (repeatable)
        #[arg(long = "attach", value_parser = parse_attachment)]
        attachments: Vec<(String, PathBuf)>,

        /// Viewport to fit the preview into, as `WIDTHxHEIGHT`
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<Viewport>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Template store location: exactly one of a base URL or a local directory
#[derive(Args)]
pub struct StoreArgs {
    /// Base URL of an HTTP template store
    #[arg(long, conflicts_with = "templates")]
    pub base_url: Option<String>,

    /// Path of a local template directory
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

fn parse_attachment(raw: &str) -> Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((id, path)) if !id.is_empty() && !path.is_empty() => {
            Ok((id.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected `inputId=path`, got `{}`", raw)),
    }
}

fn parse_viewport(raw: &str) -> Result<Viewport, String> {
    let (w, h) = raw
        .split_once('x')
        .ok_or_else(|| format!("expected `WIDTHxHEIGHT`, got `{}`", raw))?;
    let width: f64 = w.parse().map_err(|_| format!("invalid width `{}`", w))?;
    let height: f64 = h.parse().map_err(|_| format!("invalid height `{}`", h))?;
    if width <= 0.0 || height <= 0.0 {
        return Err("viewport dimensions must be positive".to_string());
    }
    Ok(Viewport { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attachment() {
        let (id, path) = parse_attachment("studentPhoto=/tmp/me.png").unwrap();
        assert_eq!(id, "studentPhoto");
        assert_eq!(path, PathBuf::from("/tmp/me.png"));
        assert!(parse_attachment("nopath").is_err());
        assert!(parse_attachment("=x").is_err());
    }

    #[test]
    fn test_parse_viewport() {
        let vp = parse_viewport("800x600").unwrap();
        assert_eq!(vp.width, 800.0);
        assert_eq!(vp.height, 600.0);
        assert!(parse_viewport("800").is_err());
        assert!(parse_viewport("0x600").is_err());
    }
}
