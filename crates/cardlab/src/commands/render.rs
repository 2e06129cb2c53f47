//! Render command - run a full preview pass and print the result

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;

use cardlab_core::engine::{PreviewEngine, ResourceStore};
use cardlab_core::notify::{Notice, Notifier};
use cardlab_core::preview::NodeContent;
use cardlab_core::scale::Viewport;

use crate::cli::StoreArgs;
use crate::notify::CliNotifier;
use crate::output::print_json;

pub struct RenderOptions {
    pub region: String,
    pub institution: String,
    pub document: Option<String>,
    pub fields: Option<PathBuf>,
    pub attachments: Vec<(String, PathBuf)>,
    pub viewport: Option<Viewport>,
    pub json: bool,
    pub verbose: bool,
}

/// Render one document preview end to end
pub fn run(store: &StoreArgs, opts: RenderOptions) -> Result<()> {
    let store = super::open_store(store)?;
    let notifier = CliNotifier::new(opts.json);
    let mut engine = PreviewEngine::initialize(store, notifier.clone())?;

    engine.select_region(Some(&opts.region))?;
    engine.select_institution(Some(&opts.institution))?;
    if engine.config().is_none() {
        bail!(
            "institution template '{}/{}' could not be loaded",
            opts.region,
            opts.institution
        );
    }

    if let Some(document) = &opts.document {
        engine.select_document(document)?;
    }
    if engine.preview().is_placeholder() {
        bail!(
            "institution '{}' has no renderable document",
            opts.institution
        );
    }

    if let Some(path) = &opts.fields {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read fields file {}", path.display()))?;
        let values: BTreeMap<String, String> = toml::from_str(&text)
            .with_context(|| format!("failed to parse fields file {}", path.display()))?;
        for (id, value) in &values {
            if !engine.set_field(id, value) {
                notifier.notify(Notice::warning(format!(
                    "unknown field id '{}' in fields file",
                    id
                )));
            }
        }
    }

    for (input_id, path) in &opts.attachments {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read attachment {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        engine.attach_file(input_id, &file_name, bytes)?;
    }
    engine.render_attachments();

    if let Some(viewport) = opts.viewport {
        engine.set_viewport(viewport);
    }

    if opts.json {
        render_json(&engine, &notifier)?;
    } else {
        render_human(&engine, opts.verbose);
    }
    Ok(())
}

fn render_json<S: ResourceStore>(
    engine: &PreviewEngine<S, CliNotifier>,
    notifier: &CliNotifier,
) -> Result<()> {
    let output = json!({
        "schema_version": "1.0",
        "selection": engine.selection(),
        "stylesheet": engine.stylesheet(),
        "documents": engine.documents(),
        "preview": engine.preview(),
        "notices": notifier.notices(),
    });
    print_json(&serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn render_human<S: ResourceStore>(engine: &PreviewEngine<S, CliNotifier>, verbose: bool) {
    if verbose {
        if let Some(link) = engine.stylesheet() {
            println!("{} stylesheet: {}", "→".cyan(), link.href);
        }
        for entry in engine.documents() {
            let marker = if entry.active { "*" } else { " " };
            println!("{} {} {} ({})", "→".cyan(), marker, entry.name, entry.id);
        }
    }

    for (index, artifact) in engine.preview().artifacts.iter().enumerate() {
        let scale = artifact
            .transform
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{} artifact {} ({}x{}, scale {})",
            "→".cyan(),
            index + 1,
            artifact.natural_width,
            artifact.natural_height,
            scale
        );
        for node in &artifact.nodes {
            match &node.content {
                NodeContent::Text(text) => println!("  {}: {}", node.key.bold(), text),
                NodeContent::Image { data_uri, .. } => {
                    let state = if data_uri.is_some() {
                        "[image attached]".green()
                    } else {
                        "[no image]".dimmed()
                    };
                    println!("  {}: {}", node.key.bold(), state);
                }
            }
        }
    }
}
