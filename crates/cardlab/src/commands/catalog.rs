//! Catalog command - list regions and institutions

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use cardlab_core::catalog::Catalog;
use cardlab_core::engine::ResourceStore;

use crate::cli::StoreArgs;
use crate::output::print_json;

/// List the template store's catalog
pub fn run(store: &StoreArgs, json: bool, verbose: bool) -> Result<()> {
    let store = super::open_store(store)?;
    let manifest = store.fetch_manifest()?;
    let catalog = Catalog::from_json(&manifest)?;

    if json {
        render_json(&catalog)?;
    } else {
        render_human(&catalog, verbose);
    }
    Ok(())
}

fn render_json(catalog: &Catalog) -> Result<()> {
    let output = json!({
        "schema_version": "1.0",
        "regions": catalog.regions,
    });
    print_json(&serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn render_human(catalog: &Catalog, verbose: bool) {
    if catalog.regions.is_empty() {
        println!("No regions in this template store.");
        return;
    }

    for region in &catalog.regions {
        println!("{} ({})", region.name.bold(), region.id);
        for institution in &region.institutions {
            println!("  - {} ({})", institution.name, institution.id);
        }
        if verbose && region.institutions.is_empty() {
            println!("  (no institutions)");
        }
    }
}
