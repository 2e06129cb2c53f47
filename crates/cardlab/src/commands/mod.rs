//! CLI command implementations

pub mod catalog;
pub mod render;

use anyhow::{bail, Result};

use cardlab_core::engine::ResourceStore;
use cardlab_resources::{DirResourceStore, HttpResourceStore};

use crate::cli::StoreArgs;

/// Open the template store named by the CLI arguments
pub(crate) fn open_store(args: &StoreArgs) -> Result<Box<dyn ResourceStore>> {
    match (&args.base_url, &args.templates) {
        (Some(url), None) => Ok(Box::new(HttpResourceStore::new(url)?)),
        (None, Some(dir)) => Ok(Box::new(DirResourceStore::new(dir))),
        _ => bail!("specify exactly one of --base-url or --templates"),
    }
}
