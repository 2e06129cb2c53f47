//! Resource store backends for cardlab
//!
//! Implementations of `cardlab_core::ResourceStore` over HTTP and the local
//! filesystem, sharing the deterministic path scheme from the core crate.

pub mod client;
pub mod store;

pub use store::{DirResourceStore, HttpResourceStore};
