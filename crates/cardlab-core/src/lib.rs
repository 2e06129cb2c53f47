// Core modules
pub mod attachments;
pub mod binding;
pub mod catalog;
pub mod computed;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod fragment;
pub mod notify;
pub mod preview;
pub mod resolve;
pub mod scale;

// Re-export commonly used types
pub use engine::{PreviewEngine, PrintTrigger, ResourceStore};
pub use error::{CardlabError, Result};
pub use notify::{Notice, Notifier, NullNotifier};
