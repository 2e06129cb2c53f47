//! Attachment persistence cache
//!
//! File selections cannot be reproduced by re-rendering a form fragment, so
//! they are held here as owned values (bytes + filename) keyed by input
//! identifier. The rendering layer always reads from this cache; swapping a
//! document fragment within an institution leaves it untouched, while
//! leaving an institution clears it completely (a selection is meaningless
//! across institutions).
//!
//! The cache is identifier-scoped, not document-scoped: an attachment for
//! `studentPhoto` applies to any fragment declaring a `studentPhoto` input.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentCache {
    entries: BTreeMap<String, Attachment>,
}

impl AttachmentCache {
    /// Retain a selected file for an input. Empty selections are dropped -
    /// the cache holds only inputs that currently have a file.
    pub fn attach(&mut self, input_id: &str, attachment: Attachment) {
        if attachment.bytes.is_empty() {
            self.entries.remove(input_id);
        } else {
            self.entries.insert(input_id.to_string(), attachment);
        }
    }

    pub fn detach(&mut self, input_id: &str) {
        self.entries.remove(input_id);
    }

    pub fn get(&self, input_id: &str) -> Option<&Attachment> {
        self.entries.get(input_id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}
