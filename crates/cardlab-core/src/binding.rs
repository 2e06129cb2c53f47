//! Binding engine
//!
//! An explicit registry linking binding keys to their producer inputs and
//! consumer preview nodes. The registry is rebuilt once per fragment swap;
//! the sync pass never re-scans markup. One producer may fan out to many
//! consumers (e.g. the front and back of a card).

use std::collections::BTreeMap;

use base64::Engine as _;

use crate::attachments::AttachmentCache;
use crate::computed::{format_date, parse_date};
use crate::form::FormModel;
use crate::fragment::InputKind;
use crate::preview::PreviewDoc;

#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    entries: BTreeMap<String, BindingEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct BindingEntry {
    /// Producer input ids
    pub producers: Vec<String>,
    /// Number of consumer nodes currently in the preview
    pub consumers: usize,
}

impl BindingRegistry {
    /// Build the registry from the current form and preview content
    pub fn build(form: &FormModel, preview: &PreviewDoc) -> Self {
        let mut entries: BTreeMap<String, BindingEntry> = BTreeMap::new();

        for field in form.fields() {
            if let Some(key) = &field.bind_key {
                entries
                    .entry(key.clone())
                    .or_default()
                    .producers
                    .push(field.id.clone());
            }
        }
        for artifact in &preview.artifacts {
            for node in &artifact.nodes {
                entries.entry(node.key.clone()).or_default().consumers += 1;
            }
        }

        Self { entries }
    }

    pub fn entry(&self, key: &str) -> Option<&BindingEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    fn bound_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        // (key, producer id) for every producer of every key
        self.entries
            .iter()
            .flat_map(|(key, e)| e.producers.iter().map(move |p| (key.as_str(), p.as_str())))
    }
}

/// A deferred image decode, tagged with the engine generation it was issued
/// under (bumped on every selection transition and attachment change).
/// Completions whose generation no longer matches the engine's current
/// generation are discarded - last-requested-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTicket {
    pub input_id: String,
    pub bind_key: String,
    pub generation: u64,
}

/// Synchronize every bound producer to its consumers.
///
/// Text and date rules are applied immediately. File rules emit decode
/// tickets for the host to fulfil via `PreviewEngine::complete_decode`;
/// inputs without a cached attachment have their image consumers cleared.
pub fn sync_bindings(
    registry: &BindingRegistry,
    form: &FormModel,
    attachments: &AttachmentCache,
    preview: &mut PreviewDoc,
    generation: u64,
) -> Vec<DecodeTicket> {
    let mut tickets = Vec::new();

    for (key, producer_id) in registry.bound_pairs() {
        let Some(field) = form.field(producer_id) else {
            continue;
        };
        match field.kind {
            InputKind::File => {
                if attachments.get(producer_id).is_some() {
                    tickets.push(DecodeTicket {
                        input_id: producer_id.to_string(),
                        bind_key: key.to_string(),
                        generation,
                    });
                } else {
                    preview.clear_image(key);
                }
            }
            InputKind::Date => {
                let text = parse_date(&field.value).map(format_date).unwrap_or_default();
                preview.set_text(key, &text);
            }
            InputKind::Text => {
                // The suffix is per consumer node, not per producer
                let value = field.value.clone();
                for node in preview.nodes_mut(key) {
                    if let crate::preview::NodeContent::Text(ref mut t) = node.content {
                        *t = format!("{}{}", value, node.suffix);
                    }
                }
            }
        }
    }

    tickets
}

/// Render attachment bytes as an embeddable data URI
pub fn encode_data_uri(file_name: &str, bytes: &[u8]) -> String {
    let mime = match file_name.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "svg" => "image/svg+xml",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "application/octet-stream",
    };
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
