//! Live preview model
//!
//! The rendered artifact tree the binding and computed engines write into.
//! Either a placeholder message is shown, or one or more artifacts built
//! from the current document fragment.

use serde::Serialize;

use crate::fragment::{NodeKind, PreviewFragment};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PreviewDoc {
    /// Placeholder text shown instead of artifacts (never scaled)
    pub placeholder: Option<String>,
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub natural_width: f64,
    pub natural_height: f64,
    /// Uniform fit-scale applied by the scaling controller, if any
    pub transform: Option<f64>,
    pub nodes: Vec<PreviewNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewNode {
    pub key: String,
    pub suffix: String,
    pub full_year: bool,
    pub content: NodeContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeContent {
    Text(String),
    Image {
        data_uri: Option<String>,
        placeholder_visible: bool,
    },
}

impl PreviewDoc {
    /// A preview showing only a placeholder message
    pub fn with_placeholder(message: impl Into<String>) -> Self {
        Self {
            placeholder: Some(message.into()),
            artifacts: Vec::new(),
        }
    }

    /// Instantiate the live model from a parsed preview fragment
    pub fn from_fragment(fragment: &PreviewFragment) -> Self {
        let artifacts = fragment
            .artifacts
            .iter()
            .map(|tpl| Artifact {
                natural_width: tpl.natural_width,
                natural_height: tpl.natural_height,
                transform: None,
                nodes: tpl
                    .nodes
                    .iter()
                    .map(|n| PreviewNode {
                        key: n.key.clone(),
                        suffix: n.suffix.clone(),
                        full_year: n.full_year,
                        content: match n.kind {
                            NodeKind::Text => NodeContent::Text(String::new()),
                            NodeKind::Image => NodeContent::Image {
                                data_uri: None,
                                placeholder_visible: true,
                            },
                        },
                    })
                    .collect(),
            })
            .collect();

        Self {
            placeholder: None,
            artifacts,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// All nodes bound to a key, across every artifact (one-to-many broadcast)
    pub fn nodes_mut<'a>(&'a mut self, key: &'a str) -> impl Iterator<Item = &'a mut PreviewNode> {
        self.artifacts
            .iter_mut()
            .flat_map(|a| a.nodes.iter_mut())
            .filter(move |n| n.key == key)
    }

    pub fn nodes<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a PreviewNode> {
        self.artifacts
            .iter()
            .flat_map(|a| a.nodes.iter())
            .filter(move |n| n.key == key)
    }

    /// Set the displayed text of every node bound to a key
    pub fn set_text(&mut self, key: &str, value: &str) {
        for node in self.nodes_mut(key) {
            if let NodeContent::Text(ref mut text) = node.content {
                *text = value.to_string();
            }
        }
    }

    /// Set the image of every image node bound to a key and hide its placeholder
    pub fn set_image(&mut self, key: &str, data_uri: &str) {
        for node in self.nodes_mut(key) {
            if let NodeContent::Image {
                data_uri: ref mut uri,
                ref mut placeholder_visible,
            } = node.content
            {
                *uri = Some(data_uri.to_string());
                *placeholder_visible = false;
            }
        }
    }

    /// Clear the image of every image node bound to a key and show its placeholder
    pub fn clear_image(&mut self, key: &str) {
        for node in self.nodes_mut(key) {
            if let NodeContent::Image {
                ref mut data_uri,
                ref mut placeholder_visible,
            } = node.content
            {
                *data_uri = None;
                *placeholder_visible = true;
            }
        }
    }

    /// Strip every artifact transform (natural-size form, used around print)
    pub fn clear_transforms(&mut self) {
        for artifact in &mut self.artifacts {
            artifact.transform = None;
        }
    }
}
