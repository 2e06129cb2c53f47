//! Document fragment parsing
//!
//! A fragment resource is a single markup document carrying two named
//! regions: `form-snippet` (the editable inputs) and `preview-snippet`
//! (the artifact markup the inputs render into). The document is parsed
//! into a detached tree and only those two subtrees are extracted; a
//! missing region degrades to empty content rather than failing the swap.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{CardlabError, Result};

/// Element id of the form region inside a fragment document
pub const FORM_SNIPPET_ID: &str = "form-snippet";
/// Element id of the preview region inside a fragment document
pub const PREVIEW_SNIPPET_ID: &str = "preview-snippet";

/// Parsed fragment: both named regions, either possibly empty
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    pub form: FormFragment,
    pub preview: PreviewFragment,
}

/// The form region: every input control declared by the fragment
#[derive(Debug, Clone, Default)]
pub struct FormFragment {
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone)]
pub struct FormInput {
    /// Control identifier; also the key attachments and defaults match on
    pub id: String,
    /// Binding key shared with preview nodes, if the input is bound
    pub bind_key: Option<String>,
    pub kind: InputKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Date,
    File,
}

/// The preview region: one template per top-level artifact
#[derive(Debug, Clone, Default)]
pub struct PreviewFragment {
    pub artifacts: Vec<ArtifactTemplate>,
}

#[derive(Debug, Clone)]
pub struct ArtifactTemplate {
    /// Natural (untransformed) size, from data-width/data-height
    pub natural_width: f64,
    pub natural_height: f64,
    pub nodes: Vec<NodeTemplate>,
}

/// A preview node consuming a binding key
#[derive(Debug, Clone)]
pub struct NodeTemplate {
    pub key: String,
    pub kind: NodeKind,
    /// Per-node text suffix (text rule only)
    pub suffix: String,
    /// Per-node "full year" flag (computed academic-year rule)
    pub full_year: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Image,
}

impl Fragment {
    /// Parse a fragment document into its two named regions
    pub fn parse(markup: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .map_err(|e| CardlabError::FragmentInvalid(e.to_string()))?;

        let form = match find_by_id(&dom.document, FORM_SNIPPET_ID) {
            Some(root) => {
                let mut inputs = Vec::new();
                collect_inputs(&root, &mut inputs);
                FormFragment { inputs }
            }
            None => FormFragment::default(),
        };

        let preview = match find_by_id(&dom.document, PREVIEW_SNIPPET_ID) {
            Some(root) => {
                let artifacts = element_children(&root)
                    .iter()
                    .map(parse_artifact)
                    .collect();
                PreviewFragment { artifacts }
            }
            None => PreviewFragment::default(),
        };

        Ok(Fragment { form, preview })
    }
}

fn parse_artifact(root: &Handle) -> ArtifactTemplate {
    let natural_width = attr_of(root, "data-width")
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);
    let natural_height = attr_of(root, "data-height")
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);

    let mut nodes = Vec::new();
    collect_nodes(root, &mut nodes);

    ArtifactTemplate {
        natural_width,
        natural_height,
        nodes,
    }
}

/// Depth-first search for an element with the given id
fn find_by_id(handle: &Handle, id: &str) -> Option<Handle> {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        if attr_value(&attrs.borrow(), "id").as_deref() == Some(id) {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(found) = find_by_id(child, id) {
            return Some(found);
        }
    }
    None
}

/// Collect form controls (input/select/textarea) below a root
fn collect_inputs(handle: &Handle, out: &mut Vec<FormInput>) {
    if let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = handle.data
    {
        let tag = name.local.as_ref();
        if matches!(tag, "input" | "select" | "textarea") {
            let attrs = attrs.borrow();
            if let Some(id) = attr_value(&attrs, "id") {
                let kind = match attr_value(&attrs, "type").as_deref() {
                    Some("date") => InputKind::Date,
                    Some("file") => InputKind::File,
                    _ => InputKind::Text,
                };
                out.push(FormInput {
                    id,
                    bind_key: attr_value(&attrs, "data-bind-to"),
                    kind,
                });
            }
        }
    }
    for child in handle.children.borrow().iter() {
        collect_inputs(child, out);
    }
}

/// Collect bound preview nodes below an artifact root
fn collect_nodes(handle: &Handle, out: &mut Vec<NodeTemplate>) {
    if let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = handle.data
    {
        let attrs = attrs.borrow();
        if let Some(key) = attr_value(&attrs, "data-preview-id") {
            let kind = if name.local.as_ref() == "img" {
                NodeKind::Image
            } else {
                NodeKind::Text
            };
            out.push(NodeTemplate {
                key,
                kind,
                suffix: attr_value(&attrs, "data-suffix").unwrap_or_default(),
                full_year: attr_value(&attrs, "data-full-year").is_some(),
            });
        }
    }
    for child in handle.children.borrow().iter() {
        collect_nodes(child, out);
    }
}

/// Direct element children of a node (text and comments skipped)
fn element_children(handle: &Handle) -> Vec<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .filter(|c| matches!(c.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

fn attr_of(handle: &Handle, name: &str) -> Option<String> {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        attr_value(&attrs.borrow(), name)
    } else {
        None
    }
}

fn attr_value(attrs: &[Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| a.name.local.as_ref() == name)
        .map(|a| a.value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
        <section id="form-snippet">
            <label>Name</label>
            <input id="studentName" type="text" data-bind-to="studentName">
            <input id="enrollmentDate" type="date" data-bind-to="enrollmentDate">
            <input id="studentPhoto" type="file" data-bind-to="studentPhoto">
            <select id="studyPeriod"></select>
        </section>
        <section id="preview-snippet">
            <div class="card-front" data-width="1000" data-height="600">
                <span data-preview-id="studentName" data-suffix=" (student)"></span>
                <span data-preview-id="academicYear" data-full-year="true"></span>
                <img data-preview-id="studentPhoto">
            </div>
            <div class="card-back" data-width="1000" data-height="600">
                <span data-preview-id="studentName"></span>
                <p data-preview-id="notice"></p>
            </div>
        </section>
    "#;

    #[test]
    fn test_parse_both_regions() {
        let fragment = Fragment::parse(FRAGMENT).unwrap();
        assert_eq!(fragment.form.inputs.len(), 4);
        assert_eq!(fragment.preview.artifacts.len(), 2);
    }

    #[test]
    fn test_input_kinds_and_keys() {
        let fragment = Fragment::parse(FRAGMENT).unwrap();
        let inputs = &fragment.form.inputs;
        assert_eq!(inputs[0].kind, InputKind::Text);
        assert_eq!(inputs[1].kind, InputKind::Date);
        assert_eq!(inputs[2].kind, InputKind::File);
        assert_eq!(inputs[0].bind_key.as_deref(), Some("studentName"));
        // Unbound select still appears (defaults are applied by id)
        assert_eq!(inputs[3].id, "studyPeriod");
        assert!(inputs[3].bind_key.is_none());
    }

    #[test]
    fn test_artifact_geometry_and_nodes() {
        let fragment = Fragment::parse(FRAGMENT).unwrap();
        let front = &fragment.preview.artifacts[0];
        assert_eq!(front.natural_width, 1000.0);
        assert_eq!(front.natural_height, 600.0);
        assert_eq!(front.nodes.len(), 3);
        assert_eq!(front.nodes[0].suffix, " (student)");
        assert!(front.nodes[1].full_year);
        assert_eq!(front.nodes[2].kind, NodeKind::Image);

        // The same key fans out to nodes on both artifacts
        let back = &fragment.preview.artifacts[1];
        assert_eq!(back.nodes[0].key, "studentName");
        assert_eq!(back.nodes[0].suffix, "");
    }

    #[test]
    fn test_missing_form_snippet_degrades_to_empty() {
        let fragment =
            Fragment::parse(r#"<div id="preview-snippet"><div data-width="10" data-height="10"></div></div>"#)
                .unwrap();
        assert!(fragment.form.inputs.is_empty());
        assert_eq!(fragment.preview.artifacts.len(), 1);
    }

    #[test]
    fn test_missing_preview_snippet_degrades_to_empty() {
        let fragment =
            Fragment::parse(r#"<div id="form-snippet"><input id="a" type="text"></div>"#).unwrap();
        assert_eq!(fragment.form.inputs.len(), 1);
        assert!(fragment.preview.artifacts.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let fragment = Fragment::parse("").unwrap();
        assert!(fragment.form.inputs.is_empty());
        assert!(fragment.preview.artifacts.is_empty());
    }

    #[test]
    fn test_artifact_without_geometry_defaults_to_zero() {
        let fragment =
            Fragment::parse(r#"<div id="preview-snippet"><div><span data-preview-id="x"></span></div></div>"#)
                .unwrap();
        let artifact = &fragment.preview.artifacts[0];
        assert_eq!(artifact.natural_width, 0.0);
        assert_eq!(artifact.natural_height, 0.0);
    }
}
