//! Preview engine - the selection state machine and controller
//!
//! Owns every piece of session state (selection, institution config,
//! form values, attachments, preview model, stylesheet link) and exposes
//! the selection transitions as named methods. State flows strictly
//! downward: `Empty -> RegionSelected -> InstitutionSelected ->
//! DocumentSelected`, and clearing an ancestor level always clears all
//! descendant levels.
//!
//! Every selection transition and attachment change bumps a generation
//! counter. Deferred work (image decodes) carries the generation it was
//! issued under and is discarded on completion if the generation moved on,
//! so a stale result can never overwrite a newer selection or a newer
//! attachment - last-requested-wins.

use crate::attachments::{Attachment, AttachmentCache};
use crate::binding::{encode_data_uri, sync_bindings, BindingRegistry, DecodeTicket};
use crate::catalog::{Catalog, Institution};
use crate::computed::update_computed_fields;
use crate::config::InstitutionConfig;
use crate::error::{CardlabError, Result};
use crate::form::FormModel;
use crate::fragment::{Fragment, InputKind};
use crate::notify::{Notice, Notifier};
use crate::preview::PreviewDoc;
use crate::resolve;
use crate::scale::{rescale, Viewport};

use serde::Serialize;

/// Placeholder shown before any institution is selected
pub const PLACEHOLDER_SELECT: &str = "Select a region and an institution to begin.";
/// Placeholder shown after a failed institution config load
pub const PLACEHOLDER_CONFIG_FAILED: &str = "Error: failed to load the institution template.";
/// Placeholder shown after a failed document load
pub const PLACEHOLDER_DOCUMENT_FAILED: &str = "Error: failed to load the document.";

/// Persistent notice emitted once at startup
const STARTUP_NOTICE: &str = "This tool renders mock document previews for layout \
testing only. Do not use generated output for any unlawful purpose.";

/// Source of the catalog, config, fragment and stylesheet resources.
///
/// Implementations fetch the raw text of each resource; parsing stays in
/// the engine. All methods are synchronous - the engine is single-threaded
/// and cooperative, and callers remain responsive by driving it from their
/// own event loop.
pub trait ResourceStore {
    fn fetch_manifest(&self) -> Result<String>;
    fn fetch_config(&self, region: &str, institution: &str) -> Result<String>;
    fn fetch_document(&self, region: &str, institution: &str, document: &str) -> Result<String>;
}

impl ResourceStore for Box<dyn ResourceStore> {
    fn fetch_manifest(&self) -> Result<String> {
        (**self).fetch_manifest()
    }

    fn fetch_config(&self, region: &str, institution: &str) -> Result<String> {
        (**self).fetch_config(region, institution)
    }

    fn fetch_document(&self, region: &str, institution: &str, document: &str) -> Result<String> {
        (**self).fetch_document(region, institution, document)
    }
}

/// Print collaborator. Receives the preview with all transforms stripped;
/// the engine restores fit-scaling after this returns.
pub trait PrintTrigger {
    fn print(&mut self, preview: &PreviewDoc);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub region_id: Option<String>,
    pub institution_id: Option<String>,
    pub document_id: Option<String>,
}

/// The single swappable stylesheet link; at most one is active at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylesheetLink {
    pub institution_id: String,
    pub href: String,
}

/// One entry of the document-type selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    pub id: String,
    pub name: String,
    pub active: bool,
}

pub struct PreviewEngine<S: ResourceStore, N: Notifier> {
    store: S,
    notifier: N,
    catalog: Catalog,
    selection: SelectionState,
    config: Option<InstitutionConfig>,
    documents: Vec<DocumentEntry>,
    form: FormModel,
    registry: BindingRegistry,
    preview: PreviewDoc,
    attachments: AttachmentCache,
    stylesheet: Option<StylesheetLink>,
    viewport: Viewport,
    generation: u64,
    pending_decodes: Vec<DecodeTicket>,
}

impl<S: ResourceStore, N: Notifier> PreviewEngine<S, N> {
    /// Load the catalog and construct the engine.
    ///
    /// A manifest that cannot be fetched or parsed is fatal: the engine is
    /// never constructed and the caller must surface a blocking error state.
    pub fn initialize(store: S, notifier: N) -> Result<Self> {
        notifier.notify(Notice::persistent_warning(STARTUP_NOTICE));

        let manifest = store.fetch_manifest()?;
        let catalog = Catalog::from_json(&manifest)?;

        Ok(Self {
            store,
            notifier,
            catalog,
            selection: SelectionState::default(),
            config: None,
            documents: Vec::new(),
            form: FormModel::default(),
            registry: BindingRegistry::default(),
            preview: PreviewDoc::with_placeholder(PLACEHOLDER_SELECT),
            attachments: AttachmentCache::default(),
            stylesheet: None,
            viewport: Viewport::default(),
            generation: 0,
            pending_decodes: Vec::new(),
        })
    }

    // --- accessors -------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn config(&self) -> Option<&InstitutionConfig> {
        self.config.as_ref()
    }

    /// Institutions of the currently selected region (selector content)
    pub fn institutions(&self) -> &[Institution] {
        match &self.selection.region_id {
            Some(region) => self.catalog.institutions(region),
            None => &[],
        }
    }

    pub fn documents(&self) -> &[DocumentEntry] {
        &self.documents
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    pub fn preview(&self) -> &PreviewDoc {
        &self.preview
    }

    pub fn attachments(&self) -> &AttachmentCache {
        &self.attachments
    }

    pub fn stylesheet(&self) -> Option<&StylesheetLink> {
        self.stylesheet.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- selection transitions -------------------------------------------

    /// Select (or clear, with `None`/empty) the region level.
    ///
    /// Clears every descendant level: institution and document selection,
    /// institution config, attachment cache, document list, stylesheet,
    /// and resets all common fields to empty.
    pub fn select_region(&mut self, id: Option<&str>) -> Result<()> {
        let id = id.filter(|s| !s.is_empty());
        self.generation += 1;
        self.reset_institution_level();
        self.form.reset_common_values();
        self.selection = SelectionState::default();

        match id {
            None => Ok(()),
            Some(id) => {
                if self.catalog.region(id).is_none() {
                    return Err(CardlabError::MalformedSelection(format!(
                        "unknown region '{}'",
                        id
                    )));
                }
                self.selection.region_id = Some(id.to_string());
                Ok(())
            }
        }
    }

    /// Select (or clear, with `None`/empty) the institution level.
    ///
    /// On success the institution config is fetched, common field defaults
    /// applied, the stylesheet link installed, the available documents
    /// listed, and the first available document auto-selected. A fetch or
    /// parse failure is recoverable: it is reported through the notifier,
    /// the failed level is cleared to a placeholder, and the region-level
    /// state stays untouched.
    pub fn select_institution(&mut self, id: Option<&str>) -> Result<()> {
        let region = self.selection.region_id.clone().ok_or_else(|| {
            CardlabError::MalformedSelection(
                "institution selected without a region".to_string(),
            )
        })?;

        self.generation += 1;
        self.reset_institution_level();

        let Some(id) = id.filter(|s| !s.is_empty()) else {
            // Clearing the institution behaves as a full reset below the region
            self.form.reset_common_values();
            return Ok(());
        };

        let institution_name = match self.catalog.institution(&region, id) {
            Some(inst) => inst.name.clone(),
            None => {
                return Err(CardlabError::MalformedSelection(format!(
                    "unknown institution '{}' in region '{}'",
                    id, region
                )))
            }
        };
        self.selection.institution_id = Some(id.to_string());

        let config = match self
            .store
            .fetch_config(&region, id)
            .and_then(|text| InstitutionConfig::from_json(&text))
        {
            Ok(config) => config,
            Err(err) => {
                self.notifier.notify(Notice::warning(format!(
                    "Error: failed to load template '{}': {}",
                    institution_name, err
                )));
                self.preview = PreviewDoc::with_placeholder(PLACEHOLDER_CONFIG_FAILED);
                return Ok(());
            }
        };

        for (field_id, value) in &config.common_field_defaults {
            self.form.upsert_common(field_id, value);
        }
        self.stylesheet = Some(StylesheetLink {
            institution_id: id.to_string(),
            href: resolve::stylesheet_path(&region, id)?,
        });
        self.documents = config
            .available_documents()
            .map(|(doc_id, descriptor)| DocumentEntry {
                id: doc_id.to_string(),
                name: descriptor.name.clone(),
                active: false,
            })
            .collect();
        let first = config.first_available().map(str::to_string);
        self.config = Some(config);

        self.notifier.notify(Notice::success(format!(
            "Template selected: {}. Fill in the details, then pick a document type.",
            institution_name
        )));

        match first {
            Some(doc_id) => self.select_document(&doc_id),
            None => {
                self.update_all();
                Ok(())
            }
        }
    }

    /// Select a document type within the current institution.
    ///
    /// Re-selecting the active document while its form fragment is populated
    /// is a no-op. A fetch or parse failure clears only the document level
    /// and reports through the notifier.
    pub fn select_document(&mut self, id: &str) -> Result<()> {
        let region = self.selection.region_id.clone().ok_or_else(|| {
            CardlabError::MalformedSelection("document selected without a region".to_string())
        })?;
        let institution = self.selection.institution_id.clone().ok_or_else(|| {
            CardlabError::MalformedSelection(
                "document selected without an institution".to_string(),
            )
        })?;
        let descriptor = self
            .config
            .as_ref()
            .and_then(|c| c.documents.get(id))
            .filter(|d| d.available)
            .cloned()
            .ok_or_else(|| {
                CardlabError::MalformedSelection(format!(
                    "document '{}' is not available for institution '{}'",
                    id, institution
                ))
            })?;

        // Idempotent repeat-selection guard
        if self.selection.document_id.as_deref() == Some(id)
            && self.form.document_section_populated()
        {
            return Ok(());
        }

        self.generation += 1;
        self.selection.document_id = Some(id.to_string());
        for entry in &mut self.documents {
            entry.active = entry.id == id;
        }

        let fragment = match self
            .store
            .fetch_document(&region, &institution, id)
            .and_then(|text| Fragment::parse(&text))
        {
            Ok(fragment) => fragment,
            Err(err) => {
                self.notifier.notify(Notice::warning(format!(
                    "Error: failed to load document '{}': {}",
                    descriptor.name, err
                )));
                self.form.clear_document_section();
                self.registry = BindingRegistry::default();
                self.preview = PreviewDoc::with_placeholder(PLACEHOLDER_DOCUMENT_FAILED);
                return Ok(());
            }
        };

        // Swap both regions; attachments survive by key because the binding
        // pass always reads the cache, never the replaced controls.
        self.form.swap_document_section(&fragment.form);
        self.preview = PreviewDoc::from_fragment(&fragment.preview);
        self.form.apply_defaults(&descriptor.field_defaults);
        self.registry = BindingRegistry::build(&self.form, &self.preview);
        self.update_all();

        self.notifier
            .notify(Notice::info(format!("Generated {} preview.", descriptor.name)));
        Ok(())
    }

    // --- form mutation ----------------------------------------------------

    /// Set a form field and run a full update pass.
    /// Returns false when no such field exists.
    pub fn set_field(&mut self, id: &str, value: &str) -> bool {
        if !self.form.set_value(id, value) {
            return false;
        }
        self.update_all();
        true
    }

    /// Record a file selection for a file input and run a full update pass.
    ///
    /// Replacing an attachment bumps the generation, so a decode still in
    /// flight for the superseded file can no longer land.
    pub fn attach_file(&mut self, input_id: &str, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let is_file_input = self
            .form
            .field(input_id)
            .map(|f| f.kind == InputKind::File)
            .unwrap_or(false);
        if !is_file_input {
            return Err(CardlabError::MalformedSelection(format!(
                "'{}' is not a file input of the current form",
                input_id
            )));
        }

        self.generation += 1;
        self.attachments.attach(
            input_id,
            Attachment {
                file_name: file_name.to_string(),
                bytes,
            },
        );
        self.notifier
            .notify(Notice::info(format!("{} attached.", file_name)));
        self.update_all();
        Ok(())
    }

    /// Clear a file selection and run a full update pass.
    pub fn detach_file(&mut self, input_id: &str) {
        self.generation += 1;
        self.attachments.detach(input_id);
        self.update_all();
    }

    // --- rendering --------------------------------------------------------

    /// Full update pass: computed fields, then bindings, then scaling.
    /// No-op until an institution is selected.
    pub fn update_all(&mut self) {
        if self.selection.institution_id.is_none() {
            return;
        }
        update_computed_fields(&self.form, &mut self.preview);
        let tickets = sync_bindings(
            &self.registry,
            &self.form,
            &self.attachments,
            &mut self.preview,
            self.generation,
        );
        self.pending_decodes.extend(tickets);
        rescale(&mut self.preview, self.viewport);
    }

    /// Drain the decode requests issued by update passes since the last call
    pub fn take_decode_requests(&mut self) -> Vec<DecodeTicket> {
        std::mem::take(&mut self.pending_decodes)
    }

    /// Apply a finished image decode. Returns false (and changes nothing)
    /// when the ticket's generation no longer matches the current selection.
    pub fn complete_decode(&mut self, ticket: DecodeTicket, data_uri: &str) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.preview.set_image(&ticket.bind_key, data_uri);
        true
    }

    /// Fulfil every pending decode synchronously from the attachment cache.
    /// Convenience for hosts without their own event loop.
    pub fn render_attachments(&mut self) {
        for ticket in self.take_decode_requests() {
            let data_uri = self
                .attachments
                .get(&ticket.input_id)
                .map(|a| encode_data_uri(&a.file_name, &a.bytes));
            if let Some(data_uri) = data_uri {
                self.complete_decode(ticket, &data_uri);
            }
        }
    }

    /// Viewport change (container resize); re-fits the preview.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        rescale(&mut self.preview, self.viewport);
    }

    /// Print pass: refresh content, strip fit-scaling so the collaborator
    /// sees true physical dimensions, then restore scaling.
    pub fn print_with(&mut self, trigger: &mut dyn PrintTrigger) {
        if self.selection.institution_id.is_some() {
            update_computed_fields(&self.form, &mut self.preview);
            let tickets = sync_bindings(
                &self.registry,
                &self.form,
                &self.attachments,
                &mut self.preview,
                self.generation,
            );
            self.pending_decodes.extend(tickets);
            self.render_attachments();
        }
        self.preview.clear_transforms();
        trigger.print(&self.preview);
        rescale(&mut self.preview, self.viewport);
    }

    // --- internal ----------------------------------------------------------

    /// Clear everything below the region level
    fn reset_institution_level(&mut self) {
        self.selection.institution_id = None;
        self.selection.document_id = None;
        self.config = None;
        self.documents.clear();
        self.attachments.clear();
        self.form.clear_document_section();
        self.registry = BindingRegistry::default();
        self.stylesheet = None;
        self.preview = PreviewDoc::with_placeholder(PLACEHOLDER_SELECT);
    }
}
