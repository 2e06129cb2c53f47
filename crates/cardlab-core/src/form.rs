//! Form model
//!
//! Two sections of input fields: the common (institution-wide) section that
//! survives document swaps, and the per-document section replaced on every
//! fragment swap. File inputs never carry a value here - the attachment
//! cache is the single source of truth for selected files.

use std::collections::BTreeMap;

use crate::fragment::{FormFragment, FormInput, InputKind};

#[derive(Debug, Clone)]
pub struct FormField {
    pub id: String,
    pub bind_key: Option<String>,
    pub kind: InputKind,
    pub value: String,
}

impl FormField {
    fn from_input(input: &FormInput) -> Self {
        Self {
            id: input.id.clone(),
            bind_key: input.bind_key.clone(),
            kind: input.kind,
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormModel {
    common: Vec<FormField>,
    document: Vec<FormField>,
}

impl FormModel {
    /// All fields, common section first
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.common.iter().chain(self.document.iter())
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields().find(|f| f.id == id)
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.common
            .iter_mut()
            .chain(self.document.iter_mut())
            .find(|f| f.id == id)
    }

    /// Current value of a field, `None` if the field does not exist
    pub fn value(&self, id: &str) -> Option<&str> {
        self.field(id).map(|f| f.value.as_str())
    }

    /// Set a field's value; returns false when no such field exists
    pub fn set_value(&mut self, id: &str, value: &str) -> bool {
        match self.field_mut(id) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Ensure a common field exists (text kind, bound to its own id) and set it
    pub fn upsert_common(&mut self, id: &str, value: &str) {
        if !self.set_value(id, value) {
            self.common.push(FormField {
                id: id.to_string(),
                bind_key: Some(id.to_string()),
                kind: InputKind::Text,
                value: value.to_string(),
            });
        }
    }

    /// Apply a defaults map by field id; unknown ids are ignored
    pub fn apply_defaults(&mut self, defaults: &BTreeMap<String, String>) {
        for (id, value) in defaults {
            self.set_value(id, value);
        }
    }

    /// Reset every common field to empty (region change)
    pub fn reset_common_values(&mut self) {
        for field in &mut self.common {
            field.value.clear();
        }
    }

    /// Replace the per-document section from a freshly parsed fragment
    pub fn swap_document_section(&mut self, fragment: &FormFragment) {
        self.document = fragment.inputs.iter().map(FormField::from_input).collect();
    }

    /// Drop the per-document section entirely
    pub fn clear_document_section(&mut self) {
        self.document.clear();
    }

    /// Whether the per-document section is currently populated
    pub fn document_section_populated(&self) -> bool {
        !self.document.is_empty()
    }

    /// File-kind fields in the per-document section
    pub fn document_file_fields(&self) -> impl Iterator<Item = &FormField> {
        self.document.iter().filter(|f| f.kind == InputKind::File)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Fragment;

    fn doc_fragment() -> FormFragment {
        Fragment::parse(
            r#"<div id="form-snippet">
                <input id="studentName" type="text" data-bind-to="studentName">
                <input id="studentPhoto" type="file" data-bind-to="studentPhoto">
            </div>"#,
        )
        .unwrap()
        .form
    }

    #[test]
    fn test_common_fields_survive_document_swap() {
        let mut form = FormModel::default();
        form.upsert_common("institutionName", "TU Delft");
        form.swap_document_section(&doc_fragment());
        assert_eq!(form.value("institutionName"), Some("TU Delft"));
        assert_eq!(form.value("studentName"), Some(""));

        form.swap_document_section(&FormFragment::default());
        assert_eq!(form.value("institutionName"), Some("TU Delft"));
        assert_eq!(form.value("studentName"), None);
    }

    #[test]
    fn test_reset_common_keeps_fields_but_empties_values() {
        let mut form = FormModel::default();
        form.upsert_common("institutionName", "TU Delft");
        form.reset_common_values();
        assert_eq!(form.value("institutionName"), Some(""));
    }

    #[test]
    fn test_apply_defaults_ignores_unknown_ids() {
        let mut form = FormModel::default();
        form.swap_document_section(&doc_fragment());
        let mut defaults = BTreeMap::new();
        defaults.insert("studentName".to_string(), "Ada Lovelace".to_string());
        defaults.insert("noSuchField".to_string(), "x".to_string());
        form.apply_defaults(&defaults);
        assert_eq!(form.value("studentName"), Some("Ada Lovelace"));
        assert_eq!(form.value("noSuchField"), None);
    }

    #[test]
    fn test_document_file_fields() {
        let mut form = FormModel::default();
        form.swap_document_section(&doc_fragment());
        let ids: Vec<&str> = form.document_file_fields().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["studentPhoto"]);
    }
}
