//! Form lifecycle: create, duplicate, update, re-key, delete

use chrono::Utc;
use tracing::{debug, info};

use super::FormStore;
use crate::error::FormError;
use crate::model::{
    copy_sections, new_id, normalize_title, FormModel, FormOverrides, FormPatch, FormSection,
};
use crate::types::FormStatus;

impl FormStore {
    /// Create a form with a fresh access key and one empty section.
    ///
    /// The form is placed at the front of the collection.
    pub fn create_form(&mut self, overrides: FormOverrides) -> FormModel {
        let now = Utc::now();
        let access_key = self.mint_access_key();

        let sections = match overrides.sections {
            Some(sections) if !sections.is_empty() => sections,
            _ => vec![FormSection::empty()],
        };

        let form = FormModel {
            id: new_id(),
            title: normalize_title(overrides.title.as_deref().unwrap_or_default()),
            description: overrides.description.unwrap_or_default(),
            category: overrides.category,
            access_key,
            created_at: now,
            updated_at: now,
            status: overrides.status.unwrap_or_default(),
            allow_multiple_submissions: overrides.allow_multiple_submissions.unwrap_or(false),
            anonymous_responses: overrides.anonymous_responses.unwrap_or(false),
            closing_date: overrides.closing_date,
            sections,
            submissions: Vec::new(),
        };

        info!(
            "Created form {} ({}) with access key {}",
            form.id, form.title, form.access_key
        );
        self.forms.insert(0, form.clone());
        form
    }

    /// Copy a form's structure and settings into a new draft.
    ///
    /// Responses and user access records are not carried over.
    pub fn duplicate_form(&mut self, form_id: &str) -> Result<FormModel, FormError> {
        let source = self
            .get_form_by_id(form_id)
            .ok_or_else(|| FormError::FormNotFound(form_id.to_string()))?;

        let overrides = FormOverrides {
            title: Some(format!("{} (Copy)", source.title)),
            description: Some(source.description.clone()),
            category: source.category.clone(),
            status: Some(FormStatus::Draft),
            allow_multiple_submissions: Some(source.allow_multiple_submissions),
            anonymous_responses: Some(source.anonymous_responses),
            closing_date: source.closing_date,
            sections: Some(copy_sections(&source.sections)),
        };

        let copy = self.create_form(overrides);
        info!("Duplicated form {} into {}", form_id, copy.id);
        Ok(copy)
    }

    /// Merge `patch` into the form and refresh `updated_at`
    pub fn update_form(&mut self, form_id: &str, patch: FormPatch) -> Result<FormModel, FormError> {
        let form = self.form_mut(form_id)?;
        form.apply(patch);
        form.touch();
        debug!("Updated form {}", form_id);
        Ok(form.clone())
    }

    /// Set the title, trimmed, or "Untitled Form" when blank
    pub fn update_form_title(&mut self, form_id: &str, title: &str) -> Result<(), FormError> {
        let form = self.form_mut(form_id)?;
        form.title = normalize_title(title);
        form.touch();
        Ok(())
    }

    pub fn publish_form(&mut self, form_id: &str) -> Result<(), FormError> {
        self.set_status(form_id, FormStatus::Published)
    }

    pub fn unpublish_form(&mut self, form_id: &str) -> Result<(), FormError> {
        self.set_status(form_id, FormStatus::Draft)
    }

    fn set_status(&mut self, form_id: &str, status: FormStatus) -> Result<(), FormError> {
        let form = self.form_mut(form_id)?;
        form.status = status;
        form.touch();
        info!("Form {} is now {}", form_id, status);
        Ok(())
    }

    /// Replace the form's access key.
    ///
    /// The old key is released immediately; links and user entries that
    /// reference it stop resolving.
    pub fn regenerate_access_key(&mut self, form_id: &str) -> Result<String, FormError> {
        let old_key = self.form_mut(form_id)?.access_key.clone();

        // The old key is still held by this form, so the new one always differs
        let new_key = self.mint_access_key();

        let form = self.form_mut(form_id)?;
        form.access_key = new_key.clone();
        form.touch();

        info!(
            "Regenerated access key for form {}: {} -> {}",
            form_id, old_key, new_key
        );
        Ok(new_key)
    }

    /// Remove a form together with every user entry that points at it
    pub fn delete_form(&mut self, form_id: &str) -> Result<(), FormError> {
        let before = self.forms.len();
        self.forms.retain(|f| f.id != form_id);
        if self.forms.len() == before {
            return Err(FormError::FormNotFound(form_id.to_string()));
        }

        let entries_before = self.entries.len();
        self.entries.retain(|e| e.form_id != form_id);

        info!(
            "Deleted form {} and {} user entries",
            form_id,
            entries_before - self.entries.len()
        );
        Ok(())
    }
}
