//! In-memory form/template store
//!
//! Single owner of forms, templates and per-user access records. Every
//! mutation goes through `&mut self`, so a reader holding `&FormStore` always
//! sees a consistent snapshot. Services that share one store across requests
//! wrap it in a lock and hold the write guard for the whole operation.

mod forms;
mod seed;
mod structure;
mod submissions;
mod templates;

use rand_core::{OsRng, RngCore};

use crate::access_key;
use crate::error::FormError;
use crate::model::{FormModel, Template, UserFormEntry};
use crate::summary::{self, DashboardStats, FormSummary};
use crate::types::FormStatus;

pub use structure::SectionContainer;

pub struct FormStore {
    forms: Vec<FormModel>,
    templates: Vec<Template>,
    entries: Vec<UserFormEntry>,
    rng: Box<dyn RngCore + Send + Sync>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("forms", &self.forms.len())
            .field("templates", &self.templates.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl FormStore {
    /// Empty store drawing access keys from the OS generator
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }

    /// Empty store with an injected random source for access keys
    pub fn with_rng<R>(rng: R) -> Self
    where
        R: RngCore + Send + Sync + 'static,
    {
        Self {
            forms: Vec::new(),
            templates: Vec::new(),
            entries: Vec::new(),
            rng: Box::new(rng),
        }
    }

    /// Store seeded with demo templates and a published sample form
    pub fn init() -> Self {
        let mut store = Self::new();
        seed::seed(&mut store);
        store
    }

    // ============================================================
    // Reads
    // ============================================================

    /// Forms, newest first
    pub fn forms(&self) -> &[FormModel] {
        &self.forms
    }

    /// Templates, newest first
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get_form_by_id(&self, id: &str) -> Option<&FormModel> {
        self.forms.iter().find(|f| f.id == id)
    }

    /// Case-insensitive lookup by access key
    pub fn get_form_by_access_key(&self, key: &str) -> Option<&FormModel> {
        let key = access_key::normalize(key);
        self.forms.iter().find(|f| f.access_key == key)
    }

    pub fn get_template_by_id(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.template_id == id)
    }

    pub fn list_forms_by_status(&self, status: FormStatus) -> Vec<&FormModel> {
        self.forms.iter().filter(|f| f.status == status).collect()
    }

    /// Every form the user has opened, drafted or submitted
    pub fn get_user_forms(&self, user_id: Option<&str>) -> Vec<&UserFormEntry> {
        self.entries
            .iter()
            .filter(|e| e.user_id.as_deref() == user_id)
            .collect()
    }

    pub fn get_user_form_by_access_key(
        &self,
        key: &str,
        user_id: Option<&str>,
    ) -> Option<&UserFormEntry> {
        let key = access_key::normalize(key);
        self.entries
            .iter()
            .find(|e| e.access_key == key && e.user_id.as_deref() == user_id)
    }

    pub fn summarize_form(&self, form_id: &str) -> Option<FormSummary> {
        self.get_form_by_id(form_id).map(summary::summarize)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        summary::dashboard_stats(&self.forms)
    }

    // ============================================================
    // Internal helpers
    // ============================================================

    fn form_mut(&mut self, id: &str) -> Result<&mut FormModel, FormError> {
        self.forms
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| FormError::FormNotFound(id.to_string()))
    }

    fn template_mut(&mut self, id: &str) -> Result<&mut Template, FormError> {
        self.templates
            .iter_mut()
            .find(|t| t.template_id == id)
            .ok_or_else(|| FormError::TemplateNotFound(id.to_string()))
    }

    /// Mint a key no live form holds
    fn mint_access_key(&mut self) -> String {
        let forms = &self.forms;
        access_key::generate_unique(self.rng.as_mut(), |candidate| {
            forms.iter().any(|f| f.access_key == candidate)
        })
    }
}
