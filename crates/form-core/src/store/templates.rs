//! Templates and conversions between templates and forms

use chrono::Utc;
use tracing::info;

use super::FormStore;
use crate::error::FormError;
use crate::model::{
    copy_sections, new_id, FormModel, FormOverrides, FormSection, NewTemplate, Template,
    TemplatePatch,
};

impl FormStore {
    /// Store a new template at the front of the collection
    pub fn add_template(&mut self, template: NewTemplate) -> Template {
        let now = Utc::now();
        let sections = if template.sections.is_empty() {
            vec![FormSection::empty()]
        } else {
            template.sections
        };

        let template = Template {
            template_id: new_id(),
            name: template.name,
            description: template.description,
            category: template.category,
            created_at: now,
            updated_at: now,
            sections,
        };

        info!("Added template {} ({})", template.template_id, template.name);
        self.templates.insert(0, template.clone());
        template
    }

    pub fn update_template(
        &mut self,
        template_id: &str,
        patch: TemplatePatch,
    ) -> Result<Template, FormError> {
        let template = self.template_mut(template_id)?;
        template.apply(patch);
        template.touch();
        Ok(template.clone())
    }

    pub fn delete_template(&mut self, template_id: &str) -> Result<(), FormError> {
        let before = self.templates.len();
        self.templates.retain(|t| t.template_id != template_id);
        if self.templates.len() == before {
            return Err(FormError::TemplateNotFound(template_id.to_string()));
        }
        info!("Deleted template {}", template_id);
        Ok(())
    }

    pub fn duplicate_template(&mut self, template_id: &str) -> Result<Template, FormError> {
        let source = self
            .get_template_by_id(template_id)
            .ok_or_else(|| FormError::TemplateNotFound(template_id.to_string()))?;

        let copy = NewTemplate {
            name: format!("{} (Copy)", source.name),
            description: source.description.clone(),
            category: source.category.clone(),
            sections: copy_sections(&source.sections),
        };
        Ok(self.add_template(copy))
    }

    /// Stamp a new draft form out of a template's sections
    pub fn create_form_from_template(&mut self, template_id: &str) -> Result<FormModel, FormError> {
        let template = self
            .get_template_by_id(template_id)
            .ok_or_else(|| FormError::TemplateNotFound(template_id.to_string()))?;

        let overrides = FormOverrides {
            title: Some(template.name.clone()),
            description: Some(template.description.clone()),
            category: template.category.clone(),
            sections: Some(copy_sections(&template.sections)),
            ..Default::default()
        };

        let form = self.create_form(overrides);
        info!("Created form {} from template {}", form.id, template_id);
        Ok(form)
    }

    /// Create a form from a template and publish it in one step
    pub fn publish_template_as_form(&mut self, template_id: &str) -> Result<FormModel, FormError> {
        let form = self.create_form_from_template(template_id)?;
        self.publish_form(&form.id)?;
        self.get_form_by_id(&form.id)
            .cloned()
            .ok_or(FormError::FormNotFound(form.id))
    }

    /// Capture a form's current structure as a new template
    pub fn save_form_as_template(
        &mut self,
        form_id: &str,
        name: Option<String>,
    ) -> Result<Template, FormError> {
        let form = self
            .get_form_by_id(form_id)
            .ok_or_else(|| FormError::FormNotFound(form_id.to_string()))?;

        let template = NewTemplate {
            name: name.unwrap_or_else(|| form.title.clone()),
            description: form.description.clone(),
            category: form.category.clone(),
            sections: copy_sections(&form.sections),
        };

        let template = self.add_template(template);
        info!(
            "Saved form {} as template {}",
            form_id, template.template_id
        );
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldPatch, SectionPatch};
    use crate::types::{FieldType, FormStatus};
    use pretty_assertions::assert_eq;

    fn template_with_field(store: &mut FormStore) -> Template {
        let template = store.add_template(NewTemplate {
            name: "Onboarding".into(),
            description: "New hire checklist".into(),
            category: Some("HR".into()),
            sections: vec![],
        });
        let section_id = template.sections[0].id.clone();
        store
            .add_template_field(&template.template_id, &section_id, FieldType::ShortText)
            .unwrap();
        store.get_template_by_id(&template.template_id).unwrap().clone()
    }

    #[test]
    fn test_add_template_seeds_a_section() {
        let mut store = FormStore::new();
        let template = template_with_field(&mut store);
        assert_eq!(template.sections.len(), 1);
        assert_eq!(template.sections[0].fields.len(), 1);
    }

    #[test]
    fn test_form_from_template_does_not_alias() {
        let mut store = FormStore::new();
        let template = template_with_field(&mut store);

        let form = store
            .create_form_from_template(&template.template_id)
            .unwrap();
        assert_eq!(form.title, "Onboarding");
        assert_eq!(form.status, FormStatus::Draft);
        assert_eq!(form.sections, template.sections);

        let section_id = form.sections[0].id.clone();
        let field_id = form.sections[0].fields[0].id.clone();
        store
            .update_field(
                &form.id,
                &section_id,
                &field_id,
                FieldPatch {
                    label: Some("Employee name".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let stored = store.get_template_by_id(&template.template_id).unwrap();
        assert_eq!(stored.sections, template.sections);
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let mut store = FormStore::new();
        assert_eq!(
            store.create_form_from_template("none").unwrap_err(),
            FormError::TemplateNotFound("none".into())
        );
        assert!(store.save_form_as_template("none", None).is_err());
    }

    #[test]
    fn test_save_form_as_template_copies_structure() {
        let mut store = FormStore::new();
        let form = store.create_form(FormOverrides {
            title: Some("Exit survey".into()),
            ..Default::default()
        });
        let section_id = form.sections[0].id.clone();
        store.add_field(&form.id, &section_id, FieldType::Rating).unwrap();

        let template = store.save_form_as_template(&form.id, None).unwrap();
        assert_eq!(template.name, "Exit survey");
        assert_eq!(
            template.sections,
            store.get_form_by_id(&form.id).unwrap().sections
        );

        store
            .update_section(
                &form.id,
                &section_id,
                SectionPatch {
                    title: Some("Changed".into()),
                    description: None,
                },
            )
            .unwrap();
        let stored = store.get_template_by_id(&template.template_id).unwrap();
        assert_eq!(stored.sections[0].title, "Untitled Section");
    }

    #[test]
    fn test_publish_template_as_form() {
        let mut store = FormStore::new();
        let template = template_with_field(&mut store);

        let form = store
            .publish_template_as_form(&template.template_id)
            .unwrap();
        assert_eq!(form.status, FormStatus::Published);
        assert_eq!(store.list_forms_by_status(FormStatus::Published).len(), 1);
    }

    #[test]
    fn test_update_duplicate_delete_template() {
        let mut store = FormStore::new();
        let template = template_with_field(&mut store);

        let updated = store
            .update_template(
                &template.template_id,
                TemplatePatch {
                    name: Some("Onboarding v2".into()),
                    category: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Onboarding v2");
        assert_eq!(updated.category, None);

        let copy = store.duplicate_template(&template.template_id).unwrap();
        assert_eq!(copy.name, "Onboarding v2 (Copy)");
        assert_ne!(copy.template_id, template.template_id);
        assert_eq!(copy.sections, updated.sections);
        assert_eq!(store.templates()[0].template_id, copy.template_id);

        store.delete_template(&template.template_id).unwrap();
        assert!(store.get_template_by_id(&template.template_id).is_none());
        assert!(store.delete_template(&template.template_id).is_err());
    }

    #[test]
    fn test_template_section_operations() {
        let mut store = FormStore::new();
        let template = template_with_field(&mut store);
        let id = template.template_id.clone();
        let first = template.sections[0].id.clone();

        let second = store.add_template_section(&id).unwrap();
        store.reorder_template_sections(&id, 1, 0).unwrap();
        store
            .move_template_field(&id, &first, &second.id, 0, 0)
            .unwrap();

        let stored = store.get_template_by_id(&id).unwrap();
        assert_eq!(stored.sections[0].id, second.id);
        assert_eq!(stored.sections[0].fields.len(), 1);
        assert!(stored.sections[1].fields.is_empty());

        store.delete_template_section(&id, &first).unwrap();
        assert_eq!(store.get_template_by_id(&id).unwrap().sections.len(), 1);
    }
}
