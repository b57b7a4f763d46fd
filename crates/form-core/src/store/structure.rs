//! Section and field editing, shared by forms and templates

use tracing::debug;

use super::FormStore;
use crate::error::FormError;
use crate::model::{FieldPatch, FormField, FormModel, FormSection, SectionPatch, Template};
use crate::types::FieldType;

/// Anything that owns an ordered list of sections
pub trait SectionContainer {
    fn sections(&self) -> &[FormSection];
    fn sections_mut(&mut self) -> &mut Vec<FormSection>;
    /// Refresh the owner's modification time
    fn mark_updated(&mut self);
}

impl SectionContainer for FormModel {
    fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    fn sections_mut(&mut self) -> &mut Vec<FormSection> {
        &mut self.sections
    }

    fn mark_updated(&mut self) {
        self.touch();
    }
}

impl SectionContainer for Template {
    fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    fn sections_mut(&mut self) -> &mut Vec<FormSection> {
        &mut self.sections
    }

    fn mark_updated(&mut self) {
        self.touch();
    }
}

fn section_mut<'a, C: SectionContainer + ?Sized>(
    owner: &'a mut C,
    section_id: &str,
) -> Result<&'a mut FormSection, FormError> {
    owner
        .sections_mut()
        .iter_mut()
        .find(|s| s.id == section_id)
        .ok_or_else(|| FormError::SectionNotFound(section_id.to_string()))
}

fn section_index<C: SectionContainer + ?Sized>(
    owner: &C,
    section_id: &str,
) -> Result<usize, FormError> {
    owner
        .sections()
        .iter()
        .position(|s| s.id == section_id)
        .ok_or_else(|| FormError::SectionNotFound(section_id.to_string()))
}

fn add_section<C: SectionContainer + ?Sized>(owner: &mut C) -> FormSection {
    let section = FormSection::empty();
    owner.sections_mut().push(section.clone());
    owner.mark_updated();
    section
}

fn update_section<C: SectionContainer + ?Sized>(
    owner: &mut C,
    section_id: &str,
    patch: SectionPatch,
) -> Result<(), FormError> {
    section_mut(owner, section_id)?.apply(patch);
    owner.mark_updated();
    Ok(())
}

/// No minimum section count is enforced here
fn delete_section<C: SectionContainer + ?Sized>(
    owner: &mut C,
    section_id: &str,
) -> Result<(), FormError> {
    let index = section_index(owner, section_id)?;
    owner.sections_mut().remove(index);
    owner.mark_updated();
    Ok(())
}

/// Splice-move: the section at `from` ends up at `to`, others keep their order
fn reorder_sections<C: SectionContainer + ?Sized>(
    owner: &mut C,
    from: usize,
    to: usize,
) -> Result<(), FormError> {
    let len = owner.sections().len();
    for index in [from, to] {
        if index >= len {
            return Err(FormError::IndexOutOfRange { index, len });
        }
    }

    let sections = owner.sections_mut();
    let section = sections.remove(from);
    sections.insert(to, section);
    owner.mark_updated();
    Ok(())
}

fn add_field<C: SectionContainer + ?Sized>(
    owner: &mut C,
    section_id: &str,
    field_type: FieldType,
) -> Result<FormField, FormError> {
    let field = FormField::for_type(field_type);
    section_mut(owner, section_id)?.fields.push(field.clone());
    owner.mark_updated();
    Ok(field)
}

fn update_field<C: SectionContainer + ?Sized>(
    owner: &mut C,
    section_id: &str,
    field_id: &str,
    patch: FieldPatch,
) -> Result<FormField, FormError> {
    let field = section_mut(owner, section_id)?
        .field_mut(field_id)
        .ok_or_else(|| FormError::FieldNotFound(field_id.to_string()))?;
    field.apply(patch);
    let updated = field.clone();
    owner.mark_updated();
    Ok(updated)
}

fn delete_field<C: SectionContainer + ?Sized>(
    owner: &mut C,
    section_id: &str,
    field_id: &str,
) -> Result<(), FormError> {
    let section = section_mut(owner, section_id)?;
    let before = section.fields.len();
    section.fields.retain(|f| f.id != field_id);
    if section.fields.len() == before {
        return Err(FormError::FieldNotFound(field_id.to_string()));
    }
    owner.mark_updated();
    Ok(())
}

/// Relocate a field, keeping its identity. Source and destination may be
/// the same section.
fn move_field<C: SectionContainer + ?Sized>(
    owner: &mut C,
    source_section_id: &str,
    dest_section_id: &str,
    source_index: usize,
    dest_index: usize,
) -> Result<(), FormError> {
    let source = section_index(owner, source_section_id)?;
    let dest = section_index(owner, dest_section_id)?;

    let sections = owner.sections();
    let source_len = sections[source].fields.len();
    if source_index >= source_len {
        return Err(FormError::IndexOutOfRange {
            index: source_index,
            len: source_len,
        });
    }
    // Slots available once the field has left its source
    let dest_slots = if source == dest {
        source_len
    } else {
        sections[dest].fields.len() + 1
    };
    if dest_index >= dest_slots {
        return Err(FormError::IndexOutOfRange {
            index: dest_index,
            len: dest_slots,
        });
    }

    let sections = owner.sections_mut();
    let field = sections[source].fields.remove(source_index);
    sections[dest].fields.insert(dest_index, field);
    owner.mark_updated();
    Ok(())
}

impl FormStore {
    // ============================================================
    // Form sections and fields
    // ============================================================

    /// Append an empty placeholder section
    pub fn add_section(&mut self, form_id: &str) -> Result<FormSection, FormError> {
        let section = add_section(self.form_mut(form_id)?);
        debug!("Added section {} to form {}", section.id, form_id);
        Ok(section)
    }

    pub fn update_section(
        &mut self,
        form_id: &str,
        section_id: &str,
        patch: SectionPatch,
    ) -> Result<(), FormError> {
        update_section(self.form_mut(form_id)?, section_id, patch)
    }

    pub fn delete_section(&mut self, form_id: &str, section_id: &str) -> Result<(), FormError> {
        delete_section(self.form_mut(form_id)?, section_id)?;
        debug!("Deleted section {} from form {}", section_id, form_id);
        Ok(())
    }

    pub fn reorder_sections(
        &mut self,
        form_id: &str,
        from: usize,
        to: usize,
    ) -> Result<(), FormError> {
        reorder_sections(self.form_mut(form_id)?, from, to)
    }

    /// Append a default field of `field_type` to the section
    pub fn add_field(
        &mut self,
        form_id: &str,
        section_id: &str,
        field_type: FieldType,
    ) -> Result<FormField, FormError> {
        let field = add_field(self.form_mut(form_id)?, section_id, field_type)?;
        debug!(
            "Added {} field {} to form {} section {}",
            field_type, field.id, form_id, section_id
        );
        Ok(field)
    }

    pub fn update_field(
        &mut self,
        form_id: &str,
        section_id: &str,
        field_id: &str,
        patch: FieldPatch,
    ) -> Result<FormField, FormError> {
        update_field(self.form_mut(form_id)?, section_id, field_id, patch)
    }

    pub fn delete_field(
        &mut self,
        form_id: &str,
        section_id: &str,
        field_id: &str,
    ) -> Result<(), FormError> {
        delete_field(self.form_mut(form_id)?, section_id, field_id)
    }

    pub fn move_field(
        &mut self,
        form_id: &str,
        source_section_id: &str,
        dest_section_id: &str,
        source_index: usize,
        dest_index: usize,
    ) -> Result<(), FormError> {
        move_field(
            self.form_mut(form_id)?,
            source_section_id,
            dest_section_id,
            source_index,
            dest_index,
        )
    }

    // ============================================================
    // Template sections and fields
    // ============================================================

    pub fn add_template_section(&mut self, template_id: &str) -> Result<FormSection, FormError> {
        Ok(add_section(self.template_mut(template_id)?))
    }

    pub fn update_template_section(
        &mut self,
        template_id: &str,
        section_id: &str,
        patch: SectionPatch,
    ) -> Result<(), FormError> {
        update_section(self.template_mut(template_id)?, section_id, patch)
    }

    pub fn delete_template_section(
        &mut self,
        template_id: &str,
        section_id: &str,
    ) -> Result<(), FormError> {
        delete_section(self.template_mut(template_id)?, section_id)
    }

    pub fn reorder_template_sections(
        &mut self,
        template_id: &str,
        from: usize,
        to: usize,
    ) -> Result<(), FormError> {
        reorder_sections(self.template_mut(template_id)?, from, to)
    }

    pub fn add_template_field(
        &mut self,
        template_id: &str,
        section_id: &str,
        field_type: FieldType,
    ) -> Result<FormField, FormError> {
        add_field(self.template_mut(template_id)?, section_id, field_type)
    }

    pub fn update_template_field(
        &mut self,
        template_id: &str,
        section_id: &str,
        field_id: &str,
        patch: FieldPatch,
    ) -> Result<FormField, FormError> {
        update_field(self.template_mut(template_id)?, section_id, field_id, patch)
    }

    pub fn delete_template_field(
        &mut self,
        template_id: &str,
        section_id: &str,
        field_id: &str,
    ) -> Result<(), FormError> {
        delete_field(self.template_mut(template_id)?, section_id, field_id)
    }

    pub fn move_template_field(
        &mut self,
        template_id: &str,
        source_section_id: &str,
        dest_section_id: &str,
        source_index: usize,
        dest_index: usize,
    ) -> Result<(), FormError> {
        move_field(
            self.template_mut(template_id)?,
            source_section_id,
            dest_section_id,
            source_index,
            dest_index,
        )
    }
}
