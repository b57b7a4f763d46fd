//! Demo data loaded by `FormStore::init`

use tracing::{info, warn};

use super::FormStore;
use crate::model::{FormField, FormSection, NewTemplate};
use crate::types::FieldType;

fn field(field_type: FieldType, label: &str, required: bool) -> FormField {
    FormField {
        label: label.to_string(),
        required,
        ..FormField::for_type(field_type)
    }
}

fn section(title: &str, description: &str, fields: Vec<FormField>) -> FormSection {
    FormSection {
        title: title.to_string(),
        description: description.to_string(),
        fields,
        ..FormSection::empty()
    }
}

fn customer_feedback() -> NewTemplate {
    let mut satisfaction = field(FieldType::Rating, "How satisfied are you overall?", true);
    satisfaction.help_text = Some("1 is very unhappy, 5 is delighted".to_string());

    let mut channel = field(FieldType::Radio, "How did you hear about us?", false);
    channel.options = Some(vec![
        "Friend".to_string(),
        "Social media".to_string(),
        "Search engine".to_string(),
        "Other".to_string(),
    ]);

    NewTemplate {
        name: "Customer Feedback".to_string(),
        description: "Collect satisfaction ratings and comments from customers".to_string(),
        category: Some("Feedback".to_string()),
        sections: vec![
            section(
                "Your experience",
                "Tell us how we did",
                vec![
                    satisfaction,
                    channel,
                    field(FieldType::LongText, "Anything else we should know?", false),
                ],
            ),
            section(
                "Contact",
                "Optional, if you would like a reply",
                vec![
                    field(FieldType::ShortText, "Name", false),
                    field(FieldType::Email, "Email", false),
                ],
            ),
        ],
    }
}

fn event_registration() -> NewTemplate {
    let mut sessions = field(FieldType::Checkbox, "Which sessions will you attend?", true);
    sessions.options = Some(vec![
        "Morning keynote".to_string(),
        "Workshops".to_string(),
        "Evening reception".to_string(),
    ]);

    NewTemplate {
        name: "Event Registration".to_string(),
        description: "Register attendees and their session choices".to_string(),
        category: Some("Events".to_string()),
        sections: vec![section(
            "Attendee",
            "Who is coming",
            vec![
                field(FieldType::ShortText, "Full name", true),
                field(FieldType::Email, "Email", true),
                field(FieldType::Phone, "Mobile number", false),
                field(FieldType::Gender, "Gender", false),
                field(FieldType::Date, "Arrival date", true),
                sessions,
            ],
        )],
    }
}

pub(super) fn seed(store: &mut FormStore) {
    store.add_template(event_registration());
    let feedback = store.add_template(customer_feedback());

    match store.publish_template_as_form(&feedback.template_id) {
        Ok(form) => info!(
            "Seeded sample form {} with access key {}",
            form.id, form.access_key
        ),
        Err(e) => warn!("Failed to seed sample form: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use crate::store::FormStore;
    use crate::types::FormStatus;

    #[test]
    fn test_init_seeds_templates_and_sample_form() {
        let store = FormStore::init();

        assert_eq!(store.templates().len(), 2);
        assert_eq!(store.forms().len(), 1);

        let form = &store.forms()[0];
        assert_eq!(form.title, "Customer Feedback");
        assert_eq!(form.status, FormStatus::Published);
        assert!(form.fields().any(|f| f.required));
        assert!(store.get_form_by_access_key(&form.access_key).is_some());
    }

    #[test]
    fn test_seeded_option_fields_have_options() {
        let store = FormStore::init();
        for template in store.templates() {
            for section in &template.sections {
                for field in &section.fields {
                    if field.field_type.has_options() {
                        assert!(!field.options.as_deref().unwrap_or_default().is_empty());
                    }
                }
            }
        }
    }
}
