//! Property-based tests for form-core
//!
//! Covers access-key allocation, the submission policies and the ordering
//! guarantees of the field validator.

use std::collections::HashSet;

use form_core::access_key::is_well_formed;
use form_core::validation::REQUIRED_MESSAGE;
use form_core::{
    validate_field_value, FieldType, FieldValue, FieldValues, FormOverrides, FormStatus,
    FormStore,
};
use proptest::prelude::*;

fn field_type() -> impl Strategy<Value = FieldType> {
    proptest::sample::select(FieldType::ALL.to_vec())
}

fn published_store(allow_multiple: bool) -> (FormStore, String) {
    let mut store = FormStore::new();
    let form = store.create_form(FormOverrides {
        status: Some(FormStatus::Published),
        allow_multiple_submissions: Some(allow_multiple),
        ..Default::default()
    });
    (store, form.access_key)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ============================================================
    // Access keys
    // ============================================================

    #[test]
    fn access_keys_are_well_formed_and_unique(count in 1usize..60) {
        let mut store = FormStore::new();
        for _ in 0..count {
            store.create_form(FormOverrides::default());
        }

        let keys: HashSet<String> =
            store.forms().iter().map(|f| f.access_key.clone()).collect();
        prop_assert_eq!(keys.len(), count);
        for key in &keys {
            prop_assert!(is_well_formed(key), "bad key {}", key);
        }
    }

    #[test]
    fn regenerated_keys_stay_unique(rounds in 1usize..20) {
        let mut store = FormStore::new();
        let form = store.create_form(FormOverrides::default());
        store.create_form(FormOverrides::default());

        let mut previous = form.access_key.clone();
        for _ in 0..rounds {
            let key = store.regenerate_access_key(&form.id).unwrap();
            prop_assert_ne!(&key, &previous);
            prop_assert!(store.get_form_by_access_key(&previous).is_none());
            previous = key;
        }

        let keys: HashSet<_> = store.forms().iter().map(|f| &f.access_key).collect();
        prop_assert_eq!(keys.len(), 2);
    }

    // ============================================================
    // Submission policy
    // ============================================================

    #[test]
    fn single_submission_never_grows(
        users in proptest::collection::vec("u[0-3]", 1..20)
    ) {
        let (mut store, key) = published_store(false);
        for user in &users {
            store.submit_form(&key, FieldValues::new(), Some(user.as_str())).unwrap();
        }

        let distinct: HashSet<_> = users.iter().collect();
        let form = store.get_form_by_access_key(&key).unwrap();
        prop_assert_eq!(form.submissions.len(), distinct.len());
    }

    #[test]
    fn multiple_submissions_append_every_time(repeats in 1usize..20) {
        let (mut store, key) = published_store(true);
        for _ in 0..repeats {
            store.submit_form(&key, FieldValues::new(), Some("u1")).unwrap();
        }
        prop_assert_eq!(
            store.get_form_by_access_key(&key).unwrap().submissions.len(),
            repeats
        );
    }

    // ============================================================
    // Section ordering
    // ============================================================

    #[test]
    fn reorder_is_a_stable_move(len in 1usize..8, from_seed in 0usize..8, to_seed in 0usize..8) {
        let from = from_seed % len;
        let to = to_seed % len;

        let mut store = FormStore::new();
        let form = store.create_form(FormOverrides::default());
        for _ in 1..len {
            store.add_section(&form.id).unwrap();
        }
        let before: Vec<String> = store.get_form_by_id(&form.id).unwrap()
            .sections.iter().map(|s| s.id.clone()).collect();

        store.reorder_sections(&form.id, from, to).unwrap();
        let after: Vec<String> = store.get_form_by_id(&form.id).unwrap()
            .sections.iter().map(|s| s.id.clone()).collect();

        let mut expected = before.clone();
        let moved = expected.remove(from);
        expected.insert(to, moved);
        prop_assert_eq!(after, expected);
    }

    // ============================================================
    // Validator
    // ============================================================

    #[test]
    fn required_empty_is_always_invalid(t in field_type()) {
        let result = validate_field_value(
            Some(&FieldValue::Text(String::new())), t, true, None, None, None,
        );
        prop_assert!(!result.valid);
        prop_assert_eq!(result.error.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn optional_empty_is_always_valid(t in field_type(), regex in "[a-z]{1,5}") {
        let result = validate_field_value(
            Some(&FieldValue::Text(String::new())), t, false, Some(1.0), Some(2.0), Some(regex.as_str()),
        );
        prop_assert!(result.valid);
    }

    #[test]
    fn numbers_inside_bounds_are_valid(min in -1000i32..0, span in 0i32..1000, offset in 0i32..1000) {
        let min = min as f64;
        let max = min + span as f64;
        let value = min + (offset.min(span)) as f64;
        let result = validate_field_value(
            Some(&FieldValue::Number(value)), FieldType::Number, true, Some(min), Some(max), None,
        );
        prop_assert!(result.valid);
    }

    #[test]
    fn numbers_above_max_cite_max(max in -1000i32..1000, excess in 1i32..1000) {
        let value = (max + excess) as f64;
        let result = validate_field_value(
            Some(&FieldValue::Number(value)), FieldType::Range, true, None, Some(max as f64), None,
        );
        let expected = format!("Value must be at most {}", max as f64);
        prop_assert_eq!(result.error, Some(expected));
    }

    #[test]
    fn generated_emails_are_valid(
        local in "[a-z]{1,20}",
        domain in "[a-z]{2,10}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        let result = validate_field_value(
            Some(&FieldValue::Text(email)), FieldType::Email, true, None, None, None,
        );
        prop_assert!(result.valid);
    }

    #[test]
    fn iraqi_mobiles_are_valid(operator in "[3789]", rest in "[0-9]{7}") {
        let phone = format!("07{}{}", operator, rest);
        let result = validate_field_value(
            Some(&FieldValue::Text(phone)), FieldType::Phone, true, None, None, None,
        );
        prop_assert!(result.valid);
    }

    #[test]
    fn times_in_24h_are_valid(hour in 0u32..24, minute in 0u32..60) {
        let time = format!("{:02}:{:02}", hour, minute);
        let result = validate_field_value(
            Some(&FieldValue::Text(time)), FieldType::Time, true, None, None, None,
        );
        prop_assert!(result.valid);
    }
}
