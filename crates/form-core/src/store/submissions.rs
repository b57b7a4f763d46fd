//! Submissions, drafts and per-user access tracking

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::FormStore;
use crate::access_key;
use crate::error::{FormError, SubmitRejection};
use crate::model::{new_id, FormSubmission, UserFormEntry};
use crate::types::{EntryStatus, FieldValues, FormStatus, SubmissionStatus};

impl FormStore {
    /// Record a response against the form addressed by `key`.
    ///
    /// Values are stored as given; callers validate them first. When the
    /// form allows one response per user, a repeat submission from the same
    /// identified user replaces the earlier one instead of adding another.
    ///
    /// Submissions without a user id, and every submission to an anonymous
    /// form, are always appended: there is no user to match an earlier
    /// response against, so the one-per-user policy cannot apply to them.
    pub fn submit_form(
        &mut self,
        key: &str,
        values: FieldValues,
        user_id: Option<&str>,
    ) -> Result<FormSubmission, SubmitRejection> {
        let key = access_key::normalize(key);
        let now = Utc::now();

        let form = self
            .forms
            .iter_mut()
            .find(|f| f.access_key == key)
            .ok_or_else(|| SubmitRejection::FormNotFound(key.clone()))?;

        if form.status != FormStatus::Published {
            warn!("Rejected submission to unpublished form {}", form.id);
            return Err(SubmitRejection::NotPublished);
        }
        if form.is_closed(now) {
            warn!("Rejected submission to closed form {}", form.id);
            return Err(SubmitRejection::Closed);
        }

        let stored_user = if form.anonymous_responses {
            None
        } else {
            user_id.map(str::to_string)
        };

        // Replace in place only for an identified user on a single-response
        // form; `None` users always append.
        let existing = match (&stored_user, form.allow_multiple_submissions) {
            (Some(user), false) => form.submissions.iter_mut().find(|s| {
                s.status == SubmissionStatus::Submitted
                    && s.user_id.as_deref() == Some(user.as_str())
            }),
            _ => None,
        };

        let submission = match existing {
            Some(previous) => {
                previous.values = values;
                previous.submitted_at = now;
                info!("Replaced submission {} on form {}", previous.id, form.id);
                previous.clone()
            }
            None => {
                let submission = FormSubmission {
                    id: new_id(),
                    user_id: stored_user,
                    submitted_at: now,
                    values,
                    status: SubmissionStatus::Submitted,
                };
                form.submissions.push(submission.clone());
                info!(
                    "Recorded submission {} on form {} ({} total)",
                    submission.id,
                    form.id,
                    form.submissions.len()
                );
                submission
            }
        };

        let form_id = form.id.clone();
        let entry = self.upsert_entry(&form_id, &key, user_id, now);
        entry.status = EntryStatus::Submitted;
        entry.draft_values = None;
        entry.last_submission_id = Some(submission.id.clone());

        Ok(submission)
    }

    /// Save partial, unvalidated answers for later.
    ///
    /// Only the draft values and `last_updated_at` change on an existing
    /// entry, so a submitted entry stays submitted. Never touches the form's
    /// submissions.
    pub fn save_draft(
        &mut self,
        key: &str,
        values: FieldValues,
        user_id: Option<&str>,
    ) -> Result<UserFormEntry, FormError> {
        let key = access_key::normalize(key);
        let form_id = self.form_id_for_key(&key)?;

        let entry = self.upsert_entry(&form_id, &key, user_id, Utc::now());
        entry.draft_values = Some(values);

        debug!("Saved draft for form {} user {:?}", form_id, user_id);
        Ok(entry.clone())
    }

    pub fn get_draft(&self, key: &str, user_id: Option<&str>) -> Option<&FieldValues> {
        self.get_user_form_by_access_key(key, user_id)
            .and_then(|e| e.draft_values.as_ref())
    }

    /// Discard the user's entry for this key. Returns whether one existed.
    pub fn delete_user_form_draft(&mut self, key: &str, user_id: Option<&str>) -> bool {
        let key = access_key::normalize(key);
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.access_key == key && e.user_id.as_deref() == user_id));
        let removed = self.entries.len() != before;
        if removed {
            debug!("Discarded draft for key {} user {:?}", key, user_id);
        }
        removed
    }

    /// Make sure the user has an entry for this key; existing entries are
    /// left untouched.
    pub fn track_form_access(
        &mut self,
        key: &str,
        user_id: Option<&str>,
    ) -> Result<UserFormEntry, FormError> {
        let key = access_key::normalize(key);
        if let Some(entry) = self.get_user_form_by_access_key(&key, user_id) {
            return Ok(entry.clone());
        }

        let form_id = self.form_id_for_key(&key)?;
        let entry = self.upsert_entry(&form_id, &key, user_id, Utc::now());
        Ok(entry.clone())
    }

    pub fn get_submissions(&self, form_id: &str) -> Option<&[FormSubmission]> {
        self.get_form_by_id(form_id).map(|f| f.submissions.as_slice())
    }

    pub fn delete_submission(
        &mut self,
        form_id: &str,
        submission_id: &str,
    ) -> Result<(), FormError> {
        let form = self.form_mut(form_id)?;
        let before = form.submissions.len();
        form.submissions.retain(|s| s.id != submission_id);
        if form.submissions.len() == before {
            return Err(FormError::SubmissionNotFound(submission_id.to_string()));
        }
        info!("Deleted submission {} from form {}", submission_id, form_id);
        Ok(())
    }

    fn form_id_for_key(&self, key: &str) -> Result<String, FormError> {
        self.get_form_by_access_key(key)
            .map(|f| f.id.clone())
            .ok_or_else(|| FormError::FormNotFound(key.to_string()))
    }

    /// Existing entry with `last_updated_at` refreshed, or a new in-progress one
    fn upsert_entry(
        &mut self,
        form_id: &str,
        key: &str,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> &mut UserFormEntry {
        let index = match self
            .entries
            .iter()
            .position(|e| e.access_key == key && e.user_id.as_deref() == user_id)
        {
            Some(index) => index,
            None => {
                self.entries.push(UserFormEntry {
                    form_id: form_id.to_string(),
                    access_key: key.to_string(),
                    user_id: user_id.map(str::to_string),
                    status: EntryStatus::InProgress,
                    first_opened_at: now,
                    last_updated_at: now,
                    last_submission_id: None,
                    draft_values: None,
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        entry.last_updated_at = now;
        entry
    }
}
