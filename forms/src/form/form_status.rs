// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Submission status of one form. `errors` is whatever the failed submission action
/// carried, passed through untouched.
///
/// Both fields are [`None`] until the first lifecycle action for the form is reduced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStatus<E> {
    pub is_submitting: Option<bool>,
    pub errors: Option<E>,
}

impl<E> Default for FormStatus<E> {
    fn default() -> Self {
        Self {
            is_submitting: None,
            errors: None,
        }
    }
}

/// Where a form is in its `idle -> submitting -> {succeeded, failed}` lifecycle, as read
/// from a [`FormStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl<E> FormStatus<E> {
    #[must_use]
    pub fn started() -> Self {
        Self {
            is_submitting: Some(true),
            errors: None,
        }
    }

    #[must_use]
    pub fn succeeded() -> Self {
        Self {
            is_submitting: Some(false),
            errors: None,
        }
    }

    #[must_use]
    pub fn failed(errors: Option<E>) -> Self {
        Self {
            is_submitting: Some(false),
            errors,
        }
    }

    #[must_use]
    pub fn is_submitting_now(&self) -> bool { self.is_submitting == Some(true) }

    #[must_use]
    pub fn has_errors(&self) -> bool { self.errors.is_some() }

    #[must_use]
    pub fn submission_status(&self) -> SubmissionStatus {
        match (self.is_submitting, &self.errors) {
            (Some(true), _) => SubmissionStatus::Submitting,
            (_, Some(_)) => SubmissionStatus::Failed,
            (Some(false), None) => SubmissionStatus::Succeeded,
            (None, None) => SubmissionStatus::Idle,
        }
    }
}

/// The `forms` slice of the application state: one [`FormStatus`] per form name.
/// Records are created or overwritten by [`crate::FormsReducer`], never removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormsState<E> {
    map: HashMap<String, FormStatus<E>>,
}

impl<E> Default for FormsState<E> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<E> FormsState<E> {
    /// The record for `form_name`, if any action for it was reduced yet.
    #[must_use]
    pub fn get(&self, form_name: &str) -> Option<&FormStatus<E>> { self.map.get(form_name) }

    /// The record for `form_name`, or the all [`None`] record if there is none.
    #[must_use]
    pub fn get_or_default(&self, form_name: &str) -> FormStatus<E>
    where
        E: Clone,
    {
        self.get(form_name).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, form_name: impl Into<String>, status: FormStatus<E>) {
        self.map.insert(form_name.into(), status);
    }

    #[must_use]
    pub fn len(&self) -> usize { self.map.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.map.is_empty() }
}

/// Application states that carry a `forms` slice. [`crate::FormsReducer`] runs in a
/// [`crate::Store`] whose state implements this, and [`crate::ConnectedForm`] reads its
/// status through it.
pub trait HasFormsState {
    /// The opaque errors carried by failed submissions.
    type FormErrors;

    fn forms(&self) -> &FormsState<Self::FormErrors>;

    fn forms_mut(&mut self) -> &mut FormsState<Self::FormErrors>;
}

/// A store whose whole state is the `forms` slice.
impl<E> HasFormsState for FormsState<E> {
    type FormErrors = E;

    fn forms(&self) -> &FormsState<E> { self }

    fn forms_mut(&mut self) -> &mut FormsState<E> { self }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(FormStatus::default(), SubmissionStatus::Idle)]
    #[test_case(FormStatus::started(), SubmissionStatus::Submitting)]
    #[test_case(FormStatus::succeeded(), SubmissionStatus::Succeeded)]
    #[test_case(FormStatus::failed(Some("boom")), SubmissionStatus::Failed)]
    #[test_case(FormStatus::failed(None), SubmissionStatus::Succeeded)]
    #[test_case(
        FormStatus { is_submitting: None, errors: Some("stale") },
        SubmissionStatus::Failed
    )]
    fn test_submission_status(status: FormStatus<&str>, expected: SubmissionStatus) {
        assert_eq2!(status.submission_status(), expected);
    }

    #[test]
    fn test_absent_form_reads_as_undefined_record() {
        let forms = FormsState::<String>::default();
        assert_eq2!(forms.get("signup"), None);
        assert_eq2!(forms.get_or_default("signup"), FormStatus::default());
    }

    #[test]
    fn test_serializes_keyed_by_form_name() {
        let mut forms = FormsState::<String>::default();
        forms.set("signup", FormStatus::failed(Some("taken".to_string())));
        assert_eq2!(
            serde_json::to_value(&forms).unwrap(),
            serde_json::json!({"signup": {"is_submitting": false, "errors": "taken"}})
        );
    }
}
