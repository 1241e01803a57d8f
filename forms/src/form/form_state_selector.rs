// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{FormStatus, FormsState};

/// Selects the [`FormStatus`] of one form out of a [`FormsState`], and hands back the
/// previously selected record when neither `is_submitting` nor `errors` changed. Store
/// updates that don't touch this form are then invisible to whoever holds the
/// selection.
#[derive(Clone, Debug)]
pub struct FormStateSelector<E> {
    form_name: String,
    memo: Option<FormStatus<E>>,
    recompute_count: usize,
}

impl<E> FormStateSelector<E>
where
    E: Clone + PartialEq,
{
    #[must_use]
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            memo: None,
            recompute_count: 0,
        }
    }

    /// How many times the record was rebuilt, ie how many times the selection changed.
    #[must_use]
    pub fn recompute_count(&self) -> usize { self.recompute_count }

    /// Whether `forms` would yield a different record than the memoized one.
    #[must_use]
    pub fn is_stale(&self, forms: &FormsState<E>) -> bool {
        let Some(memo) = &self.memo else {
            return true;
        };
        match forms.get(&self.form_name) {
            Some(status) => {
                memo.is_submitting != status.is_submitting || memo.errors != status.errors
            }
            None => memo.is_submitting.is_some() || memo.errors.is_some(),
        }
    }

    pub fn select(&mut self, forms: &FormsState<E>) -> &FormStatus<E> {
        if self.is_stale(forms) {
            self.memo = Some(forms.get_or_default(&self.form_name));
            self.recompute_count += 1;
        }
        self.memo.get_or_insert_with(FormStatus::default)
    }
}
