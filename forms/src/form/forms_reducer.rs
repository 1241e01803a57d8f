// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

use super::{ActionTypeMatcher, DEBUG_FORMS, FormAction, FormStatus, FormsState,
            HasFormsState, SubmissionPhase};
use crate::AsyncReducer;

/// Reduces submission lifecycle actions into a [`FormsState`].
///
/// | action                           | record for `form_name`                 |
/// |----------------------------------|----------------------------------------|
/// | no form name, or an empty one    | state returned as is                   |
/// | [`SubmissionPhase::Succeeded`]   | `is_submitting: false`, no errors      |
/// | [`SubmissionPhase::Failed`]      | `is_submitting: false`, action errors  |
/// | [`SubmissionPhase::Started`]     | `is_submitting: true`, no errors       |
///
/// Records for other forms are left alone.
#[derive(Clone, Debug, Default)]
pub struct FormsReducer {
    matcher: ActionTypeMatcher,
}

impl FormsReducer {
    /// Use a custom [`ActionTypeMatcher`] for string typed actions.
    #[must_use]
    pub fn new(matcher: ActionTypeMatcher) -> Self { Self { matcher } }

    /// Pure reduction. An action without a form name (or with an empty one) gives back
    /// `state` itself.
    #[must_use]
    pub fn reduce<E, A>(&self, mut state: FormsState<E>, action: &A) -> FormsState<E>
    where
        A: FormAction<E> + ?Sized,
    {
        let Some(form_name) = tagged_form_name::<E, A>(action) else {
            return state;
        };

        let phase = action.submission_phase(&self.matcher);

        DEBUG_FORMS.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📝 reducing form action",
                form_name = %form_name,
                phase = %phase.kind()
            );
        });

        let status = match phase {
            SubmissionPhase::Succeeded => FormStatus::succeeded(),
            SubmissionPhase::Failed(errors) => FormStatus::failed(errors),
            SubmissionPhase::Started => FormStatus::started(),
        };
        state.set(form_name, status);
        state
    }
}

fn tagged_form_name<E, A>(action: &A) -> Option<&str>
where
    A: FormAction<E> + ?Sized,
{
    action.form_name().filter(|it| !it.is_empty())
}

/// Lets the reducer sit in a [`crate::Store`] next to the app's own reducers. Only the
/// `forms` slice of the state is touched.
#[async_trait]
impl<S, A> AsyncReducer<S, A> for FormsReducer
where
    S: HasFormsState + Clone + Sync + Send,
    S::FormErrors: Sync + Send,
    A: FormAction<S::FormErrors> + Sync + Send,
{
    async fn run(&self, action: &A, state: &S) -> S {
        let mut new_state = state.clone();
        if tagged_form_name::<S::FormErrors, A>(action).is_some() {
            let forms = std::mem::take(new_state.forms_mut());
            *new_state.forms_mut() = self.reduce(forms, action);
        }
        new_state
    }
}
