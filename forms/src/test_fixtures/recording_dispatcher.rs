// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{CommonResult, Dispatch};

/// A [`Dispatch`] that doesn't reduce anything, it just remembers every action it was
/// handed. Clones share the same recording.
///
/// ```
/// use r3bl_forms::{Dispatch, RecordingDispatcher};
///
/// let dispatcher = RecordingDispatcher::default();
/// dispatcher.clone().dispatch("FOO").unwrap();
/// assert_eq!(dispatcher.get_actions(), vec!["FOO"]);
/// ```
#[derive(Debug)]
pub struct RecordingDispatcher<A> {
    actions: Arc<Mutex<Vec<A>>>,
}

impl<A> Default for RecordingDispatcher<A> {
    fn default() -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<A> Clone for RecordingDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
        }
    }
}

impl<A: Clone> RecordingDispatcher<A> {
    /// Everything dispatched so far, oldest first.
    #[must_use]
    pub fn get_actions(&self) -> Vec<A> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<A> RecordingDispatcher<A> {
    pub fn clear_actions(&self) {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<A: Send> Dispatch<A> for RecordingDispatcher<A> {
    fn dispatch(&self, action: A) -> CommonResult<()> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConnectedForm, FormConfig, FormProps, FormSubmitEvent, FormsState,
                TypedFormAction, assert_eq2};

    type Action = TypedFormAction<String>;

    #[test]
    fn test_clones_share_the_recording() {
        let dispatcher = RecordingDispatcher::<Action>::default();
        let config = FormConfig::builder(
            "signup",
            ["email"],
            |props: &FormProps<'_, (), String, Action>| props.actions.call("submit", props.fields),
        )
        .action_creator("submit", |_fields| TypedFormAction::new("SIGNUP").for_form("signup"))
        .build();
        let mut form =
            ConnectedForm::mount(config, (), &FormsState::default(), dispatcher.clone());

        form.submit_form(&mut FormSubmitEvent::default()).unwrap();
        form.submit_form(&mut FormSubmitEvent::default()).unwrap();
        assert_eq2!(dispatcher.get_actions().len(), 2);

        dispatcher.clear_actions();
        assert!(dispatcher.get_actions().is_empty());
    }
}
