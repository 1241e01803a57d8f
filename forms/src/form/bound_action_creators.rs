// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap,
          fmt::{Debug, Formatter},
          sync::Arc};

use super::{DEBUG_FORMS, FieldValueMap};
use crate::{CommonError, CommonErrorType, CommonResult, Dispatch};

/// Builds an action from the current field values.
pub type ActionCreatorFn<A> = Box<dyn Fn(&FieldValueMap) -> A + Send + Sync>;

/// Every action creator of a [`crate::FormConfig`], bound to the store's dispatcher:
/// calling one creates the action and dispatches it in one go.
pub struct BoundActionCreators<A> {
    creators: HashMap<String, ActionCreatorFn<A>>,
    dispatcher: Arc<dyn Dispatch<A>>,
}

impl<A> Debug for BoundActionCreators<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundActionCreators")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

impl<A> BoundActionCreators<A> {
    #[must_use]
    pub fn new(
        creators: HashMap<String, ActionCreatorFn<A>>,
        dispatcher: Arc<dyn Dispatch<A>>,
    ) -> Self {
        Self {
            creators,
            dispatcher,
        }
    }

    /// Sorted, so it reads the same every time.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut it: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        it.sort_unstable();
        it
    }

    /// Create the action named `name` from `fields` and dispatch it.
    ///
    /// # Errors
    ///
    /// - [`CommonErrorType::NotFound`] if no creator is registered under `name`.
    /// - Whatever the dispatcher returns if the action can't be queued.
    pub fn call(&self, name: &str, fields: &FieldValueMap) -> CommonResult<()> {
        let Some(creator) = self.creators.get(name) else {
            return CommonError::new_error_result(
                CommonErrorType::NotFound,
                &format!("No action creator named {name}"),
            );
        };

        DEBUG_FORMS.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "📝 calling bound action creator", name = %name);
        });

        self.dispatcher.dispatch(creator(fields))
    }

    /// A handle on the dispatcher that can be moved into a spawned task.
    #[must_use]
    pub fn dispatcher(&self) -> Arc<dyn Dispatch<A>> { self.dispatcher.clone() }
}
