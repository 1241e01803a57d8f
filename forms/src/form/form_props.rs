// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{BoundActionCreators, FieldValueMap, FormStatus};

/// The host's properties together with the selected [`FormStatus`]. This is what the
/// reset predicate compares, once for the previous and once for the next update.
#[derive(Debug)]
pub struct OuterProps<'a, P, E> {
    pub props: &'a P,
    pub state: &'a FormStatus<E>,
}

impl<P, E> Clone for OuterProps<'_, P, E> {
    fn clone(&self) -> Self { *self }
}

impl<P, E> Copy for OuterProps<'_, P, E> {}

/// Everything a presentation component (or the submit callback) gets to see.
#[derive(Debug)]
pub struct FormProps<'a, P, E, A> {
    pub props: &'a P,
    pub state: &'a FormStatus<E>,
    pub fields: &'a FieldValueMap,
    pub actions: &'a BoundActionCreators<A>,
}

/// Same as [`FormProps`], but the fields can be changed. Passed to the extra handlers
/// registered with [`crate::FormConfigBuilder::handler`].
#[derive(Debug)]
pub struct HandlerContext<'a, P, E, A> {
    pub props: &'a P,
    pub state: &'a FormStatus<E>,
    pub fields: &'a mut FieldValueMap,
    pub actions: &'a BoundActionCreators<A>,
}

impl<P, E, A> HandlerContext<'_, P, E, A> {
    /// Read only view, eg to hand to a helper that takes [`FormProps`].
    #[must_use]
    pub fn as_form_props(&self) -> FormProps<'_, P, E, A> {
        FormProps {
            props: self.props,
            state: self.state,
            fields: self.fields,
            actions: self.actions,
        }
    }
}
