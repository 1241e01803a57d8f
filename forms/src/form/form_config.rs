// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap,
          fmt::{Debug, Formatter}};

use super::{ActionCreatorFn, FieldValueMap, FormProps, HandlerContext, HandlerEvent,
            OuterProps};
use crate::CommonResult;

/// Called by [`crate::ConnectedForm::submit_form`], after the default event handling was
/// prevented.
pub type OnSubmitFn<P, E, A> = Box<dyn Fn(&FormProps<'_, P, E, A>) -> CommonResult<()> + Send + Sync>;

/// Computes initial field values from the host's properties.
pub type InitialStateFn<P> = Box<dyn Fn(&P) -> FieldValueMap + Send + Sync>;

/// `(previous, next) -> reset?`.
pub type ShouldResetFn<P, E> =
    Box<dyn Fn(&OuterProps<'_, P, E>, &OuterProps<'_, P, E>) -> bool + Send + Sync>;

/// An extra named handler, see [`crate::ConnectedForm::invoke_handler`]. The second
/// argument is whatever the host passed along with the invocation.
pub type HandlerFn<P, E, A> = Box<
    dyn Fn(&mut HandlerContext<'_, P, E, A>, &HandlerEvent) -> CommonResult<()> + Send + Sync,
>;

/// Overrides for the initial field values. Every key of the result is kept; declared
/// names it doesn't list start out as the empty string.
pub enum InitialState<P> {
    Static(FieldValueMap),
    Derived(InitialStateFn<P>),
}

impl<P> Default for InitialState<P> {
    fn default() -> Self { InitialState::Static(FieldValueMap::new()) }
}

impl<P> Debug for InitialState<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InitialState::Static(map) => f.debug_tuple("Static").field(map).finish(),
            InitialState::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl<P> From<FieldValueMap> for InitialState<P> {
    fn from(map: FieldValueMap) -> Self { InitialState::Static(map) }
}

/// Reset unless the next state says a submission is in flight or has failed.
#[must_use]
pub fn default_should_reset_form_on_props<P, E>(
    _previous: &OuterProps<'_, P, E>,
    next: &OuterProps<'_, P, E>,
) -> bool {
    !(next.state.is_submitting == Some(true) || next.state.errors.is_some())
}

/// Everything needed to mount a [`crate::ConnectedForm`]. Use [`FormConfig::builder`].
///
/// - `P` is the host's property type.
/// - `E` is the opaque errors type of failed submissions.
/// - `A` is the action type of the store.
pub struct FormConfig<P, E, A> {
    pub(crate) form_name: String,
    pub(crate) field_names: Vec<String>,
    pub(crate) on_submit: OnSubmitFn<P, E, A>,
    pub(crate) action_creators: HashMap<String, ActionCreatorFn<A>>,
    pub(crate) initial_state: InitialState<P>,
    pub(crate) should_reset_form_on_props: ShouldResetFn<P, E>,
    pub(crate) handlers: HashMap<String, HandlerFn<P, E, A>>,
}

impl<P, E, A> Debug for FormConfig<P, E, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormConfig")
            .field("form_name", &self.form_name)
            .field("field_names", &self.field_names)
            .field("action_creators", &self.action_creators.keys().collect::<Vec<_>>())
            .field("initial_state", &self.initial_state)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<P: 'static, E: 'static, A: 'static> FormConfig<P, E, A> {
    /// `form_name`, `field_names` and `on_submit` are required. Nothing is validated, an
    /// empty form name is a valid key.
    pub fn builder(
        form_name: impl Into<String>,
        field_names: impl IntoIterator<Item = impl Into<String>>,
        on_submit: impl Fn(&FormProps<'_, P, E, A>) -> CommonResult<()> + Send + Sync + 'static,
    ) -> FormConfigBuilder<P, E, A> {
        FormConfigBuilder {
            config: FormConfig {
                form_name: form_name.into(),
                field_names: field_names.into_iter().map(Into::into).collect(),
                on_submit: Box::new(on_submit),
                action_creators: HashMap::new(),
                initial_state: InitialState::default(),
                should_reset_form_on_props: Box::new(default_should_reset_form_on_props),
                handlers: HashMap::new(),
            },
        }
    }
}

impl<P, E, A> FormConfig<P, E, A> {
    #[must_use]
    pub fn form_name(&self) -> &str { &self.form_name }

    #[must_use]
    pub fn field_names(&self) -> &[String] { &self.field_names }

    /// Every declared field as the empty string, with the keys of [`InitialState`]
    /// merged over them.
    #[must_use]
    pub fn initial_fields(&self, props: &P) -> FieldValueMap {
        let mut fields = FieldValueMap::with_declared_fields(&self.field_names);
        match &self.initial_state {
            InitialState::Static(overrides) => {
                fields.merge(overrides);
            }
            InitialState::Derived(derive_fn) => {
                fields.merge(&derive_fn(props));
            }
        }
        fields
    }
}

pub struct FormConfigBuilder<P, E, A> {
    config: FormConfig<P, E, A>,
}

impl<P, E, A> Debug for FormConfigBuilder<P, E, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl<P, E, A> FormConfigBuilder<P, E, A> {
    /// Registers an action creator. Once mounted it is bound to the dispatcher, see
    /// [`crate::BoundActionCreators`].
    #[must_use]
    pub fn action_creator(
        mut self,
        name: impl Into<String>,
        creator_fn: impl Fn(&FieldValueMap) -> A + Send + Sync + 'static,
    ) -> Self {
        self.config
            .action_creators
            .insert(name.into(), Box::new(creator_fn));
        self
    }

    #[must_use]
    pub fn initial_state(mut self, initial_state: impl Into<InitialState<P>>) -> Self {
        self.config.initial_state = initial_state.into();
        self
    }

    #[must_use]
    pub fn derived_initial_state(
        mut self,
        derive_fn: impl Fn(&P) -> FieldValueMap + Send + Sync + 'static,
    ) -> Self {
        self.config.initial_state = InitialState::Derived(Box::new(derive_fn));
        self
    }

    /// Replaces [`default_should_reset_form_on_props`] entirely.
    #[must_use]
    pub fn should_reset_form_on_props(
        mut self,
        predicate: impl Fn(&OuterProps<'_, P, E>, &OuterProps<'_, P, E>) -> bool
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.config.should_reset_form_on_props = Box::new(predicate);
        self
    }

    #[must_use]
    pub fn handler(
        mut self,
        name: impl Into<String>,
        handler_fn: impl Fn(&mut HandlerContext<'_, P, E, A>, &HandlerEvent) -> CommonResult<()>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.config.handlers.insert(name.into(), Box::new(handler_fn));
        self
    }

    #[must_use]
    pub fn build(self) -> FormConfig<P, E, A> { self.config }
}
