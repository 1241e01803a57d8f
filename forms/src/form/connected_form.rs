// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc};

use super::{BoundActionCreators, ChangeEvent, DEBUG_FORMS, FieldValueMap, FormConfig,
            FormProps, FormStateSelector, FormStatus, HandlerContext, HandlerEvent,
            HasFormsState, OuterProps, SubmitEvent};
use crate::{CommonError, CommonErrorType, CommonResult, Dispatch};

/// A form wired to a store. It is owned by the host (the component that renders the
/// form) and is driven synchronously from the host's update cycle:
///
/// | host event                    | call                                      |
/// |-------------------------------|-------------------------------------------|
/// | input changed                 | [`ConnectedForm::update_field`]           |
/// | form submitted                | [`ConnectedForm::submit_form`]            |
/// | host properties changed       | [`ConnectedForm::on_props_changed`]       |
/// | store subscriber notified     | [`ConnectedForm::on_store_changed`]       |
///
/// Field values are local to this struct. The [`FormStatus`] is selected from the
/// store's [`crate::FormsState`] by form name, and only changes through
/// [`ConnectedForm::on_store_changed`].
pub struct ConnectedForm<P, E, A> {
    config: FormConfig<P, E, A>,
    props: P,
    state: FormStatus<E>,
    fields: FieldValueMap,
    selector: FormStateSelector<E>,
    actions: BoundActionCreators<A>,
}

impl<P, E, A> Debug for ConnectedForm<P, E, A>
where
    P: Debug,
    E: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectedForm")
            .field("form_name", &self.config.form_name)
            .field("props", &self.props)
            .field("state", &self.state)
            .field("fields", &self.fields)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

// Handle mount & accessors.
impl<P, E, A> ConnectedForm<P, E, A>
where
    E: Clone + PartialEq,
{
    /// Select the form's status out of `app_state`, compute the initial field values from
    /// `props`, and bind the action creators to `dispatcher`.
    pub fn mount<S>(
        mut config: FormConfig<P, E, A>,
        props: P,
        app_state: &S,
        dispatcher: impl Dispatch<A> + 'static,
    ) -> Self
    where
        S: HasFormsState<FormErrors = E>,
    {
        let mut selector = FormStateSelector::new(config.form_name.clone());
        let state = selector.select(app_state.forms()).clone();
        let fields = config.initial_fields(&props);
        let actions = BoundActionCreators::new(
            std::mem::take(&mut config.action_creators),
            Arc::new(dispatcher),
        );

        DEBUG_FORMS.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📝 mounted connected form",
                form_name = %config.form_name,
                field_count = fields.len(),
                status = %state.submission_status()
            );
        });

        Self {
            config,
            props,
            state,
            fields,
            selector,
            actions,
        }
    }

    #[must_use]
    pub fn form_name(&self) -> &str { &self.config.form_name }

    #[must_use]
    pub fn props(&self) -> &P { &self.props }

    /// The selected `{is_submitting, errors}` record.
    #[must_use]
    pub fn state(&self) -> &FormStatus<E> { &self.state }

    #[must_use]
    pub fn fields(&self) -> &FieldValueMap { &self.fields }

    #[must_use]
    pub fn actions(&self) -> &BoundActionCreators<A> { &self.actions }

    /// What a presentation component renders from.
    #[must_use]
    pub fn form_props(&self) -> FormProps<'_, P, E, A> {
        FormProps {
            props: &self.props,
            state: &self.state,
            fields: &self.fields,
            actions: &self.actions,
        }
    }
}

// Handle events.
impl<P, E, A> ConnectedForm<P, E, A>
where
    E: Clone + PartialEq,
{
    /// Replace the field values with whatever `updater` returns. Declared names that
    /// the result lacks come back as the empty string.
    pub fn update_form(&mut self, updater: impl FnOnce(FieldValueMap) -> FieldValueMap) {
        let mut next = updater(std::mem::take(&mut self.fields));
        next.fill_missing(&self.config.field_names);
        self.fields = next;
    }

    /// Store the value of the input that changed. See [`ChangeEvent::effective_value`]
    /// for checkbox handling.
    pub fn update_field(&mut self, event: &ChangeEvent) {
        let name = event.target.name.clone();
        let value = event.effective_value();

        DEBUG_FORMS.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📝 field changed",
                form_name = %self.config.form_name,
                field = %name,
                value = ?value
            );
        });

        self.update_form(|mut fields| {
            fields.insert(name, value);
            fields
        });
    }

    /// Prevent the event's default handling, then call `on_submit`. The default handling
    /// is prevented even when `on_submit` fails.
    ///
    /// # Errors
    ///
    /// Whatever `on_submit` returns.
    pub fn submit_form(&mut self, event: &mut impl SubmitEvent) -> CommonResult<()> {
        event.prevent_default();

        DEBUG_FORMS.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📝 submitting form",
                form_name = %self.config.form_name,
                fields = ?self.fields
            );
        });

        (self.config.on_submit)(&self.form_props())
    }

    /// Run the extra handler registered under `name`, passing `event` through. It may
    /// change the fields; declared names it removes come back as the empty string.
    ///
    /// # Errors
    ///
    /// - [`CommonErrorType::NotFound`] if there is no such handler.
    /// - Whatever the handler returns.
    pub fn invoke_handler(&mut self, name: &str, event: &HandlerEvent) -> CommonResult<()> {
        let Some(handler_fn) = self.config.handlers.get(name) else {
            return CommonError::new_error_result(
                CommonErrorType::NotFound,
                &format!("No handler named {name}"),
            );
        };

        let result = handler_fn(
            &mut HandlerContext {
                props: &self.props,
                state: &self.state,
                fields: &mut self.fields,
                actions: &self.actions,
            },
            event,
        );
        self.fields.fill_missing(&self.config.field_names);
        result
    }

    /// Call the bound action creator `name` with the current fields.
    ///
    /// # Errors
    ///
    /// See [`BoundActionCreators::call`].
    pub fn dispatch_action(&self, name: &str) -> CommonResult<()> {
        self.actions.call(name, &self.fields)
    }
}

// Handle property updates.
impl<P, E, A> ConnectedForm<P, E, A>
where
    E: Clone + PartialEq,
{
    /// The host has new properties. The reset predicate is evaluated every time, even
    /// if `next_props` equals the current properties. Returns whether the fields were
    /// reset.
    pub fn on_props_changed(&mut self, next_props: P) -> bool {
        let reset = self.should_reset(&next_props, &self.state);
        if reset {
            self.fields = self.config.initial_fields(&next_props);
        }
        self.props = next_props;
        self.log_props_update("props", reset);
        reset
    }

    /// The store changed. If this form's selected record is unchanged nothing happens
    /// and `false` is returned. Otherwise this counts as a property update: the reset
    /// predicate is evaluated against the new record, and `true` is returned.
    pub fn on_store_changed<S>(&mut self, app_state: &S) -> bool
    where
        S: HasFormsState<FormErrors = E>,
    {
        if !self.selector.is_stale(app_state.forms()) {
            return false;
        }

        let next_state = self.selector.select(app_state.forms()).clone();
        let reset = self.should_reset(&self.props, &next_state);
        if reset {
            self.fields = self.config.initial_fields(&self.props);
        }
        self.state = next_state;
        self.log_props_update("store", reset);
        true
    }

    /// Compares the committed props & state against the incoming ones. Must be called
    /// before either is committed.
    fn should_reset(&self, next_props: &P, next_state: &FormStatus<E>) -> bool {
        let previous = OuterProps {
            props: &self.props,
            state: &self.state,
        };
        let next = OuterProps {
            props: next_props,
            state: next_state,
        };
        (self.config.should_reset_form_on_props)(&previous, &next)
    }

    fn log_props_update(&self, source: &str, reset: bool) {
        DEBUG_FORMS.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📝 property update",
                form_name = %self.config.form_name,
                source = %source,
                reset = reset,
                status = %self.state.submission_status(),
                recomputes = self.selector.recompute_count()
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::{Value, json};

    use super::*;
    use crate::{FieldValue, FormSubmitEvent, FormsState, RecordingDispatcher,
                SubmissionStatus::{Idle, Submitting, Succeeded},
                TypedFormAction, assert_eq2, ok};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Props {
        test: String,
        baz: String,
        reset: bool,
    }

    type Action = TypedFormAction<Value>;
    type Form = ConnectedForm<Props, Value, Action>;

    fn config() -> crate::FormConfigBuilder<Props, Value, Action> {
        FormConfig::builder("form", ["foo", "bar"], |_props| ok!())
    }

    fn mount(config: FormConfig<Props, Value, Action>, props: Props) -> Form {
        ConnectedForm::mount(
            config,
            props,
            &FormsState::default(),
            RecordingDispatcher::default(),
        )
    }

    fn forms_with(status: FormStatus<Value>) -> FormsState<Value> {
        let mut forms = FormsState::default();
        forms.set("form", status);
        forms
    }

    fn set_foo(form: &mut Form, value: &str) {
        let value = value.to_string();
        form.update_form(|mut fields| {
            fields.insert("foo", value);
            fields
        });
    }

    #[test]
    fn test_state_and_fields_are_passed_through() {
        let form = mount(config().build(), Props::default());
        let props = form.form_props();

        assert_eq2!(props.state.is_submitting, None);
        assert_eq2!(props.state.errors, None);
        assert_eq2!(props.fields.len(), 2);
        assert_eq2!(props.fields.get("foo"), Some(&FieldValue::from("")));
        assert_eq2!(props.fields.get("bar"), Some(&FieldValue::from("")));
        assert_eq2!(form.form_name(), "form");
    }

    #[test]
    fn test_custom_handlers_are_run() {
        let runs = Arc::new(Mutex::new(0));
        let runs_clone = runs.clone();
        let mut form = mount(
            config()
                .handler("handler", move |_ctx, _event| {
                    *runs_clone.lock().unwrap() += 1;
                    ok!()
                })
                .build(),
            Props::default(),
        );

        form.invoke_handler("handler", &HandlerEvent::Empty).unwrap();
        assert_eq2!(*runs.lock().unwrap(), 1);
    }

    #[test]
    fn test_handlers_can_change_fields() {
        let mut form = mount(
            config()
                .handler("clear_all", |ctx, _event| {
                    assert_eq2!(ctx.as_form_props().fields.len(), 2);
                    ctx.fields.insert("foo", "cleared");
                    ctx.fields.remove("bar");
                    ok!()
                })
                .build(),
            Props::default(),
        );

        form.invoke_handler("clear_all", &HandlerEvent::default()).unwrap();
        assert_eq2!(
            form.fields(),
            &FieldValueMap::from([("foo", "cleared"), ("bar", "")])
        );
    }

    #[test]
    fn test_handlers_receive_their_event() {
        let mut form = mount(
            config()
                .handler("clear_field", |ctx, event| {
                    let Some(name) = event.field_name() else {
                        return CommonError::new_error_result_with_only_type(
                            CommonErrorType::General,
                        );
                    };
                    ctx.fields.insert(name, "");
                    ok!()
                })
                .handler("copy_change", |ctx, event| {
                    if let HandlerEvent::Change(change) = event {
                        ctx.fields.insert("bar", change.effective_value());
                    }
                    ok!()
                })
                .build(),
            Props::default(),
        );
        form.update_field(&ChangeEvent::text("foo", "baz"));
        form.update_field(&ChangeEvent::text("bar", "qux"));

        form.invoke_handler("clear_field", &HandlerEvent::blur("foo")).unwrap();
        assert_eq2!(
            form.fields(),
            &FieldValueMap::from([("foo", ""), ("bar", "qux")])
        );

        let change = HandlerEvent::from(ChangeEvent::checkbox("x", "on", false));
        form.invoke_handler("copy_change", &change).unwrap();
        assert_eq2!(form.fields().get("bar"), Some(&FieldValue::Flag(false)));

        let report = form
            .invoke_handler("clear_field", &HandlerEvent::from(json!({"row": 1})))
            .unwrap_err();
        assert_eq2!(
            CommonError::error_type_of(&report),
            Some(CommonErrorType::General)
        );
    }

    #[test]
    fn test_unknown_handler_is_not_found() {
        let mut form = mount(config().build(), Props::default());
        let report = form
            .invoke_handler("missing", &HandlerEvent::Empty)
            .unwrap_err();
        assert_eq2!(
            CommonError::error_type_of(&report),
            Some(CommonErrorType::NotFound)
        );
    }

    #[test]
    fn test_action_creators_are_bound_to_dispatch() {
        let dispatcher = RecordingDispatcher::default();
        let form = ConnectedForm::mount(
            config()
                .action_creator("action", |_fields| TypedFormAction::new("FOO"))
                .build(),
            Props::default(),
            &FormsState::default(),
            dispatcher.clone(),
        );

        assert_eq2!(form.actions().names(), vec!["action"]);
        form.dispatch_action("action").unwrap();

        let actions = dispatcher.get_actions();
        assert_eq2!(actions.len(), 1);
        assert_eq2!(actions[0], TypedFormAction::new("FOO"));
    }

    #[test]
    fn test_field_initialisation_can_be_overridden() {
        let form = mount(
            config()
                .initial_state(FieldValueMap::from([("foo", "baz"), ("bar", "qux")]))
                .build(),
            Props::default(),
        );
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));
        assert_eq2!(form.fields().get("bar"), Some(&FieldValue::from("qux")));
    }

    #[test]
    fn test_field_initialisation_with_function_of_props() {
        let form = mount(
            config()
                .derived_initial_state(|props: &Props| {
                    assert_eq2!(props.test, "prop");
                    FieldValueMap::from([("foo", "baz"), ("bar", "qux")])
                })
                .build(),
            Props {
                test: "prop".to_string(),
                ..Default::default()
            },
        );
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));
        assert_eq2!(form.fields().get("bar"), Some(&FieldValue::from("qux")));
    }

    #[test]
    fn test_update_form_updates_fields() {
        let mut form = mount(config().build(), Props::default());
        set_foo(&mut form, "baz");
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));
        assert_eq2!(form.fields().get("bar"), Some(&FieldValue::from("")));
    }

    #[test]
    fn test_update_form_keeps_declared_names() {
        let mut form = mount(config().build(), Props::default());
        form.update_form(|_| FieldValueMap::from([("foo", "only")]));
        assert_eq2!(
            form.fields(),
            &FieldValueMap::from([("foo", "only"), ("bar", "")])
        );
    }

    #[test]
    fn test_resets_on_props_unless_submitting_or_errors() {
        let mut form = mount(config().build(), Props::default());

        set_foo(&mut form, "baz");
        let reset = form.on_props_changed(Props {
            baz: "qux".to_string(),
            ..Default::default()
        });
        assert!(reset);
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("")));
        assert_eq2!(form.fields().get("bar"), Some(&FieldValue::from("")));

        set_foo(&mut form, "baz");
        let forms = forms_with(FormStatus {
            is_submitting: Some(true),
            errors: None,
        });
        assert!(form.on_store_changed(&forms));
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));

        let forms = forms_with(FormStatus {
            is_submitting: None,
            errors: Some(json!({"message": "fubar"})),
        });
        assert!(form.on_store_changed(&forms));
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));
        assert_eq2!(form.state().errors, Some(json!({"message": "fubar"})));
    }

    #[test]
    fn test_reset_behaviour_can_be_overridden() {
        let mut form = mount(
            config()
                .should_reset_form_on_props(|_previous, next| next.props.reset)
                .build(),
            Props::default(),
        );

        set_foo(&mut form, "baz");
        form.on_props_changed(Props {
            baz: "qux".to_string(),
            ..Default::default()
        });
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));

        let forms = forms_with(FormStatus::started());
        form.on_store_changed(&forms);
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));

        form.on_props_changed(Props {
            baz: "qux".to_string(),
            reset: true,
            ..Default::default()
        });
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("")));
    }

    #[test]
    fn test_predicate_runs_even_when_props_are_equal() {
        let calls = Arc::new(Mutex::new(0));
        let calls_clone = calls.clone();
        let mut form = mount(
            config()
                .should_reset_form_on_props(move |_previous, _next| {
                    *calls_clone.lock().unwrap() += 1;
                    false
                })
                .build(),
            Props::default(),
        );
        assert_eq2!(*calls.lock().unwrap(), 0);

        form.on_props_changed(Props::default());
        form.on_props_changed(Props::default());
        assert_eq2!(*calls.lock().unwrap(), 2);
    }

    #[test]
    fn test_unrelated_store_changes_are_ignored() {
        let calls = Arc::new(Mutex::new(0));
        let calls_clone = calls.clone();
        let mut form = mount(
            config()
                .should_reset_form_on_props(move |_previous, _next| {
                    *calls_clone.lock().unwrap() += 1;
                    true
                })
                .build(),
            Props::default(),
        );
        set_foo(&mut form, "baz");

        let mut forms = FormsState::default();
        forms.set("other", FormStatus::started());
        assert!(!form.on_store_changed(&forms));
        assert_eq2!(*calls.lock().unwrap(), 0);
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));
    }

    #[test]
    fn test_predicate_sees_previous_and_next_state() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let mut form = mount(
            config()
                .should_reset_form_on_props(move |previous, next| {
                    seen_clone.lock().unwrap().push((
                        previous.state.submission_status(),
                        next.state.submission_status(),
                    ));
                    false
                })
                .build(),
            Props::default(),
        );

        form.on_store_changed(&forms_with(FormStatus::started()));
        form.on_store_changed(&forms_with(FormStatus::succeeded()));

        assert_eq2!(
            *seen.lock().unwrap(),
            vec![(Idle, Submitting), (Submitting, Succeeded)]
        );
    }

    #[test]
    fn test_update_field_saves_text_input() {
        let mut form = mount(config().build(), Props::default());
        form.update_field(&ChangeEvent::text("foo", "baz"));
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("baz")));
    }

    #[test]
    fn test_update_field_saves_checkbox() {
        let mut form = mount(config().build(), Props::default());
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("")));

        form.update_field(&ChangeEvent::checkbox("foo", "checkbox", true));
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("checkbox")));

        form.update_field(&ChangeEvent::checkbox("foo", "checkbox", false));
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::Flag(false)));

        form.update_field(&ChangeEvent::from_raw("foo", "CHECKBOX", "checkbox", true));
        assert_eq2!(form.fields().get("foo"), Some(&FieldValue::from("checkbox")));
    }

    #[test]
    fn test_submit_form_is_called_with_props() {
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        let mut form: Form = ConnectedForm::mount(
            FormConfig::builder("form", ["foo", "bar"], move |props| {
                *seen_clone.lock().unwrap() = Some(props.fields.clone());
                ok!()
            })
            .build(),
            Props::default(),
            &FormsState::default(),
            RecordingDispatcher::default(),
        );

        form.submit_form(&mut FormSubmitEvent::default()).unwrap();
        assert_eq2!(
            seen.lock().unwrap().clone(),
            Some(FieldValueMap::from([("foo", ""), ("bar", "")]))
        );
    }

    #[test]
    fn test_default_is_prevented_when_submitting() {
        let mut form = mount(config().build(), Props::default());
        let mut event = FormSubmitEvent::default();
        form.submit_form(&mut event).unwrap();
        assert!(event.default_prevented);
    }

    #[test]
    fn test_default_is_prevented_when_on_submit_fails() {
        let mut form: Form = ConnectedForm::mount(
            FormConfig::builder("form", ["foo"], |_props| {
                CommonError::new_error_result_with_only_type(CommonErrorType::General)
            })
            .build(),
            Props::default(),
            &FormsState::default(),
            RecordingDispatcher::default(),
        );
        let mut event = FormSubmitEvent::default();
        assert!(form.submit_form(&mut event).is_err());
        assert!(event.default_prevented);
    }
}
