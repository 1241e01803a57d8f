// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Wires a [`Store`], the [`FormsReducer`], and a [`ConnectedForm`] together, then
//! plays the part of a user who fills in a form and submits it. The submission is
//! "sent to a server" by a spawned task that sleeps and then dispatches a success or a
//! fail action.
//!
//! ```text
//! cargo run --bin form_demo -- --delay-ms 500 --log-level debug
//! cargo run --bin form_demo -- --should-error --log-file form_demo_log.txt
//! ```

use std::time::Duration;

use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use miette::IntoDiagnostic;
use r3bl_forms::{ActionTypeMatcher, AsyncReducer, AsyncSubscriber, ChangeEvent,
                 ChannelDispatcher, CommonResult, ConnectedForm, Dispatch, DisplayPreference,
                 FieldValue, FieldValueMap, FormAction, FormConfig, FormProps, FormSubmitEvent,
                 FormsReducer, FormsState, HandlerContext, HandlerEvent, HasFormsState, Store,
                 SubmissionPhase,
                 TracingConfig, WriterConfig, ok, spawn_dispatch_loop,
                 try_initialize_logging_global};
use tokio::sync::mpsc;
use tracing_core::LevelFilter;

const FORM_NAME: &str = "foo";
const DISPATCH_QUEUE_CAPACITY: usize = 16;

#[derive(Debug, Parser)]
#[command(bin_name = "form_demo")]
#[command(about = "📝 Fill in and submit a form that is wired to an async store")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CliArgs {
    #[arg(long, short = 'e', help = "Make the simulated submission fail")]
    pub should_error: bool,

    #[arg(
        long,
        short = 'd',
        default_value_t = 250,
        help = "How long the simulated submission takes, in milliseconds"
    )]
    pub delay_ms: u64,

    #[arg(
        long,
        short = 'l',
        value_enum,
        default_value_t = LogLevel::Off,
        help = "Logging is disabled unless this is set"
    )]
    pub log_level: LogLevel,

    #[arg(
        long,
        short = 'f',
        help = "Log to this file instead of stderr (only if --log-level is not off)"
    )]
    pub log_file: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl CliArgs {
    fn tracing_config(&self) -> TracingConfig {
        let writer_config = match &self.log_file {
            Some(path) => WriterConfig::File(path.clone()),
            None => WriterConfig::Display(DisplayPreference::Stderr),
        };
        TracingConfig {
            level_filter: self.log_level.into(),
            writer_config,
        }
    }
}

/// What the "server" sends back when it rejects a foo.
#[derive(Clone, Debug, PartialEq)]
pub struct FooErrors {
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub forms: FormsState<FooErrors>,
    pub saved_foos: Vec<String>,
    pub tick_count: usize,
}

impl HasFormsState for AppState {
    type FormErrors = FooErrors;

    fn forms(&self) -> &FormsState<FooErrors> { &self.forms }

    fn forms_mut(&mut self) -> &mut FormsState<FooErrors> { &mut self.forms }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DemoAction {
    SaveFoo { name: String },
    SaveFooSuccess { name: String },
    SaveFooFail { errors: FooErrors },
    /// Has nothing to do with the form.
    Tick,
}

impl FormAction<FooErrors> for DemoAction {
    fn form_name(&self) -> Option<&str> {
        match self {
            DemoAction::Tick => None,
            _ => Some(FORM_NAME),
        }
    }

    fn submission_phase(&self, _matcher: &ActionTypeMatcher) -> SubmissionPhase<FooErrors> {
        match self {
            DemoAction::SaveFooSuccess { .. } => SubmissionPhase::Succeeded,
            DemoAction::SaveFooFail { errors } => SubmissionPhase::Failed(Some(errors.clone())),
            DemoAction::SaveFoo { .. } | DemoAction::Tick => SubmissionPhase::Started,
        }
    }
}

#[derive(Default)]
struct SavedFoosReducer;

#[async_trait]
impl AsyncReducer<AppState, DemoAction> for SavedFoosReducer {
    async fn run(&self, action: &DemoAction, state: &AppState) -> AppState {
        let mut new_state = state.clone();
        match action {
            DemoAction::SaveFooSuccess { name } => new_state.saved_foos.push(name.clone()),
            DemoAction::Tick => new_state.tick_count += 1,
            DemoAction::SaveFoo { .. } | DemoAction::SaveFooFail { .. } => {}
        }
        new_state
    }
}

/// Hands every new state over to the main task, which owns the form.
struct StateForwarder {
    sender: mpsc::UnboundedSender<AppState>,
}

#[async_trait]
impl AsyncSubscriber<AppState> for StateForwarder {
    async fn run(&self, state: AppState) {
        // The receiver is gone once main is done with the form.
        self.sender.send(state).ok();
    }
}

#[derive(Debug)]
pub struct DemoProps {
    pub title: String,
}

type DemoForm = ConnectedForm<DemoProps, FooErrors, DemoAction>;

fn name_of(fields: &FieldValueMap) -> String {
    fields
        .get("name")
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Dispatches `SaveFoo` right away, then pretends to talk to a server.
fn on_submit(
    should_error: bool,
    delay: Duration,
) -> impl Fn(&FormProps<'_, DemoProps, FooErrors, DemoAction>) -> CommonResult<()>
+ Send
+ Sync
+ 'static {
    move |props: &FormProps<'_, DemoProps, FooErrors, DemoAction>| {
        props.actions.call("save_foo", props.fields)?;

        let name = name_of(props.fields);
        let dispatcher = props.actions.dispatcher();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let action = if should_error {
                DemoAction::SaveFooFail {
                    errors: FooErrors {
                        message: format!("A foo named {name} already exists"),
                    },
                }
            } else {
                DemoAction::SaveFooSuccess { name }
            };
            if let Err(error) = dispatcher.dispatch(action) {
                // % is Display, ? is Debug.
                tracing::error!(
                    message = "Could not report submission result",
                    error = ?error
                );
            }
        });

        ok!()
    }
}

/// Trims the text input named by the blur event.
fn trim_on_blur(
    ctx: &mut HandlerContext<'_, DemoProps, FooErrors, DemoAction>,
    event: &HandlerEvent,
) -> CommonResult<()> {
    let Some(name) = event.field_name() else {
        return ok!();
    };
    let Some(trimmed) = ctx
        .fields
        .get(name)
        .and_then(FieldValue::as_str)
        .map(|it| it.trim().to_string())
    else {
        return ok!();
    };
    ctx.fields.insert(name, trimmed);
    ok!()
}

fn render(form: &DemoForm) {
    let mut fields: Vec<_> = form.fields().iter().collect();
    fields.sort_by(|lhs, rhs| lhs.0.cmp(rhs.0));
    let fields = fields
        .iter()
        .map(|(name, value)| format!("{name}={value:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "[{}] status: {}, fields: {fields}",
        form.props().title,
        form.state().submission_status()
    );
}

#[tokio::main]
async fn main() -> CommonResult<()> {
    let cli_args = CliArgs::parse();

    try_initialize_logging_global(cli_args.tracing_config())?;
    // % is Display, ? is Debug.
    tracing::debug!(message = "Start logging...", cli_args = ?cli_args);

    let (state_sender, mut state_receiver) = mpsc::unbounded_channel();

    let mut store = Store::<AppState, DemoAction>::default();
    store
        .add_reducer(Box::new(FormsReducer::default()))
        .add_reducer(SavedFoosReducer::new())
        .add_subscriber(Box::new(StateForwarder {
            sender: state_sender,
        }));
    let shared_store = store.into_shared();

    let (dispatcher, receiver) = ChannelDispatcher::new(DISPATCH_QUEUE_CAPACITY);
    let dispatch_loop = spawn_dispatch_loop(shared_store.clone(), receiver);

    let delay = Duration::from_millis(cli_args.delay_ms);
    let config = FormConfig::builder(
        FORM_NAME,
        ["name", "agree"],
        on_submit(cli_args.should_error, delay),
    )
    .action_creator("save_foo", |fields| DemoAction::SaveFoo {
        name: name_of(fields),
    })
    .handler("trim_on_blur", trim_on_blur)
    .build();

    let app_state = shared_store.read().await.get_state();
    let mut form = DemoForm::mount(
        config,
        DemoProps {
            title: "New foo".to_string(),
        },
        &app_state,
        dispatcher.clone(),
    );
    render(&form);

    // The user fills in the form.
    form.update_field(&ChangeEvent::text("name", "  Ada "));
    form.invoke_handler("trim_on_blur", &HandlerEvent::blur("name"))?;
    form.update_field(&ChangeEvent::from_raw("agree", "CheckBox", "yes", true));
    render(&form);

    form.submit_form(&mut FormSubmitEvent::default())?;
    dispatcher.dispatch(DemoAction::Tick)?;

    // Feed store updates to the form until the submission is over.
    let wait_limit = delay + Duration::from_secs(1);
    loop {
        let maybe_state = tokio::time::timeout(wait_limit, state_receiver.recv())
            .await
            .into_diagnostic()?;
        let Some(state) = maybe_state else {
            break;
        };

        if !form.on_store_changed(&state) {
            tracing::debug!(
                message = "Store changed, form status did not",
                tick_count = state.tick_count
            );
            continue;
        }
        render(&form);

        if !form.state().is_submitting_now() {
            match &form.state().errors {
                Some(errors) => println!("Submission failed: {}", errors.message),
                None => println!("Saved foos: {:?}", state.saved_foos),
            }
            break;
        }
    }

    // Dropping every dispatcher stops the dispatch loop.
    drop(form);
    drop(dispatcher);
    dispatch_loop.await.into_diagnostic()?;

    tracing::debug!(message = "Stop logging...");

    ok!()
}
