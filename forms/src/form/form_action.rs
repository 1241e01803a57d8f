// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{CommonError, CommonErrorType, CommonResult};

/// Where in its lifecycle a submission is, as announced by an action. Anything that
/// isn't a success or a failure starts (or restarts) a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionPhase<E> {
    Started,
    Succeeded,
    Failed(Option<E>),
}

/// [`SubmissionPhase`] without the errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum SubmissionPhaseKind {
    Started,
    Succeeded,
    Failed,
}

impl<E> SubmissionPhase<E> {
    #[must_use]
    pub fn kind(&self) -> SubmissionPhaseKind {
        match self {
            SubmissionPhase::Started => SubmissionPhaseKind::Started,
            SubmissionPhase::Succeeded => SubmissionPhaseKind::Succeeded,
            SubmissionPhase::Failed(_) => SubmissionPhaseKind::Failed,
        }
    }
}

/// An action that the [`crate::FormsReducer`] can reduce.
///
/// - [`FormAction::form_name`] returns [`None`] for actions that have nothing to do with
///   forms; the reducer leaves the state alone for those.
/// - Actions that know their phase (like [`FormLifecycleAction`] or an app enum) ignore
///   the matcher. Actions that only have a type string (like [`TypedFormAction`]) ask the
///   matcher.
pub trait FormAction<E> {
    fn form_name(&self) -> Option<&str>;

    fn submission_phase(&self, matcher: &ActionTypeMatcher) -> SubmissionPhase<E>;
}

#[derive(Clone, Debug)]
enum TypeMatch {
    Suffix(&'static str),
    Pattern(Regex),
}

impl TypeMatch {
    fn is_match(&self, action_type: &str) -> bool {
        match self {
            TypeMatch::Suffix(suffix) => action_type.ends_with(suffix),
            TypeMatch::Pattern(regex) => regex.is_match(action_type),
        }
    }

    fn try_compile(pattern: &str) -> CommonResult<Self> {
        match Regex::new(pattern) {
            Ok(regex) => Ok(TypeMatch::Pattern(regex)),
            Err(error) => CommonError::new_error_result(
                CommonErrorType::InvalidPattern,
                &format!("{pattern}: {error}"),
            ),
        }
    }
}

/// Classifies string action types. By default types ending in `_SUCCESS` succeed and
/// types ending in `_FAIL` fail. The success test runs first.
#[derive(Clone, Debug)]
pub struct ActionTypeMatcher {
    success_match: TypeMatch,
    fail_match: TypeMatch,
}

pub const DEFAULT_SUCCESS_SUFFIX: &str = "_SUCCESS";
pub const DEFAULT_FAIL_SUFFIX: &str = "_FAIL";

impl Default for ActionTypeMatcher {
    fn default() -> Self {
        Self {
            success_match: TypeMatch::Suffix(DEFAULT_SUCCESS_SUFFIX),
            fail_match: TypeMatch::Suffix(DEFAULT_FAIL_SUFFIX),
        }
    }
}

impl ActionTypeMatcher {
    /// Replace the success test with a regular expression, eg `_DONE$`.
    ///
    /// # Errors
    ///
    /// [`CommonErrorType::InvalidPattern`] if the pattern doesn't compile.
    pub fn with_success_match(mut self, pattern: &str) -> CommonResult<Self> {
        self.success_match = TypeMatch::try_compile(pattern)?;
        Ok(self)
    }

    /// Replace the fail test with a regular expression, eg `_(FAIL|ERROR)$`.
    ///
    /// # Errors
    ///
    /// [`CommonErrorType::InvalidPattern`] if the pattern doesn't compile.
    pub fn with_fail_match(mut self, pattern: &str) -> CommonResult<Self> {
        self.fail_match = TypeMatch::try_compile(pattern)?;
        Ok(self)
    }

    #[must_use]
    pub fn classify(&self, action_type: &str) -> SubmissionPhaseKind {
        if self.success_match.is_match(action_type) {
            SubmissionPhaseKind::Succeeded
        } else if self.fail_match.is_match(action_type) {
            SubmissionPhaseKind::Failed
        } else {
            SubmissionPhaseKind::Started
        }
    }
}

/// An action with a type string, like the ones a JSON or scripting layer dispatches.
///
/// ```
/// use r3bl_forms::{ActionTypeMatcher, FormAction, SubmissionPhase, TypedFormAction};
///
/// let action = TypedFormAction::new("SAVE_FOO_FAIL")
///     .for_form("foo")
///     .with_errors("name taken");
/// assert_eq!(
///     action.submission_phase(&ActionTypeMatcher::default()),
///     SubmissionPhase::Failed(Some("name taken"))
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypedFormAction<E> {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, rename = "formName", skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<E>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl<E> TypedFormAction<E> {
    #[must_use]
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            form_name: None,
            errors: None,
            payload: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn for_form(mut self, form_name: impl Into<String>) -> Self {
        self.form_name = Some(form_name.into());
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: E) -> Self {
        self.errors = Some(errors);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

impl<E: Clone> FormAction<E> for TypedFormAction<E> {
    fn form_name(&self) -> Option<&str> { self.form_name.as_deref() }

    fn submission_phase(&self, matcher: &ActionTypeMatcher) -> SubmissionPhase<E> {
        match matcher.classify(&self.action_type) {
            SubmissionPhaseKind::Started => SubmissionPhase::Started,
            SubmissionPhaseKind::Succeeded => SubmissionPhase::Succeeded,
            SubmissionPhaseKind::Failed => SubmissionPhase::Failed(self.errors.clone()),
        }
    }
}

/// An action whose phase is decided by whoever dispatches it, so no pattern matching is
/// involved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormLifecycleAction<E> {
    pub form_name: String,
    pub phase: SubmissionPhase<E>,
}

impl<E> FormLifecycleAction<E> {
    #[must_use]
    pub fn started(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            phase: SubmissionPhase::Started,
        }
    }

    #[must_use]
    pub fn succeeded(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            phase: SubmissionPhase::Succeeded,
        }
    }

    #[must_use]
    pub fn failed(form_name: impl Into<String>, errors: E) -> Self {
        Self {
            form_name: form_name.into(),
            phase: SubmissionPhase::Failed(Some(errors)),
        }
    }
}

impl<E: Clone> FormAction<E> for FormLifecycleAction<E> {
    fn form_name(&self) -> Option<&str> { Some(&self.form_name) }

    fn submission_phase(&self, _matcher: &ActionTypeMatcher) -> SubmissionPhase<E> {
        self.phase.clone()
    }
}
