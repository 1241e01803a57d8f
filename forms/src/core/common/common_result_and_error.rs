// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors that this crate itself can produce. Note that these are not the `errors` of a
//! form submission: those are opaque values owned by the caller, and they travel through
//! [`crate::FormStatus::errors`] untouched.

use std::{error::Error,
          fmt::{Debug, Display, Formatter, Result}};

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`].
///
/// # Example
///
/// ```
/// use r3bl_forms::{CommonError, CommonErrorType, CommonResult};
///
/// fn find_handler(name: &str) -> CommonResult<()> {
///     CommonError::new_error_result(
///         CommonErrorType::NotFound,
///         &format!("No handler named {name}"),
///     )
/// }
///
/// assert!(find_handler("reset").is_err());
/// ```
pub type CommonResult<T> = miette::Result<T>;

/// Common error struct, wrapped in a [`miette::Report`] when it is returned.
#[derive(Debug, Clone)]
pub struct CommonError {
    pub error_type: CommonErrorType,
    pub error_message: Option<String>,
}

/// The errors that can occur while wiring a form to a store.
#[non_exhaustive]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonErrorType {
    #[default]
    General,
    /// A named handler or action creator is not registered in the form config.
    NotFound,
    /// A success or fail pattern for string typed actions did not compile.
    InvalidPattern,
    IOError,
}

impl Error for CommonError {}

/// Lets [`miette::Report::new`] wrap this error, so it can be recovered with
/// [`miette::Report::downcast_ref`].
impl miette::Diagnostic for CommonError {}

/// Same as the derived [`Debug`] implementation.
impl Display for CommonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { Debug::fmt(self, f) }
}

impl CommonError {
    /// Both [`CommonError::error_type`] and [`CommonError::error_message`] available.
    pub fn new_error_result<T>(err_type: CommonErrorType, msg: &str) -> CommonResult<T> {
        Err(miette::Report::new(CommonError {
            error_type: err_type,
            error_message: Some(msg.to_string()),
        }))
    }

    /// Only [`CommonError::error_type`] available, and no
    /// [`CommonError::error_message`].
    pub fn new_error_result_with_only_type<T>(
        err_type: CommonErrorType,
    ) -> CommonResult<T> {
        Err(miette::Report::new(CommonError {
            error_type: err_type,
            error_message: None,
        }))
    }

    /// Recover the [`CommonErrorType`] from a report produced by one of the constructors
    /// above. Returns [`None`] for reports that wrap some other error.
    #[must_use]
    pub fn error_type_of(report: &miette::Report) -> Option<CommonErrorType> {
        report
            .downcast_ref::<CommonError>()
            .map(|it| it.error_type)
    }
}
