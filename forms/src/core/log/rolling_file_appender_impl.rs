// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::{CommonError, CommonErrorType, CommonResult};

/// Creates an appender that never rotates, so the log file is exactly `path_str`.
///
/// # Errors
///
/// [`CommonErrorType::IOError`] if the path has no parent folder or no file name, or if
/// the file can't be opened.
pub fn try_create(path_str: &str) -> CommonResult<RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let Some(parent) = path.parent() else {
        return CommonError::new_error_result(
            CommonErrorType::IOError,
            &format!(
                "Can't access current folder {}. It might not exist, or don't have required permissions.",
                path.display()
            ),
        );
    };

    let Some(file_name) = path.file_name().and_then(|it| it.to_str()) else {
        return CommonError::new_error_result(
            CommonErrorType::IOError,
            &format!(
                "Can't access file name {}. It might not exist, or don't have required permissions.",
                path.display()
            ),
        );
    };

    match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(parent)
    {
        Ok(appender) => Ok(appender),
        Err(error) => CommonError::new_error_result(
            CommonErrorType::IOError,
            &format!("Can't open log file {}: {error}", path.display()),
        ),
    }
}
