// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_forms
//!
//! Form state for Redux style stores. This crate wires the field values, the
//! submission status, and the errors of a named form into a centralized store, and
//! hands them to the code that renders the form.
//!
//! There are two halves:
//!
//! 1. [`FormsReducer`] turns submission lifecycle actions (started, succeeded, failed)
//!    into a [`FormsState`] slice, keyed by form name. Add it to a [`Store`] next to
//!    your own reducers.
//! 2. [`ConnectedForm`] is built from a [`FormConfig`]. It reads its
//!    [`FormStatus`] from the store, owns the [`FieldValueMap`], and exposes the
//!    `update_field`, `update_form` and `submit_form` handlers. When the host's
//!    properties change (or the selected store state changes), a reset predicate
//!    decides whether in-progress edits are discarded.
//!
//! The loop looks like this:
//!
//! ```text
//! ┌───────────────┐  submit_form   ┌──────────────┐  dispatch   ┌───────────────┐
//! │ ConnectedForm │ ─────────────► │  on_submit   │ ──────────► │     Store     │
//! │ (fields)      │                │  callback    │             │ FormsReducer  │
//! └───────────────┘                └──────────────┘             └───────────────┘
//!         ▲                                                             │
//!         └───────────────────── on_store_changed ◄─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use r3bl_forms::{ChangeEvent, ChannelDispatcher, ConnectedForm, FieldValue, FormConfig,
//!                  FormsState, TypedFormAction};
//!
//! let config = FormConfig::<(), serde_json::Value, TypedFormAction<serde_json::Value>>::builder(
//!     "signup",
//!     ["email", "agree"],
//!     |_props| Ok(()),
//! )
//! .build();
//!
//! let (dispatcher, _receiver) = ChannelDispatcher::new(8);
//! let mut form = ConnectedForm::mount(config, (), &FormsState::default(), dispatcher);
//!
//! form.update_field(&ChangeEvent::text("email", "me@example.com"));
//! form.update_field(&ChangeEvent::checkbox("agree", "yes", true));
//!
//! assert_eq!(form.fields().get("email"), Some(&FieldValue::from("me@example.com")));
//! assert_eq!(form.fields().get("agree"), Some(&FieldValue::from("yes")));
//! ```

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod form;
pub mod redux;
#[cfg(any(test, feature = "test_fixtures"))]
pub mod test_fixtures;

// Re-export.
pub use crate::core::*;
pub use form::*;
pub use redux::*;
#[cfg(any(test, feature = "test_fixtures"))]
pub use test_fixtures::*;
