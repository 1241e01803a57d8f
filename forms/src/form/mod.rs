// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the forms reducer and connected forms.
pub const DEBUG_FORMS: bool = true;

// Attach sources.
pub mod bound_action_creators;
pub mod connected_form;
pub mod field_value;
pub mod form_action;
pub mod form_config;
pub mod form_events;
pub mod form_props;
pub mod form_state_selector;
pub mod form_status;
pub mod forms_reducer;

// Re-export.
pub use bound_action_creators::*;
pub use connected_form::*;
pub use field_value::*;
pub use form_action::*;
pub use form_config::*;
pub use form_events::*;
pub use form_props::*;
pub use form_state_selector::*;
pub use form_status::*;
pub use forms_reducer::*;
