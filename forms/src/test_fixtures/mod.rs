// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for the unit tests. Downstream crates get them with the `test_fixtures`
//! feature.

// Attach sources.
pub mod recording_dispatcher;

// Re-export.
pub use recording_dispatcher::*;
