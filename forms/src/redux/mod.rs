// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the store and the dispatch loop.
pub const DEBUG_REDUX: bool = true;

// Attach sources.
pub mod async_reducer;
pub mod async_store;
pub mod async_subscriber;
pub mod dispatch;

// Re-export.
pub use async_reducer::*;
pub use async_store::*;
pub use async_subscriber::*;
pub use dispatch::*;
