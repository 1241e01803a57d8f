// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

/// Subscribers are notified with a copy of the new state, after the reducers have run,
/// and only when the state actually changed.
#[async_trait]
pub trait AsyncSubscriber<S>
where
    S: Sync + Send,
{
    async fn run(&self, state: S);
}

pub type AsyncSubscriberItem<S> = Box<dyn AsyncSubscriber<S> + Send + Sync>;
pub type AsyncSubscriberVec<S> = Vec<AsyncSubscriberItem<S>>;
