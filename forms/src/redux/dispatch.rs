// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc};

use miette::Diagnostic;
use tokio::{sync::mpsc::{self, error::TrySendError},
            task::JoinHandle};

use super::{DEBUG_REDUX, SharedStore};
use crate::CommonResult;

/// Anything that can hand an action over to a store. Event handlers are synchronous, so
/// this is too: implementations queue the action and return right away.
pub trait Dispatch<A>: Send + Sync {
    /// # Errors
    ///
    /// If the action can't be queued.
    fn dispatch(&self, action: A) -> CommonResult<()>;
}

impl<A, D> Dispatch<A> for Arc<D>
where
    D: Dispatch<A> + ?Sized,
{
    fn dispatch(&self, action: A) -> CommonResult<()> { self.as_ref().dispatch(action) }
}

/// The dispatcher's queue is full. The store's dispatch loop is not keeping up.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("Dispatch queue is full (capacity {capacity})")]
#[diagnostic(
    code(r3bl_forms::dispatch::queue_full),
    help("Increase the capacity passed to ChannelDispatcher::new")
)]
pub struct DispatchQueueFullError {
    pub capacity: usize,
}

/// The receiving end of the dispatcher is gone, so nothing will reduce the action.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("Dispatch loop is not running")]
#[diagnostic(
    code(r3bl_forms::dispatch::loop_stopped),
    help("Make sure spawn_dispatch_loop was called and the store task is still alive")
)]
pub struct DispatchLoopStoppedError;

/// Sends actions over a bounded [`tokio::sync::mpsc`] channel. The other end is
/// drained into a [`SharedStore`] by [`spawn_dispatch_loop`].
#[derive(Debug)]
pub struct ChannelDispatcher<A> {
    sender: mpsc::Sender<A>,
    capacity: usize,
}

impl<A> Clone for ChannelDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            capacity: self.capacity,
        }
    }
}

impl<A> ChannelDispatcher<A> {
    /// Returns the dispatcher and the receiver to pass to [`spawn_dispatch_loop`].
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<A>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender, capacity }, receiver)
    }
}

impl<A> Dispatch<A> for ChannelDispatcher<A>
where
    A: Send,
{
    fn dispatch(&self, action: A) -> CommonResult<()> {
        match self.sender.try_send(action) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(miette::Report::new(DispatchQueueFullError {
                capacity: self.capacity,
            })),
            Err(TrySendError::Closed(_)) => {
                Err(miette::Report::new(DispatchLoopStoppedError))
            }
        }
    }
}

/// Drain `receiver` into `shared_store`, one action at a time, until every
/// [`ChannelDispatcher`] clone is dropped.
pub fn spawn_dispatch_loop<S, A>(
    shared_store: SharedStore<S, A>,
    mut receiver: mpsc::Receiver<A>,
) -> JoinHandle<()>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: Clone + Debug + Send + Sync + 'static,
{
    tokio::spawn(async move {
        while let Some(action) = receiver.recv().await {
            DEBUG_REDUX.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "🗃️ dispatching action", action = ?action);
            });
            shared_store.write().await.dispatch_action(action).await;
        }
        DEBUG_REDUX.then(|| {
            tracing::debug!(message = "🗃️ dispatch loop stopped, all senders dropped");
        });
    })
}
