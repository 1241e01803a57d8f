// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc};

use tokio::sync::RwLock;

use super::{AsyncReducerItem, AsyncReducerVec, AsyncSubscriberItem, AsyncSubscriberVec,
            DEBUG_REDUX};

pub type SharedStore<S, A> = Arc<RwLock<Store<S, A>>>;

/// Thread safe and async Redux store (using [`tokio`]).
///
/// - Reducers run in sequence, in the order they were added.
/// - Subscribers run concurrently, and only if the reducers produced a state that is
///   different from the one the subscribers last saw.
///
/// Side effects (network calls, timers) don't live here: they are started by whoever
/// dispatches actions, eg the `on_submit` callback of a [`crate::FormConfig`], and they
/// report back by dispatching more actions.
pub struct Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Send + Sync,
{
    state: S,
    maybe_previous_state: Option<S>,
    subscriber_vec: AsyncSubscriberVec<S>,
    reducer_vec: AsyncReducerVec<S, A>,
}

impl<S, A> Default for Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Send + Sync,
{
    fn default() -> Store<S, A> {
        Store {
            state: S::default(),
            maybe_previous_state: None,
            subscriber_vec: Vec::new(),
            reducer_vec: Vec::new(),
        }
    }
}

impl<S, A> Debug for Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscriber_count", &self.subscriber_vec.len())
            .field("reducer_count", &self.reducer_vec.len())
            .finish_non_exhaustive()
    }
}

// Handle subscriber & reducer management.
impl<S, A> Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Send + Sync,
{
    #[must_use]
    pub fn into_shared(self) -> SharedStore<S, A> { Arc::new(RwLock::new(self)) }

    pub fn add_subscriber(&mut self, subscriber_fn: AsyncSubscriberItem<S>) -> &mut Self {
        self.subscriber_vec.push(subscriber_fn);
        self
    }

    pub fn add_reducer(&mut self, reducer_fn: AsyncReducerItem<S, A>) -> &mut Self {
        self.reducer_vec.push(reducer_fn);
        self
    }
}

// Handle dispatch.
impl<S, A> Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Send + Sync,
{
    #[must_use]
    pub fn get_state(&self) -> S { self.state.clone() }

    pub async fn dispatch_action(&mut self, action: A) {
        self.run_reducers(&action).await;
        self.run_subscribers().await;
    }

    fn has_state_changed(&self) -> bool {
        match &self.maybe_previous_state {
            Some(previous_state) => *previous_state != self.state,
            None => true,
        }
    }

    /// Run these in sequence.
    async fn run_reducers(&mut self, action: &A) {
        for reducer in &self.reducer_vec {
            let new_state = reducer.run(action, &self.state).await;
            self.state = new_state;
        }
    }

    /// Run these concurrently.
    async fn run_subscribers(&mut self) {
        // Early return if state hasn't changed.
        if !self.has_state_changed() {
            DEBUG_REDUX.then(|| {
                tracing::debug!(message = "🗃️ state unchanged, subscribers skipped");
            });
            return;
        }

        // Update previous state, for next time.
        self.maybe_previous_state = Some(self.state.clone());

        DEBUG_REDUX.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "🗃️ state changed, running subscribers",
                subscriber_count = self.subscriber_vec.len(),
                state = ?self.state
            );
        });

        let state_clone = self.get_state();
        let vec_fut = self
            .subscriber_vec
            .iter()
            .map(|subscriber| subscriber.run(state_clone.clone()));
        futures::future::join_all(vec_fut).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{AsyncReducer, AsyncSubscriber, assert_eq2};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Action {
        Add(i32, i32),
        AddPop(i32),
        Noop,
    }

    #[derive(Clone, Default, PartialEq, Eq, Debug)]
    struct State {
        stack: Vec<i32>,
    }

    #[derive(Default)]
    struct MyReducer;

    #[async_trait]
    impl AsyncReducer<State, Action> for MyReducer {
        async fn run(&self, action: &Action, state: &State) -> State {
            match action {
                Action::Add(a, b) => State { stack: vec![a + b] },
                Action::AddPop(a) => State {
                    stack: vec![a + state.stack.first().copied().unwrap_or_default()],
                },
                Action::Noop => state.clone(),
            }
        }
    }

    struct MySubscriber {
        seen: Arc<Mutex<Vec<i32>>>,
    }

    #[async_trait]
    impl AsyncSubscriber<State> for MySubscriber {
        async fn run(&self, state: State) {
            if let Some(first) = state.stack.first() {
                self.seen.lock().unwrap().push(*first);
            }
        }
    }

    #[tokio::test]
    async fn test_reducers_and_subscribers() {
        let seen = Arc::new(Mutex::new(Vec::<i32>::new()));
        let mut store = Store::<State, Action>::default();
        store
            .add_reducer(MyReducer::new())
            .add_subscriber(Box::new(MySubscriber { seen: seen.clone() }));

        store.dispatch_action(Action::Add(1, 2)).await;
        assert_eq2!(seen.lock().unwrap().pop(), Some(3));

        store.dispatch_action(Action::AddPop(1)).await;
        assert_eq2!(seen.lock().unwrap().pop(), Some(4));

        assert_eq2!(store.get_state(), State { stack: vec![4] });
    }

    #[tokio::test]
    async fn test_subscribers_skipped_when_state_unchanged() {
        let seen = Arc::new(Mutex::new(Vec::<i32>::new()));
        let mut store = Store::<State, Action>::default();
        store
            .add_reducer(MyReducer::new())
            .add_subscriber(Box::new(MySubscriber { seen: seen.clone() }));

        store.dispatch_action(Action::Add(2, 2)).await;
        store.dispatch_action(Action::Noop).await;
        store.dispatch_action(Action::Add(2, 2)).await;

        assert_eq2!(*seen.lock().unwrap(), vec![4]);
    }
}
