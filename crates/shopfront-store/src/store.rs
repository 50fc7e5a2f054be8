//! Store, reducer and subscription types.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{error, trace};

/// Upper bound on follow-up actions processed for one dispatch.
///
/// Subscribers that keep answering each other would otherwise loop forever.
pub const MAX_FOLLOW_UP_ACTIONS: usize = 1024;

/// Applies actions to state.
pub trait Reducer: Send + Sync + 'static {
    /// State held by the store.
    type State: Send + 'static;
    /// Actions accepted by the store.
    type Action: fmt::Debug + Send + 'static;

    /// Apply one action.
    fn reduce(&self, state: &mut Self::State, action: Self::Action);
}

/// Observes state changes.
///
/// Called after every applied action with the new state. Returned actions
/// are queued and applied after the current notification round. A
/// subscriber must not call back into the store it is registered with.
pub trait Subscriber<S, A>: Send {
    fn on_change(&mut self, state: &S) -> Vec<A>;
}

impl<S, A, F> Subscriber<S, A> for F
where
    F: FnMut(&S) -> Vec<A> + Send,
{
    fn on_change(&mut self, state: &S) -> Vec<A> {
        self(state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SubscriptionId(u64);

type BoxedSubscriber<R> =
    Box<dyn Subscriber<<R as Reducer>::State, <R as Reducer>::Action>>;

struct Inner<R: Reducer> {
    state: R::State,
    subscribers: Vec<(SubscriptionId, BoxedSubscriber<R>)>,
    next_id: u64,
}

struct Shared<R: Reducer> {
    reducer: R,
    inner: Mutex<Inner<R>>,
}

impl<R: Reducer> Shared<R> {
    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        // State stays consistent across a panicking subscriber: the reducer
        // has already finished with it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply queued actions, notifying subscribers after each.
    fn drain(&self, inner: &mut Inner<R>, mut queue: VecDeque<R::Action>) -> usize {
        let mut applied = 0;

        while let Some(action) = queue.pop_front() {
            if applied > MAX_FOLLOW_UP_ACTIONS {
                error!(
                    dropped = queue.len() + 1,
                    "follow-up action limit reached, dropping remaining actions"
                );
                break;
            }

            trace!(?action, "dispatch");
            self.reducer.reduce(&mut inner.state, action);
            applied += 1;

            let Inner {
                state, subscribers, ..
            } = &mut *inner;
            for (_, subscriber) in subscribers.iter_mut() {
                queue.extend(subscriber.on_change(state));
            }
        }

        applied
    }
}

/// A shared, cloneable handle to application state.
pub struct Store<R: Reducer> {
    shared: Arc<Shared<R>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store with an initial state.
    pub fn new(reducer: R, initial: R::State) -> Self {
        Self {
            shared: Arc::new(Shared {
                reducer,
                inner: Mutex::new(Inner {
                    state: initial,
                    subscribers: Vec::new(),
                    next_id: 0,
                }),
            }),
        }
    }

    /// Apply an action and every follow-up action it triggers.
    ///
    /// Returns the number of actions applied.
    pub fn dispatch(&self, action: R::Action) -> usize {
        let mut inner = self.shared.lock();
        self.shared.drain(&mut inner, VecDeque::from([action]))
    }

    /// Read from the current state.
    pub fn select<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.shared.lock().state)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State
    where
        R::State: Clone,
    {
        self.select(|state| state.clone())
    }

    /// Register a subscriber for subsequent changes.
    pub fn subscribe<S>(&self, subscriber: S) -> Subscription<R>
    where
        S: Subscriber<R::State, R::Action> + 'static,
    {
        let mut inner = self.shared.lock();
        self.register(&mut inner, Box::new(subscriber))
    }

    /// Register a subscriber and run it once against the current state.
    ///
    /// Matches a view effect that runs on mount as well as on change.
    pub fn subscribe_immediate<S>(&self, subscriber: S) -> Subscription<R>
    where
        S: Subscriber<R::State, R::Action> + 'static,
    {
        let mut inner = self.shared.lock();
        let mut subscriber: BoxedSubscriber<R> = Box::new(subscriber);
        let follow_ups: VecDeque<_> = subscriber.on_change(&inner.state).into();
        let subscription = self.register(&mut inner, subscriber);
        self.shared.drain(&mut inner, follow_ups);
        subscription
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().subscribers.len()
    }

    fn register(&self, inner: &mut Inner<R>, subscriber: BoxedSubscriber<R>) -> Subscription<R> {
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, subscriber));

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

/// Keeps a subscriber registered. Dropping it unsubscribes.
///
/// Must not be dropped from inside a subscriber callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<R: Reducer> {
    id: SubscriptionId,
    shared: Weak<Shared<R>>,
}

impl<R: Reducer> Subscription<R> {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<R: Reducer> fmt::Debug for Subscription<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<R: Reducer> Drop for Subscription<R> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.lock().subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
        Reset,
    }

    struct Counter;

    impl Reducer for Counter {
        type State = i64;
        type Action = CounterAction;

        fn reduce(&self, state: &mut i64, action: CounterAction) {
            match action {
                CounterAction::Add(n) => *state += n,
                CounterAction::Reset => *state = 0,
            }
        }
    }

    #[test]
    fn test_dispatch_applies_reducer() {
        let store = Store::new(Counter, 0);
        assert_eq!(store.dispatch(CounterAction::Add(3)), 1);
        store.dispatch(CounterAction::Add(4));
        assert_eq!(store.state(), 7);
        assert_eq!(store.select(|n| n * 2), 14);
    }

    #[test]
    fn test_subscriber_sees_every_change() {
        let store = Store::new(Counter, 0);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |n: &i64| {
            sink.lock().unwrap().push(*n);
            Vec::<CounterAction>::new()
        });

        store.dispatch(CounterAction::Add(1));
        store.dispatch(CounterAction::Add(2));
        assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_follow_up_actions_are_applied_after_notification() {
        let store = Store::new(Counter, 0);
        let _reset_at_ten = store.subscribe(|n: &i64| {
            if *n >= 10 {
                vec![CounterAction::Reset]
            } else {
                Vec::new()
            }
        });

        assert_eq!(store.dispatch(CounterAction::Add(12)), 2);
        assert_eq!(store.state(), 0);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let store = Store::new(Counter, 0);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let sub = store.subscribe(move |_: &i64| {
            counter.fetch_add(1, Ordering::SeqCst);
            Vec::<CounterAction>::new()
        });
        assert_eq!(store.subscriber_count(), 1);

        store.dispatch(CounterAction::Add(1));
        sub.unsubscribe();
        store.dispatch(CounterAction::Add(1));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_immediate_runs_on_current_state() {
        let store = Store::new(Counter, 15);
        let _sub = store.subscribe_immediate(|n: &i64| {
            if *n > 10 {
                vec![CounterAction::Reset]
            } else {
                Vec::new()
            }
        });
        assert_eq!(store.state(), 0);
    }

    #[test]
    fn test_runaway_follow_ups_are_cut_off() {
        let store = Store::new(Counter, 0);
        let _forever = store.subscribe(|_: &i64| vec![CounterAction::Add(1)]);

        let applied = store.dispatch(CounterAction::Add(1));
        assert_eq!(applied, MAX_FOLLOW_UP_ACTIONS + 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new(Counter, 0);
        let other = store.clone();
        other.dispatch(CounterAction::Add(5));
        assert_eq!(store.state(), 5);
    }
}
