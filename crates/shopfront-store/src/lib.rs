//! Reducer store with change subscriptions.
//!
//! State lives in a [`Store`]. It changes only by dispatching actions
//! through a [`Reducer`]. Subscribers see every new state and answer with
//! follow-up actions instead of calling back into the store, so a
//! subscriber can react to a change (say, reset a slice after consuming
//! it) without re-entrant locking.
//!
//! # Example
//!
//! ```rust
//! use shopfront_store::{Reducer, Store};
//!
//! struct Counter;
//!
//! impl Reducer for Counter {
//!     type State = i64;
//!     type Action = i64;
//!
//!     fn reduce(&self, state: &mut i64, delta: i64) {
//!         *state += delta;
//!     }
//! }
//!
//! let store = Store::new(Counter, 0);
//! // Clamp at 10 by answering with a correcting action.
//! let _clamp = store.subscribe(|n: &i64| if *n > 10 { vec![10 - *n] } else { vec![] });
//!
//! store.dispatch(25);
//! assert_eq!(store.state(), 10);
//! ```

mod store;

pub use store::{Reducer, Store, Subscriber, Subscription, MAX_FOLLOW_UP_ACTIONS};
