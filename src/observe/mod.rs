//! Observation primitives for continuously-updated values.
//!
//! This module provides the two multicast building blocks the cache is made
//! of:
//! - [`CachedSubject`]: holds the latest published value, replays it to new
//!   observers, and forwards every subsequent publish. Bounded buffers with
//!   slow-observer dropping.
//! - [`SharedFetch`]: a lazily-resolved remote read shared by all observers,
//!   so N concurrent observers cost exactly one upstream call.
//!
//! # Example
//!
//! ```ignore
//! let subject = CachedSubject::with_initial(0u32, 16);
//! let observer = subject.subscribe();
//!
//! subject.publish(1);
//! assert_eq!(observer.recv().unwrap(), 0); // replayed current value
//! assert_eq!(observer.recv().unwrap(), 1); // forwarded update
//!
//! subject.unsubscribe(observer.id);
//! ```

mod shared;
mod subject;
mod types;

pub use shared::SharedFetch;
pub use subject::CachedSubject;
pub use types::{Observer, ObserverId, DEFAULT_OBSERVER_BUFFER};
