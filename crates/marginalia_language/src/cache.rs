//! Process-lifetime schema cache.
//!
//! Discovery of an annotation type's schema is idempotent but not free: it
//! parses the type's own doc comment and every field's doc comment. The
//! cache memoizes one `Arc<Schema>` per class name for the lifetime of the
//! cache, with single-flight semantics: concurrent discovery of one class
//! is serialized so every caller observes the same schema object identity.
//!
//! Discovery that re-enters a class still being discovered on the same
//! thread is a cycle (an annotation type using itself), reported as an
//! error rather than waited on forever.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, ThreadId};

use marginalia_foundation::{Error, Result};

use crate::schema::Schema;

/// Internal state of one cache entry.
enum Slot {
    /// Discovery is running on the given thread.
    InProgress(ThreadId),
    /// Discovery completed.
    Ready(Arc<Schema>),
}

/// Single-flight, cycle-detecting schema cache.
///
/// Annotation type definitions are assumed immutable for the process
/// lifetime, so entries are never invalidated. Construct a fresh cache per
/// test run to isolate discovery.
#[derive(Default)]
pub struct SchemaCache {
    /// Entries keyed by fully-qualified class name.
    slots: Mutex<HashMap<String, Slot>>,
    /// Signaled whenever a discovery completes or fails.
    ready: Condvar,
}

impl SchemaCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached schema for a class, if discovery has completed.
    #[must_use]
    pub fn get(&self, class: &str) -> Option<Arc<Schema>> {
        let slots = self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match slots.get(class) {
            Some(Slot::Ready(schema)) => Some(Arc::clone(schema)),
            _ => None,
        }
    }

    /// Returns the cached schema for a class, running `discover` if absent.
    ///
    /// At most one discovery computation runs per class; other threads
    /// asking for the same class block until it completes and then share
    /// the same `Arc<Schema>`. A failed discovery clears the entry so a
    /// later call may retry.
    ///
    /// # Errors
    /// Returns a schema-cycle error if the calling thread is already
    /// discovering this class, or whatever error `discover` produces.
    pub fn get_or_discover<F>(&self, class: &str, discover: F) -> Result<Arc<Schema>>
    where
        F: FnOnce() -> Result<Schema>,
    {
        let mut slots = self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        loop {
            match slots.get(class) {
                Some(Slot::Ready(schema)) => return Ok(Arc::clone(schema)),
                Some(Slot::InProgress(owner)) => {
                    if *owner == thread::current().id() {
                        return Err(Error::schema_cycle(class.to_string()));
                    }
                    slots = self
                        .ready
                        .wait(slots)
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                }
                None => {
                    slots.insert(
                        class.to_string(),
                        Slot::InProgress(thread::current().id()),
                    );
                    break;
                }
            }
        }
        drop(slots);

        let outcome = discover();

        let mut slots = self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let result = match outcome {
            Ok(schema) => {
                let schema = Arc::new(schema);
                slots.insert(class.to_string(), Slot::Ready(Arc::clone(&schema)));
                Ok(schema)
            }
            Err(error) => {
                slots.remove(class);
                Err(error)
            }
        };
        drop(slots);
        self.ready.notify_all();
        result
    }
}
