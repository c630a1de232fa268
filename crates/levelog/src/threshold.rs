//! The shared minimum level.
//!
//! A [`Threshold`] is a cheap, cloneable handle to one level stored behind a
//! read/write lock. Every wrapper built from the same handle observes writes
//! made through any clone of it. [`Threshold::global`] is the process-wide
//! instance used by [`Logger::new`](crate::Logger::new) and [`set_level`].
//!
//! # Lock discipline
//!
//! - `set` takes the exclusive lock for the duration of the store only.
//! - `allows` takes the shared lock and keeps it across the comparison, so
//!   the filtering decision is made against a single consistent value.
//! - A poisoned lock still yields the stored level; `Level` is `Copy` and a
//!   panicking writer cannot leave it half-written.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::Level;

static GLOBAL: OnceLock<Threshold> = OnceLock::new();

/// Shared, thread-safe minimum level.
#[derive(Debug, Clone, Default)]
pub struct Threshold {
    inner: Arc<RwLock<Level>>,
}

impl Threshold {
    /// Creates an independent threshold starting at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            inner: Arc::new(RwLock::new(level)),
        }
    }

    /// Returns the process-wide threshold. Starts at [`Level::Info`].
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.get_or_init(Self::default).clone()
    }

    /// Returns the current level.
    #[must_use]
    pub fn get(&self) -> Level {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the current level.
    pub fn set(&self, level: Level) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    /// Whether a line at `level` passes the filter.
    #[must_use]
    pub fn allows(&self, level: Level) -> bool {
        let current = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        level >= *current
    }

    /// Whether two handles share the same underlying cell.
    #[must_use]
    pub fn same_cell(&self, other: &Threshold) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Sets the process-wide threshold.
///
/// Every wrapper built against [`Threshold::global`] follows the new level on
/// its next call, regardless of when it was constructed.
pub fn set_level(level: Level) {
    Threshold::global().set(level);
}

/// Returns the process-wide threshold level.
#[must_use]
pub fn level() -> Level {
    Threshold::global().get()
}
