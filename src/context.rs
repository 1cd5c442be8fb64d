//! Per-statement conversion context
//!
//! A [`Context`] carries the limits and the arena budget for one statement. The compiler and the
//! matcher take it explicitly; nothing is shared between contexts.

use std::cell::Cell;
use std::mem;

use crate::config::Limits;
use crate::error::{Result, ToNumberError};

/// Byte-budgeted allocator scoped to a statement
#[derive(Debug)]
pub struct Arena {
    capacity: usize,
    used: Cell<usize>,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            used: Cell::new(0),
        }
    }

    /// Reserve room for `count` values of `T`, failing once the budget is spent
    pub fn allocate<T>(&self, count: usize) -> Result<Vec<T>> {
        let size = count
            .checked_mul(mem::size_of::<T>().max(1))
            .ok_or_else(|| ToNumberError::AllocationFailed("allocation size overflow".to_string()))?;
        let used = self.used.get();
        let remaining = self.capacity - used;
        if size > remaining {
            return Err(ToNumberError::AllocationFailed(format!(
                "requested {size} bytes, {remaining} of {} left",
                self.capacity
            )));
        }
        self.used.set(used + size);
        Ok(Vec::with_capacity(count))
    }

    pub fn used(&self) -> usize {
        self.used.get()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Release everything allocated so far
    pub fn reset(&self) {
        self.used.set(0);
    }
}

/// Limits plus arena for one statement
#[derive(Debug)]
pub struct Context {
    limits: Limits,
    arena: Arena,
}

impl Context {
    pub fn new(limits: Limits) -> Self {
        Self {
            arena: Arena::with_capacity(limits.arena_capacity),
            limits,
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// End of statement: drop the arena budget
    pub fn reset(&self) {
        self.arena.reset();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(*Limits::embedded())
    }
}
