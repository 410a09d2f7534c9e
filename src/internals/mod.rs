//! Backing structures shared by the sync and async front ends.
//!
//! Nothing in this module takes a lock. The front end types own the lock and
//! hand these structures a single borrow per public operation, which is what
//! keeps the public API free of nested lock acquisition.

pub(crate) mod lockmap;
pub(crate) mod lockvec;
