//! # Collection Processing Engine
//!
//! The reusable core behind every pipeline:
//!
//! - [`filter`] - decides whether an item satisfies a set of inclusive
//!   min/max bounds on its numeric attributes
//! - [`paginator`] - walks a cursor-paginated collection to its end, one
//!   page at a time
//! - [`batch`] - re-batches selected ids into bounded bulk writes with a
//!   fixed pacing delay after each write
//! - [`counters`] - examined / accepted / rejected tally of a run
//!
//! ```text
//! first page ──▶ Paginator ──▶ FilterSpec ──▶ BatchWriter ──▶ bulk write
//!                    ▲             │
//!                    └── cursor ◀──┘
//! ```
//!
//! Execution is strictly sequential: the next page is requested only after
//! the current one has been filtered, batched and possibly flushed.

pub mod batch;
pub mod counters;
pub mod filter;
pub mod paginator;

pub use batch::{BatchWriter, WriteMode};
pub use counters::RunCounters;
pub use filter::{Attribute, Attributed, Bound, BoundKind, Exclusion, FilterSpec, Verdict};
pub use paginator::Paginator;
