//! # chipline
//!
//! A last-in-first-out producer-consumer pipeline built on one monitor: a
//! [`Generator`] thread makes [`Chip`]s on a timer and pushes them onto a
//! [`SharedStorage`]; a [`Worker`] thread pops the most recent chip and
//! solders it, sleeping on the storage's condition variable whenever the
//! stack is empty.
//!
//! The worker stops only when the stack is empty *and* the generator has
//! called [`SharedStorage::finish`]. Both conditions are checked, and the
//! wait begins, under the stack's own lock, so a final push can never be
//! missed.
//!
//! ## Features
//!
//! - `parking-lot`: use `parking_lot`'s mutex and condition variable instead
//!   of `std`'s.
//! - `cache-padded`: pad the stack's lock to a cache line.
//! - `tracing`: emit `tracing` events for produced and soldered chips and for
//!   actor lifecycle changes.
//!
//! ## Example
//!
//! ```
//! use chipline::{Chip, ChipKind, SharedStorage, Worker};
//!
//! let storage = SharedStorage::new();
//! storage.produce(Chip::new(ChipKind::Small));
//! storage.produce(Chip::new(ChipKind::Big));
//! storage.finish();
//!
//! let mut order = Vec::new();
//! let report = Worker::new().run(&storage, |chip: Chip| order.push(chip.kind()));
//!
//! assert_eq!(order, [ChipKind::Big, ChipKind::Small]);
//! assert_eq!(report.processed, 2);
//! ```

mod actor;
mod chip;
mod error;
mod generator;
mod pipeline;
mod stack;
mod status;
mod storage;
mod sync;
mod worker;

pub use crate::actor::*;
pub use crate::chip::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::pipeline::*;
pub use crate::stack::*;
pub use crate::status::*;
pub use crate::storage::*;
pub use crate::worker::*;
