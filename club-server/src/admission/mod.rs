//! Registration admission
//!
//! - [`engine`] - pure decision function
//! - [`locks`] - per-club / per-student async mutexes
//! - [`service`] - locking, ledger reads and the append

pub mod engine;
pub mod locks;
pub mod service;

pub use engine::{AdmissionError, Decision, HeldSlot, SeatCounts};
pub use locks::KeyedLocks;
pub use service::AdmissionService;
