//! # taxforms-workflow — Workflow Orchestration
//!
//! Drives tax forms through their approval lifecycle. The crate has three
//! parts:
//!
//! - **Store contract** (`store.rs`): the transactional record store the
//!   workflow depends on: load by id, save, save-with-history-append,
//!   list by year.
//!
//! - **In-memory store** (`memory.rs`): a mutex-guarded implementation
//!   whose single critical section per operation provides the atomicity
//!   the workflow requires from a transactional backend.
//!
//! - **Service** (`service.rs`): load the form, apply the pure status
//!   policy from `taxforms-core`, persist the outcome. Audited
//!   transitions (submit, return, accept) persist the status change and
//!   exactly one history entry as a single atomic unit.

pub mod memory;
pub mod service;
pub mod store;

// ─── Store re-exports ───────────────────────────────────────────────

pub use memory::MemoryStore;
pub use store::{StoreError, TaxFormStore};

// ─── Service re-exports ─────────────────────────────────────────────

pub use service::{TaxFormService, WorkflowError};
