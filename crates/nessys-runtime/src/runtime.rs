//! Runs a translated program on a dedicated worker thread.
//!
//! The worker owns the [`Nes`](nessys_core::Nes) and the program; the
//! presentation side talks to it only through the shared
//! [`Controls`](nessys_core::control::Controls) and the frame handle, both
//! reachable from a cloneable [`RuntimeHandle`].

mod handle;
mod runner;
mod types;

pub use crossbeam_channel::Receiver;
pub use handle::{Runtime, RuntimeHandle};
pub use types::{ExitReason, RuntimeConfig, RuntimeError, RuntimeNotification, Stats};
