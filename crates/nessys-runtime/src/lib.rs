pub mod runtime;

pub use runtime::{
    ExitReason, Receiver, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle, RuntimeNotification,
    Stats,
};
