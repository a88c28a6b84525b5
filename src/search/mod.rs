//! Background worker that runs blocking gateway calls off the UI thread.

mod commands;
mod worker;

pub use commands::SearchCommand;
pub use worker::{WorkerHandle, spawn};
