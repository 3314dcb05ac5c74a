//! Domain layer of the Fiscal Flow shell.
//!
//! Holds the types and capability traits the navigation shell is written
//! against. Concrete collaborators live in `fiscal-infrastructure`; the
//! shell itself lives in `fiscal-application`.

pub mod config;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod preference;
pub mod session;

// Re-export common error type
pub use error::{Result, ShellError};
