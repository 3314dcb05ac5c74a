//! Session domain module.
//!
//! The shell never owns a session. It only observes whether the identity
//! provider currently holds one, and reacts to auth transitions.
//!
//! # Module Structure
//!
//! - `model`: `Session` and `SessionChangeEvent`
//! - `oracle`: `SessionOracle` capability trait and `Subscription` handle
//!
//! # Usage
//!
//! ```ignore
//! use fiscal_core::session::{Session, SessionChangeEvent, SessionOracle, Subscription};
//! ```

mod model;
mod oracle;

// Re-export public API
pub use model::{Session, SessionChangeEvent};
pub use oracle::{SessionChangeHandler, SessionOracle, Subscription};
