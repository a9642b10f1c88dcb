//! Network layer - conversion uploads and sketch downloads
//!
//! The Network actor receives commands and sends back resolved outcomes.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
