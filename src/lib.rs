//! Feed acquisition and terminal rendering for newsdesk.
//!
//! The binary in `main.rs` only wires these modules together; see its
//! module docs for the architecture overview.

pub mod app;
pub mod input;
pub mod refresh;
pub mod sample;
pub mod source;
pub mod ui;
