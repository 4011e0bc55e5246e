//! Narrator test support utilities
//!
//! Shared by the narrator integration tests and the simulator tests:
//! unified logging initialization plus seating and engine fixtures.

pub mod fixtures;
pub mod logging;
