//! Timeline test support utilities
//!
//! Shared helpers for the timeline workspace tests. Currently this is the
//! unified logging initialization used by unit tests, integration tests and
//! the simulator's tests.

pub mod logging;
