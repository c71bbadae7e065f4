//! food_finder - restaurant listings kept in a flat text file
//!
//! This library exports the core modules for testing and potential reuse.

pub mod logging;
pub mod models;
pub mod storage;
