//! Shared data model and pure logic for the creator wall.
//!
//! Everything in this crate is free of I/O so it can be reused by any
//! front end that renders the wall, and tested without a runtime.

pub mod followers;
pub mod model;
pub mod requests;
pub mod stats;
