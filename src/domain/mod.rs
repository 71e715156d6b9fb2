//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Domain types and validation
//! - `wire.rs`: Verb, path and form fields per operation
//! - `client.rs`: Sub-client issuing the requests

pub mod admin;
pub mod key;
