//! Test suite for corkboard
//!
//! - `common` - test server builder and storage doubles
//! - `integration` - HTTP-level tests against the real router
//! - `property` - proptest properties of the lattice and route table

#![cfg(feature = "ssr")]

pub mod integration;
