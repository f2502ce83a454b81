//! Integration tests
//!
//! Each test builds its own `TestApp` and talks to the router over
//! `axum-test`.
