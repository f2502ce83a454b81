//! Authentication Module
//!
//! The identity provider and credential store.
//!
//! - **`users`** - user rows, bcrypt-backed registration and verification
//! - **`sessions`** - 72-hour HS256 session tokens
//! - **`handlers`** - `/signup`, `/login`, `/me`, `/users/lookup`
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email and password → user created → session token returned
//! 2. **Login**: email and password → credentials verified → session token returned
//! 3. **Any authenticated route**: `Authorization: Bearer <token>` → token
//!    verified → user confirmed to still exist → user id passed to the handler

/// User data model and credential store
pub mod users;

/// Session token generation and validation
pub mod sessions;

/// HTTP handlers for identity endpoints
pub mod handlers;

pub use sessions::SessionKeys;
