//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`signup`** - POST /signup - create an account, returns a session
//! - **`login`** - POST /login - exchange credentials for a session
//! - **`get_me`** - GET /me - identity behind the session token
//! - **`lookup_user`** - GET /users/lookup?email= - find a user id by email
//!
//! Handlers take the already-parsed body and, where needed, the
//! authenticated identity as explicit arguments; the dispatcher does the
//! extraction.

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// User lookup handler
pub mod lookup;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, LookupQuery, MeResponse, SignupRequest, UserResponse};

// Re-export handlers
pub use login::login;
pub use lookup::lookup_user;
pub use me::get_me;
pub use signup::signup;
