//! Server Module
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports
//! ├── state.rs   - AppState
//! ├── config.rs  - Environment configuration, database connection
//! └── init.rs    - Startup: pool, session keys, storage
//! ```
//!
//! # Initialization Flow
//!
//! 1. `ServerConfig::from_env` reads the environment
//! 2. `init_state` opens the pool, runs migrations, builds storage
//! 3. `create_router` wraps the dispatcher in its layers
//! 4. the binary serves the router until Ctrl-C / SIGTERM, then closes the pool

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::{create_router, init_state, StartupError};
pub use state::AppState;
