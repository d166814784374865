//! StackIt - A minimal Q&A forum API
//!
//! Users register and log in, post questions with rich-text bodies, answer,
//! vote, and receive notifications. Question content is auto-tagged,
//! moderated, and summarized by a generative-language API; an admin role
//! moderates question status.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, AI client)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Answer, Notification, Password, Question, User, UserRole};
pub use errors::{AppError, AppResult};
