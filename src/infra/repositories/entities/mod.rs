//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod answer;
pub mod notification;
pub mod question;
pub mod user;
