//! HTTP request handlers.

pub mod admin_handler;
pub mod ai_handler;
pub mod answer_handler;
pub mod auth_handler;
pub mod notification_handler;
pub mod question_handler;
pub mod vote_handler;

pub use admin_handler::admin_routes;
pub use ai_handler::ai_routes;
pub use answer_handler::answer_routes;
pub use auth_handler::auth_routes;
pub use notification_handler::notification_routes;
pub use question_handler::question_routes;
pub use vote_handler::vote_routes;
