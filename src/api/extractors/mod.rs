//! Custom axum extractors.

mod current_user;
mod validated_json;

pub use current_user::{require_admin, CurrentUser};
pub use validated_json::ValidatedJson;
