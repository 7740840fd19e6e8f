//! User activation handler.

use axum::Json;
use tracing::info;

use crate::dto::{ActivateRequest, ActivateResponse};
use crate::error::AppJson;

/// POST /activate - Acknowledges that the agent is ready for a user.
///
/// No per-user setup exists yet, so this never fails and has no side effects.
pub async fn activate(AppJson(req): AppJson<ActivateRequest>) -> Json<ActivateResponse> {
    info!(user_id = %req.user_id, "User activated");
    Json(ActivateResponse::ready(&req.user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_activate_message() {
        let Json(body) = activate(AppJson(ActivateRequest { user_id: "alice".into() })).await;
        assert_eq!(body.message, "Ready to handle traffic for User: alice");
    }

    #[tokio::test]
    async fn test_activate_interpolates_verbatim() {
        for user_id in ["", "Zoë 🚀", "<script>\"x\"</script>", "a/b?c=d&e"] {
            let Json(body) = activate(AppJson(ActivateRequest { user_id: user_id.into() })).await;
            assert_eq!(body.message, format!("Ready to handle traffic for User: {}", user_id));
        }
    }
}
