// Session requirements for protected routes.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::AuthUser;
use crate::store::{AuthProvider, SessionResponse, UserResponse};

/// Resolve the authenticated user, or fail with UNAUTHORIZED.
///
/// Absence of a session is a first-class unauthorized outcome regardless of
/// whether the provider also reported an error. Provider errors during user
/// resolution are classified like store errors.
pub async fn require_user(auth: &dyn AuthProvider) -> Result<AuthUser, GatewayError> {
    let session = auth.session().await;
    if session.session.is_none() {
        tracing::warn!("protected route called without a session");
        return Err(GatewayError::unauthorized());
    }

    let response = auth.user().await;
    if let Some(err) = response.error {
        tracing::error!(
            code = err.code.as_deref().unwrap_or("-"),
            "user resolution failed: {}",
            err.message
        );
        return Err(GatewayError::from_store(err));
    }

    match response.user {
        Some(user) => Ok(user),
        None => {
            tracing::warn!("session present but no user behind it");
            Err(GatewayError::unauthorized())
        }
    }
}

/// Provider used until an identity service is wired in: every request is
/// anonymous, so protected routes consistently answer 401.
#[derive(Debug, Default)]
pub struct AnonymousAuth;

#[async_trait]
impl AuthProvider for AnonymousAuth {
    async fn session(&self) -> SessionResponse {
        SessionResponse::default()
    }

    async fn user(&self) -> UserResponse {
        UserResponse::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::models::Session;
    use crate::store::StoreError;
    use uuid::Uuid;

    struct FakeAuth {
        session: SessionResponse,
        user: UserResponse,
    }

    #[async_trait]
    impl AuthProvider for FakeAuth {
        async fn session(&self) -> SessionResponse {
            self.session.clone()
        }

        async fn user(&self) -> UserResponse {
            self.user.clone()
        }
    }

    fn user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
        }
    }

    fn session_for(user: AuthUser) -> SessionResponse {
        SessionResponse {
            session: Some(Session {
                user,
                expires_at: None,
            }),
            error: None,
        }
    }

    #[tokio::test]
    async fn absent_session_is_unauthorized() {
        let auth = FakeAuth {
            session: SessionResponse::default(),
            user: UserResponse::default(),
        };
        let err = require_user(&auth).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn absent_session_wins_even_without_provider_error() {
        // The provider may report no error alongside a missing session; the
        // outcome is still 401, independent of the error field.
        let auth = FakeAuth {
            session: SessionResponse {
                session: None,
                error: Some(StoreError::new("session fetch hiccup", None)),
            },
            user: UserResponse::default(),
        };
        let err = require_user(&auth).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
    }

    #[tokio::test]
    async fn user_resolution_error_is_classified() {
        let auth = FakeAuth {
            session: session_for(user()),
            user: UserResponse {
                user: None,
                error: Some(StoreError::new("token introspection failed", None)),
            },
        };
        let err = require_user(&auth).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.message(), "token introspection failed");
    }

    #[tokio::test]
    async fn absent_user_is_unauthorized() {
        let auth = FakeAuth {
            session: session_for(user()),
            user: UserResponse::default(),
        };
        let err = require_user(&auth).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
    }

    #[tokio::test]
    async fn resolves_the_session_user() {
        let expected = user();
        let auth = FakeAuth {
            session: session_for(expected.clone()),
            user: UserResponse {
                user: Some(expected.clone()),
                error: None,
            },
        };
        let resolved = require_user(&auth).await.unwrap();
        assert_eq!(resolved.id, expected.id);
    }
}
