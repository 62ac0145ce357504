// Auth service - Login/registration flow and session lifecycle
use crate::application::parking_api::{ApiError, ParkingApi};
use crate::application::session_store::{SessionStore, SessionStoreError};
use crate::domain::session::{
    AuthMode, AuthSession, Credentials, FormError, Registration, TokenResponse, UserProfile,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DASHBOARD_ROUTE: &str = "/dashboard";
const REJECTED_FALLBACK: &str = "Authentication failed";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] FormError),

    #[error("{0}")]
    Rejected(String),

    #[error("could not persist session: {0}")]
    Storage(#[from] SessionStoreError),
}

/// A submitted auth form; `mode` selects which fields are required
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AuthForm {
    Login(Credentials),
    Register(Registration),
}

impl AuthForm {
    pub fn mode(&self) -> AuthMode {
        match self {
            AuthForm::Login(_) => AuthMode::Login,
            AuthForm::Register(_) => AuthMode::Register,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthOutcome {
    pub mode: AuthMode,
    pub user: UserProfile,
    pub redirect_to: &'static str,
    pub redirect_after_ms: u64,
}

fn rejection_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { message: Some(m), .. } if !m.trim().is_empty() => m.clone(),
        ApiError::Status { .. } => REJECTED_FALLBACK.to_string(),
        other => other.to_string(),
    }
}

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn ParkingApi>,
    store: Arc<dyn SessionStore>,
    redirect_delay: Duration,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn ParkingApi>,
        store: Arc<dyn SessionStore>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            api,
            store,
            redirect_delay,
        }
    }

    pub async fn submit(&self, form: &AuthForm) -> Result<AuthOutcome, AuthError> {
        let mode = form.mode();
        let response = match form {
            AuthForm::Login(credentials) => {
                credentials.validate()?;
                self.api.login(credentials).await
            }
            AuthForm::Register(registration) => {
                registration.validate()?;
                self.api.register(registration).await
            }
        };

        let response: TokenResponse = response.map_err(|e| {
            tracing::warn!("Auth error ({:?}): {}", mode, e);
            AuthError::Rejected(rejection_message(&e))
        })?;

        let session = AuthSession::from(response);
        self.store.set(&session).await?;
        tracing::info!("Signed in as {}", session.user.username);

        Ok(AuthOutcome {
            mode,
            user: session.user,
            redirect_to: DASHBOARD_ROUTE,
            redirect_after_ms: self.redirect_delay.as_millis() as u64,
        })
    }

    pub async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.store.load().await?)
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }
}
