use reqwest::Method;
use serde::de::IgnoredAny;
use tracing::{info, warn};

use super::{failed, Store};
use crate::client::Transport;
use crate::error::StoreError;
use crate::models::{AuthResponse, Credentials, Registration, User};

impl<T: Transport> Store<T> {
    /// Authenticate and keep the returned user and token.
    /// On failure nothing in the store changes.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, StoreError> {
        let response: AuthResponse = self
            .send(Method::POST, "/login", &Credentials { username, password })
            .await
            .map_err(failed("login", StoreError::InvalidCredentials))?;

        self.start_session(response)
    }

    pub async fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<User, StoreError> {
        let response: AuthResponse = self
            .send(Method::POST, "/signup", &Registration { username, email, password })
            .await
            .map_err(failed("signup", StoreError::SignupFailed))?;

        self.start_session(response)
    }

    /// Log out remotely, then wipe the local state.
    ///
    /// If the remote call fails the local session is kept as is; use
    /// [`Store::forget_session`] to drop it regardless.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        let _: IgnoredAny = self
            .fetch(Method::POST, "/logout", None)
            .await
            .map_err(failed("logout", StoreError::LogoutFailed))?;

        self.forget_session()?;
        info!("logged out");
        Ok(())
    }

    /// Local-only logout: reset every field and drop the stored token
    pub fn forget_session(&mut self) -> Result<(), StoreError> {
        let previous = self.state.clone();
        self.commit(|s| s.reset())?;

        if let Err(e) = self.persistence.store_token(None) {
            return Err(self.restore(previous, e));
        }
        Ok(())
    }

    fn start_session(&mut self, response: AuthResponse) -> Result<User, StoreError> {
        let (user, token) = response.into_parts();
        if token.is_empty() {
            warn!(username = %user.username, "server returned an empty token");
        }

        // State blob first, token second; a failed token write undoes the blob
        let previous = self.state.clone();
        self.commit(|s| s.set_session(user.clone(), token.clone()))?;

        if let Err(e) = self.persistence.store_token(Some(&token)) {
            return Err(self.restore(previous, e));
        }

        info!(user_id = user.id, username = %user.username, "session started");
        Ok(user)
    }
}
