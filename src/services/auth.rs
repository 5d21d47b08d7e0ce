//! Authentication operations
//!
//! The one facade with side effects: login and refresh persist the returned
//! credential pair through the token store, logout clears it. Token refresh
//! is always explicit — nothing here retries a failed request with a fresh
//! token behind the caller's back.

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::token_store::TokenPair;
use crate::types::{LoginRequest, ProfileUpdate, User};

/// Typed operations on `/auth/` and `/me/`
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair and persist it
    pub async fn login(&self, credentials: &LoginRequest) -> Result<TokenPair> {
        let pair: TokenPair = self
            .client
            .post("/auth/login/")
            .json(credentials)?
            .skip_auth()
            .send()
            .await?;
        self.client.tokens().write(&pair).await;
        tracing::debug!(username = %credentials.username, "login succeeded");
        Ok(pair)
    }

    /// Drop the stored credential pair; no network call involved
    pub async fn logout(&self) {
        self.client.tokens().clear().await;
    }

    /// Exchange the stored refresh token for a fresh pair and persist it
    ///
    /// Fails locally with [`Error::MissingRefreshToken`] when no pair is
    /// stored — no network call is attempted in that case.
    pub async fn refresh(&self) -> Result<TokenPair> {
        let current = self
            .client
            .tokens()
            .read()
            .await
            .into_pair()
            .ok_or(Error::MissingRefreshToken)?;

        let pair: TokenPair = self
            .client
            .post("/auth/refresh/")
            .json(&serde_json::json!({ "refresh": current.refresh }))?
            .skip_auth()
            .send()
            .await?;
        self.client.tokens().write(&pair).await;
        Ok(pair)
    }

    /// The currently authenticated user
    pub async fn me(&self) -> Result<User> {
        self.client.get("/me/").send().await
    }

    /// Partially update the currently authenticated user
    pub async fn update_me(&self, payload: &ProfileUpdate) -> Result<User> {
        self.client.patch("/me/").json(payload)?.send().await
    }
}
