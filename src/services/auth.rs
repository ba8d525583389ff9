use crate::errors::ClientError;
use crate::http::ApiClient;
use crate::models::{Credentials, Registration};
use serde_json::{json, Value};

/// Backend paths for the account endpoints.
#[derive(Debug, Clone)]
pub struct AuthPaths {
    pub register: String,
    pub login: String,
    pub recover: String,
}

impl Default for AuthPaths {
    fn default() -> Self {
        Self {
            register: "/api/v1/users/register".to_string(),
            login: "/api/v1/users/login".to_string(),
            recover: "/api/v1/users/recover".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    paths: AuthPaths,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self::with_paths(api, AuthPaths::default())
    }

    pub fn with_paths(api: ApiClient, paths: AuthPaths) -> Self {
        Self { api, paths }
    }

    /// Returns the created user as sent back by the API.
    pub async fn register(&self, registration: &Registration) -> Result<Value, ClientError> {
        self.api.post(&self.paths.register, registration).await
    }

    /// Returns the token and user info as sent back by the API.
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ClientError> {
        self.api.post(&self.paths.login, credentials).await
    }

    pub async fn recover_password(&self, email: &str) -> Result<Value, ClientError> {
        self.api.post(&self.paths.recover, &json!({ "email": email })).await
    }
}
