//! Minimal GitHub REST client used to resolve the signed-in user

use crate::models::user::GitHubUser;
use crate::store::StoreError;
use std::time::Duration;

/// Default GitHub REST endpoint
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("devhub-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_endpoint: String,
}

impl GitHubClient {
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            api_endpoint: api_endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Fetch the profile of the user owning `token`
    pub async fn current_user(&self, token: &str) -> Result<GitHubUser, StoreError> {
        let response = self
            .http
            .get(format!("{}/user", self.api_endpoint))
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::api(status.as_u16(), error_text));
        }

        response
            .json::<GitHubUser>()
            .await
            .map_err(|e| StoreError::parse(format!("Failed to parse user response: {}", e)))
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(GITHUB_API_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;

    async fn spawn_api(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = GitHubClient::new("https://github.example.com/api/v3/");
        assert_eq!(client.api_endpoint(), "https://github.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer_token() {
        let router = Router::new().route(
            "/user",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth == "Bearer gh-token" {
                    (StatusCode::OK, r#"{"id": 1, "login": "octocat"}"#)
                } else {
                    (StatusCode::UNAUTHORIZED, r#"{"message": "Bad credentials"}"#)
                }
            }),
        );
        let client = GitHubClient::new(spawn_api(router).await);

        let user = client.current_user("gh-token").await.unwrap();
        assert_eq!(user.login, "octocat");

        let err = client.current_user("wrong").await.unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 401, .. }));
    }
}
