//! API client for communicating with the WASAText REST API.
//!
//! Every request goes through `ApiClient::execute`, which applies the fixed
//! timeout, runs the `BearerAuth` interceptor and sends the request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::CredentialProvider;
use crate::models::{
    Conversation, ConversationSummary, LoginRequest, LoginResponse, Message, NewMessage,
    StartConversationRequest, UpdateUsernameRequest, User,
};

use super::interceptor::{BearerAuth, RequestInterceptor};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in milliseconds, applied to every request.
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// API client for WASAText.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Arc<BearerAuth<Arc<dyn CredentialProvider>>>,
}

impl ApiClient {
    /// Create a new API client reading its token from `credentials`
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            auth: Arc::new(BearerAuth::new(credentials)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request against the base URL with the default timeout.
    /// Callers may override the timeout on the returned builder.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
    }

    /// Build a request and run it through the interceptor.
    /// Build failures are returned exactly as reqwest produced them.
    pub fn prepare(&self, builder: RequestBuilder) -> reqwest::Result<Request> {
        self.auth.intercept(builder.build())
    }

    /// Send a request. Failures, including construction failures, are passed through.
    pub async fn execute(&self, builder: RequestBuilder) -> reqwest::Result<Response> {
        let request = self.prepare(builder)?;
        debug!(method = %request.method(), url = %request.url(), "Sending request");
        self.client.execute(request).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
        let response = self
            .execute(builder)
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send {} request", what))?;

        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }

    // ===== Session =====

    pub fn login_request(&self, username: &str) -> RequestBuilder {
        self.request(Method::POST, "/session").json(&LoginRequest {
            username: username.to_string(),
        })
    }

    /// Log in, registering the user on first use.
    /// The returned identifier is the bearer token for later requests.
    pub async fn login(&self, username: &str) -> Result<LoginResponse> {
        self.send_json(self.login_request(username), "login").await
    }

    // ===== Users =====

    pub fn search_users_request(&self, query: &str) -> RequestBuilder {
        self.request(Method::GET, "/users").query(&[("q", query)])
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.send_json(self.search_users_request(query), "user search").await
    }

    pub fn set_my_username_request(&self, username: &str) -> RequestBuilder {
        self.request(Method::PUT, "/users/me/username")
            .json(&UpdateUsernameRequest {
                username: username.to_string(),
            })
    }

    pub async fn set_my_username(&self, username: &str) -> Result<User> {
        self.send_json(self.set_my_username_request(username), "username update")
            .await
    }

    // ===== Conversations =====

    pub fn get_my_conversations_request(&self) -> RequestBuilder {
        self.request(Method::GET, "/conversations")
    }

    pub async fn get_my_conversations(&self) -> Result<Vec<ConversationSummary>> {
        self.send_json(self.get_my_conversations_request(), "conversation list")
            .await
    }

    pub fn get_conversation_request(&self, conversation_id: i64) -> RequestBuilder {
        self.request(Method::GET, &format!("/conversations/{}", conversation_id))
    }

    pub async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation> {
        self.send_json(self.get_conversation_request(conversation_id), "conversation")
            .await
    }

    pub fn start_conversation_request(&self, recipient: &str) -> RequestBuilder {
        self.request(Method::POST, "/conversations")
            .json(&StartConversationRequest {
                recipient: recipient.to_string(),
            })
    }

    pub async fn start_conversation(&self, recipient: &str) -> Result<Conversation> {
        self.send_json(self.start_conversation_request(recipient), "start conversation")
            .await
    }

    pub fn send_message_request(&self, conversation_id: i64, message: &NewMessage) -> RequestBuilder {
        self.request(
            Method::POST,
            &format!("/conversations/{}/messages", conversation_id),
        )
        .json(message)
    }

    pub async fn send_message(&self, conversation_id: i64, message: &NewMessage) -> Result<Message> {
        self.send_json(self.send_message_request(conversation_id, message), "send message")
            .await
    }
}
