//! Request interception.
//!
//! An interceptor sees every request after it is built and before it is sent.
//! Construction failures go through `on_error` instead, so a stage can observe
//! them, but the default is to hand them back untouched.

use reqwest::header::{self, HeaderValue};
use reqwest::Request;
use tracing::warn;

use crate::auth::CredentialProvider;

pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: Request) -> Request;

    fn on_error<E>(&self, error: E) -> E
    where
        Self: Sized,
    {
        error
    }

    /// Route a build result through the matching hook
    fn intercept<E>(&self, built: Result<Request, E>) -> Result<Request, E>
    where
        Self: Sized,
    {
        match built {
            Ok(request) => Ok(self.on_request(request)),
            Err(error) => Err(self.on_error(error)),
        }
    }
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
pub struct BearerAuth<P> {
    credentials: P,
}

impl<P: CredentialProvider> BearerAuth<P> {
    pub fn new(credentials: P) -> Self {
        Self { credentials }
    }
}

impl<P: CredentialProvider> RequestInterceptor for BearerAuth<P> {
    fn on_request(&self, mut request: Request) -> Request {
        let Some(token) = self.credentials.token() else {
            return request;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(_) => {
                warn!(url = %request.url(), "Stored token is not a valid header value, sending without it");
            }
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::{Method, Url};

    use super::*;
    use crate::auth::{KeyValueStore, MemoryStore, TokenCredentials, TOKEN_KEY};

    fn auth_with(token: Option<&str>) -> BearerAuth<TokenCredentials<Arc<MemoryStore>>> {
        let store = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            store.set(TOKEN_KEY, token).unwrap();
        }
        BearerAuth::new(TokenCredentials::new(store))
    }

    fn request(method: Method, url: &str) -> Request {
        Request::new(method, Url::parse(url).unwrap())
    }

    #[test]
    fn test_attaches_bearer_token() {
        let auth = auth_with(Some("abc123"));
        let request = auth.on_request(request(Method::GET, "http://localhost:3000/conversations"));

        let value = request.headers().get(header::AUTHORIZATION).unwrap();
        assert_eq!(value, "Bearer abc123");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_no_token_leaves_headers_alone() {
        let auth = auth_with(None);
        let request = auth.on_request(request(Method::GET, "http://localhost:3000/conversations"));
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
        assert!(request.headers().is_empty());

        // A header set by the caller survives when no token is stored
        let mut preset = self::request(Method::GET, "http://localhost:3000/users");
        preset
            .headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        let preset = auth.on_request(preset);
        assert_eq!(preset.headers().get(header::AUTHORIZATION).unwrap(), "Basic xyz");
    }

    #[test]
    fn test_empty_token_is_not_attached() {
        let auth = auth_with(Some(""));
        let request = auth.on_request(request(Method::GET, "http://localhost:3000/"));
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_applies_to_every_method_and_path() {
        let auth = auth_with(Some("7"));
        for (method, url) in [
            (Method::POST, "http://localhost:3000/session"),
            (Method::PUT, "http://localhost:3000/users/me/username"),
            (Method::DELETE, "http://localhost:3000/conversations/1/messages/2"),
            (Method::GET, "https://api.example.com/users?q=bob"),
        ] {
            let request = auth.on_request(request(method, url));
            assert_eq!(request.headers().get(header::AUTHORIZATION).unwrap(), "Bearer 7");
        }
    }

    #[test]
    fn test_unencodable_token_is_skipped() {
        let auth = auth_with(Some("bad\ntoken"));
        let request = auth.on_request(request(Method::GET, "http://localhost:3000/"));
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_construction_error_passes_through_unchanged() {
        let auth = auth_with(Some("abc123"));
        let result: Result<Request, String> = auth.intercept(Err("boom".to_string()));
        assert_eq!(result.unwrap_err(), "boom");

        let built = reqwest::Client::new().get("not a url").build();
        let expected = built.as_ref().unwrap_err().to_string();
        let err = auth.intercept(built).unwrap_err();
        assert!(err.is_builder());
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_repeated_interception_is_stable() {
        let auth = auth_with(Some("abc123"));
        let once = auth.on_request(request(Method::GET, "http://localhost:3000/"));
        let twice = auth.on_request(once);
        let values: Vec<_> = twice.headers().get_all(header::AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Bearer abc123"]);
    }
}
