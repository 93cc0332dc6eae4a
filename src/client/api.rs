use std::sync::{PoisonError, RwLock};

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::FieldError;

/// Failure surfaced by the API client: the HTTP status, its canonical text,
/// and whatever the server put in the body. Transport failures carry
/// status 0.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("request failed with status {status}: {status_text}")]
pub struct RequestFailure {
    pub status: u16,
    pub status_text: String,
    pub msg: Option<String>,
    pub errors: Vec<FieldError>,
}

impl RequestFailure {
    fn transport(err: reqwest::Error) -> Self {
        Self {
            status: 0,
            status_text: err.to_string(),
            msg: None,
            errors: Vec::new(),
        }
    }

    fn from_response(status: StatusCode, body: String) -> Self {
        #[derive(Default, Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            msg: Option<String>,
            #[serde(default)]
            errors: Vec<FieldError>,
        }

        let (msg, errors) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => (parsed.msg, parsed.errors),
            // Plain text bodies, e.g. the generic 500 answer.
            Err(_) => ((!body.is_empty()).then_some(body), Vec::new()),
        };

        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            msg,
            errors,
        }
    }
}

/// HTTP client with a base URL and a shared bearer token. Setting the token
/// once makes every subsequent request authenticated.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    pub fn set_auth_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, RequestFailure> {
        let req = match self.token() {
            Some(token) => req.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        };

        let resp = req.send().await.map_err(RequestFailure::transport)?;
        let status = resp.status();
        if status.is_success() {
            resp.json::<T>().await.map_err(RequestFailure::transport)
        } else {
            let body = resp.text().await.unwrap_or_default();
            debug!(%status, body = %body, "request rejected");
            Err(RequestFailure::from_response(status, body))
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestFailure> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestFailure> {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    /// PUT without a body, used by the like/unlike routes.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        self.send(self.http.put(self.url(path))).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        self.send(self.http.delete(self.url(path))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_bodies_with_a_field_list_are_decoded() {
        let failure = RequestFailure::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"errors":[{"msg":"Status is required","param":"status"},{"msg":"User already exists"}]}"#.into(),
        );

        assert_eq!(failure.status, 400);
        assert_eq!(failure.status_text, "Bad Request");
        assert_eq!(failure.msg, None);
        assert_eq!(failure.errors.len(), 2);
        assert_eq!(failure.errors[0].msg, "Status is required");
        assert_eq!(failure.errors[1].param, None);
    }

    #[test]
    fn error_bodies_with_a_single_message_are_decoded() {
        let failure = RequestFailure::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"msg":"Post not found"}"#.into(),
        );

        assert_eq!(failure.msg.as_deref(), Some("Post not found"));
        assert!(failure.errors.is_empty());
    }

    #[test]
    fn plain_text_bodies_become_the_message() {
        let failure = RequestFailure::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server error".into(),
        );

        assert_eq!(failure.status, 500);
        assert_eq!(failure.msg.as_deref(), Some("Server error"));
    }

    #[tokio::test]
    async fn connection_failures_map_to_status_zero() {
        // Port 1 is never bound in the test environment.
        let api = ApiClient::new("http://127.0.0.1:1");
        let failure = api
            .get::<serde_json::Value>("/api/profile")
            .await
            .expect_err("the connection must be refused");
        assert_eq!(failure.status, 0);
    }

    #[test]
    fn the_token_is_shared_across_handles() {
        let api = ApiClient::new("http://localhost:8080");
        assert_eq!(api.token(), None);
        api.set_auth_token(Some("abc".into()));
        assert_eq!(api.token(), Some("abc".into()));
        api.set_auth_token(None);
        assert_eq!(api.token(), None);
    }
}
