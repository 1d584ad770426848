//
//  argocd-rs
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Binding
//!
//! The client never talks to the network directly. It hands a fully built
//! [`HttpRequest`] to a [`Transport`] and receives a [`TransportResponse`]
//! back. Transport faults (DNS, connect, TLS, timeout, body read) are
//! collected into the response's `errors` list instead of short-circuiting,
//! so the caller can fold them with
//! [`aggregate_errors`](super::aggregate_errors) after every call.
//!
//! [`ReqwestTransport`] is the default binding. Tests and embedders can plug
//! their own implementation in through
//! [`options::transport`](super::options::transport).

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::error::{ArgoError, Result};
use super::request::HttpMethod;

/// An HTTP request described as plain data.
///
/// Built by [`Client::new_request`](super::Client::new_request) and consumed
/// by a [`Transport`]. Header names keep the casing they were inserted with;
/// use [`HttpRequest::header`] for case-insensitive lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL without the query string
    pub url: String,
    /// Request headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
    /// Serialized JSON body, if any
    pub body: Option<String>,
    /// Deadline for the whole round trip
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Returns the first header value matching `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first query value for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A single transport-level fault.
///
/// The message includes the full source chain of the underlying error, so
/// that "error sending request" is followed by the actual cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a transport error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { message }
    }
}

/// The outcome of executing an [`HttpRequest`].
///
/// `status` is `0` when no response was received at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code, or `0` if the request never completed
    pub status: u16,
    /// Raw response body
    pub body: String,
    /// Transport faults in the order they occurred
    pub errors: Vec<TransportError>,
}

impl TransportResponse {
    /// A response that carries a status and body and no faults.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            errors: Vec::new(),
        }
    }

    /// A response for a request that failed before any status was received.
    pub fn failed(error: TransportError) -> Self {
        Self {
            status: 0,
            body: String::new(),
            errors: vec![error],
        }
    }
}

/// A pluggable HTTP transport.
///
/// Implementations must not fail; every fault goes into
/// [`TransportResponse::errors`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes `request` and returns whatever came back.
    async fn execute(&self, request: HttpRequest) -> TransportResponse;
}

/// Default transport backed by [`reqwest::Client`].
///
/// Connection pooling, redirects and HTTP/2 negotiation are left to reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport.
    ///
    /// When `insecure_skip_verify` is `true` the server certificate and host
    /// name are not validated.
    pub fn new(insecure_skip_verify: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure_skip_verify)
            .build()
            .map_err(|e| ArgoError::HttpClient(TransportError::from(e).to_string()))?;
        Ok(Self { http })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> TransportResponse {
        let mut builder = self.http.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return TransportResponse::failed(err.into()),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => TransportResponse::new(status, body),
            Err(err) => TransportResponse {
                status,
                body: String::new(),
                errors: vec![err.into()],
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            query: vec![("name".to_string(), "guestbook".to_string())],
            body: None,
            timeout: None,
        }
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = request("http://localhost/api/v1/applications");
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.query_value("name"), Some("guestbook"));
    }

    #[tokio::test]
    async fn test_reqwest_transport_roundtrip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/applications")
            .match_header("accept", "application/json")
            .match_query(mockito::Matcher::UrlEncoded(
                "name".into(),
                "guestbook".into(),
            ))
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::new(false).unwrap();
        let response = transport
            .execute(request(&format!("{}/api/v1/applications", server.url())))
            .await;

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"items":[]}"#);
        assert!(response.errors.is_empty());
    }

    #[tokio::test]
    async fn test_reqwest_transport_collects_connect_errors() {
        let transport = ReqwestTransport::new(false).unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let response = transport.execute(request("http://127.0.0.1:9/api/v1/session")).await;
        assert_eq!(response.status, 0);
        assert_eq!(response.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_reqwest_transport_non_200_is_not_a_fault() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"error":"not found","code":5}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::new(false).unwrap();
        let mut req = request(&format!("{}/missing", server.url()));
        req.query.clear();
        let response = transport.execute(req).await;
        assert_eq!(response.status, 404);
        assert!(response.errors.is_empty());
    }
}
