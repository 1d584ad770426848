//
//  argocd-rs
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Building and Response Decoding
//!
//! [`RequestBuilder`] is what [`Client::new_request`](super::Client::new_request)
//! hands to every resource service. It arrives with method, URL and headers
//! already set; the service attaches a query and/or a JSON body and then calls
//! one of the terminal methods:
//!
//! | Method | Returns | Use for |
//! |--------|---------|---------|
//! | [`send`](RequestBuilder::send) | raw [`TransportResponse`] | custom handling |
//! | [`execute`](RequestBuilder::execute) | decoded `T` | JSON endpoints |
//! | [`execute_unit`](RequestBuilder::execute_unit) | `()` | endpoints without payload |
//! | [`execute_stream`](RequestBuilder::execute_stream) | `Vec<T>` | newline-delimited result streams |
//!
//! Errors raised while building (bad path, unserializable body) are held
//! inside the builder and reported by the terminal method, in the same way
//! `reqwest::RequestBuilder` defers its own errors to `send()`.
//!
//! ## Decoding Convention
//!
//! 1. Transport faults are folded by [`aggregate_errors`] and returned first,
//!    whatever the status.
//! 2. Status 200 decodes the body as `T`. An empty body yields `T::default()`.
//! 3. Any other status is handled by the client's [`StatusPolicy`].

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::Client;
use super::error::{aggregate_errors, api_error, ArgoError, Result};
use super::options::StatusPolicy;
use super::transport::{HttpRequest, TransportResponse};

/// HTTP methods understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// Parses a method name, case-insensitively.
    ///
    /// Unknown names fall back to [`HttpMethod::Get`].
    ///
    /// ```rust
    /// use argocd_rs::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::from_name("put"), HttpMethod::Put);
    /// assert_eq!(HttpMethod::from_name("PROPFIND"), HttpMethod::Get);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            _ => Self::Get,
        }
    }

    /// The canonical upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether requests with this method are sent with a JSON content type.
    pub fn sends_json(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percent-encodes one path segment.
///
/// Resource identifiers such as repository URLs or cluster server addresses
/// contain `/`, `:` and `?`; they must go through this function before being
/// placed in a path.
///
/// ```rust
/// use argocd_rs::api::escape_segment;
///
/// assert_eq!(
///     escape_segment("https://github.com/argoproj/argocd-example-apps.git"),
///     "https%3A%2F%2Fgithub.com%2Fargoproj%2Fargocd-example-apps.git"
/// );
/// assert_eq!(escape_segment("guestbook"), "guestbook");
/// ```
pub fn escape_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// One record of a newline-delimited result stream.
#[derive(Debug, Deserialize)]
struct StreamRecord<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<Value>,
}

/// A request ready to be completed and sent.
///
/// Obtained from [`Client::new_request`](super::Client::new_request).
pub struct RequestBuilder {
    client: Client,
    request: Result<HttpRequest>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("request", &self.request)
            .finish()
    }
}

impl RequestBuilder {
    pub(crate) fn new(client: Client, request: Result<HttpRequest>) -> Self {
        Self { client, request }
    }

    /// Appends query parameters from any serializable struct or map.
    ///
    /// `None` and `null` fields are skipped, sequences become repeated keys,
    /// and nested objects are rejected with [`ArgoError::Encode`].
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        let outcome = match &mut self.request {
            Ok(request) => query_pairs(query).map(|pairs| request.query.extend(pairs)),
            Err(_) => Ok(()),
        };
        if let Err(err) = outcome {
            self.request = Err(err);
        }
        self
    }

    /// Appends a single query parameter.
    pub fn query_pair(mut self, key: &str, value: impl ToString) -> Self {
        if let Ok(request) = &mut self.request {
            request.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        let outcome = match &mut self.request {
            Ok(request) => serde_json::to_string(body)
                .map(|json| request.body = Some(json))
                .map_err(|e| ArgoError::Encode(e.to_string())),
            Err(_) => Ok(()),
        };
        if let Err(err) = outcome {
            self.request = Err(err);
        }
        self
    }

    /// Overrides the deadline for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if let Ok(request) = &mut self.request {
            request.timeout = Some(timeout);
        }
        self
    }

    /// Finishes building without sending.
    pub fn build(self) -> Result<HttpRequest> {
        self.request
    }

    /// Sends the request through the client's transport.
    pub async fn send(self) -> Result<TransportResponse> {
        let request = self.request?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.client.transport().execute(request).await;
        tracing::debug!(
            status = response.status,
            faults = response.errors.len(),
            "received response"
        );
        Ok(response)
    }

    /// Sends the request and decodes a JSON payload.
    pub async fn execute<T>(self) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let policy = self.client.status_policy();
        let response = self.send().await?;
        decode_response(policy, response)
    }

    /// Sends the request and discards any payload.
    pub async fn execute_unit(self) -> Result<()> {
        let policy = self.client.status_policy();
        let response = self.send().await?;
        check_response(policy, &response).map(|_| ())
    }

    /// Sends the request and decodes a stream of `{"result": ...}` records,
    /// one JSON document per line.
    ///
    /// A record carrying an `error` member ends decoding with
    /// [`ArgoError::Api`].
    pub async fn execute_stream<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let policy = self.client.status_policy();
        let response = self.send().await?;
        if !check_response(policy, &response)? {
            return Ok(Vec::new());
        }
        decode_stream(&response.body)
    }
}

/// Applies the transport-fault and status rules shared by every terminal
/// method. Returns `Ok(true)` when the body should be decoded.
fn check_response(policy: StatusPolicy, response: &TransportResponse) -> Result<bool> {
    if let Some(err) = aggregate_errors(&response.errors) {
        return Err(err);
    }
    if response.status == 200 {
        return Ok(true);
    }
    match policy {
        StatusPolicy::Strict => Err(api_error(response.status, &response.body)),
        StatusPolicy::Lenient => {
            tracing::warn!(
                status = response.status,
                "non-200 response returned as an empty result"
            );
            Ok(false)
        }
    }
}

pub(crate) fn decode_response<T>(policy: StatusPolicy, response: TransportResponse) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !check_response(policy, &response)? || response.body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&response.body).map_err(|e| ArgoError::Decode(e.to_string()))
}

fn decode_stream<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let record: StreamRecord<T> =
            serde_json::from_str(line).map_err(|e| ArgoError::Decode(e.to_string()))?;
        if let Some(error) = record.error {
            return Err(api_error(200, &error.to_string()));
        }
        if let Some(result) = record.result {
            items.push(result);
        }
    }
    Ok(items)
}

/// Flattens a serializable value into query pairs.
fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(query).map_err(|e| ArgoError::Encode(e.to_string()))?;
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ArgoError::Encode(format!(
                "query must serialize to an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar(&key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar(&key, other)? {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ArgoError::Encode(format!(
            "query parameter '{key}' is not a scalar"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::api::transport::TransportError;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Query {
        name: Option<String>,
        refresh: Option<String>,
        projects: Vec<String>,
        force_refresh: bool,
        limit: u32,
    }

    #[test]
    fn test_method_from_name() {
        assert_eq!(HttpMethod::from_name("GET"), HttpMethod::Get);
        assert_eq!(HttpMethod::from_name("post"), HttpMethod::Post);
        assert_eq!(HttpMethod::from_name("Patch"), HttpMethod::Patch);
        assert_eq!(HttpMethod::from_name("options"), HttpMethod::Options);
        assert_eq!(HttpMethod::from_name("TRACE"), HttpMethod::Get);
        assert_eq!(HttpMethod::from_name(""), HttpMethod::Get);
    }

    #[test]
    fn test_sends_json() {
        assert!(HttpMethod::Put.sends_json());
        assert!(HttpMethod::Post.sends_json());
        assert!(!HttpMethod::Get.sends_json());
        assert!(!HttpMethod::Delete.sends_json());
        assert!(!HttpMethod::Head.sends_json());
        assert!(!HttpMethod::Patch.sends_json());
    }

    #[test]
    fn test_escape_segment_reserved_characters() {
        assert_eq!(escape_segment("a b/c?d#e"), "a%20b%2Fc%3Fd%23e");
        assert_eq!(escape_segment("in-cluster"), "in-cluster");
    }

    #[test]
    fn test_query_pairs_flatten() {
        let query = Query {
            name: Some("guestbook".into()),
            refresh: None,
            projects: vec!["default".into(), "infra".into()],
            force_refresh: true,
            limit: 10,
        };
        let pairs = query_pairs(&query).unwrap();
        assert!(pairs.contains(&("name".into(), "guestbook".into())));
        assert!(pairs.contains(&("projects".into(), "default".into())));
        assert!(pairs.contains(&("projects".into(), "infra".into())));
        assert!(pairs.contains(&("forceRefresh".into(), "true".into())));
        assert!(pairs.contains(&("limit".into(), "10".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "refresh"));
    }

    #[test]
    fn test_query_pairs_rejects_nested_objects() {
        let mut outer = BTreeMap::new();
        let mut inner = BTreeMap::new();
        inner.insert("type", "url");
        outer.insert("id", inner);
        assert!(matches!(query_pairs(&outer), Err(ArgoError::Encode(_))));
    }

    #[test]
    fn test_query_pairs_rejects_scalars() {
        assert!(matches!(query_pairs(&42), Err(ArgoError::Encode(_))));
        assert!(query_pairs(&()).unwrap().is_empty());
    }

    #[test]
    fn test_decode_success() {
        let response = TransportResponse::new(200, r#"{"value":"yes"}"#);
        let value: BTreeMap<String, String> =
            decode_response(StatusPolicy::Strict, response).unwrap();
        assert_eq!(value["value"], "yes");
    }

    #[test]
    fn test_decode_empty_body_is_default() {
        let response = TransportResponse::new(200, "");
        let value: Vec<String> = decode_response(StatusPolicy::Strict, response).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_decode_bad_json() {
        let response = TransportResponse::new(200, "not json");
        let err = decode_response::<BTreeMap<String, String>>(StatusPolicy::Strict, response)
            .unwrap_err();
        assert!(matches!(err, ArgoError::Decode(_)));
    }

    #[test]
    fn test_decode_strict_non_200() {
        let response = TransportResponse::new(404, r#"{"error":"nope","code":5,"message":"nope"}"#);
        let err = decode_response::<BTreeMap<String, String>>(StatusPolicy::Strict, response)
            .unwrap_err();
        assert!(matches!(err, ArgoError::Api { status: 404, code: Some(5), .. }));
    }

    #[test]
    fn test_decode_lenient_non_200_is_default() {
        let response = TransportResponse::new(403, r#"{"error":"denied"}"#);
        let value: BTreeMap<String, String> =
            decode_response(StatusPolicy::Lenient, response).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_transport_faults_win_over_success() {
        let mut response = TransportResponse::new(200, r#"{"value":"yes"}"#);
        response.errors.push(TransportError::new("body read failed"));
        let err = decode_response::<BTreeMap<String, String>>(StatusPolicy::Lenient, response)
            .unwrap_err();
        assert_eq!(err.to_string(), "body read failed");
    }

    #[test]
    fn test_decode_stream() {
        let body = concat!(
            r#"{"result":{"content":"line one","podName":"web-1"}}"#,
            "\n",
            r#"{"result":{"content":"line two","podName":"web-1"}}"#,
            "\n\n"
        );
        let items: Vec<BTreeMap<String, String>> = decode_stream(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["content"], "line two");
    }

    #[test]
    fn test_decode_stream_error_record() {
        let body = r#"{"error":{"grpc_code":5,"message":"pod not found"}}"#;
        let err = decode_stream::<BTreeMap<String, String>>(body).unwrap_err();
        assert!(matches!(err, ArgoError::Api { .. }));
    }
}
