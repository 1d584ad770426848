//
//  argocd-rs
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the typed client for the Argo CD REST API.
//!
//! ## Architecture
//!
//! - [`client`]: The shared [`Client`] with base URL, credentials, token and TLS policy
//! - [`options`]: Construction-time [`ClientOption`](options::ClientOption)s
//! - [`request`]: [`RequestBuilder`] and the uniform response decoding
//! - [`transport`]: The pluggable [`Transport`] and its reqwest binding
//! - [`v1`]: One service per resource group (applications, clusters, ...)
//! - [`common`]: Metadata and list shapes shared by all resources
//!
//! ## Usage
//!
//! ```rust,no_run
//! use argocd_rs::api::{options, Client};
//!
//! # async fn example() -> Result<(), argocd_rs::ArgoError> {
//! let client = Client::new(
//!     "https://argocd.example.com",
//!     "admin",
//!     "secret",
//!     "",
//!     [options::strict_tls()],
//! )?;
//! client.init().await?;
//!
//! let info = client.sessions().get_user_info().await?;
//! println!("logged in as {}", info.username);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`]. Transport faults come first as
//! [`ArgoError::Transport`], one line per fault. Non-200 responses become
//! [`ArgoError::Api`] under the default strict policy, or an empty result
//! under [`options::lenient_status`].

pub mod client;
pub mod common;
pub mod error;
pub mod options;
pub mod request;
pub mod token;
pub mod transport;
pub mod v1;

pub use client::{Client, API_V1_PREFIX};
pub use error::{aggregate_errors, api_error, ArgoError, Result};
pub use request::{escape_segment, HttpMethod, RequestBuilder};
pub use token::AuthToken;
pub use transport::{HttpRequest, ReqwestTransport, Transport, TransportError, TransportResponse};
