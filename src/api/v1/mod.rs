//
//  argocd-rs
//  api/v1/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Argo CD REST API v1.
//!
//! One service per resource group. Each service is a cheap handle around a
//! [`Client`](super::Client) clone and is obtained from the matching client
//! accessor:
//!
//! | Accessor | Service | Path prefix |
//! |----------|---------|-------------|
//! | `accounts()` | [`AccountsService`] | `api/v1/account` |
//! | `sessions()` | [`SessionsService`] | `api/v1/session` |
//! | `applications()` | [`ApplicationsService`] | `api/v1/applications` |
//! | `clusters()` | [`ClustersService`] | `api/v1/clusters` |
//! | `projects()` | [`ProjectsService`] | `api/v1/projects` |
//! | `repositories()` | [`RepositoriesService`] | `api/v1/repositories` |
//! | `repo_creds()` | [`RepoCredsService`] | `api/v1/repocreds` |
//!
//! Every method builds its request through
//! [`Client::new_request`](super::Client::new_request), so headers, TLS
//! policy and status handling are uniform. Identifiers taken from the caller
//! are always percent-encoded before they are placed in a path.
//!
//! # Example
//!
//! ```rust,no_run
//! use argocd_rs::Client;
//! use argocd_rs::api::v1::applications::ApplicationQuery;
//!
//! # async fn example() -> Result<(), argocd_rs::ArgoError> {
//! let client = Client::new("https://argocd.example.com", "admin", "secret", "", [])?;
//! client.init().await?;
//!
//! let query = ApplicationQuery {
//!     projects: vec!["default".to_string()],
//!     ..Default::default()
//! };
//! for app in client.applications().list(&query).await? {
//!     println!("{} {}", app.metadata.name, app.status.sync.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod applications;
pub mod clusters;
pub mod projects;
pub mod repo_creds;
pub mod repositories;
pub mod sessions;

pub use accounts::AccountsService;
pub use applications::ApplicationsService;
pub use clusters::ClustersService;
pub use projects::ProjectsService;
pub use repo_creds::RepoCredsService;
pub use repositories::RepositoriesService;
pub use sessions::SessionsService;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::api::options;
    use crate::api::transport::mock::MockTransport;
    use crate::api::Client;

    /// A client with token `test-token` talking to `transport`.
    pub(crate) fn client(transport: &Arc<MockTransport>) -> Client {
        Client::new(
            "https://argocd.example.com",
            "admin",
            "secret",
            "test-token",
            [options::transport(transport.clone())],
        )
        .unwrap()
    }

    /// Shorthand for a mock answering each call with the given bodies in order.
    pub(crate) fn transport(bodies: &[&str]) -> Arc<MockTransport> {
        let mut mock = MockTransport::new();
        for body in bodies {
            mock = mock.respond(200, body);
        }
        Arc::new(mock)
    }
}
