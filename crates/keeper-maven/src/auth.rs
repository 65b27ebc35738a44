//! Repository authentication using credentials from `keeper.toml`.
//!
//! Credentials are usually written as `${env:VAR}` references resolved from
//! `.keeper.env`; by the time a [`MavenRepository`] exists they are plain
//! values.

use reqwest::RequestBuilder;

use crate::repository::MavenRepository;

/// Apply authentication to a request if the repository has credentials.
///
/// A password without a username is sent as a bearer token.
pub fn apply_auth(request: RequestBuilder, repo: &MavenRepository) -> RequestBuilder {
    match (&repo.username, &repo.password) {
        (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
        (Some(user), None) => request.basic_auth(user, None::<&str>),
        (None, Some(token)) => request.bearer_auth(token),
        (None, None) => request,
    }
}
