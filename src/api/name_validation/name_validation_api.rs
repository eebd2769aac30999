//! Implementation of the name validation API.
//! An API that greets someone if their name is made up of letters only.

use crate::core::validation::name_validator::{self, Outcome};
use crate::infra::error::ClientError;
use crate::infra::{extract::Query, state::AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use http::{request::Parts, StatusCode};
use std::fmt::Debug;
use tracing::instrument;
use utoipa::IntoParams;

/// The name validation API endpoints.
///
/// Served both at the lowercase path and at the controller-style `/NameValidation`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/namevalidation", get(validate_name))
        .route("/NameValidation", get(validate_name))
}

/// A name query parameter.
///
/// The key is matched case-insensitively. If it is repeated, the first value wins.
#[derive(IntoParams)]
pub struct NameQuery {
    /// The name to validate. Only ASCII letters are allowed.
    name: Option<String>,
}

impl NameQuery {
    /// Constructs a query for the given name.
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }

    /// Picks the first `name` parameter out of decoded query pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let name = pairs
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("name"))
            .map(|(_, value)| value);
        Self { name }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for NameQuery
where
    S: Send + Sync,
{
    type Rejection = ClientError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self::from_pairs(pairs))
    }
}

impl Debug for NameQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name.fmt(f)
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let status = if self.is_valid() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, self.to_string()).into_response()
    }
}

/// Validates a name, greeting it if it only contains letters.
#[utoipa::path(
    get,
    path = "/namevalidation",
    operation_id = "GetNameValidation",
    tag = "name validation",
    params(NameQuery),
    responses(
        (status = 200, description = "The name is valid", body = String, content_type = "text/plain",
            example = json!("Hello, Alice!")),
        (status = 400, description = "The name is missing or contains something other than letters",
            body = String, content_type = "text/plain",
            example = json!("Invalid characters in name. Only letters are allowed.")),
    )
)]
#[instrument]
pub async fn validate_name(query: NameQuery) -> Outcome {
    let outcome = name_validator::validate(query.name.as_deref());
    match &outcome {
        Outcome::Missing => tracing::warn!("Name is required for name validation."),
        Outcome::Invalid => {
            tracing::warn!("Invalid characters in name. Only letters are allowed.")
        }
        Outcome::Valid(_) => {
            tracing::info!(name = query.name.as_deref(), "Name validation successful")
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::{validate_name, NameQuery};
    use axum::response::IntoResponse;
    use http::StatusCode;
    use http_body_util::BodyExt;

    async fn call(name: Option<&str>) -> (StatusCode, String) {
        let outcome = validate_name(NameQuery::new(name.map(str::to_string))).await;
        let response = outcome.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_name_is_greeted() {
        let (status, body) = call(Some("Alice")).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("Hello, Alice!", body);
    }

    #[tokio::test]
    async fn absent_name_is_required() {
        let (status, body) = call(None).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("Name is required.", body);
    }

    #[tokio::test]
    async fn empty_name_is_required() {
        let (status, body) = call(Some("")).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("Name is required.", body);
    }

    #[tokio::test]
    async fn digits_are_rejected() {
        let (status, body) = call(Some("Bob123")).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(
            "Invalid characters in name. Only letters are allowed.",
            body
        );
    }

    #[tokio::test]
    async fn responses_are_plain_text() {
        let outcome = validate_name(NameQuery::new(Some("Alice".to_string()))).await;
        let response = outcome.into_response();
        assert_eq!(
            "text/plain; charset=utf-8",
            response.headers()[http::header::CONTENT_TYPE]
        );
    }

    fn pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_name_pair_wins() {
        let query = NameQuery::from_pairs(pairs(&[("name", "a"), ("name", "b")]));
        assert_eq!(Some("a"), query.name.as_deref());
    }

    #[test]
    fn name_key_ignores_case() {
        let query = NameQuery::from_pairs(pairs(&[("other", "x"), ("Name", "Alice")]));
        assert_eq!(Some("Alice"), query.name.as_deref());
        let query = NameQuery::from_pairs(pairs(&[("NAME", "Bob")]));
        assert_eq!(Some("Bob"), query.name.as_deref());
    }

    #[test]
    fn other_keys_leave_name_absent() {
        let query = NameQuery::from_pairs(pairs(&[("names", "Alice"), ("nom", "Bob")]));
        assert_eq!(None, query.name);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn valid_name_is_logged() {
        let _ = validate_name(NameQuery::new(Some("Alice".to_string()))).await;
        assert!(logs_contain("Name validation successful"));
        assert!(logs_contain("Alice"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn missing_name_is_warned() {
        let _ = validate_name(NameQuery::new(None)).await;
        assert!(logs_contain("WARN"));
        assert!(logs_contain("Name is required for name validation."));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn invalid_name_is_warned() {
        let _ = validate_name(NameQuery::new(Some("Bob123".to_string()))).await;
        assert!(logs_contain("WARN"));
        assert!(logs_contain(
            "Invalid characters in name. Only letters are allowed."
        ));
        assert!(!logs_contain("Name validation successful"));
    }
}
