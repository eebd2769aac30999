//! Custom axum extractors.

use super::error::ClientError;
use axum::{async_trait, extract::FromRequestParts};
use http::request::Parts;
use serde::de::DeserializeOwned;

/// A custom Query extractor since axum's does not let us customize the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<T> AsRef<T> for Query<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ClientError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let res = axum::extract::Query::from_request_parts(parts, state).await?;
        Ok(Query(res.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Query;
    use crate::infra::error::ClientError;
    use axum::extract::FromRequestParts;
    use http::{Request, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        name: Option<String>,
    }

    async fn extract(uri: &str) -> Result<Query<Params>, ClientError> {
        let (mut parts, _) = Request::get(uri).body(()).unwrap().into_parts();
        Query::<Params>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn present_parameter_is_extracted() {
        let query = extract("/namevalidation?name=Alice").await.unwrap();
        assert_eq!(Some("Alice"), query.as_ref().name.as_deref());
    }

    #[tokio::test]
    async fn percent_encoding_is_decoded() {
        let query = extract("/namevalidation?name=John%20Doe").await.unwrap();
        assert_eq!(Some("John Doe"), query.0.name.as_deref());
    }

    #[tokio::test]
    async fn absent_parameter_is_none() {
        let query = extract("/namevalidation").await.unwrap();
        assert_eq!(None, query.0.name);
    }

    #[tokio::test]
    async fn duplicate_field_is_rejected() {
        match extract("/namevalidation?name=a&name=b").await {
            Err(ClientError::Custom(status, _)) => assert_eq!(StatusCode::BAD_REQUEST, status),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn pairs_keep_every_value_in_order() {
        let (mut parts, _) = Request::get("/namevalidation?name=a&Name=b&x=c")
            .body(())
            .unwrap()
            .into_parts();
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        let values: Vec<&str> = pairs.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(vec!["name", "Name", "x"], keys);
        assert_eq!(vec!["a", "b", "c"], values);
    }
}
