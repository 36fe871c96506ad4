use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use log::*;
use semver::Version;
use service::config::ApiVersion;

/// Extracts and validates the `x-version` request header.
///
/// Every versioned endpoint takes this extractor first; a request without the
/// header, with an unparsable value, or with a version the server no longer
/// serves is rejected before the handler runs.
pub(crate) struct CompareApiVersion(pub Version);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(ApiVersion::field_name())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing request header: {}", ApiVersion::field_name()),
                )
            })?
            .to_str()
            .map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid request header value: {}", ApiVersion::field_name()),
                )
            })?;

        let version = Version::parse(header_value).map_err(|err| {
            warn!("Failed to parse {} header: {err:?}", ApiVersion::field_name());
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid API version: {header_value}"),
            )
        })?;

        if !ApiVersion::versions()
            .iter()
            .any(|supported| *supported == header_value)
        {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {version}"),
            ));
        }

        Ok(CompareApiVersion(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_version(value: &str) -> Parts {
        let (parts, _body) = Request::builder()
            .uri("/health")
            .header(ApiVersion::field_name(), value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn accepts_the_current_version() {
        let mut parts = parts_with_version(ApiVersion::default_version());

        let result = CompareApiVersion::from_request_parts(&mut parts, &()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_an_unknown_version() {
        let mut parts = parts_with_version("99.0.0");

        let (status, _msg) = CompareApiVersion::from_request_parts(&mut parts, &())
            .await
            .map(|_| ())
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_a_missing_header() {
        let (mut parts, _body) = Request::builder()
            .uri("/health")
            .body(())
            .unwrap()
            .into_parts();

        let (status, _msg) = CompareApiVersion::from_request_parts(&mut parts, &())
            .await
            .map(|_| ())
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
