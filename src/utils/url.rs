//! Endpoint URL helpers.

/// Join `base_url` and `endpoint` with exactly one slash between them.
///
/// ```
/// use qanat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://example.test/v1beta/", "/models/m:generateContent"),
///     "https://example.test/v1beta/models/m:generateContent"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
