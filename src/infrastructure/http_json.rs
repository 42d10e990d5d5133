// JSON-over-HTTP helper shared by the platform repositories
use crate::domain::error::PipelineError;
use serde::de::DeserializeOwned;

/// Send a prepared request and decode a JSON body.
///
/// Transport failures and non-2xx statuses are `SourceUnavailable`;
/// an undecodable body is `MalformedPage`.
pub async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    source: &str,
) -> Result<T, PipelineError> {
    let response = request
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PipelineError::SourceUnavailable(format!(
            "{} returned status {}: {}",
            source, status, body
        )));
    }

    response.json::<T>().await.map_err(|e| {
        PipelineError::MalformedPage(format!("{} response could not be decoded: {}", source, e))
    })
}

/// Parse a count that may arrive as a JSON string ("1234") or number
pub fn parse_count(raw: Option<&serde_json::Value>) -> Option<u64> {
    match raw? {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
