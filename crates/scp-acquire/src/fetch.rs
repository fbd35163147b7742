use reqwest::StatusCode;

use crate::error::{FetchError, Result};

const USER_AGENT: &str = "scp/0.1 (SCP archive reader)";

/// GET `url` and return the body as text.
///
/// Only a `200 OK` counts as success; anything else is reported with its
/// status code and no retry is attempted.
pub async fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    tracing::info!(url = %url, "Fetching article");
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::HttpStatus {
            code: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await?;
    let html = String::from_utf8(body.to_vec())
        .map_err(|e| FetchError::Parse(format!("response body is not valid UTF-8: {e}")))?;
    tracing::info!(bytes = html.len(), "Received HTML");

    Ok(html)
}
