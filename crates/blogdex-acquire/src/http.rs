use std::time::Duration;

use reqwest::Client;

use crate::error::AcquireError;

/// Build a `reqwest` client with the configured timeout and user agent.
///
/// # Errors
///
/// Returns [`AcquireError::Http`] if the client cannot be constructed.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, AcquireError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Fetch a URL and return its body text, mapping non-2xx statuses to
/// [`AcquireError::UnexpectedStatus`].
pub(crate) async fn fetch_text(client: &Client, url: &str) -> Result<String, AcquireError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AcquireError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}
