use std::error::Error;

use log::{debug, error, info, warn};
use reqwest::{Method, Response, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Sends one request and logs the exchange. The bearer header is added by the
/// client middleware, never here.
pub async fn execute_request<T: Serialize + ?Sized>(
    client: &ClientWithMiddleware,
    method: Method,
    url: &str,
    json_body: Option<&T>,
) -> Result<Response> {
    let mut request_builder = client.request(method.clone(), url);
    if let Some(body) = json_body {
        request_builder = request_builder.json(body);
    }

    info!("Sending {} request to {}", method, url);
    let start_time = std::time::Instant::now();

    match request_builder.send().await {
        Ok(resp) => {
            info!(
                "Got response from {} after {:?} with status {}",
                url,
                start_time.elapsed(),
                resp.status()
            );
            Ok(resp)
        }
        Err(e) => {
            error!("Failed HTTP request to {}: {}", url, e);
            if let Some(source) = e.source() {
                error!("Error source: {:?}", source);
            }
            Err(e.into())
        }
    }
}

/// Passes the response through when its status is one of `accepted`.
///
/// A different success status becomes [`ApiError::UnexpectedStatus`]; an error
/// status becomes [`ApiError::Http`] carrying the body's `message`, if any.
pub async fn expect_status(response: Response, accepted: &[StatusCode]) -> Result<Response> {
    let status = response.status();
    if accepted.contains(&status) {
        return Ok(response);
    }
    if status.is_success() {
        warn!("Unexpected success status {} from {}", status, response.url());
        return Err(ApiError::UnexpectedStatus(status.as_u16()));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Could not read error body: {}", e);
            String::new()
        }
    };
    let message = error_message(&body);
    debug!("Error response {}: {:?}", status, message);
    Err(ApiError::Http {
        status: status.as_u16(),
        message,
    })
}

/// Extracts `message` from an error body. Validation errors carry a list of
/// messages, which are joined.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Like [`decode_json`] but an unreadable or mismatched body yields `None`.
pub async fn decode_optional<T: DeserializeOwned>(response: Response) -> Option<T> {
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Could not read response body: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&body) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Response body did not decode: {}", e);
            None
        }
    }
}
