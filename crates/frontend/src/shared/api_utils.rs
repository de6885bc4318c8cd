//! Helpers for talking to the backend API.

use contracts::shared::api_error::ApiErrorBody;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Base URL of the backend: same host as the page, port 3000.
///
/// Returns an empty string (relative URLs) when there is no window.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Full API URL for a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Sends a request and returns the response only if it is 2xx.
///
/// For other statuses the `{ "error": ... }` body is unwrapped so the
/// backend's message reaches the user unchanged.
pub async fn send(method: &str, path: &str, json_body: Option<String>) -> Result<Response, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &json_body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&api_url(path), &opts)
        .map_err(|e| format!("Failed to create request: {:?}", e))?;
    if json_body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("Failed to set header: {:?}", e))?;
    }

    let window = web_sys::window().ok_or("No window object")?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("Fetch failed: {:?}", e))?;
    let response: Response = resp_value.dyn_into().map_err(|_| "Not a Response")?;

    if response.ok() {
        Ok(response)
    } else {
        let status = response.status();
        let text = response_text(&response).await.unwrap_or_default();
        Err(error_message(status, &text))
    }
}

/// Response body as text
pub async fn response_text(response: &Response) -> Result<String, String> {
    let text = wasm_bindgen_futures::JsFuture::from(response.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "bad text".to_string())
}

/// Response body parsed as JSON
pub async fn response_json<T: serde::de::DeserializeOwned>(response: &Response) -> Result<T, String> {
    let text = response_text(response).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

/// Error text shown for a non-2xx response
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => format!("HTTP {}: {}", status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_unwraps_backend_error() {
        let body = r#"{"error":"Error saving to the document store (HTTP 500): boom"}"#;
        assert_eq!(
            error_message(502, body),
            "Error saving to the document store (HTTP 500): boom"
        );
    }

    #[test]
    fn test_store_read_error_is_shown_once() {
        let body = r#"{"error":"Error fetching districts (HTTP 503): unavailable"}"#;
        let shown = error_message(502, body);
        assert_eq!(shown, "Error fetching districts (HTTP 503): unavailable");
        assert_eq!(shown.matches("Error fetching districts").count(), 1);
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(404, ""), "HTTP 404");
        assert_eq!(error_message(500, "oops"), "HTTP 500: oops");
    }
}
