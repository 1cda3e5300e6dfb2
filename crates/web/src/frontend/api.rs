//! Backend calls made from the browser.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, RequestMode, Response};

use crate::types::{LoginError, LoginRequest, LoginResponse};
use crate::WebConfig;

/// `POST {api_url}/login` with the session cookie included.
///
/// Resolves only once the backend has answered; the caller raises the
/// login-success signal afterwards.
pub async fn login(config: &WebConfig, request: &LoginRequest) -> Result<LoginResponse, LoginError> {
    let window = web_sys::window().ok_or(LoginError::Network)?;

    let body = serde_json::to_string(request).map_err(|e| LoginError::Decode(e.to_string()))?;
    let headers = Headers::new().map_err(js_error)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_credentials(RequestCredentials::Include);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));

    let http_request =
        Request::new_with_str_and_init(&config.login_url(), &init).map_err(js_error)?;

    let response = JsFuture::from(window.fetch_with_request(&http_request))
        .await
        .map_err(|e| {
            tracing::warn!(error = ?e, "login request failed");
            LoginError::Network
        })?;
    let response: Response = response.dyn_into().map_err(js_error)?;

    if !response.ok() {
        let text = match response.text() {
            Ok(promise) => JsFuture::from(promise).await.ok().and_then(|v| v.as_string()),
            Err(_) => None,
        };
        tracing::info!(status = response.status(), "login rejected");
        return Err(LoginError::rejected(text));
    }

    let json = JsFuture::from(response.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    serde_wasm_bindgen::from_value(json).map_err(|e| LoginError::Decode(e.to_string()))
}

fn js_error(value: JsValue) -> LoginError {
    LoginError::Decode(format!("{value:?}"))
}
