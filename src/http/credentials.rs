use axum::http::HeaderMap;

pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const API_SECRET_HEADER: &str = "X-Api-Secret";

pub fn api_credentials(headers: &HeaderMap) -> (Option<&str>, Option<&str>) {
    let key = headers.get(API_KEY_HEADER).and_then(|h| h.to_str().ok());
    let secret = headers.get(API_SECRET_HEADER).and_then(|h| h.to_str().ok());
    (key, secret)
}
