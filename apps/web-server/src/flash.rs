//! One-time flash notices, carried in a dedicated cookie and cleared on the
//! next rendered page.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};

pub const FLASH_COOKIE: &str = "quill_flash";

/// Build the cookie carrying a flash message for the next page load.
pub fn set(message: &str) -> Cookie<'static> {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Cookie::build(FLASH_COOKIE, encoded)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .finish()
}

/// Read the pending flash message, if any.
pub fn take(req: &HttpRequest) -> Option<String> {
    let cookie = req.cookie(FLASH_COOKIE)?;
    let decoded: String = url::form_urlencoded::parse(cookie.value().as_bytes())
        .map(|(k, v)| [k, v].concat())
        .collect();
    Some(decoded)
}

/// Removal cookie, attached to any response that rendered the flash.
pub fn clear() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
