//! Session and flash cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use coaster_common::config::SessionConfig;
use coaster_views::Flash;

/// Cookie carrying a [`Flash`] key across one redirect.
pub const FLASH_COOKIE: &str = "coaster_flash";

/// Build the HTTP-only session cookie holding `token`.
#[must_use]
pub fn session_cookie(config: &SessionConfig, token: &str) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .build()
}

/// Set the session cookie.
#[must_use]
pub fn start_session(jar: CookieJar, config: &SessionConfig, token: &str) -> CookieJar {
    jar.add(session_cookie(config, token))
}

/// Remove the session cookie.
#[must_use]
pub fn clear_session(jar: CookieJar, config: &SessionConfig) -> CookieJar {
    jar.remove(Cookie::build(config.cookie_name.clone()).path("/"))
}

/// Leave `flash` for the next page.
#[must_use]
pub fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.key()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Read and consume the pending flash message.
#[must_use]
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(flash) = jar.get(FLASH_COOKIE).map(|c| Flash::from_key(c.value())) else {
        return (jar, None);
    };

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}
