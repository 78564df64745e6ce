use axum_extra::extract::{CookieJar, cookie::Cookie};
use email::Email;
use time::Duration;

pub const COOKIE_NAME: &str = "email";

const COOKIE_TTL: Duration = Duration::seconds(60);

/// Short lived marker binding the signup request to the follow-up
/// verification request.
///
/// The value is the plaintext email, unsigned and unencrypted: it is
/// trivially forgeable and carries no trust beyond "this browser claims to
/// be mid-signup for this address". Anyone replacing it still has to know
/// the code that was emailed to that address.
pub fn email_cookie<'a>(email: &Email) -> Cookie<'a> {
    Cookie::build((COOKIE_NAME, email.to_string()))
        .path("/")
        .max_age(COOKIE_TTL)
        .http_only(true)
        .build()
}

pub fn email_from_cookie_jar(jar: &CookieJar) -> Option<Email> {
    jar.get(COOKIE_NAME)
        .and_then(|cookie| cookie.value().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_http_only_with_60s_ttl() {
        let email: Email = "user1@test.com".parse().unwrap();
        let cookie = email_cookie(&email);
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.value(), "user1@test.com");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(60)));
    }

    #[test]
    fn junk_cookie_value_is_dropped() {
        let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "not-an-email"));
        assert!(email_from_cookie_jar(&jar).is_none());
    }
}
