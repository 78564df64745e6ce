use axum::{body::Body, http::Request};

use crate::request;

pub fn signup(email: &str) -> Request<Body> {
    request!(
        POST "/signup";
        "content-type" => "application/x-www-form-urlencoded";
        format!("email={}", email)
    )
}

pub fn verify(cookie: &str, code: &str) -> Request<Body> {
    request!(
        POST "/verify";
        "content-type" => "application/x-www-form-urlencoded"
        "cookie" => cookie;
        format!("code={}", code)
    )
}

pub fn verify_without_cookie(code: &str) -> Request<Body> {
    request!(
        POST "/verify";
        "content-type" => "application/x-www-form-urlencoded";
        format!("code={}", code)
    )
}
