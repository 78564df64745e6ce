use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
    time::Instant,
};

use axum::{
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, Response, header::FORWARDED},
    middleware::Next,
    response::IntoResponse,
};
use forwarded_header_value::{ForwardedHeaderValue, Identifier};

pub async fn mw_client_ip(mut request: Request<Body>, next: Next) -> Response<Body> {
    let ip = client_ip(&request);
    request.extensions_mut().insert(ip);
    next.run(request).await
}

fn client_ip<B>(request: &Request<B>) -> Option<IpAddr> {
    request
        .headers()
        .get(FORWARDED)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| ForwardedHeaderValue::from_str(val).ok())
        .map(|forwarded| forwarded.into_remotest())
        .and_then(|stanza| stanza.forwarded_for)
        .and_then(|identifier| match identifier {
            Identifier::SocketAddr(socket_addr) => Some(socket_addr.ip()),
            Identifier::IpAddr(ip_addr) => Some(ip_addr),
            _ => None,
        })
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|connect_info| connect_info.0.ip())
        })
}

pub async fn latency_ms(request: Request<Body>, next: Next) -> Response<Body> {
    let start = Instant::now();
    let response = next.run(request).await;
    tracing::info!(
        latency_ms = %start.elapsed().as_millis(),
        status = %response.status(),
    );
    response
}

/// usually 5xx errors with internal details are handled
/// but under unforseen circumstances they leak to the client
/// this is the last line of defense to catch them
pub async fn mw_handle_leaked_5xx(request: Request<Body>, next: Next) -> Response<Body> {
    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        // Log and capture the error details without exposing them to the client
        match to_bytes(response.into_body(), usize::MAX).await {
            Ok(content) if !content.is_empty() => tracing::error!("{:?}", content),
            Err(e) => tracing::error!(
                "unable to convert INTERNAL_SERVER_ERROR response body to bytes :: {:?}",
                e
            ),
            _ => {}
        }

        return status.into_response();
    }

    response
}
