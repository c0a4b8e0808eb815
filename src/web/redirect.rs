use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::web::WebState;

/// Header set by the TLS-terminating proxy in front of the server.
pub const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Send plain-HTTP requests to the HTTPS version of the same path.
///
/// Disabled in the `dev` environment so local runs need no certificates.
pub async fn redirect_to_https(
    State(state): State<WebState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.redirect_https {
        return next.run(request).await;
    }

    let headers = request.headers();
    let is_https = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"));

    if is_https {
        return next.run(request).await;
    }

    let Some(host) = headers.get(header::HOST).and_then(|v| v.to_str().ok()) else {
        return next.run(request).await;
    };

    let target = format!("https://{}{}", host, request.uri().path());
    tracing::debug!("Redirecting to {}", target);

    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response()
}
