//! Per-request tracing.
//!
//! Every request runs inside an `http_request` span carrying its method and
//! path. When the response is ready one event is emitted with the status and
//! latency: `info` for 1xx-4xx, `warn` for 5xx.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use crate::response::Response;

/// Runs `fut` inside a request span and logs its outcome.
pub async fn trace<F>(method: &http::Method, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("http_request", method = %method, path = %path);
    let started = Instant::now();

    async move {
        let res = fut.await;
        let status = res.status_code().as_u16();
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        if status >= 500 {
            warn!(status, latency_ms, "request failed");
        } else {
            info!(status, latency_ms, "request completed");
        }
        res
    }
    .instrument(span)
    .await
}
