//! Logging and metrics wiring.
//!
//! Tracing goes to stderr with an `RUST_LOG`-style filter. Request metrics
//! are recorded through the `metrics` facade and exposed by the Prometheus
//! recorder installed at startup; `GET /metrics` renders its handle.

use std::future::{Ready, ready};
use std::time::Instant;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_server=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Per-request counter and latency histogram, labeled by method, status and
/// the matched route pattern (not the raw path, to keep cardinality bounded).
pub struct RequestMetrics;

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestMetricsMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetricsMiddleware { service }))
    }
}

pub struct RequestMetricsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestMetricsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let handler = res
                .request()
                .match_pattern()
                .unwrap_or_else(|| res.request().path().to_string());
            let status = res.status().as_u16().to_string();
            counter!(
                "http_requests_total",
                "method" => method.clone(),
                "status" => status,
                "handler" => handler.clone()
            )
            .increment(1);
            histogram!(
                "http_request_duration_seconds",
                "method" => method,
                "handler" => handler
            )
            .record(started.elapsed().as_secs_f64());
            Ok(res)
        })
    }
}
