use axum::{routing::get, Router};
use eyre::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub async fn listen(app: Router, bind: String) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

pub fn setup_metrics_recorder() -> PrometheusHandle {
    // Run-time histograms are recorded in milliseconds.
    const BUCKETS: &[f64] = &[
        1.0, 5.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(BUCKETS)
        .unwrap()
        .install_recorder()
        .unwrap()
}

// The recorder handle is optional so tests can build the router without
// touching the global metrics recorder.
pub fn app(metrics: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/_readiness", get(index))
        .route(
            "/metrics",
            get(move || match metrics {
                Some(ref recorder_handle) => std::future::ready(recorder_handle.render()),
                None => std::future::ready("no metrics recorder installed".to_owned()),
            }),
        )
}

pub async fn index() -> &'static str {
    "cellref janitor"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt; // for `collect`
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn index_identifies_the_service() {
        let app = app(None);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"cellref janitor");
    }

    #[tokio::test]
    async fn readiness_responds_ok() {
        let app = app(None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_readiness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_route_works_without_a_recorder() {
        let app = app(None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
