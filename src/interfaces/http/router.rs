//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::TollFeeService;
use crate::interfaces::http::common::ApiResponse;

use super::modules::{health, metrics, request_id, tolls};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        tolls::get_fee,
        tolls::record_passage,
        tolls::get_daily_fee,
        tolls::get_tariff,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            tolls::FeeResponse,
            tolls::RecordPassageRequest,
            tolls::ClusterDto,
            tolls::FeeBreakdownResponse,
            tolls::FareDto,
            tolls::TariffResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Tolls", description = "Passage registration, daily fees and the loaded tariff"),
    ),
    info(
        title = "Toll Fee Service API",
        version = "1.0.0",
        description = "Congestion tax calculation for vehicles passing toll stations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(service: Arc<TollFeeService>, prometheus: PrometheusHandle) -> Router {
    let health_state = health::HealthState {
        service: service.clone(),
        started_at: Arc::new(Instant::now()),
    };
    let toll_state = tolls::TollState { service };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let toll_routes = Router::new()
        .route(
            "/get-fee/{vehicle_type}/{registration}/{date}",
            get(tolls::get_fee),
        )
        .with_state(toll_state.clone());

    let api_routes = Router::new()
        .route("/passages", post(tolls::record_passage))
        .route(
            "/vehicles/{registration}/fees/{date}",
            get(tolls::get_daily_fee),
        )
        .route("/tariff", get(tolls::get_tariff))
        .with_state(toll_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState { handle: prometheus });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/toll", toll_routes)
        .nest("/api/v1", api_routes)
        // Route layer so the matched path template is known
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use tower::Service;

    use crate::config::AppConfig;
    use crate::domain::TollCalculator;
    use crate::infrastructure::InMemoryPassageRepository;

    fn app() -> Router {
        let policy = AppConfig::default().toll.to_policy().unwrap();
        let service = Arc::new(TollFeeService::new(
            Arc::new(InMemoryPassageRepository::new()),
            TollCalculator::new(policy),
        ));
        let prometheus = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(service, prometheus)
    }

    async fn send_raw(app: &mut Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send_raw(app, request).await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    /// Station endpoint: raw response body
    async fn get_fee(
        app: &mut Router,
        vehicle: &str,
        registration: &str,
        time: &str,
    ) -> (StatusCode, String) {
        let request = Request::get(fee_uri(vehicle, registration, time))
            .body(Body::empty())
            .unwrap();
        send_raw(app, request).await
    }

    async fn get(app: &mut Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_json(app: &mut Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    fn fee_uri(vehicle: &str, registration: &str, time: &str) -> String {
        format!(
            "/toll/get-fee/{}/{}/{}",
            vehicle,
            registration,
            time.replace(' ', "%20")
        )
    }

    #[tokio::test]
    async fn passage_outside_tariff_hours_is_free() {
        let mut app = app();
        let (status, body) = get_fee(&mut app, "Car", "ULJ985", "2022-01-11 05:01:01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "0");
    }

    #[tokio::test]
    async fn rush_hour_passage_costs_22() {
        let mut app = app();
        let (status, body) = get_fee(&mut app, "Car", "ULJ986", "2022-01-11 07:59:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "22");
    }

    #[tokio::test]
    async fn passages_within_an_hour_are_charged_once() {
        let mut app = app();
        let steps = [
            ("2022-01-11 07:59:00", "22"),
            ("2022-01-11 08:25:00", "22"),
            ("2022-01-11 08:50:00", "22"),
            ("2022-01-11 17:59:00", "38"),
            ("2022-01-11 18:25:00", "38"),
            ("2022-01-11 19:50:00", "38"),
        ];
        for (time, expected) in steps {
            let (status, body) = get_fee(&mut app, "Car", "ULJ988", time).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, expected, "after passage at {time}");
        }
    }

    #[tokio::test]
    async fn changing_vehicle_type_is_a_bad_request() {
        let mut app = app();
        get_fee(&mut app, "Car", "ULJ989", "2022-01-11 07:59:00").await;

        let (status, body) = get_fee(&mut app, "Tractor", "ULJ989", "2022-01-11 08:25:00").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Vehicle type doesn't match a previous passage");
    }

    #[tokio::test]
    async fn holiday_is_toll_free() {
        let mut app = app();
        let (status, body) = get_fee(&mut app, "Car", "ULJ990", "2022-06-06 07:59:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "0");
    }

    #[tokio::test]
    async fn exempt_vehicle_pays_nothing() {
        let mut app = app();
        let (_, body) = get_fee(&mut app, "Military", "ULJ991", "2022-01-11 07:59:00").await;
        assert_eq!(body, "0");
    }

    #[tokio::test]
    async fn malformed_registration_is_rejected() {
        let mut app = app();
        let (status, body) = get_fee(&mut app, "Car", "U", "2022-01-11 07:59:00").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Wrong registration number format");

        let (status, body) = get_fee(&mut app, "Car", "ABCDEFGHIJKLM", "2022-01-11 07:59:00").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Wrong registration number format");
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let mut app = app();
        let (status, body) = get_fee(&mut app, "Car", "ULJ992", "2022-01-11T07:59:00").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Wrong date format");
    }

    #[tokio::test]
    async fn unknown_vehicle_type_is_rejected() {
        let mut app = app();
        let (status, body) = get_fee(&mut app, "Spaceship", "ULJ993", "2022-01-11 07:59:00").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Unknown vehicle type: Spaceship");
    }

    #[tokio::test]
    async fn json_routes_keep_the_envelope() {
        let mut app = app();
        let (status, body) = post_json(
            &mut app,
            "/api/v1/passages",
            serde_json::json!({
                "vehicle_type": "Tractor",
                "registration": "ENV001",
                "passed_at": "2022-01-11 06:15:00"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["fee"], 0);

        let (status, body) = post_json(
            &mut app,
            "/api/v1/passages",
            serde_json::json!({
                "vehicle_type": "Car",
                "registration": "ENV001",
                "passed_at": "2022-01-11 06:45:00"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Vehicle type doesn't match a previous passage");
    }

    #[tokio::test]
    async fn json_passage_is_recorded() {
        let mut app = app();
        let (status, body) = post_json(
            &mut app,
            "/api/v1/passages",
            serde_json::json!({
                "vehicle_type": "Car",
                "registration": "ABC123",
                "passed_at": "2022-01-11 06:15:00"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["fee"], 9);
    }

    #[tokio::test]
    async fn json_passage_validates_registration() {
        let mut app = app();
        let (status, body) = post_json(
            &mut app,
            "/api/v1/passages",
            serde_json::json!({
                "vehicle_type": "Car",
                "registration": "A",
                "passed_at": "2022-01-11 06:15:00"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "registration: Wrong registration number format");
    }

    #[tokio::test]
    async fn daily_breakdown_lists_clusters() {
        let mut app = app();
        for time in ["2022-01-11 06:10:00", "2022-01-11 06:40:00", "2022-01-11 15:45:00"] {
            get_fee(&mut app, "Car", "XYZ789", time).await;
        }

        let (status, body) = get(&mut app, "/api/v1/vehicles/XYZ789/fees/2022-01-11").await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["clusters"].as_array().unwrap().len(), 2);
        assert_eq!(data["clusters"][0]["price"], 16);
        assert_eq!(data["clusters"][1]["price"], 22);
        assert_eq!(data["total"], 38);
        assert_eq!(data["capped"], false);
        assert!(data["exemption"].is_null());
    }

    #[tokio::test]
    async fn daily_breakdown_of_unknown_vehicle_is_empty() {
        let mut app = app();
        let (status, body) = get(&mut app, "/api/v1/vehicles/NOPE12/fees/2022-01-11").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 0);
        assert_eq!(body["data"]["clusters"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn tariff_reflects_configuration() {
        let mut app = app();
        let (status, body) = get(&mut app, "/api/v1/tariff").await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["daily_cap"], 60);
        assert_eq!(data["fares"].as_array().unwrap().len(), 11);
        assert_eq!(data["fares"][3]["starts_at"], "07:00");
        assert_eq!(data["fares"][3]["price"], 22);
        assert_eq!(data["exempt_months"][0], "July");
    }

    #[tokio::test]
    async fn health_reports_tracked_vehicles() {
        let mut app = app();
        get_fee(&mut app, "Car", "HLT001", "2022-01-11 07:59:00").await;

        let (status, body) = get(&mut app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["tracked_registrations"], 1);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let mut app = app();
        let request = Request::get("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = app.call(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn metrics_are_rendered_as_prometheus_text() {
        let mut app = app();
        let request = Request::get("/metrics").body(Body::empty()).unwrap();
        let response = app.call(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}
