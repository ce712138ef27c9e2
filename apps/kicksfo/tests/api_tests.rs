//! Integration tests for the KickSFO dashboard and JSON API.
//!
//! Uses axum-test to drive the router without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use kicksfo::api::{
    AppState, AxesResponse, HealthResponse, ProfilesResponse, RadarResponse, ScoresResponse,
    create_router, create_router_for,
};
use kicksfo::config::DashboardConfig;
use kicksfo_core::{DataSource, Score};

const UPLOAD_CSV: &str = "athlete,target,foot,technique,success,style,signature,career\n\
                          최선수,얼굴,앞발,빠른발,1,공격형,빠른발,5년\n\
                          최선수,얼굴,앞발,빠른발,0,공격형,빠른발,5년\n\
                          최선수,얼굴,앞발,빠른발,1,공격형,빠른발,5년\n\
                          정선수,몸통,뒷발,컷트,0,수비형,컷트,7년\n";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server on the sample data with the default config.
fn create_test_server() -> TestServer {
    let state = AppState::new(DashboardConfig::default());
    TestServer::new(create_router(state)).unwrap()
}

fn csv_form(name: &str, body: &str) -> MultipartForm {
    let part = Part::bytes(body.as_bytes().to_vec())
        .file_name(name.to_string())
        .mime_type("text/csv");
    MultipartForm::new().add_part("file", part)
}

// =============================================================================
// HEALTH / AXES
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_router_serves_without_test_server() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let router = create_router(AppState::new(DashboardConfig::default()));
    let response = router
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Preflight from `origin` against a router bound to `addr`; returns the
/// echoed allow-origin header, if any.
async fn preflight(addr: &str, origin: &'static str) -> Option<String> {
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use tower::ServiceExt;

    let router = create_router_for(AppState::new(DashboardConfig::default()), addr);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/health")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn test_cors_follows_bind_address() {
    assert_eq!(
        preflight("127.0.0.1:9000", "http://localhost:9000").await,
        Some("http://localhost:9000".to_string())
    );
    assert_eq!(preflight("127.0.0.1:9000", "http://localhost:8501").await, None);
    assert_eq!(preflight("127.0.0.1:9000", "http://evil.example").await, None);
}

#[tokio::test]
async fn test_axes_endpoint_lists_standard_taxonomy() {
    let server = create_test_server();

    let response = server.get("/api/axes").await;
    response.assert_status_ok();

    let axes: AxesResponse = response.json();
    assert_eq!(axes.count, 10);
    assert_eq!(axes.axes.first().map(String::as_str), Some("얼굴-뒷발-돌려차기"));
    assert_eq!(axes.axes.last().map(String::as_str), Some("몸통-앞발-앞발컷트"));
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[tokio::test]
async fn test_dashboard_renders_sample() {
    let server = create_test_server();

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("태권도 선수 기술 특성 분석 대시보드"));
    assert!(html.contains("샘플 데이터로 시연 중"));
    assert!(html.contains("id=\"profiles\""));
    assert!(html.contains("id=\"scores\""));
    // Every athlete is charted by default
    assert!(html.contains("data-athlete=\"김선수\""));
    assert!(html.contains("data-athlete=\"이선수\""));
    assert!(html.contains("data-athlete=\"박선수\""));
}

#[tokio::test]
async fn test_dashboard_selection_filters_traces() {
    let server = create_test_server();

    let response = server
        .get("/")
        .add_query_param("submitted", "1")
        .add_query_param("athlete", "김선수")
        .await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("data-athlete=\"김선수\""));
    assert!(!html.contains("data-athlete=\"이선수\""));
    assert!(!html.contains("data-athlete=\"박선수\""));
}

#[tokio::test]
async fn test_dashboard_empty_selection_hides_chart() {
    let server = create_test_server();

    let response = server.get("/").add_query_param("submitted", "1").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(!html.contains("id=\"radar\""));
    assert!(!html.contains("id=\"scores\""));
}

#[tokio::test]
async fn test_dashboard_unknown_athlete_is_bad_request() {
    let server = create_test_server();

    let response = server.get("/").add_query_param("athlete", "없는선수").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Unknown athlete"));
}

// =============================================================================
// UPLOAD / RESET
// =============================================================================

#[tokio::test]
async fn test_upload_replaces_data() {
    let server = create_test_server();

    let response = server
        .post("/upload")
        .multipart(csv_form("match.csv", UPLOAD_CSV))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let scores: ScoresResponse = server.get("/api/scores").await.json();
    assert!(scores.success);
    assert_eq!(
        scores.source,
        Some(DataSource::Upload {
            name: "match.csv".to_string()
        })
    );
    assert_eq!(scores.scores.len(), 2);
    assert_eq!(
        scores.scores["최선수"]["얼굴-앞발-빠른발"],
        Score::from_tenths(667)
    );
    assert_eq!(scores.scores["정선수"]["몸통-뒷발-컷트"], Score::ZERO);
    assert!(!scores.scores.contains_key("김선수"));

    let html = server.get("/").await.text();
    assert!(html.contains("데이터 미리보기"));
    assert!(html.contains("match.csv"));
    assert!(!html.contains("샘플 데이터로 시연 중"));
}

#[tokio::test]
async fn test_bad_upload_keeps_previous_data() {
    let server = create_test_server();

    let bad = "athlete,target,foot,technique,success,style,signature,career\n\
               최선수,얼굴,앞발,빠른발,yes,공격형,빠른발,5년\n";
    let response = server
        .post("/upload")
        .multipart(csv_form("bad.csv", bad))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("업로드 실패"));

    let scores: ScoresResponse = server.get("/api/scores").await.json();
    assert_eq!(scores.source, Some(DataSource::Sample));
    assert!(scores.scores.contains_key("김선수"));
}

#[tokio::test]
async fn test_upload_missing_column_is_bad_request() {
    let server = create_test_server();

    let bad = "athlete,target,foot,technique,style,signature,career\n\
               최선수,얼굴,앞발,빠른발,공격형,빠른발,5년\n";
    let response = server
        .post("/upload")
        .multipart(csv_form("bad.csv", bad))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Missing required column: success"));
}

#[tokio::test]
async fn test_reset_returns_to_sample() {
    let server = create_test_server();

    server
        .post("/upload")
        .multipart(csv_form("match.csv", UPLOAD_CSV))
        .await
        .assert_status(StatusCode::SEE_OTHER);

    server.post("/reset").await.assert_status(StatusCode::SEE_OTHER);

    let scores: ScoresResponse = server.get("/api/scores").await.json();
    assert_eq!(scores.source, Some(DataSource::Sample));
    assert_eq!(scores.scores.len(), 3);
}

#[tokio::test]
async fn test_unrecognized_axes_are_reported() {
    let server = create_test_server();

    let csv = "athlete,target,foot,technique,success,style,signature,career\n\
               최선수,다리,앞발,빠른발,1,공격형,빠른발,5년\n";
    server
        .post("/upload")
        .multipart(csv_form("odd.csv", csv))
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let scores: ScoresResponse = server.get("/api/scores").await.json();
    assert_eq!(scores.unrecognized_axes, vec!["다리-앞발-빠른발".to_string()]);

    let html = server.get("/").await.text();
    assert!(html.contains("분류에 없는 기술 조합"));
}

// =============================================================================
// CHART / RADAR
// =============================================================================

#[tokio::test]
async fn test_chart_svg_content_type() {
    let server = create_test_server();

    let response = server.get("/chart.svg").await;
    response.assert_status_ok();

    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("image/svg+xml"));
    assert!(response.text().starts_with("<svg"));
}

#[tokio::test]
async fn test_radar_endpoint_traces_are_closed() {
    let server = create_test_server();

    let response = server
        .get("/api/radar")
        .add_query_param("athlete", "이선수")
        .await;
    response.assert_status_ok();

    let radar: RadarResponse = response.json();
    assert!(radar.success);
    let chart = radar.chart.unwrap();
    assert_eq!(chart.traces.len(), 1);

    let trace = &chart.traces[0];
    assert_eq!(trace.name, "이선수");
    assert_eq!(trace.r.len(), 11);
    assert_eq!(trace.theta.len(), 11);
    assert_eq!(trace.r.first(), trace.r.last());
    assert_eq!(trace.theta.first(), trace.theta.last());
}

#[tokio::test]
async fn test_radar_endpoint_repeated_athlete_is_one_trace() {
    let server = create_test_server();

    let response = server
        .get("/api/radar")
        .add_query_param("athlete", "김선수")
        .add_query_param("athlete", "김선수")
        .await;
    response.assert_status_ok();

    let radar: RadarResponse = response.json();
    let chart = radar.chart.unwrap();
    assert_eq!(chart.traces.len(), 1);
    assert_eq!(chart.traces[0].name, "김선수");
}

#[tokio::test]
async fn test_radar_endpoint_unknown_athlete() {
    let server = create_test_server();

    let response = server
        .get("/api/radar")
        .add_query_param("athlete", "없는선수")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let radar: RadarResponse = response.json();
    assert!(!radar.success);
    assert!(radar.chart.is_none());
    assert!(radar.error.unwrap().contains("없는선수"));
}

// =============================================================================
// PROFILES / STATELESS SCORING
// =============================================================================

#[tokio::test]
async fn test_profiles_endpoint_deduplicates() {
    let server = create_test_server();

    let profiles: ProfilesResponse = server.get("/api/profiles").await.json();
    let names: Vec<&str> = profiles
        .profiles
        .iter()
        .map(|p| p.athlete.as_str())
        .collect();
    assert_eq!(names, vec!["김선수", "이선수", "박선수"]);
}

#[tokio::test]
async fn test_score_endpoint_is_stateless() {
    let server = create_test_server();

    let response = server.post("/api/score").text(UPLOAD_CSV).await;
    response.assert_status_ok();

    let scored: ScoresResponse = response.json();
    assert!(scored.success);
    assert_eq!(
        scored.scores["최선수"]["얼굴-앞발-빠른발"],
        Score::from_tenths(667)
    );

    // Loaded data is untouched
    let scores: ScoresResponse = server.get("/api/scores").await.json();
    assert_eq!(scores.source, Some(DataSource::Sample));
}

#[tokio::test]
async fn test_score_endpoint_rejects_bad_csv() {
    let server = create_test_server();

    let response = server
        .post("/api/score")
        .text("athlete,target\n김선수,얼굴\n")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let scored: ScoresResponse = response.json();
    assert!(!scored.success);
    assert!(scored.error.is_some());
}
