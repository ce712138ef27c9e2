//! # Endpoint Handlers
//!
//! Page, upload and JSON handlers. Every request recomputes what it shows
//! from the current analysis; nothing rendered is cached.

use super::{
    AppState,
    types::{
        AxesResponse, HealthResponse, ProfilesResponse, RadarResponse, ScoresResponse, Selection,
    },
};
use crate::render::{self, DashboardView, Notice};
use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use kicksfo_core::{Analysis, KickError};

/// Map a core error onto an HTTP status.
fn status_for(err: &KickError) -> StatusCode {
    if err.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn log_loaded(analysis: &Analysis) {
    tracing::info!(
        "Loaded {} events for {} athletes ({:?})",
        analysis.events().len(),
        analysis.scores().len(),
        analysis.source()
    );
    if !analysis.unrecognized().is_empty() {
        let axes: Vec<&str> = analysis.unrecognized().iter().map(|a| a.as_str()).collect();
        tracing::warn!(
            "{} axes are outside the taxonomy and will not be charted: {}",
            axes.len(),
            axes.join(", ")
        );
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// DASHBOARD
// =============================================================================

fn render_dashboard(
    state: &AppState,
    analysis: &Analysis,
    selected: &[String],
    notices: Vec<Notice>,
    status: StatusCode,
) -> Response {
    let view = DashboardView {
        config: &state.config,
        analysis,
        selected,
        notices,
    };
    match render::dashboard(&view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::warn!("Dashboard render failed: {}", e);
            (
                status_for(&e),
                Html(render::error_page(&state.config, &e)),
            )
                .into_response()
        }
    }
}

/// Render the dashboard for the athletes in the query string.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let analysis = state.analysis.read().await;
    let selected = Selection::from_pairs(&pairs).resolve(&analysis);
    render_dashboard(&state, &analysis, &selected, Vec::new(), StatusCode::OK)
}

// =============================================================================
// UPLOAD / RESET
// =============================================================================

/// Pull the `file` field out of a multipart form.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), KickError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| KickError::Csv(format!("Malformed upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("upload.csv").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| KickError::Csv(format!("Malformed upload: {}", e)))?;
            return Ok((name, bytes));
        }
    }
    Err(KickError::Csv("Upload has no 'file' field".to_string()))
}

/// Replace the loaded data with an uploaded CSV.
///
/// On failure the previous data stays loaded and the dashboard is shown
/// with the error.
pub async fn upload_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let result = match read_upload(multipart).await {
        Ok((name, bytes)) => Analysis::from_csv(name, &bytes, state.taxonomy()),
        Err(e) => Err(e),
    };

    match result {
        Ok(analysis) => {
            log_loaded(&analysis);
            *state.analysis.write().await = analysis;
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Upload rejected: {}", e);
            let analysis = state.analysis.read().await;
            let selected = analysis.athletes();
            render_dashboard(
                &state,
                &analysis,
                &selected,
                vec![Notice::Error(format!("업로드 실패: {}", e))],
                status_for(&e),
            )
        }
    }
}

/// Go back to the bundled sample data.
pub async fn reset_handler(State(state): State<AppState>) -> Redirect {
    let analysis = Analysis::sample(state.taxonomy());
    log_loaded(&analysis);
    *state.analysis.write().await = analysis;
    Redirect::to("/")
}

// =============================================================================
// CHART
// =============================================================================

/// The radar chart alone, as SVG.
pub async fn chart_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let analysis = state.analysis.read().await;
    let selected = Selection::from_pairs(&pairs).resolve(&analysis);
    match analysis.radar(state.taxonomy(), &selected) {
        Ok(chart) => {
            let chart = chart.with_title(state.config.chart_title.clone());
            (
                [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
                render::radar_svg(&chart),
            )
                .into_response()
        }
        Err(e) => (status_for(&e), e.to_string()).into_response(),
    }
}

// =============================================================================
// JSON API
// =============================================================================

/// Taxonomy axes in chart order.
pub async fn axes_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(AxesResponse::from_taxonomy(state.taxonomy()))
}

/// Score table of the loaded data.
pub async fn scores_handler(State(state): State<AppState>) -> impl IntoResponse {
    let analysis = state.analysis.read().await;
    Json(ScoresResponse::from_analysis(&analysis))
}

/// Deduplicated athlete profiles of the loaded data.
pub async fn profiles_handler(State(state): State<AppState>) -> impl IntoResponse {
    let analysis = state.analysis.read().await;
    Json(ProfilesResponse {
        profiles: analysis.profiles(),
    })
}

/// Radar traces for the selection (everyone by default).
pub async fn radar_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let analysis = state.analysis.read().await;
    let selected = Selection::from_pairs(&pairs).resolve(&analysis);
    match analysis.radar(state.taxonomy(), &selected) {
        Ok(chart) => (
            StatusCode::OK,
            Json(RadarResponse::success(
                chart.with_title(state.config.chart_title.clone()),
            )),
        ),
        Err(e) => (status_for(&e), Json(RadarResponse::error(e.to_string()))),
    }
}

/// Score a CSV request body without replacing the loaded data.
pub async fn score_csv_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    match Analysis::from_csv("request body", &body, state.taxonomy()) {
        Ok(analysis) => (StatusCode::OK, Json(ScoresResponse::from_analysis(&analysis))),
        Err(e) => (status_for(&e), Json(ScoresResponse::error(e.to_string()))),
    }
}
