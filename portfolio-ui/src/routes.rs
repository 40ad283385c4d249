//! HTTP route handlers for the page and the session API.

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post, put};
use portfolio::content::Content;
use portfolio::core::types::{FormField, SectionId};
use portfolio::io::render::{SITE_CSS, SITE_JS};
use serde::{Deserialize, Serialize};

use crate::session::{self, SessionSnapshot};
use crate::state::{AppState, SessionId};

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/content", get(get_content))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(close_session))
        .route("/sessions/{id}/close", post(close_session))
        .route("/sessions/{id}/form", put(set_field))
        .route("/sessions/{id}/submit", post(submit))
        .route("/sessions/{id}/visible", post(visible))
}

/// Routes for the rendered page and its embedded assets.
pub fn page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/site.css", get(site_css))
        .route("/site.js", get(site_js))
}

async fn health() -> &'static str {
    "ok"
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let site = state
        .site
        .read()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Html(site.page.clone()))
}

async fn site_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], SITE_CSS)
}

async fn site_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SITE_JS,
    )
}

/// GET /api/content - returns the content the page was rendered from.
async fn get_content(State(state): State<AppState>) -> Result<Json<Content>, StatusCode> {
    let site = state
        .site
        .read()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(site.content.clone()))
}

/// POST /api/sessions - open a session for one page load.
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSnapshot>), StatusCode> {
    let opened = session::create_session(&state).ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(opened)))
}

/// GET /api/sessions/:id - current status, form values and revealed sections.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionSnapshot>, StatusCode> {
    session::snapshot(&state, id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// DELETE /api/sessions/:id (or POST .../close from `sendBeacon`).
async fn close_session(State(state): State<AppState>, Path(id): Path<SessionId>) -> StatusCode {
    if session::close_session(&state, id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

#[derive(Debug, Deserialize)]
struct FieldUpdate {
    field: FormField,
    value: String,
}

#[derive(Debug, Serialize)]
struct Accepted {
    accepted: bool,
}

/// PUT /api/sessions/:id/form - update one field.
///
/// A body that does not name a known field is a 400.
async fn set_field(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    payload: Result<Json<FieldUpdate>, JsonRejection>,
) -> Result<Json<Accepted>, StatusCode> {
    let Json(update) = payload.map_err(|_| StatusCode::BAD_REQUEST)?;
    let accepted =
        session::set_field(&state, id, update.field, update.value).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(Accepted { accepted }))
}

/// POST /api/sessions/:id/submit - start a submission cycle.
async fn submit(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Accepted>, StatusCode> {
    let accepted = session::submit(&state, id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(Accepted { accepted }))
}

#[derive(Debug, Deserialize)]
struct Visibility {
    section: String,
    ratio: f64,
}

#[derive(Debug, Serialize)]
struct RevealResponse {
    revealed: bool,
}

/// POST /api/sessions/:id/visible - report a section's intersection ratio.
///
/// Malformed bodies and ratios outside `0..=1` are a 400; a section that is
/// not on the page is a 404.
async fn visible(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    payload: Result<Json<Visibility>, JsonRejection>,
) -> Result<Json<RevealResponse>, StatusCode> {
    let Json(visibility) = payload.map_err(|_| StatusCode::BAD_REQUEST)?;
    if !(0.0..=1.0).contains(&visibility.ratio) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let section: SectionId = visibility
        .section
        .parse()
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let revealed =
        session::observe(&state, id, section, visibility.ratio).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(RevealResponse { revealed }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Site;
    use portfolio::core::types::FormState;
    use portfolio::io::init::SitePaths;

    fn test_state() -> AppState {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = SitePaths::new(temp.path());
        let site = Site::load(&paths).expect("load defaults");
        AppState::new(paths, site)
    }

    #[tokio::test]
    async fn index_serves_live_page() {
        let state = test_state();
        let Html(page) = index(State(state)).await.expect("index");
        assert!(page.contains("data-live=\"true\""));
        assert!(page.contains("id=\"contact\""));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let state = test_state();
        let err = get_session(State(state.clone()), Path(42))
            .await
            .expect_err("missing session");
        assert_eq!(err, StatusCode::NOT_FOUND);
        assert_eq!(close_session(State(state), Path(42)).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn field_updates_show_in_snapshot() {
        let state = test_state();
        let (status, Json(opened)) = create_session(State(state.clone()))
            .await
            .expect("create");
        assert_eq!(status, StatusCode::CREATED);

        let update = FieldUpdate {
            field: FormField::Message,
            value: "Hi".to_string(),
        };
        let Json(accepted) = set_field(State(state.clone()), Path(opened.id), Ok(Json(update)))
            .await
            .expect("set field");
        assert!(accepted.accepted);

        let Json(snapshot) = get_session(State(state), Path(opened.id))
            .await
            .expect("snapshot");
        assert_eq!(snapshot.form.message, "Hi");
    }

    #[tokio::test]
    async fn visible_rejects_out_of_range_ratio() {
        let state = test_state();
        let (_, Json(opened)) = create_session(State(state.clone()))
            .await
            .expect("create");
        let err = visible(
            State(state),
            Path(opened.id),
            Ok(Json(Visibility {
                section: "skills".to_string(),
                ratio: 1.5,
            })),
        )
        .await
        .expect_err("bad ratio");
        assert_eq!(err, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_field_is_bad_request() {
        let state = test_state();
        let (_, Json(opened)) = create_session(State(state.clone()))
            .await
            .expect("create");
        let body = Json::<FieldUpdate>::from_bytes(br#"{"field":"phone","value":"555"}"#);
        assert!(body.is_err());

        let err = set_field(State(state.clone()), Path(opened.id), body)
            .await
            .expect_err("unknown field");
        assert_eq!(err, StatusCode::BAD_REQUEST);
        let snapshot = session::snapshot(&state, opened.id).expect("session");
        assert_eq!(snapshot.form, FormState::default());
    }

    #[tokio::test]
    async fn unknown_section_is_not_found() {
        let state = test_state();
        let (_, Json(opened)) = create_session(State(state.clone()))
            .await
            .expect("create");
        let body = Json::<Visibility>::from_bytes(br#"{"section":"footer","ratio":0.5}"#);

        let err = visible(State(state.clone()), Path(opened.id), body)
            .await
            .expect_err("unknown section");
        assert_eq!(err, StatusCode::NOT_FOUND);

        let body = Json::<Visibility>::from_bytes(br#"{"section":"contact","ratio":0.5}"#);
        let Json(response) = visible(State(state), Path(opened.id), body)
            .await
            .expect("known section");
        assert!(response.revealed);
    }

    #[tokio::test]
    async fn malformed_visibility_body_is_bad_request() {
        let state = test_state();
        let (_, Json(opened)) = create_session(State(state.clone()))
            .await
            .expect("create");
        let body = Json::<Visibility>::from_bytes(br#"{"section":"contact"}"#);
        let err = visible(State(state), Path(opened.id), body)
            .await
            .expect_err("missing ratio");
        assert_eq!(err, StatusCode::BAD_REQUEST);
    }
}
