//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Local, NaiveDateTime};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::backend::TransitBackend;
use crate::pipeline::{PipelineError, TripPipeline, TripRequest};
use crate::selection::WidgetSize;
use crate::widget::{
    ConfigError, ConfigSource, ConfigStore, LoadedConfig, StoredWidget, WidgetConfig, WidgetId,
    lines,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lines", get(list_lines))
        .route("/api/widgets", get(list_widgets))
        .route(
            "/api/widgets/:id/config",
            get(get_config)
                .put(put_config)
                .post(create_config)
                .delete(delete_config),
        )
        .route("/api/widgets/:id/schedule", get(get_schedule))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_lines() -> Json<&'static [lines::Line]> {
    Json(lines::catalogue())
}

async fn list_widgets(State(state): State<AppState>) -> Result<Json<Vec<StoredWidget>>, AppError> {
    let widgets = with_store(&state.store, |store| store.list()).await?;
    Ok(Json(widgets))
}

async fn get_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WidgetConfigResponse>, AppError> {
    let id = WidgetId::parse(&id).map_err(ConfigError::from)?;
    let loaded = load(&state.store, &id).await?;
    Ok(Json(WidgetConfigResponse::new(id, loaded)))
}

/// Replace a widget's configuration.
///
/// The body is validated here rather than by the extractor so that a bad
/// color or travel mode is reported as a JSON 400 like every other error.
async fn put_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<WidgetConfigResponse>, AppError> {
    let id = WidgetId::parse(&id).map_err(ConfigError::from)?;
    let config: WidgetConfig =
        serde_json::from_value(body).map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })?;

    let saved = config.clone();
    let target = id.clone();
    with_store(&state.store, move |store| store.save(&target, &saved)).await?;

    Ok(Json(WidgetConfigResponse::new(
        id,
        LoadedConfig {
            config,
            source: ConfigSource::Widget,
        },
    )))
}

async fn create_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CreateConfigQuery>,
) -> Result<(StatusCode, Json<WidgetConfigResponse>), AppError> {
    let id = WidgetId::parse(&id).map_err(ConfigError::from)?;
    let target = id.clone();
    let config =
        with_store(&state.store, move |store| store.create(&target, query.overwrite)).await?;

    Ok((
        StatusCode::CREATED,
        Json(WidgetConfigResponse::new(
            id,
            LoadedConfig {
                config,
                source: ConfigSource::Widget,
            },
        )),
    ))
}

async fn delete_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = WidgetId::parse(&id).map_err(ConfigError::from)?;
    with_store(&state.store, move |store| store.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let id = WidgetId::parse(&id).map_err(ConfigError::from)?;
    let size = match query.size.as_deref() {
        Some(raw) => raw.parse().map_err(|e: crate::selection::InvalidWidgetSize| {
            AppError::BadRequest {
                message: e.to_string(),
            }
        })?,
        None => WidgetSize::default(),
    };

    let loaded = load(&state.store, &id).await?;
    let response =
        build_schedule(&state.backend, id, loaded, size, Local::now().naive_local()).await?;
    Ok(Json(response))
}

/// Configuration files are read and written off the async workers.
async fn with_store<T, F>(store: &Arc<ConfigStore>, op: F) -> Result<T, AppError>
where
    F: FnOnce(&ConfigStore) -> Result<T, ConfigError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    let result = tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("configuration task failed: {e}"),
        })?;
    Ok(result?)
}

async fn load(store: &Arc<ConfigStore>, id: &WidgetId) -> Result<LoadedConfig, AppError> {
    let id = id.clone();
    with_store(store, move |store| store.load(&id)).await
}

/// Run one refresh for a widget with its loaded configuration.
pub async fn build_schedule(
    backend: &TransitBackend,
    id: WidgetId,
    loaded: LoadedConfig,
    size: WidgetSize,
    now: NaiveDateTime,
) -> Result<ScheduleResponse, AppError> {
    let request = TripRequest::new(
        loaded.config.departure.clone(),
        loaded.config.arrival.clone(),
        loaded.config.criteria(size),
    );

    let schedule = TripPipeline::new(backend, backend)
        .run(&request, now)
        .await?;

    Ok(ScheduleResponse::new(id, size, loaded.source, &schedule, now))
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { kind: &'static str, message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    BadGateway { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } => "bad_request",
            AppError::NotFound { kind, .. } => *kind,
            AppError::Conflict { .. } => "already_exists",
            AppError::BadGateway { .. } => "upstream_unavailable",
            AppError::Internal { .. } => "internal",
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::StationNotFound { .. } => AppError::NotFound {
                kind: "station_not_found",
                message: e.to_string(),
            },
            PipelineError::UpstreamUnavailable(_) => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::InvalidId(_) | ConfigError::Invalid { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            ConfigError::NotFound { .. } => AppError::NotFound {
                kind: "config_not_found",
                message: e.to_string(),
            },
            ConfigError::AlreadyExists { .. } => AppError::Conflict {
                message: e.to_string(),
            },
            ConfigError::Io { .. } | ConfigError::Parse { .. } | ConfigError::Encode { .. } => {
                AppError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        if status.is_server_error() {
            error!(%status, kind = self.kind(), "{self}");
        } else {
            warn!(%status, kind = self.kind(), "{self}");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransitApi;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app() -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let backend = TransitBackend::Mock(MockTransitApi::new("data/mock").unwrap());
        let state = AppState::new(backend, ConfigStore::new(dir.path()));
        (create_router(state), dir)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn health_check() {
        let (app, _dir) = app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn lines_catalogue() {
        let (app, _dir) = app();
        let (status, json) = send(&app, "GET", "/api/lines", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn config_lifecycle() {
        let (app, _dir) = app();

        let (status, json) = send(&app, "GET", "/api/widgets/work/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "default");

        let (status, _) = send(&app, "POST", "/api/widgets/work/config", None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(&app, "POST", "/api/widgets/work/config", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["kind"], "already_exists");

        let (status, _) = send(&app, "POST", "/api/widgets/work/config?overwrite=true", None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(
            &app,
            "PUT",
            "/api/widgets/work/config",
            Some(r#"{"arrival": "Markham GO", "showTransfers": false}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["config"]["arrival"], "Markham GO");

        let (status, json) = send(&app, "GET", "/api/widgets", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["id"], "work");
        assert_eq!(json[0]["config"]["showTransfers"], false);

        let (status, _) = send(&app, "DELETE", "/api/widgets/work/config", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, json) = send(&app, "DELETE", "/api/widgets/work/config", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["kind"], "config_not_found");
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request() {
        let (app, _dir) = app();

        let (status, json) = send(&app, "GET", "/api/widgets/bad.id/config", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "bad_request");

        let (status, _) = send(
            &app,
            "PUT",
            "/api/widgets/work/config",
            Some(r#"{"colors": {"title": "black"}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/api/widgets/work/schedule?size=huge", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn schedule_from_mock_data() {
        let (app, _dir) = app();

        let (status, json) = send(&app, "GET", "/api/widgets/work/schedule?size=large", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["size"], "large");
        assert_eq!(json["config_source"], "default");
        assert_eq!(json["outbound"]["status"], "ok");
        assert_eq!(json["outbound"]["upstream_count"], 6);
        assert_eq!(json["outbound"]["direct"].as_array().unwrap().len(), 3);
        assert_eq!(json["outbound"]["transfer"].as_array().unwrap().len(), 1);
        assert_eq!(json["outbound"]["trips"][0]["departure"], "9:10 AM");
    }

    #[tokio::test]
    async fn schedule_with_return_trips() {
        let (app, _dir) = app();
        send(
            &app,
            "PUT",
            "/api/widgets/work/config",
            Some(r#"{"showReturnTrips": true}"#),
        )
        .await;

        let (status, json) = send(&app, "GET", "/api/widgets/work/schedule", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outbound"]["direct"].as_array().unwrap().len(), 2);
        assert_eq!(json["inbound"]["from"]["name"], "Unionville GO");
        assert_eq!(json["inbound"]["direct"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let (app, _dir) = app();
        send(
            &app,
            "PUT",
            "/api/widgets/work/config",
            Some(r#"{"arrival": "Nowhere GO"}"#),
        )
        .await;

        let (status, json) = send(&app, "GET", "/api/widgets/work/schedule", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["kind"], "station_not_found");
    }

    #[tokio::test]
    async fn store_runs_on_blocking_pool() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ConfigStore::new(dir.path()));
        let id = WidgetId::parse("work").unwrap();

        let target = id.clone();
        let created = with_store(&store, move |store| store.create(&target, false))
            .await
            .unwrap();
        assert_eq!(created, WidgetConfig::default());

        let loaded = load(&store, &id).await.unwrap();
        assert_eq!(loaded.source, ConfigSource::Widget);

        let missing = WidgetId::parse("missing").unwrap();
        let err = with_store(&store, move |store| store.delete(&missing))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), "config_not_found");
    }

    #[test]
    fn encode_failure_is_internal() {
        let err = AppError::from(ConfigError::Encode {
            id: WidgetId::parse("work").unwrap(),
            message: "key must be a string".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "failed to encode configuration for widget work: key must be a string"
        );
    }

    #[tokio::test]
    async fn hidden_transfers_keep_medium_widget_full() {
        let (app, _dir) = app();
        send(
            &app,
            "PUT",
            "/api/widgets/work/config",
            Some(r#"{"showTransfers": false}"#),
        )
        .await;

        let (status, json) = send(&app, "GET", "/api/widgets/work/schedule?size=medium", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outbound"]["direct"].as_array().unwrap().len(), 2);
        assert!(json["outbound"]["transfer"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_route_reports_no_trips() {
        let (app, _dir) = app();
        send(
            &app,
            "PUT",
            "/api/widgets/work/config",
            Some(r#"{"arrival": "Oshawa GO"}"#),
        )
        .await;

        let (status, json) = send(&app, "GET", "/api/widgets/work/schedule", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outbound"]["status"], "no_trips");
    }
}
