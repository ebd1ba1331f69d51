use crate::binder::FieldMapping;
use crate::catalog::{Catalog, Dataset};
use crate::config::Config;
use crate::error::ViewerError;
use crate::source::FileSource;
use crate::view::{feature_counts, render, ViewState};
use crate::web::templates::base::base_template;
use crate::web::templates::components::{
    error_section, footer_section, header_section, map_section, sidebar_section,
};
use crate::web::templates::styles::get_styles;
use anyhow::Context;
use axum::{
    self,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use maud::{html, Markup, PreEscaped};
use std::net::SocketAddr;
use std::sync::Arc;

pub struct AppState {
    pub catalog: Catalog,
    pub fields: FieldMapping,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: Catalog::new(
                FileSource::new(&config.parks_path),
                FileSource::new(&config.trails_path),
            ),
            fields: config.fields.clone(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/render", get(render_spec))
        .with_state(state)
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(&config));

    // Failed loads are not cached, so a broken file is retried on the first request.
    if let Err(e) = load_datasets(&state).await {
        tracing::warn!("Could not preload map data: {e}");
    }

    let app = router(state);

    let address = SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Listening on {address}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn landing(
    State(state): State<Arc<AppState>>,
    Query(view): Query<ViewState>,
) -> (StatusCode, Markup) {
    match build_page(&state, &view).await {
        Ok(content) => (StatusCode::OK, base_template(&content)),
        Err(e) => {
            tracing::error!("Could not render map: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                base_template(&error_page(&view, &e.to_string())),
            )
        }
    }
}

async fn render_spec(
    State(state): State<Arc<AppState>>,
    Query(view): Query<ViewState>,
) -> Response {
    match load_datasets(&state).await {
        Ok((parks, trails)) => Json(render(&parks, &trails, &view, &state.fields)).into_response(),
        Err(e) => {
            tracing::error!("Could not render map: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Loading reads files and repairs geometries, so it runs off the async workers.
async fn load_datasets(state: &Arc<AppState>) -> Result<(Arc<Dataset>, Arc<Dataset>), PageError> {
    let state = Arc::clone(state);
    let datasets = tokio::task::spawn_blocking(move || state.catalog.datasets()).await??;
    Ok(datasets)
}

async fn build_page(state: &Arc<AppState>, view: &ViewState) -> Result<Markup, PageError> {
    let (parks, trails) = load_datasets(state).await?;
    let spec = render(&parks, &trails, view, &state.fields);
    let spec_json = serde_json::to_string(&spec)?;
    let counts = feature_counts(&parks, &trails);

    Ok(html! {
        div.center {
            (header_section())
            div.layout {
                (sidebar_section(view, Some(&counts)))
                (map_section())
            }
            (footer_section())
        }
        (get_styles())
        (map_javascript(&spec_json))
    })
}

fn error_page(view: &ViewState, message: &str) -> Markup {
    html! {
        div.center {
            (header_section())
            div.layout {
                (sidebar_section(view, None))
                (error_section(message))
            }
        }
        (get_styles())
    }
}

#[derive(Debug, thiserror::Error)]
enum PageError {
    #[error(transparent)]
    Viewer(#[from] ViewerError),
    #[error("Could not encode map data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Map data loader stopped unexpectedly: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn map_javascript(spec_json: &str) -> Markup {
    // Popup markup may contain "</", which would end the script element early.
    let spec_json = spec_json.replace("</", "<\\/");
    html! {
        script {
            (PreEscaped(format!("let renderSpec = {spec_json};")))
            (PreEscaped(include_str!("js/map-init.js")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn write_collection(path: &Path, features: serde_json::Value) {
        std::fs::write(
            path,
            json!({"type": "FeatureCollection", "features": features}).to_string(),
        )
        .unwrap();
    }

    fn state_for(dir: &Path) -> Arc<AppState> {
        let config = Config {
            port: 0,
            parks_path: dir.join("parks.geojson"),
            trails_path: dir.join("trails.geojson"),
            fields: FieldMapping::default(),
        };
        Arc::new(AppState::new(&config))
    }

    fn write_trails(dir: &Path) {
        write_collection(
            &dir.join("trails.geojson"),
            json!([{
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[-85.31, 35.05], [-85.30, 35.06]]},
                "properties": {"TRAIL_NAME": "Riverwalk", "LENGTH": 5.2}
            }]),
        );
    }

    #[tokio::test]
    async fn test_landing_renders_map() {
        let dir = tempfile::tempdir().unwrap();
        write_trails(dir.path());
        write_collection(
            &dir.path().join("parks.geojson"),
            json!([
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-85.3076, 35.0611]},
                    "properties": {"NAME": "Coolidge Park", "DESCRIPTION": "</script><b>lawn</b>"}
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"NAME": "Nowhere"}
                }
            ]),
        );

        let (status, page) = landing(
            State(state_for(dir.path())),
            Query(ViewState::default()),
        )
        .await;
        let page = page.into_string();

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Parks: 1 | Trails: 1"));
        assert!(page.contains("let renderSpec = "));
        assert!(page.contains("Riverwalk"));
        assert_eq!(page.matches("</script>").count(), page.matches("<script").count());
    }

    #[tokio::test]
    async fn test_all_invalid_parks_halts_rendering() {
        let dir = tempfile::tempdir().unwrap();
        write_trails(dir.path());
        write_collection(
            &dir.path().join("parks.geojson"),
            json!([{
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": []},
                "properties": {"NAME": "Empty Park"}
            }]),
        );

        let (status, page) = landing(
            State(state_for(dir.path())),
            Query(ViewState::default()),
        )
        .await;
        let page = page.into_string();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.contains("No parks with usable geometries"));
        assert!(!page.contains("renderSpec"));
    }

    #[tokio::test]
    async fn test_missing_file_is_shown_to_user() {
        let dir = tempfile::tempdir().unwrap();
        write_trails(dir.path());

        let (status, page) = landing(
            State(state_for(dir.path())),
            Query(ViewState::default()),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.into_string().contains("Error loading GeoJSON data"));
    }

    #[tokio::test]
    async fn test_datasets_load_once_across_requests() {
        let dir = tempfile::tempdir().unwrap();
        write_trails(dir.path());
        write_collection(
            &dir.path().join("parks.geojson"),
            json!([{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-85.3076, 35.0611]},
                "properties": {"NAME": "Coolidge Park"}
            }]),
        );
        let state = state_for(dir.path());

        let (first, _) = load_datasets(&state).await.unwrap();
        std::fs::remove_file(dir.path().join("parks.geojson")).unwrap();
        let (second, _) = load_datasets(&state).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_one_bad_geometry_does_not_hide_layer() {
        let dir = tempfile::tempdir().unwrap();
        write_trails(dir.path());
        write_collection(
            &dir.path().join("parks.geojson"),
            json!([
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-85.3076, 35.0611]},
                    "properties": {"NAME": "Coolidge Park"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": []},
                    "properties": {"NAME": "Unsurveyed"}
                },
                {"type": "Feature", "properties": {"NAME": "Proposed"}}
            ]),
        );

        let (status, page) = landing(
            State(state_for(dir.path())),
            Query(ViewState::default()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.into_string().contains("Parks: 1 | Trails: 1"));
    }

    #[tokio::test]
    async fn test_render_endpoint_respects_toggles() {
        let dir = tempfile::tempdir().unwrap();
        write_trails(dir.path());
        write_collection(
            &dir.path().join("parks.geojson"),
            json!([{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-85.3076, 35.0611]},
                "properties": {"NAME": "Coolidge Park"}
            }]),
        );
        let view = ViewState::default().after(ViewState::toggle_parks);

        let response = render_spec(State(state_for(dir.path())), Query(view)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let spec: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let layers = spec["layers"].as_array().unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0]["kind"], "trail");
        assert_eq!(spec["basemap"]["name"], "OpenStreetMap");
    }
}
