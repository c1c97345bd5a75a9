use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::fpl_fetch::{fetch_bootstrap, fetch_fixtures};
use crate::history_fetch::fetch_history;
use crate::report::{CompareEntry, build_compare_report};

/// Terminal error kinds at the HTTP boundary. Everything below this layer
/// propagates plain `anyhow` results.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn build_router(config: Config) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/compare", get(compare))
        .layer(axum::middleware::map_response(disable_caching))
        .with_state(config)
}

// Reports are built from fresh upstream data on every request; make sure
// no intermediary serves a stale copy.
async fn disable_caching(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    response
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "FPL compare API is running",
    }))
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    players: Option<String>,
}

async fn compare(
    State(config): State<Config>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Vec<CompareEntry>>, ApiError> {
    let query = params.players.filter(|q| !q.is_empty()).ok_or_else(|| {
        ApiError::BadRequest("Missing 'players' parameter".to_string())
    })?;
    let names = parse_player_names(&query);

    // The whole pipeline is blocking (sequential upstream fetches, then
    // pure computation), so it runs off the async worker threads.
    let entries = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<CompareEntry>> {
        let bootstrap = fetch_bootstrap(&config.fpl_base_url)?;
        let fixtures = fetch_fixtures(&config.fpl_base_url)?;
        let history = fetch_history(&config.history_base_url, &config.history_seasons);
        Ok(build_compare_report(&names, &bootstrap, &fixtures, &history))
    })
    .await
    .map_err(|err| ApiError::Upstream(anyhow::anyhow!("compare worker failed: {err}")))?
    .map_err(ApiError::Upstream)?;

    Ok(Json(entries))
}

fn parse_player_names(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(|name| name.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_player_names;

    #[test]
    fn names_are_split_and_trimmed() {
        assert_eq!(
            parse_player_names(" Salah , Haaland,Saka"),
            vec!["Salah", "Haaland", "Saka"]
        );
    }

    #[test]
    fn empty_segments_are_kept_as_requested_names() {
        // An empty segment still produces a per-name error entry, matching
        // the one-entry-per-requested-name contract.
        assert_eq!(parse_player_names("Salah,,"), vec!["Salah", "", ""]);
    }
}
