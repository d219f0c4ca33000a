use crate::api::api_error::{APIError, ErrorMsg};
use crate::api::server::AppState;
use crate::error::Error;
use crate::resource::{ListOptions, Resource};
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::net::SocketAddr;
use std::str::FromStr;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use trust_dns_client::rr::{LowerName, Name};

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route(
            "/records",
            get(list_records).post(create_record).put(replace_records),
        )
        .route(
            "/records/:domain",
            get(get_record).put(update_record).delete(delete_record),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

/// Check the shared-secret header before anything else runs, the not-found
/// fallback included. The rejection is uniform on purpose: no hint about
/// which part of the check failed.
async fn require_token<B>(
    State(state): State<AppState>,
    req: Request<B>,
    next: Next<B>,
) -> Result<Response, APIError> {
    let authorized = req
        .headers()
        .get(state.config.auth_header.as_str())
        .and_then(|value| value.to_str().ok())
        .map_or(false, |token| token == state.config.api_token);
    if !authorized {
        return Err(Error::Unauthorized.into());
    }
    Ok(next.run(req).await)
}

/// One log line per request: remote address, status, method, path, and the
/// error string for failed responses.
async fn log_request<B>(
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    req: Request<B>,
    next: Next<B>,
) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    let status = response.status().as_u16();
    match response.extensions().get::<ErrorMsg>() {
        Some(ErrorMsg(error)) => tracing::debug!("{client_addr} {status} {method} {uri} {error}"),
        None => tracing::debug!("{client_addr} {status} {method} {uri}"),
    }
    response
}

async fn create_record(
    State(state): State<AppState>,
    WithRejection(Json(resource), _): WithRejection<Json<Resource>, APIError>,
) -> Result<(StatusCode, Json<Resource>), APIError> {
    resource.validate()?;
    state
        .record_store
        .write()
        .await
        .put(resource.clone())
        .await?;
    tracing::info!("created resource for \"{}\"", resource.domain);
    Ok((StatusCode::CREATED, Json(resource)))
}

async fn list_records(
    State(state): State<AppState>,
    WithRejection(Query(options), _): WithRejection<Query<ListOptions>, APIError>,
) -> Json<Vec<Resource>> {
    let resources = state.record_store.read().await.list().await;
    if options.full {
        Json(resources)
    } else {
        Json(resources.iter().map(Resource::summary).collect())
    }
}

async fn replace_records(
    State(state): State<AppState>,
    WithRejection(Json(resources), _): WithRejection<Json<Vec<Resource>>, APIError>,
) -> Result<Json<Vec<Resource>>, APIError> {
    for resource in &resources {
        resource.validate()?;
    }
    state
        .record_store
        .write()
        .await
        .replace_all(resources.clone())
        .await?;
    tracing::info!("replaced all records ({} resources)", resources.len());
    Ok(Json(resources))
}

async fn get_record(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<Resource>, APIError> {
    let domain = parse_domain(&domain)?;
    let resource = state.record_store.read().await.get(&domain).await?;
    Ok(Json(resource))
}

async fn update_record(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    WithRejection(Json(mut resource), _): WithRejection<Json<Resource>, APIError>,
) -> Result<Json<Resource>, APIError> {
    // The path names the target; any domain carried in the body is ignored.
    resource.domain = parse_domain(&domain)?;
    state
        .record_store
        .write()
        .await
        .update(resource.clone())
        .await?;
    tracing::info!("replaced answers for \"{}\"", resource.domain);
    Ok(Json(resource))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<serde_json::Value>, APIError> {
    let domain = parse_domain(&domain)?;
    state.record_store.write().await.delete(&domain).await?;
    tracing::info!("deleted resource for \"{domain}\"");
    Ok(Json(json!({ "msg": "success" })))
}

#[allow(clippy::unused_async)]
async fn route_not_found() -> APIError {
    Error::NotFound.into()
}

fn parse_domain(raw: &str) -> Result<LowerName, Error> {
    let name = Name::from_str(raw)?;
    if name.num_labels() == 0 {
        return Err(Error::EmptyDomain);
    }
    Ok(LowerName::from(name))
}
