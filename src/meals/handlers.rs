use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    session::{MaybeSession, SessionId},
    state::AppState,
};

use super::dto::{MealInput, MealListResponse, MealRequest, MealResponse, MetricsResponse};
use super::{services, validation::parse_meal_id};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/metrics", get(get_metrics))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

fn parse_body(payload: Result<Json<MealRequest>, JsonRejection>) -> Result<MealInput, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "malformed meal body");
        ApiError::from(rejection)
    })?;
    request.parse().map_err(|e| {
        warn!(error = %e, "meal body rejected");
        ApiError::from(e)
    })
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_meal_id(raw).map_err(|e| {
        warn!(id = %raw, "invalid meal id");
        ApiError::from(e)
    })
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<MealListResponse>, ApiError> {
    let meals = state.store.list_for_session(&session).await?;
    Ok(Json(MealListResponse { meals }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    session: SessionId,
    Path(id): Path<String>,
) -> Result<Json<MealResponse>, ApiError> {
    let id = parse_id(&id)?;
    let meal = state.store.find_for_session(&session, id).await?;
    if meal.is_none() {
        debug!(%id, "meal not found for session");
    }
    Ok(Json(MealResponse { meal }))
}

#[instrument(skip(state))]
pub async fn get_metrics(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<MetricsResponse>, ApiError> {
    let metrics =
        services::metrics_for_session(state.store.as_ref(), &session, state.config.metrics_order)
            .await?;
    Ok(Json(MetricsResponse { metrics }))
}

/// POST /meals. Issues a session cookie when the client has none.
#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    payload: Result<Json<MealRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let input = parse_body(payload)?;

    let mut headers = HeaderMap::new();
    let session = match session {
        Some(session) => session,
        None => {
            let session = SessionId::generate();
            let cookie = session
                .to_cookie(state.config.session_max_age_secs)
                .map_err(|e| anyhow::anyhow!(e).context("build session cookie"))?;
            headers.insert(SET_COOKIE, cookie);
            info!(session = %session, "session issued");
            session
        }
    };

    let meal = services::create_meal(state.store.as_ref(), &session, &input).await?;
    info!(meal_id = %meal.id, session = %session, "meal created");
    Ok((StatusCode::CREATED, headers))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    session: SessionId,
    Path(id): Path<String>,
    payload: Result<Json<MealRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let input = parse_body(payload)?;
    if state.store.update(&session, id, &input).await? {
        info!(%id, "meal updated");
    } else {
        debug!(%id, "update matched no meal for session");
    }
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    session: SessionId,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.store.delete(&session, id).await? {
        info!(%id, "meal deleted");
    } else {
        debug!(%id, "delete matched no meal for session");
    }
    Ok(StatusCode::OK)
}
