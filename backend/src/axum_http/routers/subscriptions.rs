use crate::axum_http::auth::AuthUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::subscriptions::{SubscriptionError, SubscriptionUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use domain::{
    repositories::{
        addresses::AddressRepository, plans::PlanRepository,
        product_variants::ProductVariantRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::subscriptions::CreateSubscriptionModel,
};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        addresses::AddressPostgres, plans::PlanPostgres,
        product_variants::ProductVariantPostgres, subscriptions::SubscriptionPostgres,
    },
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repo = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repo = PlanPostgres::new(Arc::clone(&db_pool));
    let address_repo = AddressPostgres::new(Arc::clone(&db_pool));
    let variant_repo = ProductVariantPostgres::new(Arc::clone(&db_pool));
    let subscription_usecase = SubscriptionUseCase::new(
        Arc::new(subscription_repo),
        Arc::new(plan_repo),
        Arc::new(address_repo),
        Arc::new(variant_repo),
    );

    Router::new()
        .route("/", post(create_subscription))
        .route("/:subscription_id", get(get_subscription))
        .route("/:subscription_id/pause", post(pause_subscription))
        .route("/:subscription_id/resume", post(resume_subscription))
        .route("/:subscription_id/cancel", post(cancel_subscription))
        .with_state(Arc::new(subscription_usecase))
}

fn subscription_error_response(err: SubscriptionError) -> Response {
    error_response(err.status_code(), err.code(), err.to_string())
}

pub async fn create_subscription<S, P, A, V>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P, A, V>>>,
    auth: AuthUser,
    Json(model): Json<CreateSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
    A: AddressRepository + Send + Sync,
    V: ProductVariantRepository + Send + Sync,
{
    match subscription_usecase.create(auth.user_id, model).await {
        Ok(dto) => (StatusCode::CREATED, Json(dto)).into_response(),
        Err(err) => subscription_error_response(err),
    }
}

pub async fn get_subscription<S, P, A, V>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P, A, V>>>,
    auth: AuthUser,
    Path(subscription_id): Path<i64>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
    A: AddressRepository + Send + Sync,
    V: ProductVariantRepository + Send + Sync,
{
    match subscription_usecase.get(auth.user_id, subscription_id).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => subscription_error_response(err),
    }
}

pub async fn pause_subscription<S, P, A, V>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P, A, V>>>,
    auth: AuthUser,
    Path(subscription_id): Path<i64>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
    A: AddressRepository + Send + Sync,
    V: ProductVariantRepository + Send + Sync,
{
    match subscription_usecase
        .pause(auth.user_id, subscription_id)
        .await
    {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => subscription_error_response(err),
    }
}

pub async fn resume_subscription<S, P, A, V>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P, A, V>>>,
    auth: AuthUser,
    Path(subscription_id): Path<i64>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
    A: AddressRepository + Send + Sync,
    V: ProductVariantRepository + Send + Sync,
{
    match subscription_usecase
        .resume(auth.user_id, subscription_id)
        .await
    {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => subscription_error_response(err),
    }
}

pub async fn cancel_subscription<S, P, A, V>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P, A, V>>>,
    auth: AuthUser,
    Path(subscription_id): Path<i64>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
    A: AddressRepository + Send + Sync,
    V: ProductVariantRepository + Send + Sync,
{
    match subscription_usecase
        .cancel(auth.user_id, subscription_id)
        .await
    {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => subscription_error_response(err),
    }
}
