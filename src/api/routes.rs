//! HTTP handlers.
//!
//! Thin adapters: extract, call the component, wrap the result in JSON.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use super::error::ApiError;
use super::extract::{ApiJson, AuthUser};
use super::protocol::{
    CompleteBetParams, CreateBetRequest, CreateOutcomeRequest, CreateProposalRequest,
    HealthResponse, LoginRequest, MessageResponse, RollDareRequest, SearchParams,
};
use crate::auth::{AuthSession, SignupRequest};
use crate::context::SharedContext;
use crate::game::model::{Bet, Dare, Outcome, Proposal, UserProfile};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// All API routes, relative to the `/api` prefix.
pub fn routes() -> Router<SharedContext> {
    Router::new()
        .route("/", get(health))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/users/search", get(search_users))
        .route("/proposals", post(create_proposal).get(list_proposals))
        .route("/proposals/{id}/accept", put(accept_proposal))
        .route("/proposals/{id}/decline", put(decline_proposal))
        .route("/bets", post(create_bet))
        .route("/bets/{id}", get(list_bets))
        .route("/bets/{id}/complete", put(complete_bet))
        .route("/dares/roll", post(roll_dare))
        .route("/dares/{id}", get(list_dares))
        .route("/dares/{id}/complete", put(complete_dare))
        .route("/outcomes", post(create_outcome))
        .route("/outcomes/{id}", get(get_outcome))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Love Dice API".into(),
        version: crate::VERSION.into(),
    })
}

// --- auth ---

async fn signup(
    State(ctx): State<SharedContext>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<AuthSession> {
    Ok(Json(ctx.identity.signup(req).await?))
}

async fn login(
    State(ctx): State<SharedContext>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<AuthSession> {
    Ok(Json(ctx.identity.login(&req.username, &req.password).await?))
}

async fn me(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

async fn search_users(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
    params: Result<Query<SearchParams>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Vec<UserProfile>> {
    let Query(params) = params?;
    Ok(Json(ctx.identity.search_users(&params.q, &user).await?))
}

// --- proposals ---

async fn create_proposal(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
    ApiJson(req): ApiJson<CreateProposalRequest>,
) -> ApiResult<Proposal> {
    let proposal = ctx
        .proposals
        .create(&user, &req.target_username, &req.proposed_match_name, &req.stakes)
        .await?;
    Ok(Json(proposal))
}

async fn list_proposals(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
) -> ApiResult<Vec<Proposal>> {
    Ok(Json(ctx.proposals.list(&user).await?))
}

async fn accept_proposal(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    ctx.proposals.accept(&id, &user).await?;
    Ok(Json(MessageResponse::new("Proposal accepted")))
}

async fn decline_proposal(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    ctx.proposals.decline(&id, &user).await?;
    Ok(Json(MessageResponse::new("Proposal declined")))
}

// --- bets ---

async fn create_bet(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
    ApiJson(req): ApiJson<CreateBetRequest>,
) -> ApiResult<Bet> {
    Ok(Json(ctx.bets.create(req.into(), &user).await?))
}

async fn list_bets(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
    Path(proposal_id): Path<String>,
) -> ApiResult<Vec<Bet>> {
    Ok(Json(ctx.bets.list(&proposal_id, &user).await?))
}

async fn complete_bet(
    State(ctx): State<SharedContext>,
    AuthUser(_user): AuthUser,
    Path(bet_id): Path<String>,
    params: Result<Query<CompleteBetParams>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<MessageResponse> {
    let Query(params) = params?;
    ctx.bets.complete(&bet_id, params.won).await?;
    Ok(Json(MessageResponse::new("Bet completed")))
}

// --- dares ---

async fn roll_dare(
    State(ctx): State<SharedContext>,
    AuthUser(_user): AuthUser,
    ApiJson(req): ApiJson<RollDareRequest>,
) -> ApiResult<Dare> {
    Ok(Json(ctx.dares.roll(&req.proposal_id, &req.gender).await?))
}

async fn list_dares(
    State(ctx): State<SharedContext>,
    Path(proposal_id): Path<String>,
) -> ApiResult<Vec<Dare>> {
    Ok(Json(ctx.dares.list(&proposal_id).await?))
}

async fn complete_dare(
    State(ctx): State<SharedContext>,
    Path(dare_id): Path<String>,
) -> ApiResult<MessageResponse> {
    ctx.dares.complete(&dare_id).await?;
    Ok(Json(MessageResponse::new("Dare completed")))
}

// --- outcomes ---

async fn create_outcome(
    State(ctx): State<SharedContext>,
    AuthUser(user): AuthUser,
    ApiJson(req): ApiJson<CreateOutcomeRequest>,
) -> ApiResult<Outcome> {
    Ok(Json(ctx.outcomes.record(req.into(), &user).await?))
}

async fn get_outcome(
    State(ctx): State<SharedContext>,
    Path(proposal_id): Path<String>,
) -> ApiResult<Outcome> {
    Ok(Json(ctx.outcomes.get(&proposal_id).await?))
}
