use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use portfolio_analytics_core::{errors::Error as CoreError, holdings::Sector};

use crate::{error::ApiResult, main_lib::AppState};

use super::dto::{
    holdings_dto, AllocationResponse, HoldingDto, HoldingsParams, PerformanceResponse, RankingDto,
    SummaryResponse, TopPerformersParams, ViewQueryParams, ViewResponse,
};

pub async fn get_holdings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HoldingsParams>,
) -> ApiResult<Json<Vec<HoldingDto>>> {
    let query = params.to_query()?;
    let holdings = state.portfolio_service.get_holdings(&query).await?;
    Ok(Json(holdings_dto(&holdings)))
}

pub async fn get_allocation(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AllocationResponse>> {
    let allocations = state.portfolio_service.get_allocations().await?;
    Ok(Json(AllocationResponse::from(&allocations)))
}

pub async fn get_performance(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PerformanceResponse>> {
    let overview = state.portfolio_service.get_performance().await?;
    Ok(Json(PerformanceResponse::from(&overview)))
}

/// Totals plus top gainer and loser, which are `null` for an empty portfolio.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<SummaryResponse>> {
    let summary = state.portfolio_service.get_summary().await?;
    let highlights = match state.portfolio_service.get_highlights().await {
        Ok(h) => Some(h),
        Err(CoreError::EmptyPortfolio(_)) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(Json(SummaryResponse::new(&summary, highlights.as_ref())))
}

pub async fn get_top_performers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopPerformersParams>,
) -> ApiResult<Json<RankingDto>> {
    let n = params.count()?;
    let ranking = state.portfolio_service.get_top_performers(n).await?;
    Ok(Json(RankingDto::from(&ranking)))
}

pub async fn get_sectors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Sector>>> {
    Ok(Json(state.portfolio_service.get_sectors().await?))
}

pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewQueryParams>,
) -> ApiResult<Json<ViewResponse>> {
    let params = params.to_params()?;
    let view = state.portfolio_service.get_view(&params).await?;
    Ok(Json(ViewResponse::from(&view)))
}

pub async fn reload(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    let count = state.portfolio_service.reload().await?;
    tracing::info!("Reload requested over HTTP: {} holdings", count);
    Ok(StatusCode::NO_CONTENT)
}
