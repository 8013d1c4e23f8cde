use axum::Json;
use axum::extract::{Query, State};
use chrono::Local;

use super::AppState;
use crate::core::{DateRangeQuery, HistoricalParams, HistoricalQuote, Quote, RateError};

pub async fn latest(State(state): State<AppState>) -> Result<Json<Quote>, RateError> {
    let quote = state.rates.latest().await?;
    Ok(Json(quote))
}

pub async fn historical(
    State(state): State<AppState>,
    Query(params): Query<HistoricalParams>,
) -> Result<Json<Vec<HistoricalQuote>>, RateError> {
    let query = DateRangeQuery::try_from(params)?;
    let today = Local::now().date_naive();
    let quotes = state.rates.historical(query, today).await?;
    Ok(Json(quotes))
}
