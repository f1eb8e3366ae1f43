//! Toll REST API handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{FeeBreakdownResponse, FeeResponse, RecordPassageRequest, TariffResponse};
use crate::application::TollFeeService;
use crate::domain::{DomainResult, PassageTime, VehicleType};
use crate::interfaces::http::common::{
    api_error, plain_error, ApiError, ApiResponse, PlainError, ValidatedJson,
};
use crate::shared::validations::{parse_date, parse_passage_time, validate_registration};

#[derive(Clone)]
pub struct TollState {
    pub service: Arc<TollFeeService>,
}

/// Checks run in the order stations expect their error messages.
fn parse_passage(
    vehicle_type: &str,
    registration: &str,
    passed_at: &str,
) -> DomainResult<(VehicleType, PassageTime)> {
    validate_registration(registration)?;
    let passed_at = parse_passage_time(passed_at)?;
    let vehicle_type = VehicleType::from_str(vehicle_type)?;
    Ok((vehicle_type, passed_at))
}

async fn record(
    service: &TollFeeService,
    vehicle_type: &str,
    registration: &str,
    passed_at: &str,
) -> DomainResult<FeeResponse> {
    let (vehicle_type, passed_at) = parse_passage(vehicle_type, registration, passed_at)?;

    let breakdown = service
        .register_passage(registration, vehicle_type, passed_at)
        .await?;

    Ok(FeeResponse::new(
        registration,
        vehicle_type,
        passed_at.date_naive(),
        breakdown.total,
    ))
}

/// Records the passage and answers with the bare daily fee, e.g. `22`.
/// Rejections are plain-text 400 bodies such as `Wrong date format`.
#[utoipa::path(
    get,
    path = "/toll/get-fee/{vehicle_type}/{registration}/{date}",
    tag = "Tolls",
    params(
        ("vehicle_type" = String, Path, description = "Vehicle type, e.g. Car"),
        ("registration" = String, Path, description = "Registration number"),
        ("date" = String, Path, description = "Passage time, YYYY-MM-DD HH:MM:SS")
    ),
    responses(
        (status = 200, description = "Passage recorded, fee for the day so far", body = u32),
        (status = 400, description = "Malformed input or conflicting vehicle type", body = String, content_type = "text/plain")
    )
)]
pub async fn get_fee(
    State(state): State<TollState>,
    Path((vehicle_type, registration, date)): Path<(String, String, String)>,
) -> Result<Json<u32>, PlainError> {
    let fee = record(&state.service, &vehicle_type, &registration, &date)
        .await
        .map_err(plain_error)?;
    Ok(Json(fee.fee))
}

#[utoipa::path(
    post,
    path = "/api/v1/passages",
    tag = "Tolls",
    request_body = RecordPassageRequest,
    responses(
        (status = 201, description = "Passage recorded", body = ApiResponse<FeeResponse>),
        (status = 400, description = "Malformed input or conflicting vehicle type"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn record_passage(
    State(state): State<TollState>,
    ValidatedJson(req): ValidatedJson<RecordPassageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FeeResponse>>), ApiError> {
    let fee = record(&state.service, &req.vehicle_type, &req.registration, &req.passed_at)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(fee))))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{registration}/fees/{date}",
    tag = "Tolls",
    params(
        ("registration" = String, Path, description = "Registration number"),
        ("date" = String, Path, description = "Day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Itemized fee for the day", body = ApiResponse<FeeBreakdownResponse>),
        (status = 400, description = "Malformed input")
    )
)]
pub async fn get_daily_fee(
    State(state): State<TollState>,
    Path((registration, date)): Path<(String, String)>,
) -> Result<Json<ApiResponse<FeeBreakdownResponse>>, ApiError> {
    validate_registration(&registration).map_err(api_error)?;
    let date = parse_date(&date).map_err(api_error)?;

    let breakdown = state
        .service
        .daily_fee(&registration, date)
        .await
        .map_err(api_error)?;

    Ok(Json(ApiResponse::success(FeeBreakdownResponse::new(
        &registration,
        date,
        &breakdown,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/tariff",
    tag = "Tolls",
    responses(
        (status = 200, description = "Loaded tariff", body = ApiResponse<TariffResponse>)
    )
)]
pub async fn get_tariff(State(state): State<TollState>) -> Json<ApiResponse<TariffResponse>> {
    Json(ApiResponse::success(TariffResponse::from(
        state.service.policy(),
    )))
}
