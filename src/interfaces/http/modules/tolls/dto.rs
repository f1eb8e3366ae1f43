//! Toll DTOs

use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{FeeBreakdown, PricedCluster, TollPolicy, VehicleType};
use crate::shared::validations::DATE_FORMAT;

/// Fee owed by a vehicle for one day
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeeResponse {
    pub registration: String,
    pub vehicle_type: String,
    /// Day the fee applies to (`YYYY-MM-DD`)
    pub date: String,
    pub fee: u32,
}

impl FeeResponse {
    pub fn new(registration: &str, vehicle_type: VehicleType, date: NaiveDate, fee: u32) -> Self {
        Self {
            registration: registration.to_string(),
            vehicle_type: vehicle_type.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            fee,
        }
    }
}

/// Passage report from a toll station
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordPassageRequest {
    /// Car, Motorbike, Tractor, Emergency, Diplomat, Foreign or Military
    pub vehicle_type: String,
    #[validate(length(min = 2, max = 12, message = "Wrong registration number format"))]
    pub registration: String,
    /// Local time of the passage, `YYYY-MM-DD HH:MM:SS`
    #[schema(example = "2022-01-11 07:59:00")]
    pub passed_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClusterDto {
    /// RFC 3339 timestamps, earliest first; the first one anchors the window
    pub passages: Vec<String>,
    pub price: u32,
}

impl From<&PricedCluster> for ClusterDto {
    fn from(c: &PricedCluster) -> Self {
        Self {
            passages: c
                .passages
                .iter()
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .collect(),
            price: c.price,
        }
    }
}

/// Itemized daily fee
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeeBreakdownResponse {
    pub registration: String,
    pub date: String,
    /// Why the day is toll-free, if it is
    pub exemption: Option<String>,
    pub clusters: Vec<ClusterDto>,
    pub subtotal: u32,
    pub daily_cap: u32,
    pub total: u32,
    pub capped: bool,
}

impl FeeBreakdownResponse {
    pub fn new(registration: &str, date: NaiveDate, breakdown: &FeeBreakdown) -> Self {
        Self {
            registration: registration.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            exemption: breakdown.exemption.as_ref().map(ToString::to_string),
            clusters: breakdown.clusters.iter().map(ClusterDto::from).collect(),
            subtotal: breakdown.subtotal,
            daily_cap: breakdown.daily_cap,
            total: breakdown.total,
            capped: breakdown.is_capped(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FareDto {
    /// Local time the price takes effect, `HH:MM`
    pub starts_at: String,
    pub price: u32,
}

/// Loaded tariff: fare table, exemptions and daily cap
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TariffResponse {
    pub fares: Vec<FareDto>,
    pub exempt_months: Vec<String>,
    pub exempt_week_days: Vec<String>,
    pub exempt_dates: Vec<String>,
    pub exempt_vehicle_types: Vec<String>,
    pub daily_cap: u32,
}

impl From<&TollPolicy> for TariffResponse {
    fn from(p: &TollPolicy) -> Self {
        Self {
            fares: p
                .fares
                .breakpoints()
                .iter()
                .map(|b| FareDto {
                    starts_at: format!("{:02}:{:02}", b.hour, b.minute),
                    price: b.price,
                })
                .collect(),
            exempt_months: p
                .exemptions
                .months()
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
            exempt_week_days: p
                .exemptions
                .weekdays()
                .iter()
                .map(ToString::to_string)
                .collect(),
            exempt_dates: p
                .exemptions
                .dates()
                .iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect(),
            exempt_vehicle_types: p
                .exemptions
                .vehicle_types()
                .iter()
                .map(ToString::to_string)
                .collect(),
            daily_cap: p.daily_cap,
        }
    }
}
