//! Vehicle type tag

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::errors::DomainError;

/// Category a passing vehicle is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Car,
    Motorbike,
    Tractor,
    Emergency,
    Diplomat,
    Foreign,
    Military,
}

impl VehicleType {
    pub const ALL: [VehicleType; 7] = [
        Self::Car,
        Self::Motorbike,
        Self::Tractor,
        Self::Emergency,
        Self::Diplomat,
        Self::Foreign,
        Self::Military,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Motorbike => "Motorbike",
            Self::Tractor => "Tractor",
            Self::Emergency => "Emergency",
            Self::Diplomat => "Diplomat",
            Self::Foreign => "Foreign",
            Self::Military => "Military",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::Validation(format!("Unknown vehicle type: {}", s)))
    }
}
