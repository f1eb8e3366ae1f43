//! Exemption policy

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Month, NaiveDate, Weekday};

use crate::domain::vehicle::VehicleType;

/// Which exemption rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptionReason {
    Month(Month),
    Weekday(Weekday),
    Date(NaiveDate),
    VehicleType(VehicleType),
}

impl std::fmt::Display for ExemptionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month(m) => write!(f, "toll-free month ({})", m.name()),
            Self::Weekday(d) => write!(f, "toll-free weekday ({})", d),
            Self::Date(d) => write!(f, "toll-free date ({})", d),
            Self::VehicleType(t) => write!(f, "toll-free vehicle ({})", t),
        }
    }
}

/// Static sets of exempt months, weekdays, dates and vehicle types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionPolicy {
    months: HashSet<Month>,
    weekdays: HashSet<Weekday>,
    dates: BTreeSet<NaiveDate>,
    vehicle_types: HashSet<VehicleType>,
}

impl ExemptionPolicy {
    pub fn new(
        months: impl IntoIterator<Item = Month>,
        weekdays: impl IntoIterator<Item = Weekday>,
        dates: impl IntoIterator<Item = NaiveDate>,
        vehicle_types: impl IntoIterator<Item = VehicleType>,
    ) -> Self {
        Self {
            months: months.into_iter().collect(),
            weekdays: weekdays.into_iter().collect(),
            dates: dates.into_iter().collect(),
            vehicle_types: vehicle_types.into_iter().collect(),
        }
    }

    /// First matching rule, if any.
    pub fn exemption_for(&self, vehicle: VehicleType, date: NaiveDate) -> Option<ExemptionReason> {
        if self.vehicle_types.contains(&vehicle) {
            return Some(ExemptionReason::VehicleType(vehicle));
        }
        if self.dates.contains(&date) {
            return Some(ExemptionReason::Date(date));
        }
        let weekday = date.weekday();
        if self.weekdays.contains(&weekday) {
            return Some(ExemptionReason::Weekday(weekday));
        }
        Month::try_from(date.month() as u8)
            .ok()
            .filter(|month| self.months.contains(month))
            .map(ExemptionReason::Month)
    }

    pub fn is_exempt(&self, vehicle: VehicleType, date: NaiveDate) -> bool {
        self.exemption_for(vehicle, date).is_some()
    }

    pub fn months(&self) -> Vec<Month> {
        let mut months: Vec<Month> = self.months.iter().copied().collect();
        months.sort_by_key(|m| m.number_from_month());
        months
    }

    pub fn weekdays(&self) -> Vec<Weekday> {
        let mut weekdays: Vec<Weekday> = self.weekdays.iter().copied().collect();
        weekdays.sort_by_key(|d| d.number_from_monday());
        weekdays
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.dates.iter().copied().collect()
    }

    pub fn vehicle_types(&self) -> Vec<VehicleType> {
        VehicleType::ALL
            .into_iter()
            .filter(|t| self.vehicle_types.contains(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ExemptionPolicy {
        ExemptionPolicy::new(
            [Month::July],
            [Weekday::Sat, Weekday::Sun],
            [NaiveDate::from_ymd_opt(2022, 6, 6).unwrap()],
            [VehicleType::Emergency, VehicleType::Military],
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn regular_weekday_is_not_exempt() {
        assert_eq!(policy().exemption_for(VehicleType::Car, date(2022, 1, 11)), None);
    }

    #[test]
    fn exempt_month() {
        assert_eq!(
            policy().exemption_for(VehicleType::Car, date(2022, 7, 1)),
            Some(ExemptionReason::Month(Month::July))
        );
    }

    #[test]
    fn exempt_weekday() {
        assert_eq!(
            policy().exemption_for(VehicleType::Car, date(2022, 1, 16)),
            Some(ExemptionReason::Weekday(Weekday::Sun))
        );
    }

    #[test]
    fn exempt_date() {
        assert_eq!(
            policy().exemption_for(VehicleType::Car, date(2022, 6, 6)),
            Some(ExemptionReason::Date(date(2022, 6, 6)))
        );
    }

    #[test]
    fn exempt_vehicle_type() {
        let p = policy();
        assert!(p.is_exempt(VehicleType::Military, date(2022, 1, 26)));
        assert!(!p.is_exempt(VehicleType::Tractor, date(2022, 1, 26)));
    }

    #[test]
    fn empty_policy_exempts_nothing() {
        let p = ExemptionPolicy::default();
        for t in VehicleType::ALL {
            assert!(!p.is_exempt(t, date(2022, 7, 16)));
        }
    }

    #[test]
    fn accessors_are_sorted() {
        let p = ExemptionPolicy::new(
            [Month::December, Month::July],
            [Weekday::Sun, Weekday::Sat],
            [date(2022, 6, 6), date(2022, 1, 5)],
            [VehicleType::Military, VehicleType::Motorbike],
        );
        assert_eq!(p.months(), vec![Month::July, Month::December]);
        assert_eq!(p.weekdays(), vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(p.dates(), vec![date(2022, 1, 5), date(2022, 6, 6)]);
        assert_eq!(
            p.vehicle_types(),
            vec![VehicleType::Motorbike, VehicleType::Military]
        );
    }
}
