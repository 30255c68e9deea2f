//! Shared test fixtures for integration tests.

use bess_sim::demand::DemandProfile;
use bess_sim::sim::dispatch::DispatchSimulator;
use bess_sim::tariff::TariffSchedule;

/// Reference tariff: hours 0-7 and 21-23 off-peak at 0.10 EUR/kWh,
/// on-peak at 0.30, flat sale price 0.29.
pub fn reference_tariff() -> TariffSchedule {
    TariffSchedule::reference()
}

/// Reference demand profile: seed 100, uniform in [1, 5] kWh.
pub fn reference_demand() -> DemandProfile {
    DemandProfile::random(100, 1.0, 5.0).expect("reference demand range is valid")
}

/// Flat demand profile with the same value in every hour.
pub fn flat_demand(kwh: f32) -> DemandProfile {
    DemandProfile::flat(kwh).expect("flat demand is valid")
}

/// Simulator with the reference 5 kWh/h charge rate.
pub fn reference_simulator() -> DispatchSimulator {
    DispatchSimulator::reference()
}
