//! Day-ahead dispatch simulation over a fixed tariff schedule.

use crate::demand::DemandProfile;
use crate::error::{SimError, ensure_finite};
use crate::sim::battery::BatteryState;
use crate::sim::result::{HourRecord, SimulationResult};
use crate::tariff::{GridPeriod, HOURS_PER_DAY, TariffSchedule};

/// Charge rate used when none is configured, in kWh per hour.
pub const DEFAULT_MAX_CHARGE_KWH_PER_HOUR: f32 = 5.0;

/// Simulates one day of buy-low, serve-demand battery operation.
///
/// Each hour the simulator first charges the battery from the grid when the
/// tariff is off-peak, limited by the charge rate and the remaining headroom,
/// then serves the hour's demand from storage with the grid covering any
/// shortfall. Revenue books the full demand at the sell price; procurement
/// cost books charging energy and grid fallback at the grid cost.
///
/// # Examples
///
/// ```
/// use bess_sim::demand::DemandProfile;
/// use bess_sim::sim::dispatch::DispatchSimulator;
/// use bess_sim::tariff::TariffSchedule;
///
/// let simulator = DispatchSimulator::reference();
/// let demand = DemandProfile::flat(5.0).unwrap();
/// let tariff = TariffSchedule::reference();
///
/// let result = simulator.simulate(10.0, &demand, &tariff).unwrap();
/// assert_eq!(result.ledger().len(), 24);
/// assert_eq!(result.total_profit(), 9.80);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DispatchSimulator {
    max_charge_kwh_per_hour: f32,
}

impl DispatchSimulator {
    /// Creates a simulator with a custom hourly charge rate.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] when the rate is zero or negative
    /// and [`SimError::ArithmeticDomain`] when it is not finite.
    pub fn new(max_charge_kwh_per_hour: f32) -> Result<Self, SimError> {
        ensure_finite(
            "dispatch.max_charge_kwh_per_hour",
            max_charge_kwh_per_hour,
        )?;
        if max_charge_kwh_per_hour <= 0.0 {
            return Err(SimError::invalid_input(
                "dispatch.max_charge_kwh_per_hour",
                "must be greater than zero",
            ));
        }
        Ok(Self { max_charge_kwh_per_hour })
    }

    /// Simulator with the reference charge rate of
    /// [`DEFAULT_MAX_CHARGE_KWH_PER_HOUR`].
    pub fn reference() -> Self {
        Self { max_charge_kwh_per_hour: DEFAULT_MAX_CHARGE_KWH_PER_HOUR }
    }

    pub fn max_charge_kwh_per_hour(&self) -> f32 {
        self.max_charge_kwh_per_hour
    }

    /// Runs one battery capacity through a full day.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Battery capacity in kWh
    /// * `demand` - Hourly demand profile for the day
    /// * `tariff` - Tariff schedule for the day
    ///
    /// # Returns
    ///
    /// A [`SimulationResult`] with one ledger row per hour and the day
    /// profit rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] when the capacity is zero or
    /// negative and [`SimError::ArithmeticDomain`] when it is not finite.
    pub fn simulate(
        &self,
        capacity_kwh: f32,
        demand: &DemandProfile,
        tariff: &TariffSchedule,
    ) -> Result<SimulationResult, SimError> {
        ensure_finite("dispatch.capacity_kwh", capacity_kwh)?;
        if capacity_kwh <= 0.0 {
            return Err(SimError::invalid_input(
                "dispatch.capacity_kwh",
                "must be greater than zero",
            ));
        }

        let mut battery = BatteryState::empty(capacity_kwh);
        let mut cost = 0.0_f32;
        let mut revenue = 0.0_f32;
        let mut ledger = Vec::with_capacity(HOURS_PER_DAY);

        for hour in 0..HOURS_PER_DAY {
            let slot = tariff.slot(hour);
            let demand_kwh = demand.get(hour);

            let charged_kwh = if slot.period == GridPeriod::OffPeak {
                battery.charge(self.max_charge_kwh_per_hour)
            } else {
                0.0
            };
            cost += charged_kwh * slot.grid_cost;

            let from_storage_kwh = battery.serve(demand_kwh);
            let from_grid_kwh = demand_kwh - from_storage_kwh;
            // The full demand is billed at the sell price even when part of
            // it is covered by grid fallback. Shortfall hours therefore stay
            // revenue-neutral and only widen the cost side.
            revenue += demand_kwh * slot.sell_price;
            cost += from_grid_kwh * slot.grid_cost;

            ledger.push(HourRecord {
                hour,
                demand_kwh,
                grid_cost: slot.grid_cost,
                sell_price: slot.sell_price,
                period: slot.period,
                charged_kwh,
                from_storage_kwh,
                from_grid_kwh,
                level_kwh: battery.level_kwh(),
                cumulative_cost: cost,
                cumulative_revenue: revenue,
                cumulative_profit: revenue - cost,
            });
        }

        Ok(SimulationResult::new(capacity_kwh, ledger, round2(revenue - cost)))
    }

    /// Runs every capacity in `capacities_kwh` against the same day.
    ///
    /// Results come back in input order. All capacities are validated before
    /// the first run, so a bad entry fails the whole sweep up front.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DispatchSimulator::simulate`], applied to each
    /// capacity.
    pub fn simulate_fleet(
        &self,
        capacities_kwh: &[f32],
        demand: &DemandProfile,
        tariff: &TariffSchedule,
    ) -> Result<Vec<SimulationResult>, SimError> {
        for &capacity_kwh in capacities_kwh {
            ensure_finite("dispatch.capacity_kwh", capacity_kwh)?;
            if capacity_kwh <= 0.0 {
                return Err(SimError::invalid_input(
                    "dispatch.capacity_kwh",
                    "must be greater than zero",
                ));
            }
        }

        capacities_kwh
            .iter()
            .map(|&capacity_kwh| self.simulate(capacity_kwh, demand, tariff))
            .collect()
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
