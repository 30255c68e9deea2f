//! Per-hour ledger rows and the per-run result container.

use std::fmt;

use crate::tariff::GridPeriod;

/// Everything the dispatch loop recorded for one hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourRecord {
    /// Hour of day, 0 to 23.
    pub hour: usize,
    /// Household demand for the hour in kWh.
    pub demand_kwh: f32,
    /// Grid procurement cost in currency per kWh.
    pub grid_cost: f32,
    /// Retail sell price in currency per kWh.
    pub sell_price: f32,
    /// Tariff period of the hour.
    pub period: GridPeriod,
    /// Energy bought into the battery this hour in kWh.
    pub charged_kwh: f32,
    /// Demand covered from storage in kWh.
    pub from_storage_kwh: f32,
    /// Demand covered from the grid in kWh.
    pub from_grid_kwh: f32,
    /// Battery level after the hour in kWh.
    pub level_kwh: f32,
    /// Procurement cost accumulated since hour 0.
    pub cumulative_cost: f32,
    /// Revenue accumulated since hour 0.
    pub cumulative_revenue: f32,
    /// Running profit, revenue minus cost.
    pub cumulative_profit: f32,
}

impl fmt::Display for HourRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>2} [{:>8}] | demand={:>5.2} kWh | charged={:>5.2} kWh | storage={:>5.2} kWh | grid={:>5.2} kWh | level={:>5.2} kWh | profit={:>7.2} €",
            self.hour,
            self.period,
            self.demand_kwh,
            self.charged_kwh,
            self.from_storage_kwh,
            self.from_grid_kwh,
            self.level_kwh,
            self.cumulative_profit,
        )
    }
}

/// Outcome of simulating one battery capacity over a day.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    capacity_kwh: f32,
    ledger: Vec<HourRecord>,
    total_profit: f32,
}

impl SimulationResult {
    pub(crate) fn new(
        capacity_kwh: f32,
        ledger: Vec<HourRecord>,
        total_profit: f32,
    ) -> Self {
        Self { capacity_kwh, ledger, total_profit }
    }

    pub fn capacity_kwh(&self) -> f32 {
        self.capacity_kwh
    }

    /// One record per simulated hour, in hour order.
    pub fn ledger(&self) -> &[HourRecord] {
        &self.ledger
    }

    /// Day profit, rounded to cents.
    pub fn total_profit(&self) -> f32 {
        self.total_profit
    }

    /// The cumulative profit after each hour, in hour order.
    pub fn profit_series(&self) -> Vec<f32> {
        self.ledger.iter().map(|r| r.cumulative_profit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> HourRecord {
        HourRecord {
            hour: 3,
            demand_kwh: 4.2,
            grid_cost: 0.10,
            sell_price: 0.29,
            period: GridPeriod::OffPeak,
            charged_kwh: 5.0,
            from_storage_kwh: 4.2,
            from_grid_kwh: 0.0,
            level_kwh: 5.8,
            cumulative_cost: 2.0,
            cumulative_revenue: 4.87,
            cumulative_profit: 2.87,
        }
    }

    #[test]
    fn record_display_contains_key_fields() {
        let row = sample_record().to_string();
        assert!(row.contains("h= 3"));
        assert!(row.contains("off-peak"));
        assert!(row.contains("demand= 4.20 kWh"));
        assert!(row.contains("profit="));
    }

    #[test]
    fn profit_series_follows_ledger_order() {
        let mut first = sample_record();
        first.hour = 0;
        first.cumulative_profit = 1.0;
        let mut second = sample_record();
        second.hour = 1;
        second.cumulative_profit = 1.5;

        let result = SimulationResult::new(10.0, vec![first, second], 1.5);
        assert_eq!(result.profit_series(), vec![1.0, 1.5]);
        assert_eq!(result.ledger().len(), 2);
        assert_eq!(result.total_profit(), 1.5);
    }
}
