//! Post-hoc aggregation of dispatch results into per-capacity summaries.

use std::cmp::Ordering;
use std::fmt;

use super::result::SimulationResult;

/// Aggregate figures for one simulated battery capacity.
///
/// Computed post-hoc from the hourly ledger so the summary always agrees
/// with the rows it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacitySummary {
    /// Battery capacity in kWh.
    pub capacity_kwh: f32,
    /// Total procurement cost over the day.
    pub total_cost: f32,
    /// Total revenue over the day.
    pub total_revenue: f32,
    /// Day profit, rounded to cents.
    pub total_profit: f32,
    /// Energy bought into the battery over the day (kWh).
    pub energy_charged_kwh: f32,
    /// Demand covered from storage over the day (kWh).
    pub energy_from_storage_kwh: f32,
    /// Demand covered by grid fallback over the day (kWh).
    pub energy_from_grid_kwh: f32,
    /// Highest battery level reached during the day (kWh).
    pub peak_level_kwh: f32,
    /// Number of hours where storage could not cover the full demand.
    pub shortfall_hours: usize,
}

impl CapacitySummary {
    /// Aggregates one simulation result into a summary.
    pub fn from_result(result: &SimulationResult) -> Self {
        let mut energy_charged = 0.0_f32;
        let mut energy_from_storage = 0.0_f32;
        let mut energy_from_grid = 0.0_f32;
        let mut peak_level = 0.0_f32;
        let mut shortfall_hours = 0_usize;

        for record in result.ledger() {
            energy_charged += record.charged_kwh;
            energy_from_storage += record.from_storage_kwh;
            energy_from_grid += record.from_grid_kwh;
            peak_level = peak_level.max(record.level_kwh);
            if record.from_grid_kwh > 0.0 {
                shortfall_hours += 1;
            }
        }

        let (total_cost, total_revenue) = match result.ledger().last() {
            Some(last) => (last.cumulative_cost, last.cumulative_revenue),
            None => (0.0, 0.0),
        };

        Self {
            capacity_kwh: result.capacity_kwh(),
            total_cost,
            total_revenue,
            total_profit: result.total_profit(),
            energy_charged_kwh: energy_charged,
            energy_from_storage_kwh: energy_from_storage,
            energy_from_grid_kwh: energy_from_grid,
            peak_level_kwh: peak_level,
            shortfall_hours,
        }
    }
}

impl fmt::Display for CapacitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Capacity {:.0} kWh ---", self.capacity_kwh)?;
        writeln!(f, "Total revenue:     {:.2} €", self.total_revenue)?;
        writeln!(f, "Total cost:        {:.2} €", self.total_cost)?;
        writeln!(f, "Total profit:      {:.2} €", self.total_profit)?;
        writeln!(f, "Energy charged:    {:.2} kWh", self.energy_charged_kwh)?;
        writeln!(f, "Served by storage: {:.2} kWh", self.energy_from_storage_kwh)?;
        writeln!(f, "Served by grid:    {:.2} kWh", self.energy_from_grid_kwh)?;
        writeln!(f, "Peak level:        {:.2} kWh", self.peak_level_kwh)?;
        write!(f, "Shortfall hours:   {}", self.shortfall_hours)
    }
}

/// Summary comparison across every capacity in a fleet sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    summaries: Vec<CapacitySummary>,
}

impl RunReport {
    /// Builds one summary per result, in input order.
    pub fn from_results(results: &[SimulationResult]) -> Self {
        Self {
            summaries: results.iter().map(CapacitySummary::from_result).collect(),
        }
    }

    pub fn summaries(&self) -> &[CapacitySummary] {
        &self.summaries
    }

    /// The summary with the highest day profit, if any were recorded.
    pub fn best(&self) -> Option<&CapacitySummary> {
        self.summaries.iter().max_by(|a, b| {
            a.total_profit
                .partial_cmp(&b.total_profit)
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Report ---")?;
        for summary in &self.summaries {
            writeln!(
                f,
                "{:>6.0} kWh | profit {:>7.2} € | grid {:>7.2} kWh | shortfall hours {:>2}",
                summary.capacity_kwh,
                summary.total_profit,
                summary.energy_from_grid_kwh,
                summary.shortfall_hours,
            )?;
        }
        match self.best() {
            Some(best) => write!(
                f,
                "Best capacity: {:.0} kWh ({:.2} €)",
                best.capacity_kwh, best.total_profit
            ),
            None => write!(f, "No results recorded"),
        }
    }
}
