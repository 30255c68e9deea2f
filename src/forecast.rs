//! Short-horizon demand forecasting behind a capability trait.

use crate::demand::DemandProfile;
use crate::tariff::HOURS_PER_DAY;

/// One-hour-ahead demand prediction.
///
/// Implementations look at a daily demand profile and estimate the load
/// for a requested hour. Hours wrap around the day, so `predict_demand(25)`
/// is the same as `predict_demand(1)`.
pub trait DemandForecaster {
    /// Predicted demand in kWh for the given hour of day.
    fn predict_demand(&self, hour: usize) -> f32;
}

/// Naive "next hour looks like this hour" forecaster.
///
/// Returns the observed value from the underlying profile. Useful as a
/// baseline to compare smarter forecasters against.
#[derive(Debug, Clone)]
pub struct PersistenceForecast {
    profile: DemandProfile,
}

impl PersistenceForecast {
    pub fn new(profile: DemandProfile) -> Self {
        Self { profile }
    }
}

impl DemandForecaster for PersistenceForecast {
    fn predict_demand(&self, hour: usize) -> f32 {
        self.profile.get(hour)
    }
}

/// Linear-trend forecaster fit over one day of observations.
///
/// Fits `demand = slope * hour + intercept` by ordinary least squares and
/// extrapolates from the fitted line. Predictions are floored at zero since
/// negative demand is meaningless.
#[derive(Debug, Clone, Copy)]
pub struct TrendForecast {
    slope: f32,
    intercept: f32,
}

impl TrendForecast {
    /// Fits the trend line to a daily profile.
    pub fn fit(profile: &DemandProfile) -> Self {
        let mean_hour = (HOURS_PER_DAY as f32 - 1.0) / 2.0;
        let mean_demand =
            profile.values().iter().sum::<f32>() / HOURS_PER_DAY as f32;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (hour, &demand) in profile.values().iter().enumerate() {
            let dx = hour as f32 - mean_hour;
            sxx += dx * dx;
            sxy += dx * (demand - mean_demand);
        }

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        let intercept = mean_demand - slope * mean_hour;
        Self { slope, intercept }
    }

    pub fn slope(&self) -> f32 {
        self.slope
    }

    pub fn intercept(&self) -> f32 {
        self.intercept
    }
}

impl DemandForecaster for TrendForecast {
    fn predict_demand(&self, hour: usize) -> f32 {
        let h = (hour % HOURS_PER_DAY) as f32;
        (self.slope * h + self.intercept).max(0.0)
    }
}
