//! Dynamic sell-price computation for the next trading hour.

use crate::error::{SimError, ensure_finite};

/// Fixed margin added on top of the grid procurement cost.
pub const BASE_MARGIN: f32 = 0.10;
/// Demand level at which the forecast surcharge is zero.
pub const REFERENCE_DEMAND_KWH: f32 = 20.0;
/// Price adjustment per kWh of forecast deviation from the reference.
pub const SURCHARGE_PER_KWH: f32 = 0.01;
/// Discount applied while competition is sparse.
pub const COMPETITION_DISCOUNT: f32 = 0.05;
/// Competitor count at which the discount is withdrawn.
pub const COMPETITION_THRESHOLD: u32 = 3;

/// Inputs for one price quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingContext {
    /// Grid procurement cost in currency per kWh.
    pub grid_cost: f32,
    /// Forecast demand for the hour in kWh.
    pub predicted_demand: f32,
    /// Number of competing suppliers active in the area.
    pub competitors: u32,
}

/// Cost-plus price engine with a demand surcharge and a competition discount.
///
/// The quote is `(grid_cost + margin) + surcharge - discount`, rounded to
/// cents. The surcharge scales linearly with the forecast's deviation from
/// [`REFERENCE_DEMAND_KWH`], so a low forecast pulls the quote below the
/// cost-plus base. The result is deliberately not floored at zero: a strongly
/// negative quote signals that the inputs (very low forecast, cheap grid) have
/// left the formula's sensible operating range, and callers may want to see
/// that rather than a silently clamped number.
///
/// # Examples
///
/// ```
/// use bess_sim::pricing::{DynamicPricingEngine, PricingContext};
///
/// let engine = DynamicPricingEngine;
/// let price = engine
///     .price(&PricingContext { grid_cost: 0.30, predicted_demand: 2.8, competitors: 2 })
///     .unwrap();
/// assert_eq!(price, 0.18);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicPricingEngine;

impl DynamicPricingEngine {
    /// Quotes a sell price for the hour described by `ctx`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Grid cost, forecast demand and competitor count for the hour
    ///
    /// # Returns
    ///
    /// The quoted price in currency per kWh, rounded to two decimals.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] when the grid cost is negative and
    /// [`SimError::ArithmeticDomain`] when either float input is not finite.
    pub fn price(&self, ctx: &PricingContext) -> Result<f32, SimError> {
        ensure_finite("pricing.grid_cost", ctx.grid_cost)?;
        ensure_finite("pricing.predicted_demand", ctx.predicted_demand)?;
        if ctx.grid_cost < 0.0 {
            return Err(SimError::invalid_input(
                "pricing.grid_cost",
                "must not be negative",
            ));
        }

        let base = ctx.grid_cost + BASE_MARGIN;
        let surcharge =
            SURCHARGE_PER_KWH * (ctx.predicted_demand - REFERENCE_DEMAND_KWH);
        let discount = if ctx.competitors < COMPETITION_THRESHOLD {
            COMPETITION_DISCOUNT
        } else {
            0.0
        };

        Ok(round2(base + surcharge - discount))
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(grid_cost: f32, predicted_demand: f32, competitors: u32) -> f32 {
        DynamicPricingEngine
            .price(&PricingContext { grid_cost, predicted_demand, competitors })
            .unwrap()
    }

    #[test]
    fn quote_for_on_peak_low_forecast_few_competitors() {
        // 0.40 base - 0.172 surcharge - 0.05 discount = 0.178 -> 0.18
        assert_eq!(quote(0.30, 2.8, 2), 0.18);
    }

    #[test]
    fn quote_at_reference_demand_is_cost_plus_margin() {
        assert_eq!(quote(0.30, 20.0, 5), 0.40);
        assert_eq!(quote(0.10, 20.0, 5), 0.20);
    }

    #[test]
    fn high_forecast_adds_surcharge() {
        // 0.20 base + 0.01 * 10 surcharge, no discount.
        assert_eq!(quote(0.10, 30.0, 5), 0.30);
    }

    #[test]
    fn discount_steps_off_exactly_at_threshold() {
        let sparse = quote(0.30, 20.0, COMPETITION_THRESHOLD - 1);
        let crowded = quote(0.30, 20.0, COMPETITION_THRESHOLD);
        assert!((crowded - sparse - COMPETITION_DISCOUNT).abs() < 1e-6);
        assert_eq!(crowded, quote(0.30, 20.0, COMPETITION_THRESHOLD + 5));
    }

    #[test]
    fn quote_is_monotonic_in_grid_cost_and_forecast() {
        assert!(quote(0.30, 20.0, 5) > quote(0.10, 20.0, 5));
        assert!(quote(0.30, 25.0, 5) > quote(0.30, 15.0, 5));
    }

    #[test]
    fn quote_rounds_to_cents() {
        // 0.10 + 0.10 + 0.01 * (21.4 - 20.0) = 0.214 -> 0.21
        assert_eq!(quote(0.10, 21.4, 5), 0.21);
    }

    #[test]
    fn quote_can_go_negative() {
        // 0.10 base - 0.20 surcharge - 0.05 discount = -0.15
        assert_eq!(quote(0.0, 0.0, 1), -0.15);
    }

    #[test]
    fn negative_grid_cost_is_rejected() {
        let err = DynamicPricingEngine
            .price(&PricingContext {
                grid_cost: -0.01,
                predicted_demand: 20.0,
                competitors: 2,
            })
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidInput { .. }));
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let err = DynamicPricingEngine
            .price(&PricingContext {
                grid_cost: f32::NAN,
                predicted_demand: 20.0,
                competitors: 2,
            })
            .unwrap_err();
        assert!(matches!(err, SimError::ArithmeticDomain { .. }));

        let err = DynamicPricingEngine
            .price(&PricingContext {
                grid_cost: 0.10,
                predicted_demand: f32::INFINITY,
                competitors: 2,
            })
            .unwrap_err();
        assert!(matches!(err, SimError::ArithmeticDomain { .. }));
    }
}
