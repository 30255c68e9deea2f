//! Threshold policy mapping battery state and market conditions to an action.

use std::fmt;

use crate::error::{SimError, ensure_finite};
use crate::tariff::GridPeriod;

/// State of charge below which charging is considered.
pub const CHARGE_SOC_PCT: f32 = 30.0;
/// State of charge above which discharging is considered.
pub const DISCHARGE_SOC_PCT: f32 = 70.0;
/// Sell price above which discharging is worthwhile.
pub const DISCHARGE_PRICE: f32 = 0.25;

/// What the battery should do in the coming hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryAction {
    Charge,
    Discharge,
    Standby,
}

impl fmt::Display for BatteryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryAction::Charge => write!(f, "charge"),
            BatteryAction::Discharge => write!(f, "discharge"),
            BatteryAction::Standby => write!(f, "standby"),
        }
    }
}

/// Inputs for one action decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocContext {
    /// Current sell price in currency per kWh.
    pub price: f32,
    /// Battery state of charge in percent, 0 to 100.
    pub soc_pct: f32,
    /// Tariff period of the decision hour.
    pub period: GridPeriod,
}

/// Two-threshold dispatch policy.
///
/// Charges when the battery is low and grid energy is cheap, discharges when
/// the battery is full enough and the price makes it worthwhile, and stands
/// by otherwise. Both comparisons are strict, so a battery sitting exactly on
/// a threshold stays on standby.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionPolicy;

impl ActionPolicy {
    /// Picks the action for the hour described by `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ArithmeticDomain`] when the price or state of
    /// charge is not finite, and [`SimError::InvalidInput`] when the state of
    /// charge falls outside 0 to 100 percent.
    pub fn decide(&self, ctx: &SocContext) -> Result<BatteryAction, SimError> {
        ensure_finite("policy.price", ctx.price)?;
        ensure_finite("policy.soc_pct", ctx.soc_pct)?;
        if !(0.0..=100.0).contains(&ctx.soc_pct) {
            return Err(SimError::invalid_input(
                "policy.soc_pct",
                "must be between 0 and 100",
            ));
        }

        if ctx.soc_pct < CHARGE_SOC_PCT && ctx.period == GridPeriod::OffPeak {
            return Ok(BatteryAction::Charge);
        }
        if ctx.soc_pct > DISCHARGE_SOC_PCT && ctx.price > DISCHARGE_PRICE {
            return Ok(BatteryAction::Discharge);
        }
        Ok(BatteryAction::Standby)
    }
}
