//! Two-period grid tariff: per-hour purchase price, sale price, and period flag.

use std::fmt;

use crate::error::{SimError, ensure_finite};

/// Number of hourly slots in one simulated day.
pub const HOURS_PER_DAY: usize = 24;

/// Grid tariff period for one hour slot.
///
/// Off-peak detection keys off this explicit flag; the dispatch loop never
/// compares prices for equality to decide when charging is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPeriod {
    /// Low-price hours; the battery may charge from the grid.
    OffPeak,
    /// High-price hours; charging is never scheduled.
    OnPeak,
}

impl fmt::Display for GridPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridPeriod::OffPeak => write!(f, "off-peak"),
            GridPeriod::OnPeak => write!(f, "on-peak"),
        }
    }
}

/// Prices and period for a single hour slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TariffSlot {
    /// Grid purchase price (EUR/kWh).
    pub grid_cost: f32,
    /// Retail sale price (EUR/kWh).
    pub sell_price: f32,
    /// Off-peak or on-peak flag for this hour.
    pub period: GridPeriod,
}

/// Immutable per-hour tariff for one full day.
///
/// Holds exactly [`HOURS_PER_DAY`] slots; all prices are validated finite and
/// non-negative at construction, so downstream accounting never re-checks.
///
/// # Examples
///
/// ```
/// use bess_sim::tariff::TariffSchedule;
///
/// let tariff = TariffSchedule::reference();
/// assert!(tariff.is_off_peak(3));
/// assert!(!tariff.is_off_peak(12));
/// assert_eq!(tariff.slot(12).grid_cost, 0.30);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TariffSchedule {
    slots: Vec<TariffSlot>,
}

impl TariffSchedule {
    /// Builds a schedule from explicit slots.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] unless exactly 24 slots are given
    /// with non-negative prices, or [`SimError::ArithmeticDomain`] on NaN or
    /// infinite prices.
    pub fn new(slots: Vec<TariffSlot>) -> Result<Self, SimError> {
        if slots.len() != HOURS_PER_DAY {
            return Err(SimError::invalid_input(
                "tariff.slots",
                format!("must hold exactly {HOURS_PER_DAY} slots, got {}", slots.len()),
            ));
        }
        let mut checked = Vec::with_capacity(HOURS_PER_DAY);
        for (hour, slot) in slots.into_iter().enumerate() {
            ensure_finite(&format!("tariff.slots[{hour}].grid_cost"), slot.grid_cost)?;
            ensure_finite(&format!("tariff.slots[{hour}].sell_price"), slot.sell_price)?;
            if slot.grid_cost < 0.0 {
                return Err(SimError::invalid_input(
                    &format!("tariff.slots[{hour}].grid_cost"),
                    "must be >= 0",
                ));
            }
            if slot.sell_price < 0.0 {
                return Err(SimError::invalid_input(
                    &format!("tariff.slots[{hour}].sell_price"),
                    "must be >= 0",
                ));
            }
            checked.push(TariffSlot {
                // `+ 0.0` drops the sign off negative zero.
                grid_cost: slot.grid_cost + 0.0,
                sell_price: slot.sell_price + 0.0,
                period: slot.period,
            });
        }
        Ok(Self { slots: checked })
    }

    /// Builds a two-level schedule: `off_peak_hours` get `off_peak_price` and
    /// the [`GridPeriod::OffPeak`] flag, every other hour gets `on_peak_price`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] when an hour index is out of range
    /// or any price is negative or non-finite.
    pub fn from_prices(
        off_peak_price: f32,
        on_peak_price: f32,
        sell_price: f32,
        off_peak_hours: &[usize],
    ) -> Result<Self, SimError> {
        for &hour in off_peak_hours {
            if hour >= HOURS_PER_DAY {
                return Err(SimError::invalid_input(
                    "tariff.off_peak_hours",
                    format!("hour {hour} is out of range (0-{})", HOURS_PER_DAY - 1),
                ));
            }
        }
        let slots = (0..HOURS_PER_DAY)
            .map(|hour| {
                if off_peak_hours.contains(&hour) {
                    TariffSlot {
                        grid_cost: off_peak_price,
                        sell_price,
                        period: GridPeriod::OffPeak,
                    }
                } else {
                    TariffSlot {
                        grid_cost: on_peak_price,
                        sell_price,
                        period: GridPeriod::OnPeak,
                    }
                }
            })
            .collect();
        Self::new(slots)
    }

    /// The reference tariff: hours 0-7 and 21-23 off-peak at 0.10 EUR/kWh,
    /// hours 8-20 on-peak at 0.30, flat sale price 0.29.
    pub fn reference() -> Self {
        let slots = (0..HOURS_PER_DAY)
            .map(|hour| {
                let off_peak = hour < 8 || hour > 20;
                TariffSlot {
                    grid_cost: if off_peak { 0.10 } else { 0.30 },
                    sell_price: 0.29,
                    period: if off_peak {
                        GridPeriod::OffPeak
                    } else {
                        GridPeriod::OnPeak
                    },
                }
            })
            .collect();
        Self { slots }
    }

    /// Returns the slot for `hour`, wrapping indexes past the end of the day.
    pub fn slot(&self, hour: usize) -> &TariffSlot {
        &self.slots[hour % HOURS_PER_DAY]
    }

    /// Returns `true` when `hour` is flagged off-peak.
    pub fn is_off_peak(&self, hour: usize) -> bool {
        self.slot(hour).period == GridPeriod::OffPeak
    }

    /// All 24 slots in hour order.
    pub fn slots(&self) -> &[TariffSlot] {
        &self.slots
    }
}
