//! Hourly demand profiles: validated containers and a seeded generator.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{SimError, ensure_finite};
use crate::tariff::HOURS_PER_DAY;

/// One day of hourly energy demand in kWh.
///
/// Holds exactly [`HOURS_PER_DAY`] non-negative finite values and is never
/// mutated after construction; the simulator only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandProfile {
    values: Vec<f32>,
}

impl DemandProfile {
    /// Builds a profile from explicit hourly values.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] unless exactly 24 non-negative
    /// values are given, or [`SimError::ArithmeticDomain`] on NaN or infinite
    /// values.
    pub fn new(values: Vec<f32>) -> Result<Self, SimError> {
        if values.len() != HOURS_PER_DAY {
            return Err(SimError::invalid_input(
                "demand.values",
                format!("must hold exactly {HOURS_PER_DAY} values, got {}", values.len()),
            ));
        }
        let mut checked = Vec::with_capacity(HOURS_PER_DAY);
        for (hour, value) in values.into_iter().enumerate() {
            ensure_finite(&format!("demand.values[{hour}]"), value)?;
            if value < 0.0 {
                return Err(SimError::invalid_input(
                    &format!("demand.values[{hour}]"),
                    "must be >= 0",
                ));
            }
            // `+ 0.0` drops the sign off negative zero.
            checked.push(value + 0.0);
        }
        Ok(Self { values: checked })
    }

    /// Samples 24 values uniformly from `[min_kwh, max_kwh]` with an explicit
    /// seed; identical seeds always reproduce the same profile.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] when the range is negative, empty
    /// in the wrong direction, or non-finite.
    pub fn random(seed: u64, min_kwh: f32, max_kwh: f32) -> Result<Self, SimError> {
        ensure_finite("demand.min_kwh", min_kwh)?;
        ensure_finite("demand.max_kwh", max_kwh)?;
        if min_kwh < 0.0 {
            return Err(SimError::invalid_input("demand.min_kwh", "must be >= 0"));
        }
        if max_kwh < min_kwh {
            return Err(SimError::invalid_input(
                "demand.max_kwh",
                "must be >= demand.min_kwh",
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..HOURS_PER_DAY)
            .map(|_| rng.random_range(min_kwh..=max_kwh))
            .collect();
        Self::new(values)
    }

    /// Constant demand in every slot.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] when `kwh` is negative, or
    /// [`SimError::ArithmeticDomain`] when it is non-finite.
    pub fn flat(kwh: f32) -> Result<Self, SimError> {
        Self::new(vec![kwh; HOURS_PER_DAY])
    }

    /// Demand for `hour`, wrapping indexes past the end of the day.
    pub fn get(&self, hour: usize) -> f32 {
        self.values[hour % HOURS_PER_DAY]
    }

    /// All 24 values in hour order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_profile_is_deterministic_per_seed() {
        let a = DemandProfile::random(100, 1.0, 5.0).expect("valid range");
        let b = DemandProfile::random(100, 1.0, 5.0).expect("valid range");
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = DemandProfile::random(100, 1.0, 5.0).expect("valid range");
        let b = DemandProfile::random(101, 1.0, 5.0).expect("valid range");
        assert_ne!(a, b);
    }

    #[test]
    fn random_values_stay_in_range() {
        let profile = DemandProfile::random(7, 1.0, 5.0).expect("valid range");
        assert_eq!(profile.values().len(), HOURS_PER_DAY);
        for &v in profile.values() {
            assert!((1.0..=5.0).contains(&v), "value {v} out of range");
        }
    }

    #[test]
    fn degenerate_range_yields_flat_profile() {
        let profile = DemandProfile::random(3, 2.5, 2.5).expect("valid range");
        assert!(profile.values().iter().all(|&v| v == 2.5));
    }

    #[test]
    fn new_rejects_wrong_length() {
        let err = DemandProfile::new(vec![1.0; 23]).expect_err("must fail");
        assert!(matches!(err, SimError::InvalidInput { .. }));
    }

    #[test]
    fn new_rejects_negative_value() {
        let mut values = vec![1.0; HOURS_PER_DAY];
        values[11] = -0.5;
        let err = DemandProfile::new(values).expect_err("must fail");
        assert!(err.to_string().contains("values[11]"));
    }

    #[test]
    fn new_rejects_nan() {
        let mut values = vec![1.0; HOURS_PER_DAY];
        values[0] = f32::NAN;
        let err = DemandProfile::new(values).expect_err("must fail");
        assert!(matches!(err, SimError::ArithmeticDomain { .. }));
    }

    #[test]
    fn negative_zero_is_normalized() {
        let mut values = vec![1.0; HOURS_PER_DAY];
        values[4] = -0.0;
        let profile = DemandProfile::new(values).expect("valid profile");
        assert!(profile.get(4).is_sign_positive());
    }

    #[test]
    fn random_rejects_inverted_range() {
        let err = DemandProfile::random(0, 5.0, 1.0).expect_err("must fail");
        assert!(matches!(err, SimError::InvalidInput { .. }));
    }

    #[test]
    fn get_wraps_daily() {
        let profile = DemandProfile::flat(2.0).expect("valid profile");
        assert_eq!(profile.get(24), profile.get(0));
        assert_eq!(profile.get(30), profile.get(6));
    }
}
