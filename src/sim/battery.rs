//! Energy store used by the dispatch loop.

/// A battery with a fixed capacity and a current energy level.
///
/// Levels are kept in kWh and clamped to the physical range on every
/// mutation, so the state can never report more energy than the capacity
/// or less than empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryState {
    capacity_kwh: f32,
    level_kwh: f32,
}

impl BatteryState {
    /// Creates an empty battery. The caller validates the capacity.
    pub(crate) fn empty(capacity_kwh: f32) -> Self {
        Self { capacity_kwh, level_kwh: 0.0 }
    }

    /// Charges up to `max_amount_kwh`, limited by the remaining headroom.
    ///
    /// Returns the energy actually accepted.
    pub(crate) fn charge(&mut self, max_amount_kwh: f32) -> f32 {
        let headroom = self.capacity_kwh - self.level_kwh;
        let accepted = max_amount_kwh.min(headroom).max(0.0);
        self.level_kwh =
            (self.level_kwh + accepted).clamp(0.0, self.capacity_kwh);
        accepted
    }

    /// Draws up to `demand_kwh` from storage.
    ///
    /// Returns the energy actually delivered; the rest has to come from
    /// the grid.
    pub(crate) fn serve(&mut self, demand_kwh: f32) -> f32 {
        let delivered = demand_kwh.min(self.level_kwh).max(0.0);
        self.level_kwh = (self.level_kwh - delivered).max(0.0);
        delivered
    }

    pub fn capacity_kwh(&self) -> f32 {
        self.capacity_kwh
    }

    pub fn level_kwh(&self) -> f32 {
        self.level_kwh
    }

    /// State of charge in percent, 0 to 100.
    pub fn soc_pct(&self) -> f32 {
        if self.capacity_kwh <= 0.0 {
            return 0.0;
        }
        (self.level_kwh / self.capacity_kwh * 100.0).clamp(0.0, 100.0)
    }
}
