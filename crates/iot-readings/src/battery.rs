//! Mutable charge state for the fleet.

use crate::fleet::{PowerSource, Sensor, SENSORS};
use rand::Rng;
use std::collections::BTreeMap;

/// Charge levels per sensor, seeded from the catalog's initial values and
/// owned by the simulator rather than living in shared globals.
#[derive(Debug)]
pub struct BatteryFleet {
    levels: BTreeMap<&'static str, f64>,
}

impl BatteryFleet {
    pub fn new() -> Self {
        Self {
            levels: SENSORS
                .iter()
                .map(|sensor| (sensor.id, sensor.initial_battery))
                .collect(),
        }
    }

    pub fn level(&self, sensor_id: &str) -> Option<f64> {
        self.levels.get(sensor_id).copied()
    }

    /// Force a sensor's charge level, e.g. to stage a low-battery scenario.
    pub fn set_level(&mut self, sensor_id: &'static str, level: f64) {
        self.levels.insert(sensor_id, level);
    }

    /// Advance one tick of charge for `sensor` and return the new level.
    ///
    /// Solar units move by `0.1 x time_factor`, charging through daylight
    /// hours and draining overnight. Battery units drain by a small random
    /// amount. Levels never leave `1.0..=100.0`.
    pub fn drift<R: Rng>(&mut self, sensor: &Sensor, time_factor: f64, rng: &mut R) -> f64 {
        let current = self.level(sensor.id).unwrap_or(sensor.initial_battery);
        let next = match sensor.power {
            PowerSource::Solar => (current + 0.1 * time_factor).clamp(1.0, 100.0),
            PowerSource::Battery => (current - rng.gen_range(0.01..=0.05)).max(1.0),
        };
        self.levels.insert(sensor.id, next);
        next
    }

    /// Fresh pack after a battery replacement.
    pub fn replace<R: Rng>(&mut self, sensor_id: &'static str, rng: &mut R) -> f64 {
        let next = rng.gen_range(90.0..=100.0);
        self.levels.insert(sensor_id, next);
        next
    }
}

impl Default for BatteryFleet {
    fn default() -> Self {
        Self::new()
    }
}
