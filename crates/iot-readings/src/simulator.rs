//! The telemetry loop: one reading per tick, with alert and maintenance
//! side effects riding on it.

use crate::args::SensorStreamArgs;
use crate::battery::BatteryFleet;
use crate::fleet::{self, Sensor};
use crate::readings;
use anyhow::ensure;
use chrono::{Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_core::{
    AlertKind, MaintenanceEvent, MaintenanceKind, ReadingSink, ReadingType, SensorAlert,
    SensorReading,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Charge level below which a sensor may raise a low-battery alert.
pub const LOW_BATTERY_THRESHOLD: f64 = 20.0;

const LOW_BATTERY_ALERT_PROBABILITY: f64 = 0.3;
const TEMPERATURE_ALERT_PROBABILITY: f64 = 0.5;
const MAINTENANCE_PROBABILITY: f64 = 0.01;

const MAINTENANCE_KINDS: [MaintenanceKind; 4] = [
    MaintenanceKind::BatteryReplacement,
    MaintenanceKind::Calibration,
    MaintenanceKind::Cleaning,
    MaintenanceKind::FirmwareUpdate,
];

/// Fleet-wide telemetry generator. Owns the battery state, the per-sensor
/// reading-id counters, and the RNG; emits one reading (plus any side-effect
/// rows) per [`step`](Self::step).
pub struct SensorSimulator {
    batteries: BatteryFleet,
    reading_counters: BTreeMap<&'static str, i64>,
    /// Readings emitted so far; alert and maintenance ids derive from it.
    emitted: u64,
    rng: StdRng,
}

impl SensorSimulator {
    pub fn new(args: &SensorStreamArgs) -> Self {
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            batteries: BatteryFleet::new(),
            reading_counters: BTreeMap::new(),
            emitted: 0,
            rng,
        }
    }

    pub fn batteries(&self) -> &BatteryFleet {
        &self.batteries
    }

    /// Mutable charge state, e.g. to stage a low-battery scenario in tests.
    pub fn batteries_mut(&mut self) -> &mut BatteryFleet {
        &mut self.batteries
    }

    fn next_reading_id(&mut self, sensor: &'static Sensor, reading_type: ReadingType) -> String {
        let counter = self
            .reading_counters
            .entry(sensor.id)
            .or_insert(sensor.reading_id_start);
        let id = format!("{}{}", reading_type.id_prefix(), counter);
        *counter += 1;
        id
    }

    /// Produce and persist the next reading, then evaluate its side effects:
    /// a possible low-battery alert, a possible temperature-spike alert, and
    /// a rare maintenance visit (a battery replacement resets the sensor's
    /// charge). Any insert failure aborts the tick and surfaces to the
    /// caller; nothing is retried.
    pub async fn step<S: ReadingSink>(&mut self, sink: &S) -> anyhow::Result<SensorReading> {
        let now = Utc::now();
        let time_factor = readings::time_of_day_factor(now.hour());

        let sensor = fleet::random_sensor(&mut self.rng);
        let reading_type = sensor.reading_types[self.rng.gen_range(0..sensor.reading_types.len())];

        let reading = SensorReading {
            reading_id: self.next_reading_id(sensor, reading_type),
            sensor_id: sensor.id.to_string(),
            reading_type,
            reading_value: readings::reading_value(&mut self.rng, sensor, reading_type, time_factor),
            reading_unit: reading_type.unit().to_string(),
            battery_level: self.batteries.drift(sensor, time_factor, &mut self.rng),
            signal_strength: readings::signal_strength(&mut self.rng, sensor),
            reading_time: now,
            reading_data: readings::context_data(&mut self.rng, sensor, reading_type),
        };
        sink.insert_reading(&reading).await?;

        if reading.battery_level < LOW_BATTERY_THRESHOLD
            && self.rng.gen_bool(LOW_BATTERY_ALERT_PROBABILITY)
        {
            let alert = SensorAlert {
                alert_id: format!("A{}", 1000 + self.emitted),
                sensor_id: sensor.id.to_string(),
                alert_type: AlertKind::LowBattery,
                severity: "warning".to_string(),
                alert_time: now,
                is_resolved: false,
                notes: format!("Battery level below 20% ({:.1}%)", reading.battery_level),
            };
            sink.insert_alert(&alert).await?;
            tracing::info!(
                sensor_id = sensor.id,
                battery_level = reading.battery_level,
                "low battery alert"
            );
        }

        let spiked = reading_type == ReadingType::Temperature
            && sensor
                .baseline(ReadingType::Temperature)
                .is_some_and(|baseline| {
                    reading.reading_value > baseline + readings::TEMPERATURE_SPIKE
                });
        if spiked && self.rng.gen_bool(TEMPERATURE_ALERT_PROBABILITY) {
            let alert = SensorAlert {
                alert_id: format!("A{}", 2000 + self.emitted),
                sensor_id: sensor.id.to_string(),
                alert_type: AlertKind::HighTemperature,
                severity: "warning".to_string(),
                alert_time: now,
                is_resolved: false,
                notes: format!("Temperature spike detected: {:.1}C", reading.reading_value),
            };
            sink.insert_alert(&alert).await?;
            tracing::info!(
                sensor_id = sensor.id,
                reading_value = reading.reading_value,
                "temperature spike alert"
            );
        }

        if self.rng.gen_bool(MAINTENANCE_PROBABILITY) {
            let kind = MAINTENANCE_KINDS[self.rng.gen_range(0..MAINTENANCE_KINDS.len())];
            let event = MaintenanceEvent {
                event_id: format!("M{}", 1000 + self.emitted),
                sensor_id: sensor.id.to_string(),
                event_type: kind,
                technician_id: format!("T{:03}", self.rng.gen_range(1..=5)),
                event_time: now,
                notes: format!("Scheduled {kind}"),
            };
            sink.insert_maintenance(&event).await?;
            if kind == MaintenanceKind::BatteryReplacement {
                let fresh = self.batteries.replace(sensor.id, &mut self.rng);
                tracing::info!(sensor_id = sensor.id, battery_level = fresh, "battery replaced");
            }
            tracing::info!(sensor_id = sensor.id, kind = %kind, "maintenance event");
        }

        self.emitted += 1;
        Ok(reading)
    }
}

/// Drive a [`SensorSimulator`] against `sink` until the configured limit is
/// reached or a shutdown message arrives. Returns the number of readings
/// inserted (side-effect rows do not count toward the limit).
pub async fn run_sensor_stream<S: ReadingSink>(
    sink: &S,
    args: &SensorStreamArgs,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<u64> {
    ensure!(
        args.interval.is_finite() && args.interval >= 0.0,
        "interval must be a non-negative number of seconds, got {}",
        args.interval
    );

    let mut simulator = SensorSimulator::new(args);
    let interval = Duration::from_secs_f64(args.interval);
    let mut emitted: u64 = 0;

    tracing::info!(
        interval_secs = args.interval,
        limit = args.limit,
        "starting sensor telemetry stream"
    );

    while args.limit.map_or(true, |limit| emitted < limit) {
        match shutdown.try_recv() {
            Err(TryRecvError::Empty) => {}
            _ => break,
        }

        let reading = simulator.step(sink).await?;
        emitted += 1;
        tracing::info!(
            reading_type = %reading.reading_type,
            sensor_id = %reading.sensor_id,
            reading_value = reading.reading_value,
            battery_level = reading.battery_level,
            "inserted reading"
        );

        if args.limit.is_some_and(|limit| emitted >= limit) {
            break;
        }

        tokio::select! {
            _ = shutdown.recv() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::info!(emitted, "sensor telemetry stream stopped");
    Ok(emitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::SENSORS;
    use sim_core::testing::RecordingSink;

    fn args_with_seed(seed: u64) -> SensorStreamArgs {
        SensorStreamArgs {
            interval: 0.0,
            limit: None,
            seed: Some(seed),
        }
    }

    #[tokio::test]
    async fn test_reading_ids_count_up_per_sensor() {
        let mut simulator = SensorSimulator::new(&args_with_seed(42));
        let sink = RecordingSink::new();

        for _ in 0..200 {
            simulator.step(&sink).await.unwrap();
        }

        let readings = sink.readings().await;
        assert_eq!(readings.len(), 200);
        for sensor in &SENSORS {
            let numeric_ids: Vec<i64> = readings
                .iter()
                .filter(|reading| reading.sensor_id == sensor.id)
                .map(|reading| reading.reading_id[1..].parse().unwrap())
                .collect();
            // dense and strictly increasing from the sensor's start value
            for (offset, id) in numeric_ids.iter().enumerate() {
                assert_eq!(*id, sensor.reading_id_start + offset as i64);
            }
        }
    }

    #[tokio::test]
    async fn test_readings_only_use_supported_types() {
        let mut simulator = SensorSimulator::new(&args_with_seed(7));
        let sink = RecordingSink::new();

        for _ in 0..300 {
            simulator.step(&sink).await.unwrap();
        }

        for reading in sink.readings().await {
            let sensor = fleet::sensor(&reading.sensor_id).unwrap();
            assert!(sensor.supports(reading.reading_type));
            assert_eq!(reading.reading_unit, reading.reading_type.unit());
            assert!((1.0..=100.0).contains(&reading.battery_level));
        }
    }

    #[tokio::test]
    async fn test_low_batteries_raise_alerts() {
        let mut simulator = SensorSimulator::new(&args_with_seed(11));
        for sensor in &SENSORS {
            simulator.batteries_mut().set_level(sensor.id, 5.0);
        }
        let sink = RecordingSink::new();

        for _ in 0..200 {
            simulator.step(&sink).await.unwrap();
        }

        let alerts = sink.alerts().await;
        let low_battery: Vec<_> = alerts
            .iter()
            .filter(|alert| alert.alert_type == AlertKind::LowBattery)
            .collect();
        assert!(
            !low_battery.is_empty(),
            "no low-battery alerts from a fleet at 5%"
        );
        for alert in low_battery {
            assert_eq!(alert.severity, "warning");
            assert!(!alert.is_resolved);
            assert!(alert.notes.starts_with("Battery level below 20%"));
        }
    }

    #[tokio::test]
    async fn test_healthy_batteries_raise_no_battery_alerts() {
        let mut simulator = SensorSimulator::new(&args_with_seed(3));
        for sensor in &SENSORS {
            simulator.batteries_mut().set_level(sensor.id, 95.0);
        }
        let sink = RecordingSink::new();

        // short run: drain is at most 0.05% per tick, so no sensor gets low
        for _ in 0..100 {
            simulator.step(&sink).await.unwrap();
        }

        assert!(sink
            .alerts()
            .await
            .iter()
            .all(|alert| alert.alert_type != AlertKind::LowBattery));
    }

    #[tokio::test]
    async fn test_maintenance_visits_are_rare_but_happen() {
        let mut simulator = SensorSimulator::new(&args_with_seed(42));
        let sink = RecordingSink::new();

        for _ in 0..2000 {
            simulator.step(&sink).await.unwrap();
        }

        let visits = sink.maintenance().await;
        // 1% per tick: 2000 ticks should land well inside this band
        assert!(
            (2..=60).contains(&visits.len()),
            "{} maintenance visits in 2000 ticks",
            visits.len()
        );
        for visit in &visits {
            assert!(visit.event_id.starts_with('M'));
            let technician: i64 = visit.technician_id[1..].parse().unwrap();
            assert!((1..=5).contains(&technician));
            assert_eq!(visit.notes, format!("Scheduled {}", visit.event_type));
        }
    }

    #[tokio::test]
    async fn test_battery_replacement_restores_the_charge() {
        let mut simulator = SensorSimulator::new(&args_with_seed(42));
        for sensor in &SENSORS {
            simulator.batteries_mut().set_level(sensor.id, 3.0);
        }
        let sink = RecordingSink::new();

        for _ in 0..3000 {
            simulator.step(&sink).await.unwrap();
        }

        let replacements: Vec<_> = sink
            .maintenance()
            .await
            .into_iter()
            .filter(|visit| visit.event_type == MaintenanceKind::BatteryReplacement)
            .collect();
        assert!(!replacements.is_empty(), "no replacements in 3000 ticks");
        for visit in &replacements {
            let level = simulator.batteries().level(&visit.sensor_id).unwrap();
            // replaced packs start at 90-100 and drain slowly afterwards
            assert!(level > 20.0, "{} still at {level}% after replacement", visit.sensor_id);
        }
    }

    #[tokio::test]
    async fn test_insert_failure_aborts_the_tick() {
        let mut simulator = SensorSimulator::new(&args_with_seed(9));
        let sink = RecordingSink::fail_after_readings(2);

        simulator.step(&sink).await.unwrap();
        simulator.step(&sink).await.unwrap();
        let err = simulator.step(&sink).await;
        assert!(err.is_err());
        assert_eq!(sink.readings().await.len(), 2);
    }

    #[tokio::test]
    async fn test_run_honors_the_limit() {
        let mut args = args_with_seed(21);
        args.limit = Some(7);
        let sink = RecordingSink::new();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let emitted = run_sensor_stream(&sink, &args, shutdown_rx).await.unwrap();
        assert_eq!(emitted, 7);
        assert_eq!(sink.readings().await.len(), 7);
    }

    #[tokio::test]
    async fn test_run_stops_before_the_first_tick_on_shutdown() {
        let args = args_with_seed(1);
        let sink = RecordingSink::new();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        shutdown_tx.send(()).unwrap();

        let emitted = run_sensor_stream(&sink, &args, shutdown_rx).await.unwrap();
        assert_eq!(emitted, 0);
        assert!(sink.readings().await.is_empty());
    }
}
