//! Reading-value synthesis: baselines, the daily cycle, and per-type context.

use crate::fleet::Sensor;
use rand::Rng;
use serde_json::{json, Map, Value};
use sim_core::ReadingType;

/// Chance that an anomaly-prone sensor spikes on a given reading.
pub const ANOMALY_PROBABILITY: f64 = 0.05;

/// Size of a temperature anomaly spike, also the threshold above baseline
/// that qualifies a reading as a spike for alerting.
pub const TEMPERATURE_SPIKE: f64 = 8.0;

/// Size of an air-quality anomaly spike, in AQI points.
pub const AIR_QUALITY_SPIKE: f64 = 30.0;

/// Daily-cycle factor for `hour` (0-23): a sine with a 24-hour period,
/// positive through the morning and negative through the evening. Scales the
/// time-sensitive variations and the solar charge rate.
pub fn time_of_day_factor(hour: u32) -> f64 {
    (std::f64::consts::PI * f64::from(hour) / 12.0).sin()
}

/// Synthesize one reading value: the sensor's baseline for the type plus a
/// type-specific variation. Stable quantities (pH, pressure) jitter within a
/// narrow band; weather-driven ones swing with `time_factor`.
pub fn reading_value<R: Rng>(
    rng: &mut R,
    sensor: &Sensor,
    reading_type: ReadingType,
    time_factor: f64,
) -> f64 {
    let baseline = sensor.baseline(reading_type).unwrap_or(0.0);
    let variation = match reading_type {
        ReadingType::Temperature => {
            let mut variation = 4.0 * time_factor + (rng.gen::<f64>() * 0.6 - 0.3);
            if sensor.anomaly_prone && rng.gen_bool(ANOMALY_PROBABILITY) {
                variation += TEMPERATURE_SPIKE;
            }
            variation
        }
        // humidity moves against temperature
        ReadingType::Humidity => -10.0 * time_factor + (rng.gen::<f64>() * 5.0 - 2.5),
        ReadingType::Pressure => rng.gen::<f64>() * 6.0 - 3.0,
        ReadingType::AirQuality => {
            let mut variation = 10.0 * time_factor + (rng.gen::<f64>() * 8.0 - 4.0);
            if sensor.anomaly_prone && rng.gen_bool(ANOMALY_PROBABILITY) {
                variation += AIR_QUALITY_SPIKE;
            }
            variation
        }
        ReadingType::SoilMoisture => rng.gen::<f64>() * 5.0 - 2.5,
        ReadingType::SoilPh => rng.gen::<f64>() * 0.3 - 0.15,
        ReadingType::SoilTemperature => 2.0 * time_factor + (rng.gen::<f64>() * 0.4 - 0.2),
        ReadingType::WaterTemperature => 1.0 * time_factor + (rng.gen::<f64>() * 0.4 - 0.2),
        ReadingType::DissolvedOxygen => -0.5 * time_factor + (rng.gen::<f64>() * 0.6 - 0.3),
        ReadingType::Ph => rng.gen::<f64>() * 0.4 - 0.2,
        ReadingType::Turbidity => rng.gen::<f64>() * 2.0 - 1.0,
        ReadingType::WindSpeed => 3.0 * time_factor + (rng.gen::<f64>() * 4.0 - 2.0),
    };
    baseline + variation
}

/// Received signal strength at this tick: the sensor's base dBm plus a few
/// dB of fading.
pub fn signal_strength<R: Rng>(rng: &mut R, sensor: &Sensor) -> i64 {
    sensor.base_signal + rng.gen_range(-5..=5)
}

/// Context fields persisted in the `reading_data` JSON column alongside a
/// reading. Companion measurements are drawn around the sensor's baselines;
/// types with no companions get an empty object.
pub fn context_data<R: Rng>(rng: &mut R, sensor: &Sensor, reading_type: ReadingType) -> Value {
    let mut data = Map::new();
    match reading_type {
        ReadingType::Temperature => {
            if sensor.supports(ReadingType::Humidity) {
                let humidity = sensor.baseline(ReadingType::Humidity).unwrap_or(60.0);
                data.insert(
                    "humidity".to_string(),
                    json!(humidity + (rng.gen::<f64>() * 10.0 - 5.0)),
                );
            }
            if sensor.supports(ReadingType::Pressure) {
                let pressure = sensor.baseline(ReadingType::Pressure).unwrap_or(1010.0);
                data.insert(
                    "pressure".to_string(),
                    json!(pressure + (rng.gen::<f64>() * 5.0 - 2.5)),
                );
            }
        }
        ReadingType::Humidity => {
            if sensor.supports(ReadingType::Temperature) {
                let temperature = sensor.baseline(ReadingType::Temperature).unwrap_or(20.0);
                data.insert(
                    "temperature".to_string(),
                    json!(temperature + (rng.gen::<f64>() * 2.0 - 1.0)),
                );
            }
        }
        ReadingType::AirQuality => {
            data.insert("pm25".to_string(), json!(12.0 + rng.gen::<f64>() * 8.0));
            data.insert("pm10".to_string(), json!(25.0 + rng.gen::<f64>() * 15.0));
            data.insert("o3".to_string(), json!(0.03 + rng.gen::<f64>() * 0.02));
            data.insert("no2".to_string(), json!(0.02 + rng.gen::<f64>() * 0.015));
        }
        ReadingType::SoilMoisture => {
            let soil_temp = sensor
                .baseline(ReadingType::SoilTemperature)
                .unwrap_or(15.0);
            data.insert("depth".to_string(), json!(10));
            data.insert(
                "temperature".to_string(),
                json!(soil_temp + (rng.gen::<f64>() * 2.0 - 1.0)),
            );
        }
        ReadingType::SoilPh => {
            let moisture = sensor.baseline(ReadingType::SoilMoisture).unwrap_or(30.0);
            data.insert("depth".to_string(), json!(10));
            data.insert(
                "moisture".to_string(),
                json!(moisture + (rng.gen::<f64>() * 5.0 - 2.5)),
            );
        }
        ReadingType::WaterTemperature => {
            data.insert("depth".to_string(), json!(0.5));
        }
        ReadingType::DissolvedOxygen => {
            let water_temp = sensor
                .baseline(ReadingType::WaterTemperature)
                .unwrap_or(17.0);
            data.insert(
                "temperature".to_string(),
                json!(water_temp + (rng.gen::<f64>() - 0.5)),
            );
            data.insert("depth".to_string(), json!(0.5));
        }
        ReadingType::Pressure => {
            data.insert("altitude".to_string(), json!(rng.gen_range(0..=400)));
        }
        ReadingType::WindSpeed => {
            data.insert("direction".to_string(), json!(rng.gen_range(0..=359)));
        }
        ReadingType::SoilTemperature | ReadingType::Ph | ReadingType::Turbidity => {}
    }
    Value::Object(data)
}
