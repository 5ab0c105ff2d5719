//! Record types for the IoT sensor telemetry stream.
//!
//! Three tables back this stream: `sensor_readings` for the telemetry
//! itself, `alerts` for threshold violations, and `maintenance_events` for
//! service visits. One simulator tick can touch all three.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a sensor measures. Each type has a fixed unit and a fixed
/// single-letter prefix for its reading ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingType {
    Temperature,
    Humidity,
    Pressure,
    AirQuality,
    SoilMoisture,
    SoilPh,
    SoilTemperature,
    WaterTemperature,
    DissolvedOxygen,
    Ph,
    Turbidity,
    WindSpeed,
}

impl ReadingType {
    /// Wire token stored in the `reading_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Pressure => "pressure",
            Self::AirQuality => "air_quality",
            Self::SoilMoisture => "soil_moisture",
            Self::SoilPh => "soil_ph",
            Self::SoilTemperature => "soil_temperature",
            Self::WaterTemperature => "water_temperature",
            Self::DissolvedOxygen => "dissolved_oxygen",
            Self::Ph => "ph",
            Self::Turbidity => "turbidity",
            Self::WindSpeed => "wind_speed",
        }
    }

    /// Measurement unit stored alongside each reading.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature | Self::SoilTemperature | Self::WaterTemperature => "C",
            Self::Humidity | Self::SoilMoisture => "%",
            Self::Pressure => "hPa",
            Self::AirQuality => "AQI",
            Self::SoilPh | Self::Ph => "pH",
            Self::DissolvedOxygen => "mg/L",
            Self::Turbidity => "NTU",
            Self::WindSpeed => "m/s",
        }
    }

    /// Uppercased first letter of the wire token, used to prefix reading
    /// ids. Several types share a letter; uniqueness comes from the
    /// per-sensor counter behind the prefix, not from the prefix itself.
    pub fn id_prefix(&self) -> char {
        // wire tokens are non-empty ASCII
        self.as_str()
            .chars()
            .next()
            .unwrap_or('X')
            .to_ascii_uppercase()
    }
}

impl fmt::Display for ReadingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted row of the `sensor_readings` stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub reading_id: String,
    pub sensor_id: String,
    pub reading_type: ReadingType,
    pub reading_value: f64,
    pub reading_unit: String,
    /// Remaining charge in percent, 1.0 to 100.0.
    pub battery_level: f64,
    /// Received signal strength in dBm.
    pub signal_strength: i64,
    pub reading_time: DateTime<Utc>,
    /// Free-form per-type context, e.g. `{"pm25": ...}` for air quality or
    /// `{"direction": 210}` for wind speed. Empty object when the type has
    /// no extra context.
    pub reading_data: serde_json::Value,
}

/// Conditions that raise an alert row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowBattery,
    HighTemperature,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowBattery => "low_battery",
            Self::HighTemperature => "high_temperature",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted row of the `alerts` table. Alerts are born unresolved;
/// resolution happens downstream, not in the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorAlert {
    pub alert_id: String,
    pub sensor_id: String,
    pub alert_type: AlertKind,
    pub severity: String,
    pub alert_time: DateTime<Utc>,
    pub is_resolved: bool,
    pub notes: String,
}

/// Kinds of scheduled service a technician performs on a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    BatteryReplacement,
    Calibration,
    Cleaning,
    FirmwareUpdate,
}

impl MaintenanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BatteryReplacement => "battery_replacement",
            Self::Calibration => "calibration",
            Self::Cleaning => "cleaning",
            Self::FirmwareUpdate => "firmware_update",
        }
    }
}

impl fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted row of the `maintenance_events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    pub event_id: String,
    pub sensor_id: String,
    pub event_type: MaintenanceKind,
    pub technician_id: String,
    pub event_time: DateTime<Utc>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_type_units() {
        assert_eq!(ReadingType::Temperature.unit(), "C");
        assert_eq!(ReadingType::Humidity.unit(), "%");
        assert_eq!(ReadingType::Pressure.unit(), "hPa");
        assert_eq!(ReadingType::AirQuality.unit(), "AQI");
        assert_eq!(ReadingType::DissolvedOxygen.unit(), "mg/L");
        assert_eq!(ReadingType::Turbidity.unit(), "NTU");
        assert_eq!(ReadingType::WindSpeed.unit(), "m/s");
    }

    #[test]
    fn test_reading_id_prefixes() {
        assert_eq!(ReadingType::Temperature.id_prefix(), 'T');
        assert_eq!(ReadingType::Humidity.id_prefix(), 'H');
        assert_eq!(ReadingType::AirQuality.id_prefix(), 'A');
        assert_eq!(ReadingType::WindSpeed.id_prefix(), 'W');
        // the soil types all share S; per-sensor counters keep ids unique
        assert_eq!(ReadingType::SoilMoisture.id_prefix(), 'S');
        assert_eq!(ReadingType::SoilPh.id_prefix(), 'S');
        assert_eq!(ReadingType::SoilTemperature.id_prefix(), 'S');
    }

    #[test]
    fn test_alert_and_maintenance_wire_tokens() {
        assert_eq!(AlertKind::LowBattery.as_str(), "low_battery");
        assert_eq!(AlertKind::HighTemperature.as_str(), "high_temperature");
        assert_eq!(
            MaintenanceKind::BatteryReplacement.as_str(),
            "battery_replacement"
        );
        assert_eq!(MaintenanceKind::FirmwareUpdate.as_str(), "firmware_update");
    }
}
