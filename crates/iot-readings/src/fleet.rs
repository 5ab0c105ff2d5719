//! The deployed sensor fleet.
//!
//! Everything static about a sensor lives here: what it measures, the
//! baseline each measurement drifts around, how it is powered, and where
//! its reading-id counter starts. The mutable charge state lives in
//! [`crate::battery::BatteryFleet`].

use rand::Rng;
use sim_core::ReadingType;

/// What powers a sensor, and with it how its charge level behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSource {
    Battery,
    Solar,
}

/// Static description of one deployed sensor.
#[derive(Debug)]
pub struct Sensor {
    pub id: &'static str,
    pub kind: &'static str,
    /// Reading types this sensor emits.
    pub reading_types: &'static [ReadingType],
    /// Baselines per reading type. May cover more types than the sensor
    /// emits; the extras feed the context fields of related readings.
    pub baselines: &'static [(ReadingType, f64)],
    pub power: PowerSource,
    pub initial_battery: f64,
    /// Typical received signal strength at the mounting point, in dBm.
    pub base_signal: i64,
    /// First value of this sensor's reading-id counter.
    pub reading_id_start: i64,
    /// Whether the sensor occasionally reports anomalous spikes.
    pub anomaly_prone: bool,
}

impl Sensor {
    pub fn supports(&self, reading_type: ReadingType) -> bool {
        self.reading_types.contains(&reading_type)
    }

    pub fn baseline(&self, reading_type: ReadingType) -> Option<f64> {
        self.baselines
            .iter()
            .find(|(candidate, _)| *candidate == reading_type)
            .map(|(_, value)| *value)
    }
}

pub const SENSORS: [Sensor; 10] = [
    Sensor {
        id: "S001",
        kind: "Environmental",
        reading_types: &[ReadingType::Temperature, ReadingType::Humidity],
        baselines: &[
            (ReadingType::Temperature, 18.0),
            (ReadingType::Humidity, 65.0),
        ],
        power: PowerSource::Battery,
        initial_battery: 90.0,
        base_signal: -55,
        reading_id_start: 10000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S002",
        kind: "Weather",
        reading_types: &[
            ReadingType::Temperature,
            ReadingType::Humidity,
            ReadingType::Pressure,
        ],
        baselines: &[
            (ReadingType::Temperature, 17.0),
            (ReadingType::Humidity, 70.0),
            (ReadingType::Pressure, 1010.0),
        ],
        power: PowerSource::Solar,
        initial_battery: 85.0,
        base_signal: -65,
        reading_id_start: 20000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S003",
        kind: "Air Quality",
        reading_types: &[
            ReadingType::Temperature,
            ReadingType::Humidity,
            ReadingType::AirQuality,
        ],
        baselines: &[
            (ReadingType::Temperature, 19.0),
            (ReadingType::Humidity, 60.0),
            (ReadingType::AirQuality, 45.0),
        ],
        power: PowerSource::Battery,
        initial_battery: 25.0,
        base_signal: -75,
        reading_id_start: 30000,
        anomaly_prone: true,
    },
    Sensor {
        id: "S004",
        kind: "Environmental",
        reading_types: &[ReadingType::Temperature, ReadingType::Humidity],
        baselines: &[
            (ReadingType::Temperature, 22.0),
            (ReadingType::Humidity, 50.0),
        ],
        power: PowerSource::Battery,
        initial_battery: 80.0,
        base_signal: -60,
        reading_id_start: 40000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S005",
        kind: "Weather",
        reading_types: &[
            ReadingType::Temperature,
            ReadingType::Humidity,
            ReadingType::Pressure,
            ReadingType::WindSpeed,
        ],
        baselines: &[
            (ReadingType::Temperature, 17.5),
            (ReadingType::Humidity, 65.0),
            (ReadingType::Pressure, 995.0),
            (ReadingType::WindSpeed, 8.0),
        ],
        power: PowerSource::Solar,
        initial_battery: 95.0,
        base_signal: -70,
        reading_id_start: 50000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S006",
        kind: "Air Quality",
        reading_types: &[
            ReadingType::Temperature,
            ReadingType::Humidity,
            ReadingType::AirQuality,
        ],
        baselines: &[
            (ReadingType::Temperature, 20.0),
            (ReadingType::Humidity, 55.0),
            (ReadingType::AirQuality, 50.0),
        ],
        power: PowerSource::Battery,
        initial_battery: 60.0,
        base_signal: -65,
        reading_id_start: 60000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S007",
        kind: "Soil",
        reading_types: &[
            ReadingType::SoilMoisture,
            ReadingType::SoilPh,
            ReadingType::SoilTemperature,
        ],
        baselines: &[
            (ReadingType::SoilMoisture, 30.0),
            (ReadingType::SoilPh, 6.5),
            (ReadingType::SoilTemperature, 15.0),
            (ReadingType::Temperature, 16.0),
            (ReadingType::Humidity, 75.0),
        ],
        power: PowerSource::Battery,
        initial_battery: 55.0,
        base_signal: -72,
        reading_id_start: 70000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S008",
        kind: "Water Quality",
        reading_types: &[
            ReadingType::WaterTemperature,
            ReadingType::DissolvedOxygen,
            ReadingType::Ph,
            ReadingType::Turbidity,
        ],
        baselines: &[
            (ReadingType::WaterTemperature, 17.0),
            (ReadingType::DissolvedOxygen, 8.0),
            (ReadingType::Ph, 7.2),
            (ReadingType::Turbidity, 5.0),
            (ReadingType::Temperature, 17.0),
            (ReadingType::Humidity, 85.0),
        ],
        power: PowerSource::Battery,
        initial_battery: 73.0,
        base_signal: -68,
        reading_id_start: 80000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S009",
        kind: "Environmental",
        reading_types: &[ReadingType::Temperature, ReadingType::Humidity],
        baselines: &[
            (ReadingType::Temperature, 18.5),
            (ReadingType::Humidity, 60.0),
        ],
        power: PowerSource::Battery,
        initial_battery: 45.0,
        base_signal: -80,
        reading_id_start: 90000,
        anomaly_prone: false,
    },
    Sensor {
        id: "S010",
        kind: "Weather",
        reading_types: &[
            ReadingType::Temperature,
            ReadingType::Humidity,
            ReadingType::Pressure,
            ReadingType::WindSpeed,
        ],
        baselines: &[
            (ReadingType::Temperature, 16.5),
            (ReadingType::Humidity, 68.0),
            (ReadingType::Pressure, 1005.0),
            (ReadingType::WindSpeed, 5.0),
        ],
        power: PowerSource::Solar,
        initial_battery: 88.0,
        base_signal: -62,
        reading_id_start: 100000,
        anomaly_prone: false,
    },
];

pub fn sensor(sensor_id: &str) -> Option<&'static Sensor> {
    SENSORS.iter().find(|sensor| sensor.id == sensor_id)
}

pub fn random_sensor<R: Rng>(rng: &mut R) -> &'static Sensor {
    &SENSORS[rng.gen_range(0..SENSORS.len())]
}
