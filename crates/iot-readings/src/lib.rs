//! IoT sensor telemetry generation.
//!
//! Simulates a small fleet of deployed sensors, each with its own reading
//! types, baselines, power source, and signal characteristics. Every tick
//! one sensor reports one reading; low batteries and temperature spikes may
//! raise alert rows, and the occasional maintenance visit lands in its own
//! table (a battery replacement also resets that sensor's charge).
//!
//! [`run_sensor_stream`] is the entry point; it drives a [`SensorSimulator`]
//! against any [`sim_core::ReadingSink`] implementation.

pub mod args;
pub mod battery;
pub mod fleet;
pub mod readings;
pub mod simulator;

pub use args::SensorStreamArgs;
pub use battery::BatteryFleet;
pub use fleet::{PowerSource, Sensor, SENSORS};
pub use simulator::{run_sensor_stream, SensorSimulator};
