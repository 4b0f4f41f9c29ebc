pub mod aggregator;
pub mod alarm;
pub mod chart;
pub mod demand;
pub mod energy;
pub mod frame;
pub mod phase;
pub mod regression;
pub mod sample;
pub mod series;
pub mod status;
pub mod summary;
pub mod topology;

/// Device identifier as used by the metrics API.
pub type DeviceId = i64;
