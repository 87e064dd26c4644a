pub mod config;
pub mod reference;
pub mod telemetry;
