//! Scenario layer of the chemotaxis simulator: configuration, built-in
//! presets, the run loop and log reports. The numerics live in
//! `chemotaxis_core`, snapshot files in `chemotaxis_io`.

pub mod config;
pub mod presets;
pub mod report;
pub mod scenario;

pub use config::{AppConfig, ConfigError, ModelConfig};
pub use presets::Preset;
pub use report::{render_report, LogSummary};
pub use scenario::{run_scenario, RunSummary, ScenarioConfig, StopRule};
