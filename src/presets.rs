//! Built-in scenarios.

use crate::config::{AppConfig, ModelConfig};
use crate::scenario::{ScenarioConfig, StopRule};
use chemotaxis_core::{
    CellValue, ConvergenceCriteria, Domain, InitialCondition, PhysicalParameters, SnapshotSchedule,
};

/// Steps run by the 1D presets.
pub const LINE_STEPS: u64 = 500;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// 1D ring, one population cell and one resource cell far apart
    Split,
    /// 1D ring, random population and no resource
    NoResource,
    /// 1D ring, random population and random resource
    Random,
    /// 2D torus with two resource sources, run until the resource settles
    Plane,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Split,
        Preset::NoResource,
        Preset::Random,
        Preset::Plane,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Split => "split",
            Preset::NoResource => "no-resource",
            Preset::Random => "random",
            Preset::Plane => "plane",
        }
    }

    pub fn config(self) -> AppConfig {
        match self {
            Preset::Split => line_config(
                self,
                InitialCondition::Points {
                    population: vec![CellValue::line(20, 1.0)],
                    resource: vec![CellValue::line(80, 1.0)],
                },
            ),
            Preset::NoResource => {
                line_config(self, InitialCondition::RandomPopulation { seed: 0 })
            }
            Preset::Random => line_config(self, InitialCondition::RandomBoth { seed: 0 }),
            Preset::Plane => AppConfig {
                model: ModelConfig {
                    domain: Domain::Plane {
                        length_x: 100.0,
                        length_y: 100.0,
                    },
                    physics: PhysicalParameters {
                        diffusion_population: 0.5,
                        diffusion_resource: 0.5,
                        ds: 1.0,
                        dt: 0.3,
                        production_rate: 1.2,
                        decay_rate: 0.03,
                        sensitivity: 1.0,
                    },
                },
                scenario: ScenarioConfig {
                    name: self.name().to_string(),
                    initial: InitialCondition::UniformWithSources {
                        background: None,
                        sources: vec![CellValue::plane(24, 24, 1.0), CellValue::plane(74, 74, 1.0)],
                    },
                    schedule: SnapshotSchedule::Every { interval: 10 },
                    stop: StopRule::Converged(ConvergenceCriteria::default()),
                    ..ScenarioConfig::default()
                },
            },
        }
    }
}

fn line_config(preset: Preset, initial: InitialCondition) -> AppConfig {
    AppConfig {
        model: ModelConfig {
            domain: Domain::Line { length: 100.0 },
            physics: PhysicalParameters::default(),
        },
        scenario: ScenarioConfig {
            name: preset.name().to_string(),
            initial,
            schedule: SnapshotSchedule::Every { interval: 10 },
            stop: StopRule::Steps { count: LINE_STEPS },
            ..ScenarioConfig::default()
        },
    }
}
