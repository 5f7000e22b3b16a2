//! Initial conditions for both fields.
//!
//! Random variants draw from a seeded `ChaCha8Rng`, so a given seed always
//! yields the same lattice.

use crate::error::{ModelError, Result};
use crate::field::FieldState;
use crate::lattice::GridShape;
use crate::params::ModelParameters;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A value placed on one lattice cell. `j` is ignored on a line and must be
/// left at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellValue {
    pub i: usize,
    #[serde(default)]
    pub j: usize,
    pub value: f64,
}

impl CellValue {
    pub fn line(i: usize, value: f64) -> Self {
        Self { i, j: 0, value }
    }

    pub fn plane(i: usize, j: usize, value: f64) -> Self {
        Self { i, j, value }
    }

    fn index(&self, shape: GridShape) -> Result<usize> {
        if self.i < shape.nx() && self.j < shape.ny() {
            Ok(shape.index(self.i, self.j))
        } else {
            Err(ModelError::CellOutOfRange {
                i: self.i,
                j: self.j,
                shape,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialCondition {
    /// Both fields empty.
    #[default]
    Zero,
    /// Flat fields.
    Uniform { population: f64, resource: f64 },
    /// Empty fields with values placed on individual cells.
    Points {
        #[serde(default)]
        population: Vec<CellValue>,
        #[serde(default)]
        resource: Vec<CellValue>,
    },
    /// Random population normalised to a total of one; no resource.
    RandomPopulation { seed: u64 },
    /// Random population normalised to a total of one and raw random
    /// resource in `[0, 1)`.
    RandomBoth { seed: u64 },
    /// Both fields flat at `background` (default `1 / cells`) with the listed
    /// resource cells overwritten.
    UniformWithSources {
        #[serde(default)]
        background: Option<f64>,
        sources: Vec<CellValue>,
    },
}

impl InitialCondition {
    pub fn build(&self, params: &ModelParameters) -> Result<FieldState> {
        let shape = params.shape();
        let len = shape.len();
        let (population, resource) = match self {
            InitialCondition::Zero => (vec![0.0; len], vec![0.0; len]),
            InitialCondition::Uniform {
                population,
                resource,
            } => (vec![*population; len], vec![*resource; len]),
            InitialCondition::Points {
                population,
                resource,
            } => (
                place(shape, vec![0.0; len], population)?,
                place(shape, vec![0.0; len], resource)?,
            ),
            InitialCondition::RandomPopulation { seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                (normalized_noise(&mut rng, len), vec![0.0; len])
            }
            InitialCondition::RandomBoth { seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                let population = normalized_noise(&mut rng, len);
                let resource = (0..len).map(|_| rng.gen::<f64>()).collect();
                (population, resource)
            }
            InitialCondition::UniformWithSources {
                background,
                sources,
            } => {
                let level = background.unwrap_or(1.0 / len as f64);
                (vec![level; len], place(shape, vec![level; len], sources)?)
            }
        };
        FieldState::new(params, population, resource)
    }
}

fn place(shape: GridShape, mut field: Vec<f64>, cells: &[CellValue]) -> Result<Vec<f64>> {
    for cell in cells {
        field[cell.index(shape)?] = cell.value;
    }
    Ok(field)
}

fn normalized_noise(rng: &mut ChaCha8Rng, len: usize) -> Vec<f64> {
    let mut values: Vec<f64> = (0..len).map(|_| rng.gen::<f64>()).collect();
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter_mut().for_each(|v| *v /= total);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PhysicalParameters;

    fn line(n: usize) -> ModelParameters {
        ModelParameters::line(n as f64, PhysicalParameters::default()).unwrap()
    }

    #[test]
    fn test_points_place_values() {
        let params = line(100);
        let state = InitialCondition::Points {
            population: vec![CellValue::line(20, 1.0)],
            resource: vec![CellValue::line(80, 1.0)],
        }
        .build(&params)
        .unwrap();
        assert_eq!(state.population()[20], 1.0);
        assert_eq!(state.resource()[80], 1.0);
        assert_eq!(state.total_population(), 1.0);
        assert_eq!(state.total_resource(), 1.0);
    }

    #[test]
    fn test_points_out_of_range() {
        let params = line(10);
        let err = InitialCondition::Points {
            population: vec![CellValue::line(10, 1.0)],
            resource: vec![],
        }
        .build(&params)
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::CellOutOfRange {
                i: 10,
                j: 0,
                shape: GridShape::Line { nx: 10 }
            }
        );

        let err = InitialCondition::Points {
            population: vec![CellValue::plane(0, 1, 1.0)],
            resource: vec![],
        }
        .build(&params)
        .unwrap_err();
        assert!(matches!(err, ModelError::CellOutOfRange { i: 0, j: 1, .. }));
    }

    #[test]
    fn test_huge_cell_index_reported_without_overflow() {
        let params = line(10);
        let err = InitialCondition::Points {
            population: vec![],
            resource: vec![CellValue::plane(usize::MAX, usize::MAX, 1.0)],
        }
        .build(&params)
        .unwrap_err();
        assert!(err.to_string().contains(&usize::MAX.to_string()));
    }

    #[test]
    fn test_random_population_is_normalized_and_seeded() {
        let params = line(50);
        let a = InitialCondition::RandomPopulation { seed: 7 }.build(&params).unwrap();
        let b = InitialCondition::RandomPopulation { seed: 7 }.build(&params).unwrap();
        let c = InitialCondition::RandomPopulation { seed: 8 }.build(&params).unwrap();
        assert!((a.total_population() - 1.0).abs() < 1e-12);
        assert_eq!(a.total_resource(), 0.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.population().iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_random_both_fills_resource() {
        let params = line(30);
        let state = InitialCondition::RandomBoth { seed: 1 }.build(&params).unwrap();
        assert!((state.total_population() - 1.0).abs() < 1e-12);
        assert!(state.resource().iter().all(|&m| (0.0..1.0).contains(&m)));
        assert!(state.total_resource() > 0.0);
    }

    #[test]
    fn test_uniform_with_sources_on_plane() {
        let params = ModelParameters::plane(10.0, 10.0, PhysicalParameters::default()).unwrap();
        let state = InitialCondition::UniformWithSources {
            background: None,
            sources: vec![CellValue::plane(2, 2, 1.0), CellValue::plane(7, 7, 1.0)],
        }
        .build(&params)
        .unwrap();
        assert_eq!(state.population_at(0, 0), 0.01);
        assert_eq!(state.resource_at(2, 2), 1.0);
        assert_eq!(state.resource_at(7, 7), 1.0);
        assert_eq!(state.resource_at(5, 5), 0.01);
    }
}
