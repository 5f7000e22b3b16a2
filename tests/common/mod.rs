pub mod macros;

use chemotaxis_core::{
    CellValue, FieldState, InitialCondition, ModelParameters, PhysicalParameters,
};

#[allow(dead_code)]
pub struct ModelBuilder {
    physics: PhysicalParameters,
    extent: (f64, Option<f64>),
    initial: InitialCondition,
}

#[allow(dead_code)]
impl ModelBuilder {
    /// 1D ring of `n` unit cells with the default physics.
    pub fn line(n: usize) -> Self {
        Self {
            physics: PhysicalParameters::default(),
            extent: (n as f64, None),
            initial: InitialCondition::Zero,
        }
    }

    /// 2D torus of `nx` by `ny` unit cells with the default physics.
    pub fn plane(nx: usize, ny: usize) -> Self {
        Self {
            physics: PhysicalParameters::default(),
            extent: (nx as f64, Some(ny as f64)),
            initial: InitialCondition::Zero,
        }
    }

    pub fn with_physics<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut PhysicalParameters),
    {
        modifier(&mut self.physics);
        self
    }

    pub fn with_initial(mut self, initial: InitialCondition) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_population_at(mut self, cell: CellValue) -> Self {
        match &mut self.initial {
            InitialCondition::Points { population, .. } => population.push(cell),
            _ => {
                self.initial = InitialCondition::Points {
                    population: vec![cell],
                    resource: Vec::new(),
                }
            }
        }
        self
    }

    pub fn with_resource_at(mut self, cell: CellValue) -> Self {
        match &mut self.initial {
            InitialCondition::Points { resource, .. } => resource.push(cell),
            _ => {
                self.initial = InitialCondition::Points {
                    population: Vec::new(),
                    resource: vec![cell],
                }
            }
        }
        self
    }

    pub fn params(&self) -> ModelParameters {
        match self.extent {
            (length, None) => ModelParameters::line(length, self.physics),
            (length_x, Some(length_y)) => ModelParameters::plane(length_x, length_y, self.physics),
        }
        .expect("valid test parameters")
    }

    pub fn build(self) -> (ModelParameters, FieldState) {
        let params = self.params();
        let state = self
            .initial
            .build(&params)
            .expect("valid test initial condition");
        (params, state)
    }
}
