mod common;

use chemotaxis_core::{CellValue, FieldState, InitialCondition, Integrator};
use common::ModelBuilder;

#[test]
fn test_line_population_conserved_with_chemotaxis() {
    let (params, state) = ModelBuilder::line(100)
        .with_population_at(CellValue::line(20, 1.0))
        .with_resource_at(CellValue::line(80, 1.0))
        .build();
    let initial = state.total_population();

    let integrator = Integrator::new(&params);
    let mut current = state;
    for _ in 0..10 {
        current = integrator.advance(current, 50);
        assert_population_conserved!(current, initial);
    }
    assert_eq!(current.step_count(), 500);
}

#[test]
fn test_plane_population_conserved_with_chemotaxis() {
    let (params, state) = ModelBuilder::plane(24, 16)
        .with_physics(|p| {
            p.diffusion_population = 0.5;
            p.diffusion_resource = 0.5;
            p.production_rate = 1.2;
            p.decay_rate = 0.03;
        })
        .with_initial(InitialCondition::UniformWithSources {
            background: None,
            sources: vec![CellValue::plane(5, 5, 1.0), CellValue::plane(18, 11, 1.0)],
        })
        .build();
    let initial = state.total_population();
    assert_close!(initial, 1.0, 1e-12);

    let later = Integrator::new(&params).steps(&state, 300);
    assert_population_conserved!(later, initial);
    assert!(later.is_finite());
}

#[test]
fn test_plane_resource_decays_geometrically_without_population() {
    let (params, state) = ModelBuilder::plane(6, 6)
        .with_physics(|p| {
            p.dt = 0.1;
            p.decay_rate = 0.5;
        })
        .with_resource_at(CellValue::plane(2, 3, 1.0))
        .build();
    let lambda = params.lambda();

    let later = Integrator::new(&params).steps(&state, 20);
    assert_close!(later.total_resource(), (1.0 - lambda).powi(20), 1e-12);
    assert_eq!(later.total_population(), 0.0);
}

#[test]
fn test_line_flat_resource_follows_its_own_update() {
    // A flat 1D resource field without population scales by
    // (1 - lambda + k3) per step.
    let (params, _) = ModelBuilder::line(8)
        .with_physics(|p| {
            p.dt = 0.1;
            p.decay_rate = 2.0;
        })
        .build();
    let state = FieldState::uniform(&params, 0.0, 1.0);
    let factor = 1.0 - params.lambda() + params.k3();

    let later = Integrator::new(&params).steps(&state, 5);
    for &m in later.resource() {
        assert_close!(m, factor.powi(5), 1e-12);
    }
}

#[test]
fn test_uniform_population_is_not_moved_by_flat_resource() {
    let (params, _) = ModelBuilder::plane(5, 7).build();
    let state = FieldState::uniform(&params, 0.2, 0.7);
    let later = Integrator::new(&params).steps(&state, 25);
    assert_fields_close!(later.population(), state.population(), 1e-12);
}
