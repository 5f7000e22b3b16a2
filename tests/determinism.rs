mod common;

use chemotaxis_core::snapshot::MemorySink;
use chemotaxis_core::{InitialCondition, Integrator};
use chemotaxis_lib::{run_scenario, Preset, StopRule};
use common::ModelBuilder;

#[test]
fn test_same_seed_same_lattice() {
    let (_, a) = ModelBuilder::line(64)
        .with_initial(InitialCondition::RandomBoth { seed: 12345 })
        .build();
    let (_, b) = ModelBuilder::line(64)
        .with_initial(InitialCondition::RandomBoth { seed: 12345 })
        .build();
    assert_eq!(a, b);

    let (_, c) = ModelBuilder::line(64)
        .with_initial(InitialCondition::RandomBoth { seed: 54321 })
        .build();
    assert_ne!(a.population(), c.population());
}

#[test]
fn test_plane_serial_and_parallel_runs_identical() {
    let (params, state) = ModelBuilder::plane(33, 17)
        .with_physics(|p| p.dt = 0.1)
        .with_initial(InitialCondition::RandomBoth { seed: 7 })
        .build();

    let serial = Integrator::new(&params).with_parallel(false).steps(&state, 100);
    let parallel = Integrator::new(&params).with_parallel(true).steps(&state, 100);
    assert_eq!(serial, parallel);
}

#[test]
fn test_line_serial_and_parallel_runs_identical() {
    let (params, state) = ModelBuilder::line(257)
        .with_initial(InitialCondition::RandomBoth { seed: 99 })
        .build();

    let serial = Integrator::new(&params).with_parallel(false).steps(&state, 200);
    let parallel = Integrator::new(&params).with_parallel(true).steps(&state, 200);
    assert_eq!(serial, parallel);
}

#[test]
fn test_preset_runs_repeat_exactly() {
    let mut config = Preset::Random.config();
    config.scenario.stop = StopRule::Steps { count: 120 };
    let params = config.model_parameters().unwrap();

    let mut first = MemorySink::default();
    let mut second = MemorySink::default();
    let a = run_scenario(&params, &config.scenario, &mut first).unwrap();
    let b = run_scenario(&params, &config.scenario, &mut second).unwrap();

    assert_eq!(a.final_state, b.final_state);
    assert_eq!(first.snapshots, second.snapshots);
}
