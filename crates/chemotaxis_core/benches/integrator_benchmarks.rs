use chemotaxis_core::{
    CellValue, FieldState, InitialCondition, Integrator, ModelParameters, PhysicalParameters,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn plane_state(n: usize) -> (ModelParameters, FieldState) {
    let params = ModelParameters::plane(
        n as f64,
        n as f64,
        PhysicalParameters {
            diffusion_population: 0.5,
            diffusion_resource: 0.5,
            ds: 1.0,
            dt: 0.3,
            production_rate: 1.2,
            decay_rate: 0.03,
            sensitivity: 1.0,
        },
    )
    .unwrap();
    let state = InitialCondition::UniformWithSources {
        background: None,
        sources: vec![
            CellValue::plane(n / 4, n / 4, 1.0),
            CellValue::plane(3 * n / 4, 3 * n / 4, 1.0),
        ],
    }
    .build(&params)
    .unwrap();
    (params, state)
}

fn bench_plane_step(c: &mut Criterion) {
    let (params, state) = plane_state(100);

    let serial = Integrator::new(&params).with_parallel(false);
    c.bench_function("ftcs_plane_100x100_serial", |b| {
        b.iter(|| black_box(serial.step(black_box(&state))))
    });

    let parallel = Integrator::new(&params).with_parallel(true);
    c.bench_function("ftcs_plane_100x100_parallel", |b| {
        b.iter(|| black_box(parallel.step(black_box(&state))))
    });
}

fn bench_plane_advance(c: &mut Criterion) {
    let (params, state) = plane_state(256);
    let integrator = Integrator::new(&params);

    c.bench_function("ftcs_plane_256x256_advance_10", |b| {
        b.iter(|| black_box(integrator.advance(state.clone(), 10)))
    });
}

fn bench_line_steps(c: &mut Criterion) {
    let params = ModelParameters::line(1000.0, PhysicalParameters::default()).unwrap();
    let state = InitialCondition::RandomBoth { seed: 42 }
        .build(&params)
        .unwrap();
    let integrator = Integrator::new(&params).with_parallel(false);

    c.bench_function("ftcs_line_1000_steps_100", |b| {
        b.iter(|| black_box(integrator.steps(&state, 100)))
    });
}

criterion_group!(benches, bench_plane_step, bench_plane_advance, bench_line_steps);
criterion_main!(benches);
