use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use society_sim::core::config::SimulationConfig;
use society_sim::simulation::Simulation;
use society_sim::world::generation::{generate, GenerationConfig};

fn bench_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");
    let config = SimulationConfig::default();

    for (label, generation) in [
        ("village", GenerationConfig::small(7)),
        ("town", GenerationConfig::default()),
    ] {
        let world = match generate(&generation, &config) {
            Ok(world) => world,
            Err(err) => panic!("world generation failed: {}", err),
        };
        group.bench_function(format!("{}_{}_actors", label, world.population.len()), |b| {
            b.iter_batched(
                || {
                    let mut sim = Simulation::new(world.clone(), config.clone(), 7)
                        .unwrap_or_else(|err| panic!("invalid setup: {}", err));
                    // Warm up so actors are spread over the map
                    for _ in 0..16 {
                        sim.tick(config.max_step_hours);
                    }
                    sim
                },
                |mut sim| {
                    for _ in 0..16 {
                        sim.tick(config.max_step_hours);
                    }
                    sim
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_steps);
criterion_main!(benches);
