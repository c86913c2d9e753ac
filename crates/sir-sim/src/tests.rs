//! Integration tests for sir-sim.

use sir_agent::{Agent, Health, HealthState, Infection, MotionLimits};
use sir_core::{AgentId, Configuration, Plane, RandomSource, RunConfig, SimRng, Span, Tick, Vec2};

use crate::{AgentView, Census, NoopObserver, Population, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Deterministic source: `uniform` returns the point `unit` of the way
/// through the range, `below` always returns `int` (capped to the range).
struct Fixed {
    unit: f32,
    int:  u32,
}

impl RandomSource for Fixed {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if high > low { low + (high - low) * self.unit } else { low }
    }

    fn below(&mut self, upper: u32) -> u32 {
        self.int.min(upper.saturating_sub(1))
    }
}

fn always_zero() -> Fixed {
    Fixed { unit: 0.5, int: 0 }
}

fn agent(id: u32, x: f32, y: f32) -> Agent {
    // Far-away waypoint so nobody re-plans during short tests.
    Agent::new(AgentId(id), Vec2::new(x, y), Vec2::new(850.0, 550.0), MotionLimits::default(), 4.0)
}

fn infected(id: u32, x: f32, y: f32, radius: f32) -> Agent {
    let mut a = agent(id, x, y);
    a.set_health(Health::Infected(Infection {
        contagion_radius:     radius,
        remaining_timer:      1e6,
        remaining_hit_points: 1e6,
    }));
    a
}

fn config_for(n: usize) -> Configuration {
    Configuration {
        population_size:  n,
        initial_infected: 0,
        ..Configuration::default()
    }
}

fn scenario(config: Configuration, agents: Vec<Agent>) -> Population {
    Population::from_agents(Plane::default(), config, agents).unwrap()
}

// ── Construction & validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(Configuration::default()).build().unwrap();
        let census = sim.census();
        assert_eq!(sim.population.len(), 250);
        assert_eq!(census.infected, 5);
        assert_eq!(census.susceptible, 245);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn invalid_configuration_rejected() {
        let cfg = Configuration { population_size: 3, initial_infected: 4, ..Configuration::default() };
        let err = SimBuilder::new(cfg).build().err().expect("must reject");
        assert!(matches!(err, SimError::Core(sir_core::SirError::InvalidConfiguration(_))), "{err}");

        let cfg = Configuration { cure_rate: -1.0, ..Configuration::default() };
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn invalid_plane_rejected() {
        let result = SimBuilder::new(Configuration::default())
            .plane(Plane::new(-5.0, 100.0))
            .build();
        assert!(matches!(result, Err(SimError::Core(sir_core::SirError::InvalidPlane { .. }))));
    }

    #[test]
    fn agent_count_mismatch_errors() {
        let result = SimBuilder::new(config_for(3))
            .agents(vec![agent(0, 0.0, 0.0), agent(1, 1.0, 1.0)])
            .build();
        assert_eq!(
            result.err(),
            Some(SimError::AgentCountMismatch { expected: 3, got: 2, what: "agent list" })
        );
    }

    #[test]
    fn agent_id_mismatch_errors() {
        let result = SimBuilder::new(config_for(2))
            .agents(vec![agent(0, 0.0, 0.0), agent(5, 1.0, 1.0)])
            .build();
        assert_eq!(result.err(), Some(SimError::AgentIdMismatch { index: 1, id: AgentId(5) }));
    }

    #[test]
    fn custom_spawner_plane_wins() {
        let spawner = sir_agent::AgentBuilder::new(Plane::new(50.0, 50.0)).size(2.0);
        let sim = SimBuilder::new(config_for(20)).spawner(spawner).build().unwrap();
        assert_eq!(sim.population.plane(), Plane::new(50.0, 50.0));
        assert!(sim.population.agents().iter().all(|a| a.size() == 2.0));
    }

    #[test]
    fn same_seed_same_run() {
        let run = RunConfig { total_ticks: 200, seed: 99, output_interval_ticks: 0 };
        let cfg = Configuration { infection_chance: 200, ..Configuration::default() };

        let mut a = SimBuilder::new(cfg.clone()).run_config(run.clone()).build().unwrap();
        let mut b = SimBuilder::new(cfg).run_config(run).build().unwrap();
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.population.snapshot(), b.population.snapshot());
    }
}

// ── Reset & configuration ─────────────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use super::*;

    #[test]
    fn reset_isolation() {
        let mut rng = SimRng::new(5);
        let start = Configuration { population_size: 10, initial_infected: 10, ..Configuration::default() };
        let mut pop = Population::new(Plane::default(), start, &mut rng).unwrap();
        for _ in 0..50 {
            pop.tick(&mut rng);
        }

        let cfg = Configuration { population_size: 50, initial_infected: 7, ..Configuration::default() };
        pop.reset(cfg, &mut rng).unwrap();

        assert_eq!(pop.len(), 50);
        let census = pop.census();
        assert_eq!(census.infected, 7);
        assert_eq!(census.susceptible, 43);
        for (i, a) in pop.agents().iter().enumerate() {
            assert_eq!(a.id(), AgentId(i as u32));
            assert_eq!(a.velocity(), Vec2::ZERO, "fresh agents start at rest");
            let expected = if i < 7 { HealthState::Infected } else { HealthState::Susceptible };
            assert_eq!(a.state(), expected, "agent {i}");
        }
        assert!(pop.agents()[..7].iter().all(|a| a.contagion_radius() == Some(0.0)));
    }

    #[test]
    fn failed_reset_keeps_population() {
        let mut rng = SimRng::new(1);
        let mut pop = Population::new(Plane::default(), config_for(12), &mut rng).unwrap();
        let before = pop.snapshot();

        let bad = Configuration { social_distance_radius: -3.0, ..config_for(40) };
        assert!(pop.reset(bad, &mut rng).is_err());
        assert_eq!(pop.snapshot(), before);
        assert_eq!(pop.config().population_size, 12);
    }

    #[test]
    fn set_config_validates() {
        let mut rng = SimRng::new(1);
        let mut pop = Population::new(Plane::default(), config_for(4), &mut rng).unwrap();

        let bad = Configuration { infection_chance: 5_000, ..config_for(4) };
        assert!(pop.set_config(bad).is_err());
        assert_eq!(pop.config().infection_chance, 5);

        let good = Configuration { infection_chance: 900, ..config_for(4) };
        pop.set_config(good).unwrap();
        assert_eq!(pop.config().infection_chance, 900);
        assert_eq!(pop.len(), 4);
    }

    #[test]
    fn empty_population_ticks() {
        let mut rng = SimRng::new(1);
        let mut pop = Population::new(Plane::default(), config_for(0), &mut rng).unwrap();
        pop.tick(&mut rng);
        assert!(pop.is_empty());
        assert_eq!(pop.census(), Census::default());
    }
}

// ── Repulsion ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod distancing_tests {
    use super::*;

    #[test]
    fn close_pair_pushes_apart() {
        let cfg = Configuration {
            social_distance_radius:   10.0,
            social_distance_strength: 0.1,
            ..config_for(2)
        };
        let mut pop = scenario(cfg, vec![agent(0, 100.0, 100.0), agent(1, 104.0, 100.0)]);
        pop.social_distance();

        let va = pop.agents()[0].velocity();
        let vb = pop.agents()[1].velocity();
        assert!((va.x + 0.4).abs() < 1e-6 && va.y == 0.0, "{va}");
        assert!((vb.x - 0.4).abs() < 1e-6 && vb.y == 0.0, "{vb}");
    }

    #[test]
    fn push_has_no_falloff_inside_radius() {
        let cfg = Configuration {
            social_distance_radius:   10.0,
            social_distance_strength: 0.1,
            ..config_for(2)
        };
        // 9 units apart pushes harder than 4 units apart: (a - b) * strength.
        let mut pop = scenario(cfg, vec![agent(0, 100.0, 100.0), agent(1, 109.0, 100.0)]);
        pop.social_distance();
        assert!((pop.agents()[0].velocity().x + 0.9).abs() < 1e-6);
    }

    #[test]
    fn pairs_outside_radius_ignored() {
        let cfg = Configuration { social_distance_radius: 10.0, ..config_for(2) };
        let mut pop = scenario(cfg, vec![agent(0, 100.0, 100.0), agent(1, 110.0, 100.0)]);
        pop.social_distance();
        assert_eq!(pop.agents()[0].velocity(), Vec2::ZERO);
        assert_eq!(pop.agents()[1].velocity(), Vec2::ZERO);
    }

    #[test]
    fn lone_agent_never_self_repels() {
        let cfg = Configuration {
            social_distance_radius:   50.0,
            social_distance_strength: 1.0,
            ..config_for(1)
        };
        let mut rng = SimRng::new(3);
        let mut pop = Population::new(Plane::default(), cfg, &mut rng).unwrap();
        for _ in 0..500 {
            pop.advance_agents(&mut rng);
            let before = pop.agents()[0].velocity();
            pop.social_distance();
            assert_eq!(pop.agents()[0].velocity(), before);
        }
    }

    #[test]
    fn dead_agents_neither_push_nor_move() {
        let cfg = Configuration { social_distance_radius: 10.0, ..config_for(2) };
        let mut corpse = agent(1, 104.0, 100.0);
        corpse.die();
        let mut pop = scenario(cfg, vec![agent(0, 100.0, 100.0), corpse]);

        pop.social_distance();
        assert_eq!(pop.agents()[0].velocity(), Vec2::ZERO);
        assert_eq!(pop.agents()[1].velocity(), Vec2::ZERO);

        pop.tick(&mut always_zero());
        assert_eq!(pop.agents()[1].position(), Vec2::new(104.0, 100.0));
    }

    #[test]
    fn speed_clamp_holds_under_crowding() {
        let cfg = Configuration {
            population_size:          80,
            initial_infected:         0,
            social_distance_radius:   60.0,
            social_distance_strength: 2.0,
            ..Configuration::default()
        };
        let mut rng = SimRng::new(11);
        let mut pop = Population::new(Plane::new(100.0, 100.0), cfg, &mut rng).unwrap();
        for _ in 0..200 {
            pop.tick(&mut rng);
            for a in pop.agents() {
                let v = a.velocity();
                let max = a.limits().max_speed;
                assert!(v.x.abs() <= max && v.y.abs() <= max, "{:?} moving at {v}", a.id());
            }
        }
    }
}

// ── Infection spread ──────────────────────────────────────────────────────────

#[cfg(test)]
mod spread_tests {
    use super::*;

    fn contagious() -> Configuration {
        Configuration {
            infection_chance:   1_000,
            disease_spread_cap: 30.0,
            ..config_for(2)
        }
    }

    #[test]
    fn guaranteed_transmission() {
        let mut pop = scenario(contagious(), vec![infected(0, 100.0, 100.0, 30.0), agent(1, 105.0, 100.0)]);
        pop.tick(&mut always_zero());
        assert_eq!(pop.agents()[1].state(), HealthState::Infected);
    }

    #[test]
    fn zero_chance_never_transmits() {
        let cfg = Configuration { infection_chance: 0, ..contagious() };
        let mut pop = scenario(cfg, vec![infected(0, 100.0, 100.0, 30.0), agent(1, 105.0, 100.0)]);
        for _ in 0..100 {
            pop.tick(&mut always_zero());
        }
        assert_eq!(pop.agents()[1].state(), HealthState::Susceptible);
    }

    #[test]
    fn draw_must_be_below_chance() {
        let cfg = Configuration { infection_chance: 5, ..contagious() };
        let mut pop = scenario(cfg.clone(), vec![infected(0, 100.0, 100.0, 30.0), agent(1, 105.0, 100.0)]);
        assert_eq!(pop.spread_disease(&mut Fixed { unit: 0.5, int: 5 }), 0);

        let mut pop = scenario(cfg, vec![infected(0, 100.0, 100.0, 30.0), agent(1, 105.0, 100.0)]);
        assert_eq!(pop.spread_disease(&mut Fixed { unit: 0.5, int: 4 }), 1);
    }

    #[test]
    fn out_of_radius_is_safe() {
        let mut pop = scenario(contagious(), vec![infected(0, 100.0, 100.0, 10.0), agent(1, 110.0, 100.0)]);
        assert_eq!(pop.spread_disease(&mut always_zero()), 0);
        assert_eq!(pop.agents()[1].state(), HealthState::Susceptible);
    }

    #[test]
    fn colocated_agents_are_skipped() {
        let mut pop = scenario(contagious(), vec![infected(0, 100.0, 100.0, 30.0), agent(1, 100.0, 100.0)]);
        assert_eq!(pop.spread_disease(&mut always_zero()), 0);
    }

    #[test]
    fn immune_and_dead_targets_untouched() {
        let cfg = Configuration { infection_chance: 1_000, ..config_for(3) };
        let mut immune = agent(1, 105.0, 100.0);
        immune.set_health(Health::Immune);
        let mut dead = agent(2, 100.0, 105.0);
        dead.die();

        let mut pop = scenario(cfg, vec![infected(0, 100.0, 100.0, 30.0), immune, dead]);
        assert_eq!(pop.spread_disease(&mut always_zero()), 0);
        assert_eq!(pop.agents()[1].state(), HealthState::Immune);
        assert_eq!(pop.agents()[2].state(), HealthState::Dead);
    }

    #[test]
    fn dead_sources_do_not_transmit() {
        let mut source = infected(0, 100.0, 100.0, 30.0);
        source.die();
        let mut pop = scenario(contagious(), vec![source, agent(1, 105.0, 100.0)]);
        assert_eq!(pop.spread_disease(&mut always_zero()), 0);
    }

    #[test]
    fn fresh_infections_cannot_chain_in_same_phase() {
        // 0 infects 1; 1 starts at radius 0 and cannot reach 2 this phase.
        let cfg = Configuration { infection_chance: 1_000, ..config_for(3) };
        let mut pop = scenario(
            cfg,
            vec![infected(0, 100.0, 100.0, 6.0), agent(1, 105.0, 100.0), agent(2, 110.0, 100.0)],
        );
        assert_eq!(pop.spread_disease(&mut always_zero()), 1);
        assert_eq!(pop.agents()[1].state(), HealthState::Infected);
        assert_eq!(pop.agents()[2].state(), HealthState::Susceptible);
    }

    /// Counts `below` calls so independent draws per pair can be observed.
    struct CountingDraws {
        draws: usize,
    }

    impl RandomSource for CountingDraws {
        fn uniform(&mut self, low: f32, _high: f32) -> f32 {
            low
        }

        fn below(&mut self, upper: u32) -> u32 {
            self.draws += 1;
            upper - 1
        }
    }

    #[test]
    fn surrounded_agent_faces_one_draw_per_source() {
        let cfg = Configuration { infection_chance: 1, ..config_for(4) };
        let mut pop = scenario(
            cfg,
            vec![
                infected(0, 100.0, 100.0, 30.0),
                infected(1, 110.0, 100.0, 30.0),
                infected(2, 100.0, 110.0, 30.0),
                agent(3, 105.0, 105.0),
            ],
        );
        let mut rng = CountingDraws { draws: 0 };
        assert_eq!(pop.spread_disease(&mut rng), 0);
        // Infected-to-infected pairs never draw.
        assert_eq!(rng.draws, 3);
    }

    #[test]
    fn immunity_closure() {
        let cfg = Configuration {
            population_size:  60,
            initial_infected: 0,
            infection_chance: 0,
            ..Configuration::default()
        };
        let mut rng = SimRng::new(21);
        let mut pop = Population::new(Plane::new(200.0, 200.0), cfg, &mut rng).unwrap();
        for _ in 0..300 {
            pop.tick(&mut rng);
        }
        assert!(pop.agents().iter().all(|a| a.state() == HealthState::Susceptible));
    }

    #[test]
    fn zero_chance_keeps_susceptibles_with_seeded_cases() {
        let cfg = Configuration {
            population_size:  40,
            initial_infected: 5,
            infection_chance: 0,
            ..Configuration::default()
        };
        let mut rng = SimRng::new(8);
        let mut pop = Population::new(Plane::new(150.0, 150.0), cfg, &mut rng).unwrap();
        for _ in 0..600 {
            pop.tick(&mut rng);
            assert_eq!(pop.census().susceptible, 35);
        }
    }
}

// ── Whole-run properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    fn rank(state: HealthState) -> u8 {
        match state {
            HealthState::Susceptible => 0,
            HealthState::Infected    => 1,
            HealthState::Immune | HealthState::Dead => 2,
        }
    }

    fn epidemic() -> (Population, SimRng) {
        let cfg = Configuration {
            population_size:      120,
            initial_infected:     6,
            infection_chance:     80,
            disease_spread_cap:   25.0,
            cure_rate:            10.0,
            deadliness:           1.0,
            infection_time_range: Span::new(200.0, 2_000.0),
            hit_point_range:      Span::new(50.0, 400.0),
            ..Configuration::default()
        };
        let mut rng = SimRng::new(1234);
        let pop = Population::new(Plane::new(300.0, 200.0), cfg, &mut rng).unwrap();
        (pop, rng)
    }

    #[test]
    fn state_machine_is_monotonic() {
        let (mut pop, mut rng) = epidemic();
        let mut last: Vec<HealthState> = pop.agents().iter().map(|a| a.state()).collect();

        for _ in 0..1_500 {
            pop.tick(&mut rng);
            for (a, prev) in pop.agents().iter().zip(last.iter_mut()) {
                let now = a.state();
                assert!(rank(now) >= rank(*prev), "{:?}: {prev} -> {now}", a.id());
                if prev.is_terminal() {
                    assert_eq!(now, *prev, "{:?} left terminal state {prev}", a.id());
                }
                *prev = now;
            }
        }
        let census = pop.census();
        assert_eq!(census.total(), 120);
        assert!(census.immune + census.dead > 0, "epidemic should resolve some cases: {census}");
    }

    #[test]
    fn contagion_radius_stays_capped() {
        let (mut pop, mut rng) = epidemic();
        let cap = pop.config().disease_spread_cap;
        for _ in 0..400 {
            pop.tick(&mut rng);
            for r in pop.agents().iter().filter_map(|a| a.contagion_radius()) {
                assert!((0.0..=cap).contains(&r), "radius {r} outside [0, {cap}]");
            }
        }
    }

    #[test]
    fn death_beats_recovery_within_a_tick() {
        let cfg = Configuration { cure_rate: 10.0, deadliness: 1.0, ..config_for(1) };
        let mut a = agent(0, 100.0, 100.0);
        a.set_health(Health::Infected(Infection::new(10.0, 1.0)));
        let mut pop = scenario(cfg, vec![a]);
        pop.tick(&mut always_zero());
        assert_eq!(pop.agents()[0].state(), HealthState::Dead);
    }

    #[test]
    fn snapshot_mirrors_agents() {
        let (mut pop, mut rng) = epidemic();
        pop.tick(&mut rng);
        let views: Vec<AgentView> = pop.snapshot();
        assert_eq!(views.len(), pop.len());
        for (v, a) in views.iter().zip(pop.agents()) {
            assert_eq!(v.id, a.id());
            assert_eq!(v.position, a.position());
            assert_eq!(v.color, a.state().color());
            assert_eq!(v.contagion_radius.is_some(), v.state == HealthState::Infected);
        }
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    fn small_run(total_ticks: u64, output_interval_ticks: u64) -> RunConfig {
        RunConfig { total_ticks, seed: 42, output_interval_ticks }
    }

    #[derive(Default)]
    struct Recorder {
        starts:    usize,
        ends:      usize,
        snapshots: Vec<(Tick, usize)>,
        resets:    Vec<u32>,
        finished:  Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _t: Tick, census: &Census) {
            assert_eq!(census.total(), 10);
            self.ends += 1;
        }
        fn on_snapshot(&mut self, t: Tick, agents: &[AgentView]) {
            self.snapshots.push((t, agents.len()));
        }
        fn on_reset(&mut self, generation: u32, _census: &Census) {
            self.resets.push(generation);
        }
        fn on_sim_end(&mut self, t: Tick, _census: &Census) {
            self.finished = Some(t);
        }
    }

    #[test]
    fn runs_to_end_tick() {
        let mut sim = SimBuilder::new(config_for(10)).run_config(small_run(10, 0)).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = SimBuilder::new(config_for(10)).run_config(small_run(100, 0)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    #[test]
    fn observer_called_correct_number_of_times() {
        let mut sim = SimBuilder::new(config_for(10)).run_config(small_run(6, 2)).build().unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 6);
        assert_eq!(obs.ends, 6);
        assert_eq!(obs.snapshots, vec![(Tick(0), 10), (Tick(2), 10), (Tick(4), 10)]);
        assert_eq!(obs.finished, Some(Tick(6)));
    }

    #[test]
    fn restart_rewinds_and_reports() {
        let mut sim = SimBuilder::new(config_for(10)).run_config(small_run(100, 0)).build().unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(20, &mut obs).unwrap();

        let cfg = Configuration { initial_infected: 3, ..config_for(10) };
        sim.restart(cfg, &mut obs).unwrap();
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
        assert_eq!(sim.clock.generation, 1);
        assert_eq!(obs.resets, vec![1]);
        assert_eq!(sim.census().infected, 3);

        let bad = Configuration { initial_infected: 11, ..config_for(10) };
        assert!(sim.restart(bad, &mut obs).is_err());
        assert_eq!(sim.clock.generation, 1);
        assert_eq!(obs.resets, vec![1]);
    }

    #[test]
    fn stops_once_settled() {
        let cfg = Configuration {
            initial_infected:     2,
            infection_chance:     0,
            infection_time_range: Span::new(10.0, 20.0),
            ..config_for(10)
        };
        let mut sim = SimBuilder::new(cfg).run_config(small_run(1_000, 0)).build().unwrap();
        let stopped = sim.run_until_settled(&mut NoopObserver).unwrap();
        assert!(stopped <= Tick(2), "stopped at {stopped}");
        assert_eq!(sim.census().immune, 2);
    }

    #[test]
    fn update_config_is_validated() {
        let mut sim = SimBuilder::new(config_for(10)).build().unwrap();
        assert!(sim.update_config(Configuration { disease_spread_cap: -1.0, ..config_for(10) }).is_err());
        sim.update_config(Configuration { infection_chance: 0, ..config_for(10) }).unwrap();
        assert_eq!(sim.population.config().infection_chance, 0);
    }
}
