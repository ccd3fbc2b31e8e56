//! Headless tick loop.

use std::fmt;

use quadpath_common::EntityId;
use quadpath_world::{SeekState, SimConfig, TargetSeeker, World};
use tracing::{debug, info};

use crate::populate::Setup;

/// Ticks between progress log lines.
pub const LOG_INTERVAL: u64 = 60;

/// Ticks between gate toggles.
pub const GATE_PERIOD: u64 = 150;

/// Seeker counts by state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Ticks simulated so far
    pub ticks: u64,
    /// Agents touching their target
    pub reached: usize,
    /// Agents following a path
    pub seeking: usize,
    /// Agents waiting for a path to open
    pub blocked: usize,
    /// Agents with nothing to do
    pub idle: usize,
}

impl Summary {
    /// Total number of seekers counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.reached + self.seeking + self.blocked + self.idle
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: {} reached, {} seeking, {} blocked, {} idle",
            self.ticks, self.reached, self.seeking, self.blocked, self.idle
        )
    }
}

/// World, seekers and the tick counter.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    world: World,
    seekers: Vec<TargetSeeker>,
    gates: Vec<EntityId>,
    tick: u64,
}

impl Simulation {
    /// Wraps a populated scenario.
    #[must_use]
    pub fn new(config: SimConfig, setup: Setup) -> Self {
        Self {
            config,
            world: setup.world,
            seekers: setup.seekers,
            gates: setup.gates,
            tick: 0,
        }
    }

    /// Current tick.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// All seekers.
    #[must_use]
    pub fn seekers(&self) -> &[TargetSeeker] {
        &self.seekers
    }

    /// Advances one tick: gates, seekers, then movement.
    pub fn step(&mut self) {
        if self.tick > 0 && self.tick % GATE_PERIOD == 0 {
            self.toggle_gates();
        }

        for seeker in &mut self.seekers {
            seeker.tick(&mut self.world, &self.config, self.tick);
        }
        self.world.step();
        self.tick += 1;

        if self.tick % LOG_INTERVAL == 0 {
            info!("{}", self.summary());
            if let Some(stats) = self
                .seekers
                .iter()
                .find_map(|s| s.planner().tree())
                .map(|tree| tree.stats())
            {
                debug!(
                    "Last tree: {} nodes, {} leaves, depth {}",
                    stats.node_count, stats.leaf_count, stats.max_depth
                );
            }
        }
    }

    /// Runs `ticks` ticks, stopping early once every agent has arrived.
    pub fn run(&mut self, ticks: u64) -> Summary {
        for _ in 0..ticks {
            self.step();
            let summary = self.summary();
            if summary.total() > 0 && summary.reached == summary.total() {
                info!("All agents reached their targets at tick {}", self.tick);
                break;
            }
        }
        self.summary()
    }

    /// Counts seekers by state.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            ticks: self.tick,
            ..Summary::default()
        };
        for seeker in &self.seekers {
            match seeker.state() {
                SeekState::Reached => summary.reached += 1,
                SeekState::Seeking => summary.seeking += 1,
                SeekState::Blocked => summary.blocked += 1,
                SeekState::Idle => summary.idle += 1,
            }
        }
        summary
    }

    fn toggle_gates(&mut self) {
        for &gate in &self.gates {
            let open = self.world.get(gate).is_some_and(|g| g.is_obstacle());
            self.world.set_gate_open(gate, open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::populate::{populate, Scenario};

    fn config() -> SimConfig {
        SimConfig {
            seed: Some(5),
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_step_advances_tick() {
        let config = config();
        let mut sim = Simulation::new(config.clone(), populate(Scenario::Open, &config));
        sim.step();
        sim.step();
        assert_eq!(sim.tick(), 2);
        assert_eq!(sim.summary().total(), sim.seekers().len());
    }

    #[test]
    fn test_gates_toggle_on_period() {
        let config = config();
        let mut sim = Simulation::new(config.clone(), populate(Scenario::Corridor, &config));
        let gate = sim.gates[0];
        let is_closed = |sim: &Simulation| sim.world().get(gate).is_some_and(|g| g.is_obstacle());

        assert!(is_closed(&sim));
        for _ in 0..=GATE_PERIOD {
            sim.step();
        }
        assert!(!is_closed(&sim));
        for _ in 0..GATE_PERIOD {
            sim.step();
        }
        assert!(is_closed(&sim));
    }

    #[test]
    fn test_corridor_blocks_until_gate_opens() {
        let config = config();
        let mut sim = Simulation::new(config.clone(), populate(Scenario::Corridor, &config));
        sim.step();
        assert_eq!(sim.summary().blocked, sim.seekers().len());
    }

    #[test]
    fn test_open_scenario_makes_progress() {
        let config = config();
        let mut sim = Simulation::new(config.clone(), populate(Scenario::Open, &config));
        let summary = sim.run(2000);
        assert!(summary.reached >= 1, "{summary}");
    }

    #[test]
    fn test_empty_simulation_runs_all_ticks() {
        let config = config();
        let setup = Setup {
            world: World::with_seed(config.world_bounds(), config.seed),
            seekers: Vec::new(),
            gates: Vec::new(),
        };
        let mut sim = Simulation::new(config, setup);
        let summary = sim.run(25);
        assert_eq!(summary.ticks, 25);
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            ticks: 60,
            reached: 1,
            seeking: 2,
            blocked: 0,
            idle: 0,
        };
        assert_eq!(
            summary.to_string(),
            "tick 60: 1 reached, 2 seeking, 0 blocked, 0 idle"
        );
    }
}
