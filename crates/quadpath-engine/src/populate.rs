//! Built-in scenarios.
//!
//! Every layout is given in fractions of the world size so any configured
//! world dimensions produce the same picture.

use clap::ValueEnum;
use quadpath_common::{EntityId, Rect, Vec2};
use quadpath_world::{SimConfig, Target, TargetSeeker, World};
use tracing::info;

/// Which layout to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scenario {
    /// Two walls with a gate and a side gap
    #[default]
    Corridor,
    /// Staggered walls forcing a zig-zag
    Maze,
    /// A few scattered blocks and a chaser
    Open,
}

/// A populated world ready to simulate.
#[derive(Debug)]
pub struct Setup {
    /// Walls, gates and agents
    pub world: World,
    /// One seeker per agent
    pub seekers: Vec<TargetSeeker>,
    /// Gates that toggle while the simulation runs
    pub gates: Vec<EntityId>,
}

/// Builds the requested scenario.
#[must_use]
pub fn populate(scenario: Scenario, config: &SimConfig) -> Setup {
    let setup = match scenario {
        Scenario::Corridor => corridor(config),
        Scenario::Maze => maze(config),
        Scenario::Open => open(config),
    };
    info!(
        "Populated {:?}: {} objects, {} agents, {} gates",
        scenario,
        setup.world.len(),
        setup.seekers.len(),
        setup.gates.len()
    );
    setup
}

/// Maps fractional coordinates onto the configured world.
struct Layout {
    width: f32,
    height: f32,
}

impl Layout {
    fn new(config: &SimConfig) -> Self {
        Self {
            width: config.world_width,
            height: config.world_height,
        }
    }

    fn at(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    fn rect(&self, fx0: f32, fy0: f32, fx1: f32, fy1: f32) -> Rect {
        Rect::from_corners(self.at(fx0, fy0), self.at(fx1, fy1))
    }
}

fn spawn(
    world: &mut World,
    seekers: &mut Vec<TargetSeeker>,
    config: &SimConfig,
    position: Vec2,
    target: Target,
) -> EntityId {
    let agent = world.add_agent(position, config.agent_size);
    seekers.push(TargetSeeker::new(agent, target, config));
    agent
}

/// Agents cross two horizontal walls: one through a toggling gate, one
/// through a permanent gap on the right.
#[must_use]
pub fn corridor(config: &SimConfig) -> Setup {
    let layout = Layout::new(config);
    let mut world = World::with_seed(config.world_bounds(), config.seed);
    let mut seekers = Vec::new();

    world.add_wall(layout.rect(0.0, 0.40, 0.45, 0.45));
    world.add_wall(layout.rect(0.55, 0.40, 1.0, 0.45));
    let gate = world.add_gate(layout.rect(0.45, 0.40, 0.55, 0.45), false);
    world.add_wall(layout.rect(0.0, 0.70, 0.75, 0.75));

    for (start, goal) in [(0.1, 0.5), (0.2, 0.2), (0.3, 0.8)] {
        spawn(
            &mut world,
            &mut seekers,
            config,
            layout.at(start, 0.9),
            Target::Point(layout.at(goal, 0.1)),
        );
    }

    Setup {
        world,
        seekers,
        gates: vec![gate],
    }
}

/// Vertical walls with gaps alternating between bottom and top.
#[must_use]
pub fn maze(config: &SimConfig) -> Setup {
    let layout = Layout::new(config);
    let mut world = World::with_seed(config.world_bounds(), config.seed);
    let mut seekers = Vec::new();

    for i in 1..=4u8 {
        let x = f32::from(i) * 0.2;
        if i % 2 == 1 {
            world.add_wall(layout.rect(x, 0.0, x + 0.02, 0.8));
        } else {
            world.add_wall(layout.rect(x, 0.2, x + 0.02, 1.0));
        }
    }

    spawn(
        &mut world,
        &mut seekers,
        config,
        layout.at(0.1, 0.5),
        Target::Point(layout.at(0.95, 0.5)),
    );
    spawn(
        &mut world,
        &mut seekers,
        config,
        layout.at(0.92, 0.1),
        Target::Point(layout.at(0.1, 0.9)),
    );

    Setup {
        world,
        seekers,
        gates: Vec::new(),
    }
}

/// Scattered blocks, three travellers and one agent chasing the first.
#[must_use]
pub fn open(config: &SimConfig) -> Setup {
    let layout = Layout::new(config);
    let mut world = World::with_seed(config.world_bounds(), config.seed);
    let mut seekers = Vec::new();

    world.add_wall(layout.rect(0.30, 0.20, 0.35, 0.50));
    world.add_wall(layout.rect(0.60, 0.50, 0.70, 0.55));
    world.add_wall(layout.rect(0.45, 0.75, 0.50, 0.95));

    let leader = spawn(
        &mut world,
        &mut seekers,
        config,
        layout.at(0.1, 0.1),
        Target::Point(layout.at(0.9, 0.9)),
    );
    spawn(
        &mut world,
        &mut seekers,
        config,
        layout.at(0.9, 0.1),
        Target::Point(layout.at(0.1, 0.9)),
    );
    spawn(
        &mut world,
        &mut seekers,
        config,
        layout.at(0.1, 0.6),
        Target::Point(layout.at(0.9, 0.35)),
    );
    spawn(
        &mut world,
        &mut seekers,
        config,
        layout.at(0.5, 0.1),
        Target::Object(leader),
    );

    Setup {
        world,
        seekers,
        gates: Vec::new(),
    }
}
