//! Drives one agent towards a point or another object.
//!
//! Each planning episode snapshots the current obstacles, rebuilds the region
//! tree and searches it. Between episodes the agent follows the last path.
//! A failed search stops the agent until the next episode.
//!
//! The tree is built in the space of the agent's center: obstacles grow by
//! half the agent size and the world shrinks by the same margin, so any
//! free cell is a place the whole agent fits.

use quadpath_common::{EntityId, QuadPathResult, Vec2};
use quadpath_kernel::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SimConfig;
use crate::planner::Planner;
use crate::steering::Steering;
use crate::world::World;

/// What an agent is heading for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A fixed location
    Point(Vec2),
    /// The center of another object, tracked as it moves
    Object(EntityId),
}

/// Progress of a seeker after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekState {
    /// Not started, or nothing left to do
    #[default]
    Idle,
    /// Following a path
    Seeking,
    /// Last search failed; waiting for the next episode
    Blocked,
    /// The agent touches its target
    Reached,
}

/// Replans and steers a single agent.
#[derive(Debug)]
pub struct TargetSeeker {
    agent: EntityId,
    target: Target,
    planner: Planner,
    steering: Steering,
    next_replan: u64,
    state: SeekState,
}

impl TargetSeeker {
    /// Creates a seeker that plans on its first tick.
    #[must_use]
    pub fn new(agent: EntityId, target: Target, config: &SimConfig) -> Self {
        Self {
            agent,
            target,
            planner: Planner::new(config.min_cell_size),
            steering: Steering::new(config.arrive_radius),
            next_replan: 0,
            state: SeekState::Idle,
        }
    }

    /// Agent being driven.
    #[must_use]
    pub fn agent(&self) -> EntityId {
        self.agent
    }

    /// Current target.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Switches target and forces a replan on the next tick.
    pub fn set_target(&mut self, target: Target) {
        self.target = target;
        self.steering.clear();
        self.next_replan = 0;
        self.state = SeekState::Idle;
    }

    /// State after the last tick.
    #[must_use]
    pub fn state(&self) -> SeekState {
        self.state
    }

    /// Planner holding the last tree.
    #[must_use]
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Runs one tick: replans if due, then sets the agent's velocity.
    ///
    /// Planning happens on the first tick, every `replan_interval` ticks
    /// after that, and whenever a followed path runs out early.
    pub fn tick(&mut self, world: &mut World, config: &SimConfig, tick: u64) -> SeekState {
        let Some(agent) = world.get(self.agent) else {
            if self.state != SeekState::Idle {
                warn!("Agent {} no longer exists, seeker idle", self.agent);
            }
            self.state = SeekState::Idle;
            return self.state;
        };
        let position = agent.center();
        let agent_bounds = agent.bounds;

        let (goal, reached) = match self.target {
            Target::Point(point) => (point, agent_bounds.contains_point(point)),
            Target::Object(id) => match world.get(id) {
                Some(object) => (
                    object.center(),
                    agent_bounds
                        .expanded(config.arrive_radius)
                        .overlaps(&object.bounds),
                ),
                None => {
                    warn!("Target {} of agent {} disappeared", id, self.agent);
                    self.stop(world);
                    self.state = SeekState::Idle;
                    return self.state;
                },
            },
        };

        if reached {
            if self.state != SeekState::Reached {
                info!("Agent {} reached its target at tick {}", self.agent, tick);
            }
            self.stop(world);
            self.state = SeekState::Reached;
            return self.state;
        }

        let exhausted = self.state == SeekState::Seeking && self.steering.is_idle();
        if tick >= self.next_replan || exhausted {
            self.next_replan = tick.saturating_add(config.replan_interval);
            match self.plan(world, config, position, goal) {
                Ok(path) => {
                    debug!(
                        "Agent {} planned {} waypoints (cost {:.1})",
                        self.agent,
                        path.len(),
                        path.cost
                    );
                    self.steering.set_path(&path);
                    self.steering.push_waypoint(goal);
                    self.state = SeekState::Seeking;
                },
                Err(err) if !err.is_retryable() => {
                    error!("Agent {} gave up planning: {err}", self.agent);
                    self.next_replan = u64::MAX;
                    self.stop(world);
                    self.state = SeekState::Idle;
                    return self.state;
                },
                Err(err) => {
                    if self.state != SeekState::Blocked {
                        warn!("Agent {} cannot plan: {err}", self.agent);
                    }
                    self.stop(world);
                    self.state = SeekState::Blocked;
                    return self.state;
                },
            }
        }

        let velocity = self.steering.velocity(position, config.agent_speed);
        world.set_velocity(self.agent, velocity);
        self.state
    }

    /// Rebuilds the tree around the agent and searches it.
    fn plan(
        &mut self,
        world: &World,
        config: &SimConfig,
        position: Vec2,
        goal: Vec2,
    ) -> QuadPathResult<Path> {
        let ignored = match self.target {
            Target::Point(_) => vec![self.agent],
            Target::Object(id) => vec![self.agent, id],
        };
        let margin = config.agent_size * 0.5;
        let obstacles: Vec<_> = world
            .obstacles_excluding(&ignored)
            .iter()
            .map(|bounds| bounds.expanded(margin))
            .collect();
        self.planner
            .rebuild(world.bounds().expanded(-margin), &obstacles)?;
        self.planner.find_path(position, goal)
    }

    fn stop(&mut self, world: &mut World) {
        self.steering.clear();
        world.set_velocity(self.agent, Vec2::ZERO);
    }
}
