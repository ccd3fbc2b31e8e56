//! Waypoint following.

use std::collections::VecDeque;

use quadpath_common::Vec2;
use quadpath_kernel::Path;

/// Queue of waypoints turned into one velocity per tick.
#[derive(Debug, Clone, Default)]
pub struct Steering {
    waypoints: VecDeque<Vec2>,
    arrive_radius: f32,
}

impl Steering {
    /// Creates an idle steering with the given arrive radius.
    #[must_use]
    pub fn new(arrive_radius: f32) -> Self {
        Self {
            waypoints: VecDeque::new(),
            arrive_radius,
        }
    }

    /// Replaces the queue with the waypoints of `path`.
    pub fn set_path(&mut self, path: &Path) {
        self.waypoints.clear();
        self.waypoints.extend(path.waypoints.iter().copied());
    }

    /// Appends a single waypoint.
    pub fn push_waypoint(&mut self, point: Vec2) {
        self.waypoints.push_back(point);
    }

    /// Drops every waypoint.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Returns true when there is nothing left to follow.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoint currently steered towards.
    #[must_use]
    pub fn next_waypoint(&self) -> Option<Vec2> {
        self.waypoints.front().copied()
    }

    /// Number of queued waypoints.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.waypoints.len()
    }

    /// Velocity that moves `position` towards the next waypoint at `speed`.
    ///
    /// Waypoints within the arrive radius are consumed first. The result
    /// never overshoots the waypoint and is zero once the queue is empty.
    pub fn velocity(&mut self, position: Vec2, speed: f32) -> Vec2 {
        while let Some(&next) = self.waypoints.front() {
            if position.distance(next) > self.arrive_radius {
                break;
            }
            self.waypoints.pop_front();
        }

        self.waypoints
            .front()
            .map_or(Vec2::ZERO, |&next| (next - position).clamp_length_max(speed))
    }
}
