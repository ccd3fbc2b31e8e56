//! Object storage and per-tick movement.
//!
//! Agents move axis by axis: first along x, then along y. A move that would
//! overlap an obstacle or leave the world is rejected for that axis only, so
//! an agent pressed against a wall still slides along it.

use quadpath_common::{EntityId, Rect, Vec2};
use tracing::{debug, trace};

use crate::object::{ObjectKind, WorldObject};

/// Every object in the simulation plus the collision step.
#[derive(Debug)]
pub struct World {
    bounds: Rect,
    objects: Vec<WorldObject>,
    rng: fastrand::Rng,
}

impl World {
    /// Creates an empty world with a randomly seeded sidestep generator.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self::with_seed(bounds, None)
    }

    /// Creates an empty world, seeding sidestep choices when `seed` is set.
    #[must_use]
    pub fn with_seed(bounds: Rect, seed: Option<u64>) -> Self {
        Self {
            bounds,
            objects: Vec::new(),
            rng: seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
        }
    }

    /// World bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the world holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Adds an object and returns its id.
    pub fn insert(&mut self, object: WorldObject) -> EntityId {
        let id = object.id;
        trace!("Inserted {:?} {} at {:?}", object.kind, id, object.bounds);
        self.objects.push(object);
        id
    }

    /// Adds a wall.
    pub fn add_wall(&mut self, bounds: Rect) -> EntityId {
        self.insert(WorldObject::new(ObjectKind::Wall, bounds))
    }

    /// Adds a gate, initially open or closed.
    pub fn add_gate(&mut self, bounds: Rect, open: bool) -> EntityId {
        self.insert(WorldObject::new(ObjectKind::Gate { open }, bounds))
    }

    /// Adds a square agent of edge `size` centered on `center`.
    pub fn add_agent(&mut self, center: Vec2, size: f32) -> EntityId {
        let bounds = Rect::from_center(center, Vec2::splat(size * 0.5));
        self.insert(WorldObject::new(ObjectKind::Agent, bounds))
    }

    /// Removes an object.
    pub fn remove(&mut self, id: EntityId) -> Option<WorldObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Looks up an object.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut WorldObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Iterates over all objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter()
    }

    /// Sets the velocity applied on the next step.
    /// Returns false if the object does not exist.
    pub fn set_velocity(&mut self, id: EntityId, velocity: Vec2) -> bool {
        match self.get_mut(id) {
            Some(object) => {
                object.velocity = velocity;
                true
            },
            None => false,
        }
    }

    /// Opens or closes a gate.
    /// Returns false if `id` is not a gate.
    pub fn set_gate_open(&mut self, id: EntityId, open: bool) -> bool {
        match self.get_mut(id) {
            Some(object) if matches!(object.kind, ObjectKind::Gate { .. }) => {
                object.kind = ObjectKind::Gate { open };
                debug!("Gate {} {}", id, if open { "opened" } else { "closed" });
                true
            },
            _ => false,
        }
    }

    /// Obstacle boxes as seen by `id`: everything that blocks, except itself.
    #[must_use]
    pub fn obstacles_for(&self, id: EntityId) -> Vec<Rect> {
        self.obstacles_excluding(&[id])
    }

    /// Obstacle boxes, leaving out the listed objects.
    #[must_use]
    pub fn obstacles_excluding(&self, ignored: &[EntityId]) -> Vec<Rect> {
        self.objects
            .iter()
            .filter(|o| o.is_obstacle() && !ignored.contains(&o.id))
            .map(|o| o.bounds)
            .collect()
    }

    /// Returns true if `bounds` lies inside the world and overlaps no
    /// obstacle other than `id`.
    #[must_use]
    pub fn is_free(&self, bounds: &Rect, id: EntityId) -> bool {
        self.bounds.contains(bounds)
            && !self
                .objects
                .iter()
                .any(|o| o.id != id && o.is_obstacle() && o.bounds.overlaps(bounds))
    }

    /// Advances every agent by its velocity.
    pub fn step(&mut self) {
        for index in 0..self.objects.len() {
            if self.objects[index].is_agent() {
                self.move_agent(index);
            }
        }
    }

    /// Moves one agent with collision.
    fn move_agent(&mut self, index: usize) {
        let WorldObject {
            id,
            bounds,
            velocity,
            ..
        } = self.objects[index].clone();
        if velocity == Vec2::ZERO {
            return;
        }

        let mut moved = bounds;

        // Try horizontal movement first
        if velocity.x != 0.0 {
            let test = moved.translated(Vec2::new(velocity.x, 0.0));
            if self.is_free(&test, id) {
                moved = test;
            } else {
                moved = self.sidestep(moved, id, velocity.x.abs());
            }
        }

        // Then vertical movement
        if velocity.y != 0.0 {
            let test = moved.translated(Vec2::new(0.0, velocity.y));
            if self.is_free(&test, id) {
                moved = test;
            }
        }

        self.objects[index].bounds = moved;
    }

    /// Shifts a horizontally blocked agent up or down, picked at random.
    fn sidestep(&mut self, bounds: Rect, id: EntityId, distance: f32) -> Rect {
        let offset = if self.rng.bool() { distance } else { -distance };
        let test = bounds.translated(Vec2::new(0.0, offset));
        if self.is_free(&test, id) {
            trace!("Agent {} sidestepped by {:.1}", id, offset);
            test
        } else {
            bounds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::with_seed(Rect::new(0.0, 0.0, 100.0, 100.0), Some(1))
    }

    #[test]
    fn test_add_get_remove() {
        let mut world = world();
        let wall = world.add_wall(Rect::new(10.0, 10.0, 20.0, 20.0));
        let agent = world.add_agent(Vec2::new(50.0, 50.0), 4.0);
        assert_eq!(world.len(), 2);
        assert_eq!(
            world.get(agent).map(|o| o.bounds),
            Some(Rect::new(48.0, 48.0, 52.0, 52.0))
        );

        let removed = world.remove(wall).expect("wall should exist");
        assert_eq!(removed.kind, ObjectKind::Wall);
        assert!(world.get(wall).is_none());
        assert!(world.remove(wall).is_none());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_obstacles_exclude_self_and_open_gates() {
        let mut world = world();
        let wall = Rect::new(0.0, 0.0, 5.0, 5.0);
        world.add_wall(wall);
        let gate = world.add_gate(Rect::new(40.0, 0.0, 60.0, 2.0), true);
        let me = world.add_agent(Vec2::new(50.0, 50.0), 4.0);
        let other = world.add_agent(Vec2::new(80.0, 80.0), 4.0);

        let seen = world.obstacles_for(me);
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&wall));
        assert!(seen.contains(&world.get(other).map(|o| o.bounds).unwrap_or_default()));

        assert!(world.set_gate_open(gate, false));
        assert_eq!(world.obstacles_for(me).len(), 3);
        assert_eq!(world.obstacles_excluding(&[me, other]).len(), 2);
        assert!(!world.set_gate_open(me, true));
    }

    #[test]
    fn test_agent_moves_freely() {
        let mut world = world();
        let agent = world.add_agent(Vec2::new(50.0, 50.0), 4.0);
        world.set_velocity(agent, Vec2::new(2.0, -1.0));
        world.step();
        assert_eq!(
            world.get(agent).map(|o| o.center()),
            Some(Vec2::new(52.0, 49.0))
        );
    }

    #[test]
    fn test_agent_slides_along_wall() {
        let mut world = world();
        world.add_wall(Rect::new(0.0, 40.0, 100.0, 48.0));
        let agent = world.add_agent(Vec2::new(50.0, 50.0), 4.0);
        world.set_velocity(agent, Vec2::new(1.0, -3.0));
        world.step();
        // Vertical move is blocked, horizontal one goes through.
        assert_eq!(
            world.get(agent).map(|o| o.center()),
            Some(Vec2::new(51.0, 50.0))
        );
    }

    #[test]
    fn test_horizontal_block_sidesteps_vertically() {
        let mut world = world();
        world.add_wall(Rect::new(52.0, 46.0, 60.0, 54.0));
        let agent = world.add_agent(Vec2::new(50.0, 50.0), 4.0);
        world.set_velocity(agent, Vec2::new(2.0, 0.0));
        world.step();

        let center = world.get(agent).map(|o| o.center()).unwrap_or_default();
        assert_eq!(center.x, 50.0);
        assert!(center.y == 48.0 || center.y == 52.0, "center {center:?}");
    }

    #[test]
    fn test_agent_stays_inside_world() {
        let mut world = world();
        let agent = world.add_agent(Vec2::new(2.0, 2.0), 4.0);
        world.set_velocity(agent, Vec2::new(-5.0, -5.0));
        world.step();
        assert_eq!(
            world.get(agent).map(|o| o.center()),
            Some(Vec2::new(2.0, 2.0))
        );
    }

    #[test]
    fn test_agents_block_each_other() {
        let mut world = world();
        let a = world.add_agent(Vec2::new(50.0, 50.0), 4.0);
        world.add_agent(Vec2::new(50.0, 56.0), 4.0);
        world.set_velocity(a, Vec2::new(0.0, 3.0));
        world.step();
        assert_eq!(world.get(a).map(|o| o.center()), Some(Vec2::new(50.0, 50.0)));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn wall_strategy() -> impl Strategy<Value = Rect> {
            (0u8..90, 0u8..90, 2u8..30, 2u8..30).prop_map(|(x, y, w, h)| {
                let (x, y) = (f32::from(x), f32::from(y));
                Rect::new(x, y, x + f32::from(w), y + f32::from(h))
            })
        }

        proptest! {
            #[test]
            fn agents_never_enter_obstacles(
                walls in prop::collection::vec(wall_strategy(), 0..6),
                start in (5u8..95, 5u8..95),
                moves in prop::collection::vec((-3i8..=3, -3i8..=3), 1..40),
            ) {
                let mut world = World::with_seed(Rect::new(0.0, 0.0, 100.0, 100.0), Some(9));
                for wall in &walls {
                    world.add_wall(*wall);
                }
                let center = Vec2::new(f32::from(start.0), f32::from(start.1));
                let agent = world.add_agent(center, 4.0);
                let bounds = world.get(agent).map(|o| o.bounds).unwrap_or_default();
                prop_assume!(world.is_free(&bounds, agent));

                for (dx, dy) in moves {
                    world.set_velocity(agent, Vec2::new(f32::from(dx), f32::from(dy)));
                    world.step();
                    let bounds = world.get(agent).map(|o| o.bounds).unwrap_or_default();
                    prop_assert!(world.is_free(&bounds, agent));
                }
            }
        }
    }
}
