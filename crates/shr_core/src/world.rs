//! Transient entities: enemies, projectiles, and collectibles.
//!
//! The world is deliberately not a physics engine. Entities are AABBs with
//! a velocity; the only queries the game needs are "advance everything one
//! step", "what does the player overlap", and "cull anything that left the
//! playfield". Culling against the expanded playfield rect is a hard
//! requirement: it bounds live-entity count over an unbounded play session.
//!
//! Enemies spawn in a **telegraph** phase: visible but inert and immobile,
//! signaling the incoming attack. Only after the telegraph timeout elapses
//! do they move, fall, and damage the player. Collectibles never telegraph.

use glam::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub center_x: f32,
    pub center_y: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Aabb {
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.center_x - other.center_x).abs() <= self.half_w + other.half_w
            && (self.center_y - other.center_y).abs() <= self.half_h + other.half_h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    FallingEnemy,
    WalkingEnemy,
    FlyingEnemy,
    Collectible,
}

impl EntityKind {
    /// Enemies damage the player once live; collectibles heal and score.
    pub fn is_enemy(self) -> bool {
        !matches!(self, Self::Collectible)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FallingEnemy => "falling_enemy",
            Self::WalkingEnemy => "walking_enemy",
            Self::FlyingEnemy => "flying_enemy",
            Self::Collectible => "collectible",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub id: u64,
    pub kind: EntityKind,
    pub aabb: Aabb,
    pub velocity: Vec2,
    /// Remaining telegraph time; > 0 means inert and immobile.
    pub telegraph_remaining: f32,
}

impl Entity {
    pub fn is_telegraphing(&self) -> bool {
        self.telegraph_remaining > 0.0
    }
}

/// Playfield rect. Entities are culled once they leave this rect expanded
/// by `margin` on all sides.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Bounds {
    fn contains(&self, aabb: &Aabb) -> bool {
        aabb.center_x >= -self.margin
            && aabb.center_x <= self.width + self.margin
            && aabb.center_y >= -self.margin
            && aabb.center_y <= self.height + self.margin
    }
}

/// A player-overlap event reported by [`World::contacts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub entity_id: u64,
    pub kind: EntityKind,
}

/// Entity store for one game scene. Ids are monotonic and never reused
/// within a scene.
#[derive(Debug, Default)]
pub struct World {
    next_id: u64,
    entities: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: EntityKind, aabb: Aabb, velocity: Vec2, telegraph: f32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            kind,
            aabb,
            velocity,
            telegraph_remaining: telegraph.max(0.0),
        });
        log::debug!(
            "Spawned {} #{id} at ({:.0}, {:.0})",
            kind.label(),
            aabb.center_x,
            aabb.center_y
        );
        id
    }

    /// Advance telegraph clocks and entity motion, then cull anything
    /// outside the expanded playfield.
    pub fn step(&mut self, dt: f32, gravity: f32, max_fall_speed: f32, bounds: &Bounds) {
        for entity in &mut self.entities {
            if entity.is_telegraphing() {
                // Telegraphing entities are frozen in place.
                entity.telegraph_remaining -= dt;
                continue;
            }
            if entity.kind == EntityKind::FallingEnemy {
                entity.velocity.y = (entity.velocity.y + gravity * dt).max(max_fall_speed);
            }
            entity.aabb.center_x += entity.velocity.x * dt;
            entity.aabb.center_y += entity.velocity.y * dt;
        }

        self.entities.retain(|entity| {
            let keep = bounds.contains(&entity.aabb);
            if !keep {
                log::debug!("Culled {} #{} (left playfield)", entity.kind.label(), entity.id);
            }
            keep
        });
    }

    /// All live (non-telegraphing) entities the player currently overlaps.
    pub fn contacts(&self, player: &Aabb) -> Vec<Contact> {
        self.entities
            .iter()
            .filter(|e| !e.is_telegraphing() && e.aabb.overlaps(player))
            .map(|e| Contact {
                entity_id: e.id,
                kind: e.kind,
            })
            .collect()
    }

    pub fn despawn(&mut self, id: u64) {
        self.entities.retain(|e| e.id != id);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
        margin: 64.0,
    };

    fn square(x: f32, y: f32, half: f32) -> Aabb {
        Aabb {
            center_x: x,
            center_y: y,
            half_w: half,
            half_h: half,
        }
    }

    #[test]
    fn overlap_is_symmetric_and_edge_inclusive() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(20.0, 0.0, 10.0);
        let c = square(21.0, 0.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn telegraphing_entity_is_immobile_and_untouchable() {
        let mut world = World::new();
        world.spawn(
            EntityKind::FallingEnemy,
            square(400.0, 500.0, 16.0),
            Vec2::ZERO,
            0.5,
        );

        let player = square(400.0, 500.0, 24.0);
        world.step(0.1, -2400.0, -1200.0, &BOUNDS);
        assert!(world.contacts(&player).is_empty(), "inert while telegraphing");

        let entity = *world.entities().next().expect("entity exists");
        assert_eq!(entity.aabb.center_y, 500.0, "frozen while telegraphing");
    }

    #[test]
    fn falling_enemy_drops_after_telegraph() {
        let mut world = World::new();
        world.spawn(
            EntityKind::FallingEnemy,
            square(400.0, 500.0, 16.0),
            Vec2::ZERO,
            0.1,
        );

        // 10 steps: 3 finish the telegraph, the rest fall a short distance
        // without reaching the cull margin.
        for _ in 0..10 {
            world.step(1.0 / 30.0, -2400.0, -1200.0, &BOUNDS);
        }
        let entity = *world.entities().next().expect("entity exists");
        assert!(entity.aabb.center_y < 500.0, "gravity applies when live");
    }

    #[test]
    fn entities_leaving_bounds_self_destroy() {
        let mut world = World::new();
        world.spawn(
            EntityKind::Collectible,
            square(810.0, 300.0, 12.0),
            Vec2::new(-160.0, 0.0),
            0.0,
        );

        // 10 simulated seconds at 160 px/s left clears the margin easily.
        for _ in 0..300 {
            world.step(1.0 / 30.0, -2400.0, -1200.0, &BOUNDS);
        }
        assert!(world.is_empty(), "collectible should cull past the margin");
    }

    #[test]
    fn contact_reports_live_enemy_and_despawn_removes_it() {
        let mut world = World::new();
        let id = world.spawn(
            EntityKind::FlyingEnemy,
            square(100.0, 300.0, 18.0),
            Vec2::new(-200.0, 0.0),
            0.0,
        );

        let player = square(100.0, 300.0, 24.0);
        let contacts = world.contacts(&player);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].entity_id, id);
        assert_eq!(contacts[0].kind, EntityKind::FlyingEnemy);

        world.despawn(id);
        assert!(world.contacts(&player).is_empty());
    }

    #[test]
    fn ids_are_unique_within_a_scene() {
        let mut world = World::new();
        let a = world.spawn(EntityKind::Collectible, square(0.0, 0.0, 1.0), Vec2::ZERO, 0.0);
        world.despawn(a);
        let b = world.spawn(EntityKind::Collectible, square(0.0, 0.0, 1.0), Vec2::ZERO, 0.0);
        assert_ne!(a, b, "ids are never reused");
    }
}
