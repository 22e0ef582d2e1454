//! Wandering markers the camera can follow.
//!
//! Markers are plain `hecs` entities. One of them can be followed: its
//! position is mirrored into a [`PositionRef`] after every update, and a
//! follow task holding a clone of that handle sees the new position on its
//! next frame.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use rand::Rng;

use tile_camera::constants::*;
use tile_camera::{AreaBox, PositionRef};

/// World position of a marker's center
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// World units per second
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Marker color
#[derive(Debug, Clone, Copy)]
pub struct Tint(pub Vec3);

/// Seconds until the marker picks a new heading
#[derive(Debug, Clone, Copy)]
pub struct Wander {
    pub timer: f32,
}

const MARKER_COLORS: [Vec3; 6] = [
    Vec3::new(0.95, 0.3, 0.25),
    Vec3::new(0.98, 0.8, 0.2),
    Vec3::new(0.6, 0.35, 0.9),
    Vec3::new(0.2, 0.85, 0.85),
    Vec3::new(1.0, 0.55, 0.1),
    Vec3::new(0.95, 0.45, 0.75),
];

pub struct Markers {
    world: World,
    /// Spawn order, used to cycle the followed marker
    order: Vec<Entity>,
    followed: Option<(usize, PositionRef)>,
}

impl Markers {
    /// Spawn `count` markers at random points inside `area`.
    pub fn spawn(count: usize, area: &AreaBox, rng: &mut impl Rng) -> Self {
        let mut world = World::new();
        let mut order = Vec::with_capacity(count);

        for i in 0..count {
            let position = area.top_left
                + Vec2::new(
                    rng.gen_range(0.0..area.width.max(1.0)),
                    rng.gen_range(0.0..area.height.max(1.0)),
                );
            let entity = world.spawn((
                Position(position),
                Velocity(random_velocity(rng)),
                Tint(MARKER_COLORS[i % MARKER_COLORS.len()]),
                Wander {
                    timer: rng.gen_range(0.0..MARKER_TURN_INTERVAL),
                },
            ));
            order.push(entity);
        }

        Self {
            world,
            order,
            followed: None,
        }
    }

    /// Move every marker, bouncing off the edges of `area`.
    pub fn update(&mut self, area: &AreaBox, dt: f32, rng: &mut impl Rng) {
        puffin::profile_function!();
        let bottom_right = area.bottom_right();

        for (_, (position, velocity, wander)) in
            self.world.query_mut::<(&mut Position, &mut Velocity, &mut Wander)>()
        {
            wander.timer -= dt;
            if wander.timer <= 0.0 {
                velocity.0 = random_velocity(rng);
                wander.timer = MARKER_TURN_INTERVAL;
            }

            position.0 += velocity.0 * dt;

            if position.0.x < area.top_left.x || position.0.x > bottom_right.x {
                velocity.0.x = -velocity.0.x;
            }
            if position.0.y < area.top_left.y || position.0.y > bottom_right.y {
                velocity.0.y = -velocity.0.y;
            }
            position.0 = area.clamp_point(position.0);
        }

        self.sync_followed();
    }

    /// Start following the marker after the current one and return its
    /// live position handle.
    pub fn follow_next(&mut self) -> Option<PositionRef> {
        if self.order.is_empty() {
            return None;
        }
        let index = match &self.followed {
            Some((index, _)) => (index + 1) % self.order.len(),
            None => 0,
        };
        let handle = PositionRef::new(self.position_of(index).unwrap_or_default());
        log::debug!("Following marker {}", index);
        self.followed = Some((index, handle.clone()));
        Some(handle)
    }

    pub fn stop_following(&mut self) {
        self.followed = None;
    }

    pub fn followed_index(&self) -> Option<usize> {
        self.followed.as_ref().map(|(index, _)| *index)
    }

    /// Position and color of each marker, for rendering.
    pub fn instances(&self) -> Vec<(Vec2, Vec3)> {
        let mut instances = Vec::with_capacity(self.order.len());
        for (_, (position, tint)) in self.world.query::<(&Position, &Tint)>().iter() {
            instances.push((position.0, tint.0));
        }
        instances
    }

    fn position_of(&self, index: usize) -> Option<Vec2> {
        let entity = *self.order.get(index)?;
        self.world.get::<&Position>(entity).ok().map(|position| position.0)
    }

    fn sync_followed(&self) {
        if let Some((index, handle)) = &self.followed {
            if let Some(position) = self.position_of(*index) {
                handle.set(position);
            }
        }
    }
}

fn random_velocity(rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let speed = rng.gen_range(MARKER_MIN_SPEED..MARKER_MAX_SPEED);
    Vec2::from_angle(angle) * speed
}
