//! Street obstacles
//!
//! Obstacles spawn just past the right edge in a random lane and scroll left
//! with the world. Several may share a lane; nothing limits co-occurrence.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::score::{dt_ms, spawn_interval_ms};
use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Obstacle types (closed set, fixed sizes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car,
    Barrier,
    Rubble,
    Vent,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Car,
        ObstacleKind::Barrier,
        ObstacleKind::Rubble,
        ObstacleKind::Vent,
    ];

    pub fn width(&self) -> f32 {
        match self {
            ObstacleKind::Car => 88.0,
            ObstacleKind::Barrier => 42.0,
            ObstacleKind::Rubble => 56.0,
            ObstacleKind::Vent => 36.0,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            ObstacleKind::Car => 38.0,
            ObstacleKind::Barrier => 52.0,
            ObstacleKind::Rubble => 30.0,
            ObstacleKind::Vent => 60.0,
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: u8,
    /// Left edge (screen x)
    pub x: f32,
    /// Set once the obstacle has scrolled past the player
    pub cleared: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.kind.width()
    }

    /// Top edge: obstacles sit on their lane's floor
    #[inline]
    pub fn top(&self, tuning: &Tuning) -> f32 {
        tuning.lane_floor_y(self.lane) - self.kind.height()
    }
}

/// All live obstacles plus the spawn clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Live obstacles (spawn order, ids ascending)
    pub obstacles: Vec<Obstacle>,
    /// Time since the last spawn (ms)
    pub spawn_timer_ms: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every obstacle and restart the spawn clock
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_timer_ms = 0.0;
    }

    /// Spawn one obstacle just past the right edge
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) -> &Obstacle {
        let lane = rng.random_range(0..LANE_COUNT);
        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        self.push(kind, lane, tuning.viewport_width + kind.width())
    }

    /// Place a specific obstacle (tests, scripted set pieces)
    pub fn push(&mut self, kind: ObstacleKind, lane: u8, x: f32) -> &Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        log::trace!("Spawned {:?} #{} in lane {}", kind, id, lane);
        self.obstacles.push(Obstacle {
            id,
            kind,
            lane: lane.min(LANE_COUNT - 1),
            x,
            cleared: false,
        });
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Spawn on cadence, scroll everything left, retire what left the screen
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        world_speed: f32,
        score: f32,
        rng: &mut R,
        tuning: &Tuning,
    ) {
        self.spawn_timer_ms += dt_ms(dt);
        if self.spawn_timer_ms >= spawn_interval_ms(score, tuning) {
            self.spawn_timer_ms = 0.0;
            self.spawn(rng, tuning);
            // Sometimes a second one for a multi-lane threat
            if rng.random_bool(tuning.double_spawn_chance) {
                self.spawn(rng, tuning);
            }
        }

        let shift = world_speed * dt * tuning.reference_fps;
        let player_x = tuning.player_x();
        for obstacle in &mut self.obstacles {
            obstacle.x -= shift;
            if !obstacle.cleared && obstacle.right() < player_x {
                obstacle.cleared = true;
            }
        }
        self.obstacles.retain(|o| o.right() >= 0.0);
    }

    /// Obstacles sharing a lane
    pub fn in_lane(&self, lane: u8) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(move |o| o.lane == lane)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_after_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();

        // 35 * 50 ms = 1750 ms, not there yet
        for _ in 0..35 {
            field.tick(0.05, 5.0, 0.0, &mut rng, &tuning);
        }
        assert!(field.is_empty());

        field.tick(0.05, 5.0, 0.0, &mut rng, &tuning);
        assert!(!field.is_empty());
        assert!(field.len() <= 2);
        assert_eq!(field.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_spawned_obstacles_start_offscreen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = ObstacleField::new();
        for _ in 0..50 {
            let obstacle = field.spawn(&mut rng, &tuning).clone();
            assert!(obstacle.x > tuning.viewport_width);
            assert!(obstacle.lane < LANE_COUNT);
        }
    }

    #[test]
    fn test_obstacles_scroll_left_and_retire() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::new();
        field.push(ObstacleKind::Car, 0, 10.0);
        field.push(ObstacleKind::Vent, 0, 600.0);

        field.tick(1.0 / 60.0, 5.0, 0.0, &mut rng, &tuning);
        assert_eq!(field.len(), 2);
        assert!(field.obstacles[0].x < 10.0);
        assert!(field.obstacles[1].x < 600.0);

        // Car is 88 wide: it needs to travel past x = -88
        for _ in 0..30 {
            field.tick(1.0 / 60.0, 5.0, 0.0, &mut rng, &tuning);
        }
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles[0].kind, ObstacleKind::Vent);
    }

    #[test]
    fn test_cleared_once_past_player() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::new();
        let start = tuning.player_x() - ObstacleKind::Rubble.width() + 1.0;
        field.push(ObstacleKind::Rubble, 1, start);
        assert!(!field.obstacles[0].cleared);
        field.tick(1.0 / 60.0, 5.0, 0.0, &mut rng, &tuning);
        assert!(field.obstacles[0].cleared);
    }

    #[test]
    fn test_lanes_may_stack() {
        let tuning = Tuning::default();
        let mut field = ObstacleField::new();
        field.push(ObstacleKind::Car, 2, 500.0);
        field.push(ObstacleKind::Barrier, 2, 520.0);
        assert_eq!(field.in_lane(2).count(), 2);
        assert_eq!(field.in_lane(0).count(), 0);
        assert!(field.obstacles[0].top(&tuning) < tuning.lane_floor_y(2));
    }
}
