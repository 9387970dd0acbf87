use bevy::prelude::*;

use crate::core::config::ActorConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

const VERTICAL_AIM_EPSILON_DEG: f32 = 1e-3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing for an aim angle in degrees. Vertical aim (±90° within float noise) keeps `previous`.
    pub fn from_aim(angle_deg: f32, previous: Facing) -> Facing {
        let off_vertical = angle_deg.abs() - 90.0;
        if off_vertical.abs() <= VERTICAL_AIM_EPSILON_DEG {
            previous
        } else if off_vertical < 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// Live, authoritative state of the playable actor.
#[derive(Component, Debug, Clone)]
pub struct Actor {
    pub health: i32,
    pub max_health: i32,
    pub lives: u32,
    pub life: LifeState,
    pub facing: Facing,
    pub is_running: bool,
    pub move_direction: Vec2,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub move_speed: f32,
}

impl Actor {
    pub fn from_config(cfg: &ActorConfig) -> Self {
        Self {
            health: cfg.max_health,
            max_health: cfg.max_health,
            lives: cfg.starting_lives,
            life: LifeState::Alive,
            facing: Facing::Right,
            is_running: false,
            move_direction: Vec2::ZERO,
            walk_speed: cfg.walk_speed,
            run_speed: cfg.run_speed,
            move_speed: cfg.walk_speed,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    /// Health may go to zero or below; the death check picks that up. Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0));
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
    }

    /// Alive with health at or below zero: Die has not run yet.
    pub fn needs_death(&self) -> bool {
        self.is_alive() && self.health <= 0
    }

    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
        self.move_speed = if running { self.run_speed } else { self.walk_speed };
    }

    pub fn velocity(&self) -> Vec2 {
        self.move_direction * self.move_speed
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::from_config(&ActorConfig::default())
    }
}

/// Normalized movement vector from four directional inputs (zero when none or cancelled out).
pub fn direction_from_axes(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let x = (right as i8 - left as i8) as f32;
    let y = (up as i8 - down as i8) as f32;
    Vec2::new(x, y).normalize_or_zero()
}

/// Aim angle in degrees, measured from +X, for a look-target relative to the actor.
pub fn aim_angle_deg(difference: Vec2) -> f32 {
    difference.y.atan2(difference.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_from_aim_angles() {
        assert_eq!(Facing::from_aim(45.0, Facing::Left), Facing::Right);
        assert_eq!(Facing::from_aim(135.0, Facing::Right), Facing::Left);
        assert_eq!(Facing::from_aim(-135.0, Facing::Right), Facing::Left);
        assert_eq!(Facing::from_aim(180.0, Facing::Right), Facing::Left);
        assert_eq!(Facing::from_aim(0.0, Facing::Left), Facing::Right);
    }

    #[test]
    fn vertical_aim_keeps_previous_facing() {
        assert_eq!(Facing::from_aim(90.0, Facing::Left), Facing::Left);
        assert_eq!(Facing::from_aim(-90.0, Facing::Right), Facing::Right);
        assert!((aim_angle_deg(Vec2::new(0.0, 5.0)) - 90.0).abs() < 1e-3);
        let up = aim_angle_deg(Vec2::new(0.0, 5.0));
        let down = aim_angle_deg(Vec2::new(0.0, -5.0));
        assert_eq!(Facing::from_aim(up, Facing::Left), Facing::Left);
        assert_eq!(Facing::from_aim(down, Facing::Right), Facing::Right);
        assert_eq!(Facing::from_aim(89.5, Facing::Left), Facing::Right);
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut a = Actor::default();
        a.take_damage(50);
        a.heal(1000);
        assert_eq!(a.health, a.max_health);
    }

    #[test]
    fn extreme_amounts_keep_health_bounded() {
        let mut a = Actor::default();
        a.take_damage(-300);
        assert_eq!(a.health, a.max_health);
        a.heal(i32::MAX);
        assert_eq!(a.health, a.max_health);
        a.take_damage(i32::MAX);
        a.take_damage(i32::MAX);
        assert_eq!(a.health, i32::MIN);
        assert!(a.needs_death());
    }

    #[test]
    fn damage_may_go_negative() {
        let mut a = Actor::default();
        a.take_damage(a.max_health + 25);
        assert_eq!(a.health, -25);
        assert!(a.needs_death());
        assert_eq!(a.health_fraction(), 0.0);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let d = direction_from_axes(true, false, false, true);
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert_eq!(direction_from_axes(true, true, false, false), Vec2::ZERO);
    }

    #[test]
    fn running_switches_speed() {
        let mut a = Actor::default();
        a.move_direction = Vec2::X;
        a.set_running(true);
        assert_eq!(a.velocity(), Vec2::new(a.run_speed, 0.0));
        a.set_running(false);
        assert_eq!(a.velocity(), Vec2::new(a.walk_speed, 0.0));
    }
}
