/// All game entity types: plain data plus their bounding boxes.

use std::fmt;

use crate::vector::Vec2;

// ── Bounding boxes ────────────────────────────────────────────────────────────

/// Integer axis-aligned box.  Built from float positions by truncation so
/// overlaps are decided on whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_float(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x as i32, y as i32, w as i32, h as i32)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when both boxes share a region of positive area.  Empty boxes
    /// never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Bonuses ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BonusKind {
    /// Shortens the fire cooldown.
    RapidFire,
    /// Adds two angled shots to every volley.
    Spread,
}

impl BonusKind {
    pub const ALL: [BonusKind; 2] = [BonusKind::RapidFire, BonusKind::Spread];

    pub fn index(self) -> usize {
        match self {
            BonusKind::RapidFire => 0,
            BonusKind::Spread => 1,
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusKind::RapidFire => f.write_str("Rapid Fire"),
            BonusKind::Spread => f.write_str("Spread"),
        }
    }
}

/// A bonus pickup falling toward the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Bonus {
    pub kind: BonusKind,
    /// Centre of the pickup.
    pub position: Vec2,
    pub fall_speed: f32,
    pub radius: f32,
}

impl Bonus {
    pub fn new(kind: BonusKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            fall_speed: 120.0,
            radius: 10.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_float(
            self.position.x - self.radius,
            self.position.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

/// The live effect of a picked-up bonus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveBonus {
    pub kind: BonusKind,
    /// Seconds left before the effect wears off.
    pub remaining: f32,
}

/// Active effects keyed by kind.  One slot per `BonusKind`, so a kind can
/// never be active twice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveBonuses {
    slots: [Option<f32>; 2],
}

impl ActiveBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `kind` with `duration` seconds, or reset its timer to
    /// `duration` if it is already running.  Returns `true` on a refresh.
    pub fn apply(&mut self, kind: BonusKind, duration: f32) -> bool {
        self.slots[kind.index()].replace(duration).is_some()
    }

    pub fn is_active(&self, kind: BonusKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub fn remaining(&self, kind: BonusKind) -> Option<f32> {
        self.slots[kind.index()]
    }

    /// Count every timer down by `dt` and drop the ones that reach zero.
    /// Returns the kinds that expired during this call.
    pub fn tick(&mut self, dt: f32) -> Vec<BonusKind> {
        let mut expired = Vec::new();
        for kind in BonusKind::ALL {
            let slot = &mut self.slots[kind.index()];
            if let Some(remaining) = slot {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    *slot = None;
                    expired.push(kind);
                }
            }
        }
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = ActiveBonus> + '_ {
        BonusKind::ALL.into_iter().filter_map(move |kind| {
            self.slots[kind.index()].map(|remaining| ActiveBonus { kind, remaining })
        })
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Top-left corner.
    pub position: Vec2,
    /// Pixels per second.  Spread shots carry a horizontal component.
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Projectile {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            width: 6.0,
            height: 16.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_float(self.position.x, self.position.y, self.width, self.height)
    }
}

// ── Player & aliens ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal pixels per second.
    pub speed: f32,
    /// Seconds between shots without Rapid Fire.
    pub base_cooldown: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            width: 48.0,
            height: 26.0,
            speed: 320.0,
            base_cooldown: 0.45,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_float(self.position.x, self.position.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    /// Top-left corner.
    pub position: Vec2,
    pub size: f32,
}

impl Alien {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self { position, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_float(self.position.x, self.position.y, self.size, self.size)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the shooter tracks between frames.  Owned by exactly one
/// scene; the rules in `compute` are its only mutators.
#[derive(Clone, Debug)]
pub struct InvadersState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub aliens: Vec<Alien>,
    pub bonuses: Vec<Bonus>,
    pub active_bonuses: ActiveBonuses,
    /// Seconds accumulated since the last shot.
    pub fire_timer: f32,
    /// Sticky fire intent set by a Space press.
    pub is_firing: bool,
    pub score: u32,
    /// Current wave, starting at 1.
    pub level: u32,
    /// +1 moving right, -1 moving left.
    pub alien_direction: f32,
    /// Formation speed in pixels per second.
    pub alien_speed: f32,
    pub width: f32,
    pub height: f32,
}
