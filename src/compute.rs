/// Shooter game rules.
///
/// Every public function operates on a mutable `InvadersState`; the only
/// other input is the injected RNG, so callers control determinism (tests
/// use a seeded or mock generator).  `tick` runs the per-frame steps in
/// their fixed order.

use log::{debug, info, trace};
use rand::Rng;

use crate::entities::{
    ActiveBonuses, Alien, Bonus, BonusKind, InvadersState, Player, Projectile,
};
use crate::input::Controls;
use crate::vector::Vec2;

// ── Tuning ───────────────────────────────────────────────────────────────────

/// Horizontal margin the player cannot cross on either side.
pub const PLAYER_MARGIN: f32 = 16.0;
pub const PROJECTILE_SPEED: f32 = 460.0;
/// Horizontal speed of the two extra Spread shots.
pub const SPREAD_SPEED: f32 = 160.0;
pub const RAPID_FIRE_FACTOR: f32 = 0.4;
pub const RAPID_FIRE_MIN_COOLDOWN: f32 = 0.15;

pub const INITIAL_ALIEN_SPEED: f32 = 55.0;
pub const WAVE_SPEED_FACTOR: f32 = 1.12;
/// The formation turns around once it comes this close to a screen edge.
pub const FORMATION_EDGE: f32 = 12.0;
pub const DROP_DISTANCE: f32 = 26.0;

pub const FORMATION_COLUMNS: usize = 9;
pub const FORMATION_BASE_ROWS: usize = 4;
pub const ALIEN_SIZE: f32 = 32.0;
pub const ALIEN_SPACING: f32 = 12.0;
pub const FORMATION_TOP: f32 = 70.0;

pub const SCORE_PER_ALIEN: u32 = 10;
pub const BONUS_DROP_CHANCE: f64 = 0.22;

/// Seconds a picked-up bonus stays active.
pub fn bonus_duration(kind: BonusKind) -> f32 {
    match kind {
        BonusKind::RapidFire => 6.0,
        BonusKind::Spread => 7.5,
    }
}

/// Rows in the formation for a given wave.
pub fn wave_rows(level: u32) -> usize {
    FORMATION_BASE_ROWS + (level / 2) as usize
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state for a surface of `width` × `height` pixels, with
/// the first wave already in place.
pub fn init_state(width: f32, height: f32) -> InvadersState {
    let mut state = InvadersState {
        player: Player::new(Vec2::new(width / 2.0 - 24.0, height - 70.0)),
        projectiles: Vec::new(),
        aliens: Vec::new(),
        bonuses: Vec::new(),
        active_bonuses: ActiveBonuses::new(),
        fire_timer: 0.0,
        is_firing: false,
        score: 0,
        level: 1,
        alien_direction: 1.0,
        alien_speed: INITIAL_ALIEN_SPEED,
        width,
        height,
    };
    spawn_wave(&mut state);
    state
}

/// Replace the formation with a fresh, centred grid for the current level.
/// Also resets the formation direction and the fire state.
pub fn spawn_wave(state: &mut InvadersState) {
    let rows = wave_rows(state.level);
    let cols = FORMATION_COLUMNS;
    let total_width = cols as f32 * ALIEN_SIZE + (cols - 1) as f32 * ALIEN_SPACING;
    let start_x = (state.width - total_width) / 2.0;

    state.aliens = (0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| {
                let x = start_x + col as f32 * (ALIEN_SIZE + ALIEN_SPACING);
                let y = FORMATION_TOP + row as f32 * (ALIEN_SIZE + ALIEN_SPACING);
                Alien::new(Vec2::new(x, y), ALIEN_SIZE)
            })
        })
        .collect();

    state.alien_direction = 1.0;
    state.fire_timer = 0.0;
    state.is_firing = false;

    info!(
        "wave {} spawned: {} aliens in {} rows, speed {:.1}",
        state.level,
        state.aliens.len(),
        rows,
        state.alien_speed
    );
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Move the player by `speed * dt` in the net held direction and clamp it
/// inside the side margins.
pub fn move_player(state: &mut InvadersState, controls: &Controls, dt: f32) {
    let direction = controls.direction();
    let player = &mut state.player;
    player.position.x += direction * player.speed * dt;

    let max_x = state.width - player.width - PLAYER_MARGIN;
    player.position.x = player.position.x.min(max_x).max(PLAYER_MARGIN);
}

/// Seconds that must pass between shots right now.
pub fn current_cooldown(state: &InvadersState) -> f32 {
    let base = state.player.base_cooldown;
    if state.active_bonuses.is_active(BonusKind::RapidFire) {
        (base * RAPID_FIRE_FACTOR).max(RAPID_FIRE_MIN_COOLDOWN)
    } else {
        base
    }
}

/// Advance the fire timer and shoot if the player wants to and the cooldown
/// has elapsed.  Returns `true` when a volley was fired.
pub fn update_firing(state: &mut InvadersState, wants_fire: bool, dt: f32) -> bool {
    state.fire_timer += dt;
    if wants_fire && state.fire_timer >= current_cooldown(state) {
        fire_projectile(state);
        true
    } else {
        false
    }
}

/// Emit one volley from the player's horizontal centre and reset the timer.
/// Spread adds two angled shots to the straight one.
pub fn fire_projectile(state: &mut InvadersState) {
    state.fire_timer = 0.0;

    let player = &state.player;
    let origin = Vec2::new(player.position.x + player.width / 2.0, player.position.y);

    let mut velocities = vec![Vec2::new(0.0, -PROJECTILE_SPEED)];
    if state.active_bonuses.is_active(BonusKind::Spread) {
        velocities.push(Vec2::new(-SPREAD_SPEED, -PROJECTILE_SPEED));
        velocities.push(Vec2::new(SPREAD_SPEED, -PROJECTILE_SPEED));
    }

    trace!("volley of {} from x={:.1}", velocities.len(), origin.x);
    for velocity in velocities {
        let position = Vec2::new(origin.x - 3.0, origin.y - 10.0);
        state.projectiles.push(Projectile::new(position, velocity));
    }
}

// ── Projectiles & formation ──────────────────────────────────────────────────

/// Move every projectile and keep only those still partly on screen.
pub fn update_projectiles(state: &mut InvadersState, dt: f32) {
    state.projectiles = std::mem::take(&mut state.projectiles)
        .into_iter()
        .filter_map(|mut projectile| {
            projectile.position += projectile.velocity * dt;
            (projectile.position.y + projectile.height > 0.0).then_some(projectile)
        })
        .collect();
}

/// Slide the formation sideways.  If it strays within `FORMATION_EDGE` of
/// either side, the whole formation turns around and drops one step.
pub fn update_aliens(state: &mut InvadersState, dt: f32) {
    if state.aliens.is_empty() {
        return;
    }

    let dx = state.alien_speed * dt * state.alien_direction;
    for alien in &mut state.aliens {
        alien.position.x += dx;
    }

    let min_x = state
        .aliens
        .iter()
        .map(|a| a.position.x)
        .fold(f32::INFINITY, f32::min);
    let max_x = state
        .aliens
        .iter()
        .map(|a| a.position.x + a.size)
        .fold(f32::NEG_INFINITY, f32::max);

    if min_x < FORMATION_EDGE || max_x > state.width - FORMATION_EDGE {
        state.alien_direction = -state.alien_direction;
        for alien in &mut state.aliens {
            alien.position.y += DROP_DISTANCE;
        }
    }
}

// ── Collisions & bonuses ─────────────────────────────────────────────────────

/// Each projectile destroys at most the first alien it overlaps and is
/// consumed by the hit.  Kills score points and may drop a bonus.
pub fn resolve_collisions(state: &mut InvadersState, rng: &mut impl Rng) {
    let mut remaining = Vec::with_capacity(state.projectiles.len());

    for projectile in std::mem::take(&mut state.projectiles) {
        let bounds = projectile.rect();
        match state.aliens.iter().position(|a| a.rect().intersects(&bounds)) {
            Some(index) => {
                let alien = state.aliens.remove(index);
                state.score += SCORE_PER_ALIEN;
                if let Some(bonus) = maybe_drop_bonus(&alien, rng) {
                    debug!(
                        "{} bonus dropped at ({:.0}, {:.0})",
                        bonus.kind, bonus.position.x, bonus.position.y
                    );
                    state.bonuses.push(bonus);
                }
            }
            None => remaining.push(projectile),
        }
    }

    state.projectiles = remaining;
}

/// Roll for a bonus at the lower centre of a destroyed alien.
pub fn maybe_drop_bonus(alien: &Alien, rng: &mut impl Rng) -> Option<Bonus> {
    if rng.gen::<f64>() >= BONUS_DROP_CHANCE {
        return None;
    }
    let kind = BonusKind::ALL[rng.gen_range(0..BonusKind::ALL.len())];
    let start = Vec2::new(
        alien.position.x + alien.size / 2.0,
        alien.position.y + alien.size,
    );
    Some(Bonus::new(kind, start))
}

/// Let bonuses fall.  A bonus touching the player is picked up; otherwise
/// one whose centre has left the bottom of the screen is discarded.
pub fn update_bonuses(state: &mut InvadersState, dt: f32) {
    let player_rect = state.player.rect();
    let mut remaining = Vec::with_capacity(state.bonuses.len());

    for mut bonus in std::mem::take(&mut state.bonuses) {
        bonus.position.y += bonus.fall_speed * dt;
        if bonus.rect().intersects(&player_rect) {
            apply_bonus(&mut state.active_bonuses, bonus.kind);
            continue;
        }
        if bonus.position.y > state.height {
            continue;
        }
        remaining.push(bonus);
    }

    state.bonuses = remaining;
}

/// Activate `kind` for its full duration.  Picking up a kind that is
/// already running resets its timer instead of stacking.
pub fn apply_bonus(active: &mut ActiveBonuses, kind: BonusKind) {
    let duration = bonus_duration(kind);
    if active.apply(kind, duration) {
        debug!("{} refreshed to {:.1}s", kind, duration);
    } else {
        debug!("{} active for {:.1}s", kind, duration);
    }
}

pub fn update_bonus_timers(state: &mut InvadersState, dt: f32) {
    for kind in state.active_bonuses.tick(dt) {
        debug!("{} expired", kind);
    }
}

/// Start the next, faster wave once the formation is gone.  Returns `true`
/// if a new wave was spawned.
pub fn advance_wave_if_cleared(state: &mut InvadersState) -> bool {
    if !state.aliens.is_empty() {
        return false;
    }
    state.level += 1;
    state.alien_speed *= WAVE_SPEED_FACTOR;
    spawn_wave(state);
    true
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by `dt` seconds.  The step order is significant.
pub fn tick(state: &mut InvadersState, controls: &Controls, dt: f32, rng: &mut impl Rng) {
    move_player(state, controls, dt);

    let wants_fire = state.is_firing || controls.fire;
    update_firing(state, wants_fire, dt);

    update_projectiles(state, dt);
    update_aliens(state, dt);
    resolve_collisions(state, rng);
    update_bonuses(state, dt);
    update_bonus_timers(state, dt);
    advance_wave_if_cleared(state);
}
