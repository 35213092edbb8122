/// The playable Space Invaders scene.
///
/// Wraps an `InvadersState` together with the RNG and the input the rules
/// in `compute` need, and renders the state onto a `Canvas`.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;

use crate::canvas::{Canvas, Rgb};
use crate::compute;
use crate::entities::InvadersState;
use crate::input::{Controls, InputEvent, Key};
use crate::scene::Scene;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PROJECTILE: Rgb = Rgb(120, 200, 255);
const C_ALIEN: Rgb = Rgb(140, 220, 120);
const C_BONUS: Rgb = Rgb(250, 200, 120);
const C_PLAYER: Rgb = Rgb(200, 240, 255);
const C_HUD: Rgb = Rgb(210, 210, 220);
const C_TITLE: Rgb = Rgb(255, 255, 255);

const HUD_LEFT: f32 = 14.0;
const HUD_TOP: f32 = 12.0;
const HUD_LINE: f32 = 20.0;

pub struct SpaceInvadersScene<R: Rng = StdRng> {
    state: InvadersState,
    rng: R,
    held: HashSet<Key>,
    quit: bool,
}

impl<R: Rng> SpaceInvadersScene<R> {
    /// New game on a `width` × `height` pixel surface.  All randomness (bonus
    /// drops) comes from `rng`.
    pub fn new(width: f32, height: f32, rng: R) -> Self {
        Self {
            state: compute::init_state(width, height),
            rng,
            held: HashSet::new(),
            quit: false,
        }
    }

    pub fn state(&self) -> &InvadersState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InvadersState {
        &mut self.state
    }

    /// Controls derived from the keys currently held.
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.held.contains(&Key::Left) || self.held.contains(&Key::Char('a')),
            right: self.held.contains(&Key::Right) || self.held.contains(&Key::Char('d')),
            fire: self.held.contains(&Key::Space),
        }
    }

    fn bonus_status(&self) -> String {
        if self.state.active_bonuses.is_empty() {
            return "None".to_string();
        }
        self.state
            .active_bonuses
            .iter()
            .map(|active| format!("{} ({:.1}s)", active.kind, active.remaining))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<R: Rng> Scene for SpaceInvadersScene<R> {
    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
                match key {
                    Key::Escape => self.quit = true,
                    Key::Space => self.state.is_firing = true,
                    _ => {}
                }
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
                if key == Key::Space {
                    self.state.is_firing = false;
                }
            }
        }
    }

    fn update(&mut self, dt: f32) {
        let controls = self.controls();
        compute::tick(&mut self.state, &controls, dt, &mut self.rng);
    }

    fn draw(&self, surface: &mut Canvas) {
        let state = &self.state;

        for projectile in &state.projectiles {
            surface.fill_rect(projectile.rect(), C_PROJECTILE);
        }
        for alien in &state.aliens {
            surface.fill_rect(alien.rect(), C_ALIEN);
        }
        for bonus in &state.bonuses {
            surface.fill_circle(bonus.position, bonus.radius, C_BONUS);
        }
        surface.fill_rect(state.player.rect(), C_PLAYER);

        let hud = [
            format!("Score: {}", state.score),
            format!("Wave: {}", state.level),
            format!("Bonuses: {}", self.bonus_status()),
            "Left/Right or A/D to move".to_string(),
            "Space to shoot".to_string(),
            "ESC to quit".to_string(),
        ];
        for (i, line) in hud.iter().enumerate() {
            surface.text(HUD_LEFT, HUD_TOP + i as f32 * HUD_LINE, line, C_HUD);
        }
        surface.text(
            HUD_LEFT,
            HUD_TOP + hud.len() as f32 * HUD_LINE,
            "Space Invaders",
            C_TITLE,
        );
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
