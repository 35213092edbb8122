/// Scene trait and the manager that forwards the frame calls to whichever
/// scene is active.

use log::debug;

use crate::canvas::Canvas;
use crate::input::InputEvent;

/// A logical screen.  Per frame the driver hands over input events first,
/// then calls `update` once and `draw` once, always in that order.
pub trait Scene {
    fn handle_event(&mut self, event: &InputEvent);

    /// Advance by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Render the current state.  Takes `&self`: drawing never changes state.
    fn draw(&self, surface: &mut Canvas);

    /// Set when the scene wants the driver to stop (e.g. Escape was pressed).
    fn quit_requested(&self) -> bool {
        false
    }
}

/// Owns exactly one active scene.
pub struct SceneManager {
    scene: Box<dyn Scene>,
}

impl SceneManager {
    pub fn new(initial: Box<dyn Scene>) -> Self {
        Self { scene: initial }
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    /// Make `scene` the active one.  The previous scene is dropped.
    pub fn switch(&mut self, scene: Box<dyn Scene>) {
        debug!("switching scene");
        self.scene = scene;
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.scene.handle_event(event);
    }

    pub fn update(&mut self, dt: f32) {
        self.scene.update(dt);
    }

    pub fn draw(&self, surface: &mut Canvas) {
        self.scene.draw(surface);
    }

    pub fn quit_requested(&self) -> bool {
        self.scene.quit_requested()
    }
}
