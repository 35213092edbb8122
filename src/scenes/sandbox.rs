/// A square bouncing around the screen.  Exercises the scene plumbing
/// without any game rules.

use crate::canvas::{Canvas, Rgb};
use crate::entities::Rect;
use crate::input::{InputEvent, Key};
use crate::scene::Scene;
use crate::vector::Vec2;

const C_SQUARE: Rgb = Rgb(180, 220, 255);
const C_HINT: Rgb = Rgb(200, 200, 200);

pub struct SandboxScene {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    width: f32,
    height: f32,
    quit: bool,
}

impl SandboxScene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(50.0, 50.0),
            velocity: Vec2::new(140.0, 110.0),
            size: 32.0,
            width,
            height,
            quit: false,
        }
    }
}

impl Scene for SandboxScene {
    fn handle_event(&mut self, event: &InputEvent) {
        if *event == InputEvent::KeyDown(Key::Escape) {
            self.quit = true;
        }
    }

    fn update(&mut self, dt: f32) {
        let next = self.position + self.velocity * dt;
        if next.x < 0.0 || next.x + self.size > self.width {
            self.velocity.x = -self.velocity.x;
        }
        if next.y < 0.0 || next.y + self.size > self.height {
            self.velocity.y = -self.velocity.y;
        }
        self.position += self.velocity * dt;
    }

    fn draw(&self, surface: &mut Canvas) {
        let square = Rect::from_float(self.position.x, self.position.y, self.size, self.size);
        surface.fill_rect(square, C_SQUARE);
        surface.text(10.0, 10.0, "Press ESC to quit", C_HINT);
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
