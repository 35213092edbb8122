use std::cell::RefCell;
use std::rc::Rc;

use space_invaders::canvas::{Canvas, Rgb};
use space_invaders::input::{InputEvent, Key};
use space_invaders::scene::{Scene, SceneManager};
use space_invaders::scenes::SandboxScene;
use space_invaders::vector::Vec2;

/// Records every call it receives into a shared log.
struct Probe {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl Scene for Probe {
    fn handle_event(&mut self, event: &InputEvent) {
        self.log.borrow_mut().push(format!("{} event {:?}", self.name, event));
    }

    fn update(&mut self, dt: f32) {
        self.log.borrow_mut().push(format!("{} update {}", self.name, dt));
    }

    fn draw(&self, surface: &mut Canvas) {
        surface.text(0.0, 0.0, self.name, Rgb(255, 255, 255));
        self.log.borrow_mut().push(format!("{} draw", self.name));
    }
}

fn probe(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Scene> {
    Box::new(Probe { name, log: Rc::clone(log) })
}

// ── SceneManager ──────────────────────────────────────────────────────────────

#[test]
fn manager_forwards_to_active_scene() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut manager = SceneManager::new(probe("a", &log));
    let mut canvas = Canvas::new(100, 100, 10, 10);

    manager.handle_event(&InputEvent::KeyDown(Key::Space));
    manager.update(0.5);
    manager.draw(&mut canvas);

    assert_eq!(
        *log.borrow(),
        vec!["a event KeyDown(Space)", "a update 0.5", "a draw"]
    );
    assert_eq!(canvas.cell(0, 0).map(|g| g.ch), Some('a'));
}

#[test]
fn switch_replaces_active_scene() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut manager = SceneManager::new(probe("a", &log));
    manager.switch(probe("b", &log));
    manager.update(1.0);
    assert_eq!(*log.borrow(), vec!["b update 1"]);
}

#[test]
fn switch_drops_old_scene() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut manager = SceneManager::new(probe("a", &log));
    assert_eq!(Rc::strong_count(&log), 2);
    manager.switch(probe("b", &log));
    assert_eq!(Rc::strong_count(&log), 2);
}

#[test]
fn quit_defaults_to_false() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let manager = SceneManager::new(probe("a", &log));
    assert!(!manager.quit_requested());
    assert!(!manager.scene().quit_requested());
}

// ── SandboxScene ──────────────────────────────────────────────────────────────

#[test]
fn sandbox_moves_by_velocity() {
    let mut scene = SandboxScene::new(800.0, 600.0);
    scene.update(0.5);
    assert_eq!(scene.position, Vec2::new(120.0, 105.0));
}

#[test]
fn sandbox_bounces_off_right_wall() {
    let mut scene = SandboxScene::new(800.0, 600.0);
    scene.position = Vec2::new(760.0, 100.0);
    scene.update(0.1);
    assert_eq!(scene.velocity.x, -140.0);
    assert_eq!(scene.position.x, 746.0);
}

#[test]
fn sandbox_bounces_off_top() {
    let mut scene = SandboxScene::new(800.0, 600.0);
    scene.position = Vec2::new(100.0, 5.0);
    scene.velocity = Vec2::new(140.0, -110.0);
    scene.update(0.1);
    assert_eq!(scene.velocity.y, 110.0);
}

#[test]
fn sandbox_escape_requests_quit() {
    let mut manager = SceneManager::new(Box::new(SandboxScene::new(800.0, 600.0)));
    manager.handle_event(&InputEvent::KeyDown(Key::Char('q')));
    assert!(!manager.quit_requested());
    manager.handle_event(&InputEvent::KeyDown(Key::Escape));
    assert!(manager.quit_requested());
}
