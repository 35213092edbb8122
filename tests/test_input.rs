use crossterm::event::KeyCode;

use space_invaders::game::{hold_frames, hold_window_for};
use space_invaders::input::*;

// ── Key translation ───────────────────────────────────────────────────────────

#[test]
fn key_codes_translate() {
    assert_eq!(Key::from_code(KeyCode::Left), Some(Key::Left));
    assert_eq!(Key::from_code(KeyCode::Esc), Some(Key::Escape));
    assert_eq!(Key::from_code(KeyCode::Char(' ')), Some(Key::Space));
    assert_eq!(Key::from_code(KeyCode::F(1)), None);
}

#[test]
fn letters_are_lower_cased() {
    // caps lock must not break A/D steering
    assert_eq!(Key::from_code(KeyCode::Char('A')), Some(Key::Char('a')));
    assert_eq!(Key::from_code(KeyCode::Char('d')), Some(Key::Char('d')));
}

// ── Controls ──────────────────────────────────────────────────────────────────

#[test]
fn controls_direction() {
    assert_eq!(Controls::default().direction(), 0.0);
    assert_eq!(Controls { left: true, ..Controls::default() }.direction(), -1.0);
    assert_eq!(Controls { right: true, ..Controls::default() }.direction(), 1.0);
    let both = Controls { left: true, right: true, fire: false };
    assert_eq!(both.direction(), 0.0);
}

// ── KeyTracker ────────────────────────────────────────────────────────────────

#[test]
fn first_press_emits_key_down_once() {
    let mut keys = KeyTracker::new(None);
    assert_eq!(keys.press(Key::Space, 1), Some(InputEvent::KeyDown(Key::Space)));
    // auto-repeat arrives as further presses
    assert_eq!(keys.press(Key::Space, 2), None);
    assert_eq!(keys.repeat(Key::Space, 3), None);
    assert!(keys.is_held(Key::Space));
}

#[test]
fn release_emits_key_up_once() {
    let mut keys = KeyTracker::new(None);
    keys.press(Key::Left, 1);
    assert_eq!(keys.release(Key::Left), Some(InputEvent::KeyUp(Key::Left)));
    assert_eq!(keys.release(Key::Left), None);
    assert!(!keys.is_held(Key::Left));
}

#[test]
fn repeat_of_unknown_key_counts_as_press() {
    let mut keys = KeyTracker::new(None);
    assert_eq!(keys.repeat(Key::Right, 1), Some(InputEvent::KeyDown(Key::Right)));
}

#[test]
fn stale_keys_expire_after_window() {
    let mut keys = KeyTracker::new(Some(4));
    keys.press(Key::Left, 1);
    keys.press(Key::Space, 3);
    assert!(keys.expire(5).is_empty());
    assert_eq!(keys.expire(6), vec![InputEvent::KeyUp(Key::Left)]);
    assert_eq!(keys.expire(8), vec![InputEvent::KeyUp(Key::Space)]);
    assert!(keys.expire(100).is_empty());
}

#[test]
fn refreshed_key_survives() {
    let mut keys = KeyTracker::new(Some(4));
    keys.press(Key::Right, 1);
    for frame in 2..20 {
        keys.repeat(Key::Right, frame);
        assert!(keys.expire(frame).is_empty());
    }
}

#[test]
fn without_window_nothing_expires() {
    let mut keys = KeyTracker::new(None);
    keys.press(Key::Left, 1);
    assert!(keys.expire(10_000).is_empty());
    assert!(keys.is_held(Key::Left));
}

// ── Hold window selection ─────────────────────────────────────────────────────

#[test]
fn hold_window_is_about_133_ms() {
    assert_eq!(hold_frames(30), 4);
    assert_eq!(hold_frames(60), 8);
}

#[test]
fn classic_terminal_gets_a_hold_window() {
    assert_eq!(hold_window_for(false, 60), Some(hold_frames(60)));
    assert_eq!(hold_window_for(true, 60), None);
}

#[test]
fn tapped_key_is_released_on_classic_terminal() {
    // one press, no repeats, no release event
    let mut keys = KeyTracker::new(hold_window_for(false, 60));
    assert_eq!(keys.press(Key::Left, 1), Some(InputEvent::KeyDown(Key::Left)));
    assert!(keys.expire(9).is_empty());
    assert_eq!(keys.expire(10), vec![InputEvent::KeyUp(Key::Left)]);
    assert!(!keys.is_held(Key::Left));
}
