/// The terminal game loop: owns the terminal, the clock and the event
/// source, and drives a `SceneManager` once per frame.

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};

use crate::canvas::Canvas;
use crate::config::{TimingSettings, WindowSettings};
use crate::display;
use crate::input::{Key, KeyTracker};
use crate::scene::{Scene, SceneManager};

/// How long a key counts as held after its last press/repeat on terminals
/// that do not report releases.  Shorter than the OS repeat interval once
/// repeating has started.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Caps the loop at a target frame rate and measures the real frame time.
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep out the rest of the current frame, then return the seconds
    /// elapsed since the previous call.
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Hold window expressed in frames at `fps`.
pub fn hold_frames(fps: u32) -> u64 {
    (HOLD_WINDOW.as_secs_f32() * fps.max(1) as f32).ceil() as u64
}

/// Key expiry for the `KeyTracker`.  Only a terminal known to report
/// releases may run without a hold window.
pub fn hold_window_for(keyboard_enhanced: bool, fps: u32) -> Option<u64> {
    (!keyboard_enhanced).then(|| hold_frames(fps))
}

// ── Loop ──────────────────────────────────────────────────────────────────────

/// Run `scene_factory`'s scene until it asks to quit or Ctrl-C is pressed.
/// The factory receives the canvas so it can size itself to the surface.
/// The terminal is restored whatever the outcome.
pub fn run_game<F>(
    scene_factory: F,
    window: &WindowSettings,
    timing: &TimingSettings,
) -> std::io::Result<()>
where
    F: FnOnce(&Canvas) -> Box<dyn Scene>,
{
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    display::set_title(&mut out, &window.title)?;

    // Pushing the flags succeeds even where they are ignored, so ask the
    // terminal first.  Must run before the reader thread owns stdin.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    info!(
        "key releases {}",
        if keyboard_enhanced { "reported" } else { "emulated by hold window" }
    );

    // Blocking reads happen on their own thread so the loop never stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = (|| -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Canvas::new(window.width, window.height, cols, rows);
        let manager = SceneManager::new(scene_factory(&canvas));
        let hold_window = hold_window_for(keyboard_enhanced, timing.fps);
        game_loop(&mut out, manager, &mut canvas, window, timing, &rx, hold_window)
    })();

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn game_loop<W: Write>(
    out: &mut W,
    mut manager: SceneManager,
    canvas: &mut Canvas,
    window: &WindowSettings,
    timing: &TimingSettings,
    rx: &mpsc::Receiver<Event>,
    hold_window: Option<u64>,
) -> std::io::Result<()> {
    info!(
        "starting \"{}\" at {}x{} on {:?} cells, {} fps",
        window.title,
        window.width,
        window.height,
        canvas.grid_size(),
        timing.fps
    );

    let mut clock = FrameClock::new(timing.fps);
    let mut keys = KeyTracker::new(hold_window);
    let mut frame: u64 = 0;

    loop {
        let dt = clock.tick();
        frame += 1;

        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        info!("interrupted");
                        return Ok(());
                    }
                    let Some(key) = Key::from_code(code) else {
                        continue;
                    };
                    let event = match kind {
                        KeyEventKind::Press => keys.press(key, frame),
                        KeyEventKind::Repeat => keys.repeat(key, frame),
                        KeyEventKind::Release => keys.release(key),
                    };
                    events.extend(event);
                }
                Event::Resize(cols, rows) => canvas.resize_grid(cols, rows),
                _ => {}
            }
        }
        events.extend(keys.expire(frame));

        for event in &events {
            manager.handle_event(event);
        }
        if manager.quit_requested() {
            info!("scene requested quit after {} frames", frame);
            return Ok(());
        }

        manager.update(dt);
        if dt > clock.frame_duration().as_secs_f32() * 4.0 {
            warn!("slow frame: {:.1} ms", dt * 1000.0);
        }

        canvas.clear(window.background_color);
        manager.draw(canvas);
        display::present(out, canvas)?;
    }
}
