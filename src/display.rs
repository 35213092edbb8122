/// Rendering layer: all terminal output lives here.
///
/// Translates a finished `Canvas` into terminal commands.  No game logic is
/// performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Rgb};

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Present one complete frame.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let (cols, rows) = canvas.grid_size();
    out.queue(style::SetBackgroundColor(to_color(canvas.background())))?;

    // Each row is rewritten in full, so nothing stale survives without a
    // clear.  Colour changes are only emitted between runs.
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row))?;
        let mut current: Option<Rgb> = None;
        let mut run = String::with_capacity(cols as usize);

        for col in 0..cols {
            let (ch, color) = match canvas.cell(col, row) {
                Some(glyph) => (glyph.ch, Some(glyph.color)),
                None => (' ', current),
            };
            if color != current {
                flush_run(out, &mut run)?;
                if let Some(rgb) = color {
                    out.queue(style::SetForegroundColor(to_color(rgb)))?;
                }
                current = color;
            }
            run.push(ch);
        }
        flush_run(out, &mut run)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()
}

fn flush_run<W: Write>(out: &mut W, run: &mut String) -> std::io::Result<()> {
    if !run.is_empty() {
        out.queue(Print(run.as_str()))?;
        run.clear();
    }
    Ok(())
}

/// Show `title` in the terminal's title bar.
pub fn set_title<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    out.queue(terminal::SetTitle(title))?;
    out.flush()
}
