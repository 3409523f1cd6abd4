use schip_8::emulator::{Framebuffer, Rgb};

use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};

/// Draws the framebuffer to the terminal, two pixel rows per character
/// using the upper half block.
pub struct CrosstermOutput {
    stdout: Stdout,
    last_frame: Option<(Framebuffer, bool)>,
}

impl CrosstermOutput {

    /// Switch to the alternate screen in raw mode. Undone when dropped.
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;
        Ok(CrosstermOutput {
            stdout,
            last_frame: None,
        })
    }

    /// Forget what is on the terminal, for example after a resolution change.
    pub fn clear(&mut self) -> crossterm::Result<()> {
        self.last_frame = None;
        execute!(self.stdout, ResetColor, Clear(ClearType::All))
    }

    /// Draw the active area of the framebuffer and the sound indicator below it.
    /// Does nothing if the picture has not changed since the last call.
    pub fn refresh(&mut self, framebuffer: &Framebuffer, sound: bool) -> crossterm::Result<()> {
        if let Some((frame, beeping)) = &self.last_frame {
            if frame == framebuffer && *beeping == sound {
                return Ok(());
            }
        }

        let palette = framebuffer.mode().palette();
        let (on, off) = (color(palette.foreground), color(palette.background));
        let pick = |lit: bool| if lit { on } else { off };

        for row in 0..(framebuffer.height() + 1) / 2 {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            for x in 0..framebuffer.width() {
                let top = framebuffer.get(x, 2 * row);
                let bottom = 2 * row + 1 < framebuffer.height() && framebuffer.get(x, 2 * row + 1);
                queue!(
                    self.stdout,
                    SetForegroundColor(pick(top)),
                    SetBackgroundColor(pick(bottom)),
                    Print('▀')
                )?;
            }
        }

        let status_row = ((framebuffer.height() + 1) / 2) as u16;
        queue!(
            self.stdout,
            ResetColor,
            cursor::MoveTo(0, status_row),
            Print(if sound { "♪ beep" } else { "      " })
        )?;
        self.stdout.flush()?;

        self.last_frame = Some((framebuffer.clone(), sound));
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Could not leave raw mode: {}", e);
        }
        if let Err(e) = execute!(self.stdout, ResetColor, cursor::Show, LeaveAlternateScreen) {
            log::error!("Could not restore the terminal: {}", e);
        }
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
