//! The framebuffer and the two display modes.

use std::fmt;

/// Width of the framebuffer, which is sized for the largest mode.
pub const MAX_WIDTH: usize = 128;
/// Height of the framebuffer, which is sized for the largest mode.
pub const MAX_HEIGHT: usize = 64;

/// Number of columns moved by a horizontal scroll.
const HORIZONTAL_SCROLL: usize = 4;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

/// The colors a renderer should use for lit and unlit pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb,
    pub background: Rgb,
}

/// The resolution the program is currently drawing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// 64x32, white on black.
    Normal,
    /// The SCHIP 128x64 mode, cyan on dark blue.
    Extended,
}

impl DisplayMode {
    pub fn width(self) -> usize {
        match self {
            DisplayMode::Normal => 64,
            DisplayMode::Extended => MAX_WIDTH,
        }
    }

    pub fn height(self) -> usize {
        match self {
            DisplayMode::Normal => 32,
            DisplayMode::Extended => MAX_HEIGHT,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            DisplayMode::Normal => Palette {
                foreground: Rgb::new(255, 255, 255),
                background: Rgb::new(0, 0, 0),
            },
            DisplayMode::Extended => Palette {
                foreground: Rgb::new(0, 255, 255),
                background: Rgb::new(0, 0, 128),
            },
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Normal
    }
}

/// Published whenever a program switches display mode,
/// so that a renderer can resize its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: DisplayMode,
    pub width: usize,
    pub height: usize,
    pub palette: Palette,
}

impl From<DisplayMode> for ModeChange {
    fn from(mode: DisplayMode) -> Self {
        ModeChange {
            mode,
            width: mode.width(),
            height: mode.height(),
            palette: mode.palette(),
        }
    }
}

/// On/off pixels at the maximum resolution, row-major with the origin top-left.
///
/// Only the sub-rectangle belonging to the current [`DisplayMode`] is ever
/// drawn to or displayed.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [[bool; MAX_WIDTH]; MAX_HEIGHT],
    mode: DisplayMode,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            cells: [[false; MAX_WIDTH]; MAX_HEIGHT],
            mode: DisplayMode::Normal,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Width of the active rectangle.
    pub fn width(&self) -> usize {
        self.mode.width()
    }

    /// Height of the active rectangle.
    pub fn height(&self) -> usize {
        self.mode.height()
    }

    /// Switch resolution. Always clears, even if the mode is unchanged.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cells = [[false; MAX_WIDTH]; MAX_HEIGHT];
    }

    /// Whether the pixel at `(x, y)` is lit. Anything outside the grid is off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, x: usize, y: usize, state: bool) {
        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = state;
        }
    }

    /// Flip a pixel, with coordinates wrapping around the active rectangle.
    /// Returns true if the pixel was turned off.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let x = x % self.width();
        let y = y % self.height();
        let cell = &mut self.cells[y][x];
        *cell = !*cell;
        !*cell
    }

    /// The rows of the active rectangle.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        let width = self.width();
        self.cells[..self.height()].iter().map(move |row| &row[..width])
    }

    pub fn scroll_right(&mut self) {
        let (width, height) = (self.width(), self.height());
        for row in self.cells[..height].iter_mut() {
            row.copy_within(0..width - HORIZONTAL_SCROLL, HORIZONTAL_SCROLL);
            row[..HORIZONTAL_SCROLL].iter_mut().for_each(|cell| *cell = false);
        }
    }

    pub fn scroll_left(&mut self) {
        let (width, height) = (self.width(), self.height());
        for row in self.cells[..height].iter_mut() {
            row.copy_within(HORIZONTAL_SCROLL..width, 0);
            row[width - HORIZONTAL_SCROLL..width].iter_mut().for_each(|cell| *cell = false);
        }
    }

    /// Move every row down by `n`, blanking the rows uncovered at the top.
    pub fn scroll_down(&mut self, n: usize) {
        let height = self.height();
        let width = self.width();
        let n = n.min(height);
        if n == 0 {
            return;
        }
        for y in (n..height).rev() {
            let (above, below) = self.cells.split_at_mut(y);
            below[0][..width].copy_from_slice(&above[y - n][..width]);
        }
        for row in self.cells[..n].iter_mut() {
            row[..width].iter_mut().for_each(|cell| *cell = false);
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { "." })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Framebuffer({:?})", self.mode)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(frame: &Framebuffer) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..MAX_HEIGHT {
            for x in 0..MAX_WIDTH {
                if frame.get(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn starts_normal_and_dark() {
        let frame = Framebuffer::new();
        assert_eq!(frame.mode(), DisplayMode::Normal);
        assert_eq!((frame.width(), frame.height()), (64, 32));
        assert!(lit(&frame).is_empty());
    }

    #[test]
    fn toggle_reports_turning_off() {
        let mut frame = Framebuffer::new();
        assert_eq!(frame.toggle(3, 4), false);
        assert!(frame.get(3, 4));
        assert_eq!(frame.toggle(3, 4), true);
        assert!(!frame.get(3, 4));
    }

    #[test]
    fn toggle_wraps_inside_active_rectangle() {
        let mut frame = Framebuffer::new();
        frame.toggle(64 + 2, 32 + 1);
        assert_eq!(lit(&frame), vec![(2, 1)]);

        frame.set_mode(DisplayMode::Extended);
        frame.toggle(64 + 2, 32 + 1);
        assert_eq!(lit(&frame), vec![(66, 33)]);
    }

    #[test]
    fn mode_switch_clears() {
        let mut frame = Framebuffer::new();
        frame.set(1, 1, true);
        frame.set_mode(DisplayMode::Extended);
        assert_eq!((frame.width(), frame.height()), (128, 64));
        assert!(lit(&frame).is_empty());

        frame.set(100, 50, true);
        frame.set_mode(DisplayMode::Normal);
        assert_eq!((frame.width(), frame.height()), (64, 32));
        assert!(lit(&frame).is_empty());
    }

    #[test]
    fn scroll_right_moves_four_columns() {
        let mut frame = Framebuffer::new();
        frame.set(0, 0, true);
        frame.set(62, 5, true);
        frame.scroll_right();
        // The pixel pushed past column 63 is gone, not wrapped.
        assert_eq!(lit(&frame), vec![(4, 0)]);
    }

    #[test]
    fn scroll_left_moves_four_columns() {
        let mut frame = Framebuffer::new();
        frame.set(2, 0, true);
        frame.set(63, 7, true);
        frame.scroll_left();
        assert_eq!(lit(&frame), vec![(59, 7)]);
    }

    #[test]
    fn scroll_down_blanks_top_rows() {
        let mut frame = Framebuffer::new();
        frame.set(5, 0, true);
        frame.set(6, 30, true);
        frame.scroll_down(3);
        assert_eq!(lit(&frame), vec![(5, 3)]);
    }

    #[test]
    fn scroll_stays_inside_active_rectangle() {
        let mut frame = Framebuffer::new();
        frame.set(63, 0, true);
        frame.scroll_right();
        frame.scroll_down(31);
        assert!(lit(&frame).is_empty());
    }

    #[test]
    fn extended_scroll_uses_full_width() {
        let mut frame = Framebuffer::new();
        frame.set_mode(DisplayMode::Extended);
        frame.set(120, 60, true);
        frame.scroll_right();
        frame.scroll_down(2);
        assert_eq!(lit(&frame), vec![(124, 62)]);
    }

    #[test]
    fn display_prints_active_rectangle() {
        let mut frame = Framebuffer::new();
        frame.set(0, 0, true);
        let text = frame.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert_eq!(lines[0].len(), 64);
        assert!(lines[0].starts_with("#."));
    }

    #[test]
    fn mode_change_carries_palette() {
        let change = ModeChange::from(DisplayMode::Extended);
        assert_eq!((change.width, change.height), (128, 64));
        assert_eq!(change.palette.foreground, Rgb::new(0, 255, 255));
        assert_eq!(change.palette.background, Rgb::new(0, 0, 128));
    }
}
