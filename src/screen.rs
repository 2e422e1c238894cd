// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's 64x32 monochrome screen

use std::fmt::{Display, Formatter, Result};

/// Represents the Chip-8's display bitmap.
///
/// Each row is a single [u64], with the leftmost pixel in the most significant bit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Screen {
    rows: [u64; 32],
}

impl Screen {
    /// Width of the screen, in pixels
    pub const WIDTH: usize = 64;
    /// Height of the screen, in pixels
    pub const HEIGHT: usize = 32;

    /// Constructs a new, blank screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; Self::HEIGHT];
    }

    /// Gets the state of the pixel at (x, y).
    ///
    /// Pixels outside the screen are always off.
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let screen = Screen::new();
    /// assert!(!screen.get(0, 0));
    /// assert!(!screen.get(64, 32));
    /// ```
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < Self::WIDTH && y < Self::HEIGHT && self.rows[y] & (1 << (63 - x)) != 0
    }

    /// Gets the raw rows of the screen, MSB leftmost
    pub fn rows(&self) -> &[u64; Self::HEIGHT] {
        &self.rows
    }

    /// Iterates over every pixel in row-major order, as `(x, y, lit)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        (0..Self::HEIGHT)
            .flat_map(|y| (0..Self::WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.get(x, y)))
    }

    /// Returns true if no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    /// XORs one byte of sprite data onto row `y`, starting at column `x`.
    ///
    /// Bits which would land past the right edge (or rows past the bottom edge)
    /// are dropped. Returns true if a lit pixel was turned off.
    pub(crate) fn xor_byte(&mut self, x: usize, y: usize, byte: u8) -> bool {
        let Some(row) = self.rows.get_mut(y) else {
            return false;
        };
        if x >= Self::WIDTH {
            return false;
        }
        let bits = ((byte as u64) << 56) >> x;
        let collision = *row & bits != 0;
        *row ^= bits;
        collision
    }

    /// Prints the screen to stdout
    ///
    /// Uses braille characters when the `drawille` feature is enabled.
    pub fn print_screen(&self) {
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(Self::WIDTH as u32, Self::HEIGHT as u32);
            self.iter()
                .filter(|&(_, _, lit)| lit)
                .for_each(|(x, y, _)| canvas.set(x as u32, y as u32));
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        print!("{self}");
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (y, row) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{y:02}|{}|",
                format!("{row:064b}").replace('0', " ").replace('1', "█")
            )?;
        }
        Ok(())
    }
}
