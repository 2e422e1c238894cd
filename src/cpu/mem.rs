// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The [Mem] represents the CPU's 4KiB address space
//!
//! The font lives at the bottom of memory, and programs are loaded at `0x200`.

use crate::error::{Error, Result};
use std::fmt::{Debug, Formatter};

/// The built-in hexadecimal font, 5 bytes per glyph
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Stores the entire address space of the Chip-8
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mem {
    memory: [u8; 0x1000],
}

impl Mem {
    /// Size of the address space, in bytes
    pub const SIZE: usize = 0x1000;
    /// Address of the first glyph of the font
    pub const FONT_ADDR: u16 = 0x000;
    /// Number of bytes in each font glyph
    pub const GLYPH: u16 = 5;
    /// Address at which programs are loaded and started
    pub const PROGRAM: u16 = 0x200;
    /// Largest program that fits in memory
    pub const PROGRAM_MAX: usize = Mem::SIZE - Mem::PROGRAM as usize;

    /// Constructs a new [Mem] with the font loaded
    /// # Examples
    /// ```rust
    /// # use trill::prelude::*;
    /// let mem = Mem::new();
    /// assert_eq!(0xf0, mem.read(0));
    /// assert_eq!(0, mem.read(0x200));
    /// ```
    pub fn new() -> Self {
        let mut memory = [0; Mem::SIZE];
        let font = Mem::FONT_ADDR as usize;
        memory[font..font + FONT.len()].copy_from_slice(&FONT);
        Mem { memory }
    }

    /// Clears program memory, then copies `rom` into it.
    ///
    /// Returns [Error::ProgramTooLarge] if `rom` is larger than program memory,
    /// leaving memory untouched.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > Mem::PROGRAM_MAX {
            return Err(Error::ProgramTooLarge {
                len: rom.len(),
                max: Mem::PROGRAM_MAX,
            });
        }
        let program = &mut self.memory[Mem::PROGRAM as usize..];
        program.fill(0);
        program[..rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Reads the two bytes of the instruction word at `addr`, if both are in memory
    pub fn word(&self, addr: u16) -> Option<[u8; 2]> {
        let addr = addr as usize;
        self.memory.get(addr..addr + 2)?.try_into().ok()
    }

    /// Reads a byte. Addresses wrap around the 4KiB address space.
    #[inline(always)]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[Self::wrap(addr)]
    }

    /// Writes a byte. Addresses wrap around the 4KiB address space.
    #[inline(always)]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[Self::wrap(addr)] = value;
    }

    /// Gets the address of the font glyph for the low nibble of `digit`
    pub fn glyph(digit: u8) -> u16 {
        Mem::FONT_ADDR + Mem::GLYPH * (digit & 0xf) as u16
    }

    /// Gets a view of the whole address space
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }

    #[inline(always)]
    fn wrap(addr: u16) -> usize {
        addr as usize % Mem::SIZE
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem")
            .field("font", &&self.memory[..FONT.len()])
            .field("size", &Mem::SIZE)
            .finish_non_exhaustive()
    }
}
