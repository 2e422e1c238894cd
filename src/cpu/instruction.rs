// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains the definition of a Chip-8 [Word] and [Insn]
//!
//! Decoding happens in two steps. A [Word] splits the raw big-endian instruction into
//! its bit-fields, which never fails. The [Word] is then converted into an [Insn],
//! which fails for encodings outside the base instruction set.

use crate::error::Error;

/// A raw instruction word, split into the bit-fields used by each opcode family
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(u16);

impl Word {
    /// Wraps a raw instruction word
    pub const fn new(word: u16) -> Self {
        Self(word)
    }
    /// Reassembles a word from the two bytes at `[pc, pc+2)`
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
    /// The raw instruction word
    #[inline(always)]
    pub const fn word(self) -> u16 {
        self.0
    }
    /// `op___`: Bits 12..16, which select the opcode family
    #[inline(always)]
    pub const fn op(self) -> u8 {
        (self.0 >> 12) as u8 & 0xf
    }
    /// `_x__`: Bits 8..12, a register index
    #[inline(always)]
    pub const fn x(self) -> usize {
        (self.0 >> 8) as usize & 0xf
    }
    /// `__y_`: Bits 4..8, a register index
    #[inline(always)]
    pub const fn y(self) -> usize {
        (self.0 >> 4) as usize & 0xf
    }
    /// `___n`: Bits 0..4, a nibble
    #[inline(always)]
    pub const fn n(self) -> u8 {
        self.0 as u8 & 0xf
    }
    /// `__bb`: Bits 0..8, an immediate byte
    #[inline(always)]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }
    /// `_aaa`: Bits 0..12, an address
    #[inline(always)]
    pub const fn a(self) -> u16 {
        self.0 & 0xfff
    }
}

impl From<u16> for Word {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A single valid instruction of the base Chip-8 instruction set
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    cls,
    /// | 00ee | Return from subroutine
    ret,
    /// | 1aaa | Jumps to an absolute address
    jmp { a: u16 },
    /// | 2aaa | Pushes pc onto the stack, then jumps to a
    call { a: u16 },
    /// | 3xbb | Skips next instruction if register X == b
    seb { x: usize, b: u8 },
    /// | 4xbb | Skips next instruction if register X != b
    sneb { x: usize, b: u8 },
    /// | 5xy0 | Skip next instruction if vX == vY
    se { x: usize, y: usize },
    /// | 6xbb | Loads immediate byte b into register vX
    movb { x: usize, b: u8 },
    /// | 7xbb | Adds immediate byte b to register vX
    addb { x: usize, b: u8 },
    /// | 8xy0 | Loads the value of y into x
    mov { x: usize, y: usize },
    /// | 8xy1 | Performs bitwise or of vX and vY, and stores the result in vX
    or { x: usize, y: usize },
    /// | 8xy2 | Performs bitwise and of vX and vY, and stores the result in vX
    and { x: usize, y: usize },
    /// | 8xy3 | Performs bitwise xor of vX and vY, and stores the result in vX
    xor { x: usize, y: usize },
    /// | 8xy4 | Performs addition of vX and vY, and stores the result in vX
    add { x: usize, y: usize },
    /// | 8xy5 | Performs subtraction of vX and vY, and stores the result in vX
    sub { x: usize, y: usize },
    /// | 8xy6 | Performs bitwise right shift of vX (or vY)
    shr { x: usize, y: usize },
    /// | 8xy7 | Performs subtraction of vY and vX, and stores the result in vX
    bsub { x: usize, y: usize },
    /// | 8xyE | Performs bitwise left shift of vX (or vY)
    shl { x: usize, y: usize },
    /// | 9xy0 | Skip next instruction if vX != vY
    sne { x: usize, y: usize },
    /// | Aaaa | Load address #a into register I
    movI { a: u16 },
    /// | Baaa | Jump to &adr + v0 (or vX)
    jmpr { a: u16 },
    /// | Cxbb | Stores a random number & the provided byte into vX
    rand { x: usize, b: u8 },
    /// | Dxyn | Draws n-byte sprite to the screen at coordinates (vX, vY)
    draw { x: usize, y: usize, n: u8 },
    /// | eX9e | Skip next instruction if key vX is held
    sek { x: usize },
    /// | eXa1 | Skip next instruction if key vX is not held
    snek { x: usize },
    /// | fX07 | Set vX to value in delay timer
    getdt { x: usize },
    /// | fX0a | Wait for input, store key in vX
    waitk { x: usize },
    /// | fX15 | Set delay timer to the value in vX
    setdt { x: usize },
    /// | fX18 | Set sound timer to the value in vX
    movst { x: usize },
    /// | fX1e | Add vX to I
    addI { x: usize },
    /// | fX29 | Load sprite for character vX into I
    font { x: usize },
    /// | fX33 | BCD convert vX into I[0..3]
    bcd { x: usize },
    /// | fX55 | DMA Stor from registers 0..=X to I
    dmao { x: usize },
    /// | fX65 | DMA Load from I to registers 0..=X
    dmai { x: usize },
}

impl TryFrom<Word> for Insn {
    type Error = Error;

    #[rustfmt::skip]
    fn try_from(w: Word) -> Result<Self, Self::Error> {
        let (x, y, n, b, a) = (w.x(), w.y(), w.n(), w.b(), w.a());
        Ok(match (w.op(), n) {
            (0x0, _) => match a {
                0x0e0 => Insn::cls,
                0x0ee => Insn::ret,
                _ => return Err(Error::UnimplementedInstruction { word: w.word() }),
            },
            (0x1, _)   => Insn::jmp   { a },
            (0x2, _)   => Insn::call  { a },
            (0x3, _)   => Insn::seb   { x, b },
            (0x4, _)   => Insn::sneb  { x, b },
            (0x5, _)   => Insn::se    { x, y },
            (0x6, _)   => Insn::movb  { x, b },
            (0x7, _)   => Insn::addb  { x, b },
            (0x8, 0x0) => Insn::mov   { x, y },
            (0x8, 0x1) => Insn::or    { x, y },
            (0x8, 0x2) => Insn::and   { x, y },
            (0x8, 0x3) => Insn::xor   { x, y },
            (0x8, 0x4) => Insn::add   { x, y },
            (0x8, 0x5) => Insn::sub   { x, y },
            (0x8, 0x6) => Insn::shr   { x, y },
            (0x8, 0x7) => Insn::bsub  { x, y },
            (0x8, 0xe) => Insn::shl   { x, y },
            (0x9, _)   => Insn::sne   { x, y },
            (0xa, _)   => Insn::movI  { a },
            (0xb, _)   => Insn::jmpr  { a },
            (0xc, _)   => Insn::rand  { x, b },
            (0xd, _)   => Insn::draw  { x, y, n },
            (0xe, _) => match b {
                0x9e => Insn::sek  { x },
                0xa1 => Insn::snek { x },
                _ => return Err(Error::UnimplementedInstruction { word: w.word() }),
            },
            (0xf, _) => match b {
                0x07 => Insn::getdt { x },
                0x0a => Insn::waitk { x },
                0x15 => Insn::setdt { x },
                0x18 => Insn::movst { x },
                0x1e => Insn::addI  { x },
                0x29 => Insn::font  { x },
                0x33 => Insn::bcd   { x },
                0x55 => Insn::dmao  { x },
                0x65 => Insn::dmai  { x },
                _ => return Err(Error::UnimplementedInstruction { word: w.word() }),
            },
            _ => return Err(Error::UnimplementedInstruction { word: w.word() }),
        })
    }
}

impl TryFrom<u16> for Insn {
    type Error = Error;

    fn try_from(word: u16) -> Result<Self, Self::Error> {
        Word::from(word).try_into()
    }
}
