// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements a Chip-8 interpreter as if it were a real CPU architecture.
//!
//! The [CPU] owns every piece of machine state: memory, registers, the call stack,
//! the [Screen], the keypad, and both timers. A host drives it one instruction at a
//! time with [CPU::tick], and decrements the timers at 60Hz with [CPU::tick_timers].
//!
//! ```rust
//! # use trill::*;
//! # fn main() -> Result<()> {
//! let mut cpu = CPU::default();
//! cpu.load_program_bytes(&[
//!     0x60, 0x07, // mov  #07, v0
//!     0xf0, 0x29, // font v0, I
//!     0xd0, 0x05, // draw #5, v0, v0
//! ])?;
//! cpu.multistep(3)?;
//! assert!(cpu.screen().get(7, 7));
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod error;
pub mod screen;

pub use cpu::{Flags, Mode, Quirks, CPU};
pub use error::Result;
pub use screen::Screen;

/// Common imports for trill
pub mod prelude {
    use super::*;
    pub use cpu::{
        instruction::{Insn, Word},
        mem::Mem,
        Flags, Mode, Quirks, CPU,
    };
    pub use error::{Error, Result};
    pub use screen::Screen;
}
