// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for Trill

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Trill.
#[derive(Debug, Error)]
pub enum Error {
    /// Represents an unimplemented operation
    #[error("opcode {word:04x} not recognized")]
    UnimplementedInstruction {
        /// The offending word
        word: u16,
    },
    /// Tried to return from a subroutine with nothing on the call stack
    #[error("return at {addr:03x} with an empty call stack")]
    StackUnderflow {
        /// The address of the offending `ret`
        addr: u16,
    },
    /// Tried to fetch an instruction from outside of memory
    #[error("address {addr:04x} is outside of memory")]
    InvalidAddress {
        /// The offending program counter
        addr: u16,
    },
    /// Tried to load a program that doesn't fit in program memory
    #[error("program of {len} bytes does not fit in {max} bytes of program memory")]
    ProgramTooLarge {
        /// Length of the rejected program
        len: usize,
        /// Size of program memory
        max: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "minifb")]
    /// Error originated in [minifb]
    #[error(transparent)]
    MinifbError(#[from] minifb::Error),
}
