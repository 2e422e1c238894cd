// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Controls the [Quirks] behavior of the CPU on a granular level.

use crate::error::Error;
use std::str::FromStr;

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `false` is the behavior most modern programs expect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quirks {
    /// COSMAC VIP: Shift ops in `8xy`(`6`, `E`) copy vY into vX before shifting
    pub shift_copies_vy: bool,
    /// Super Chip: Indexed jump `Bxnn` goes to `xnn` + vX instead of `xnn` + v0
    pub jump_uses_vx: bool,
    /// COSMAC VIP: DMA instructions `Fx55`/`Fx65` leave I at I + x + 1
    pub dma_moves_i: bool,
    /// Amiga: `Fx1e` sets vF when I passes the end of the 12-bit address space
    pub add_i_sets_vf: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            shift_copies_vy: value,
            jump_uses_vx: value,
            dma_moves_i: value,
            add_i_sets_vf: value,
        }
    }
}

/// Selects a historical platform, whose quirks the interpreter should emulate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// No quirks
    #[default]
    Modern,
    /// COSMAC VIP emulation mode
    Chip8,
    /// Super Chip emulation mode
    SChip,
}

impl From<Mode> for Quirks {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Modern => Quirks::default(),
            Mode::Chip8 => Quirks {
                shift_copies_vy: true,
                dma_moves_i: true,
                ..Default::default()
            },
            Mode::SChip => Quirks {
                jump_uses_vx: true,
                ..Default::default()
            },
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modern" => Ok(Mode::Modern),
            "chip8" | "chip-8" | "vip" => Ok(Mode::Chip8),
            "schip" | "superchip" => Ok(Mode::SChip),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
