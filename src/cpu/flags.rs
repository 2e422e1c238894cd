//! Represents flags that configure the interpreter but aren't a part of the Chip-8 architecture

use super::{Mode, Quirks};

/// Represents the configuration the CPU is constructed with.
///
/// Fixed for the lifetime of a [CPU](super::CPU).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flags {
    /// Represents the set of emulator [Quirks] to enable
    pub quirks: Quirks,
    /// Target number of instructions per second
    pub ips: u32,
    /// Rate at which timers tick and frames are presented, in Hz
    pub refresh_rate: u32,
}

impl Flags {
    /// Gets the number of instructions to run per frame
    ///
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// assert_eq!(11, Flags::default().instructions_per_frame());
    /// let flags = Flags { ips: 0, ..Default::default() };
    /// assert_eq!(1, flags.instructions_per_frame());
    /// ```
    pub fn instructions_per_frame(&self) -> usize {
        (self.ips / self.refresh_rate.max(1)).max(1) as usize
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            quirks: Quirks::default(),
            ips: 700,
            refresh_rate: 60,
        }
    }
}

impl From<Quirks> for Flags {
    fn from(quirks: Quirks) -> Self {
        Flags {
            quirks,
            ..Default::default()
        }
    }
}

impl From<Mode> for Flags {
    fn from(mode: Mode) -> Self {
        Quirks::from(mode).into()
    }
}
