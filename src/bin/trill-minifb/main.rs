// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Trill: A chip-8 interpreter in Rust
//! Hello, world!

#[cfg(test)]
mod tests;
mod ui;

use gumdrop::*;
use owo_colors::OwoColorize;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::Level;
use trill::{error::Result, *};
use ui::*;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    tracing_subscriber::fmt()
        .with_max_level(if options.debug {
            Level::TRACE
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();
    let state = State::new(options)?;
    for result in state {
        if let Err(e) = result {
            eprintln!("{}", e.bold().red());
            break;
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Trill.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Log every instruction to stderr.")]
    pub debug: bool,
    #[options(help = "Enable pause mode at startup.")]
    pub pause: bool,

    #[options(help = "Run in (Modern, Chip8, SChip) mode.")]
    pub mode: Option<Mode>,

    #[options(
        short = "v",
        help = "Toggle COSMAC VIP style bit-shifts, which copy vY into vX."
    )]
    pub shift: bool,
    #[options(
        short = "b",
        help = "Toggle SUPER-CHIP style indexed jump, which is indexed relative to v[adr]."
    )]
    pub jumping: bool,
    #[options(
        short = "c",
        help = "Toggle COSMAC VIP style DMA instructions, which leave I past the end."
    )]
    pub memory: bool,
    #[options(
        short = "o",
        help = "Toggle Amiga style Fx1e, which sets vF when I leaves memory."
    )]
    pub overflow: bool,

    #[options(help = "Set the target instructions per second.", default = "700", meta = "IPS")]
    pub ips: u32,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u32,
}

#[derive(Debug)]
struct State {
    pub rate: u32,
    pub cpu: CPU,
    pub ui: UI,
    pub ft: Instant,
}

impl State {
    fn new(options: Arguments) -> Result<Self> {
        // Flip the state of the quirks
        let mut quirks: Quirks = options.mode.unwrap_or_default().into();
        quirks.shift_copies_vy ^= options.shift;
        quirks.jump_uses_vx ^= options.jumping;
        quirks.dma_moves_i ^= options.memory;
        quirks.add_i_sets_vf ^= options.overflow;

        let mut cpu = CPU::new(Flags {
            quirks,
            ips: options.ips,
            refresh_rate: options.frame_rate,
        });
        cpu.load_program_bytes(&std::fs::read(&options.file)?)?;

        let mut ui = UIBuilder::new(Screen::WIDTH, Screen::HEIGHT, &options.file).build()?;
        ui.paused = options.pause;
        Ok(State {
            rate: options.frame_rate.max(1),
            cpu,
            ui,
            ft: Instant::now(),
        })
    }
    fn keys(&mut self) -> Result<bool> {
        self.ui.keys(&mut self.cpu)
    }
    fn frame(&mut self) -> Result<bool> {
        self.ui.frame(&self.cpu)
    }
    fn tick_cpu(&mut self) -> Result<()> {
        if !self.ui.paused {
            self.cpu.frame()?;
        }
        Ok(())
    }
    fn wait_for_next_frame(&mut self) {
        let rate = Duration::from_nanos(1_000_000_000 / self.rate as u64 + 1);
        std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
        self.ft += rate;
    }
}

impl Iterator for State {
    type Item = Result<()>;

    /// Runs one frame of the interpreter, and presents it
    fn next(&mut self) -> Option<Self::Item> {
        self.wait_for_next_frame();
        match self.keys() {
            Ok(opt) if !opt => return None,
            Err(e) => return Some(Err(e)),
            _ => (),
        }
        if let Err(e) = self.tick_cpu() {
            self.cpu.dump();
            return Some(Err(e));
        }
        match self.frame() {
            Ok(opt) if !opt => return None,
            Err(e) => return Some(Err(e)),
            _ => (),
        }
        Some(Ok(()))
    }
}
