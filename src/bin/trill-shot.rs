// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Runs a Chip-8 program without a window, and prints what ends up on the screen

use gumdrop::*;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::{info, Level};
use trill::{error::Result, *};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Trill.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Log every instruction to stderr.")]
    pub debug: bool,
    #[options(help = "Run in (Modern, Chip8, SChip) mode.")]
    pub mode: Option<Mode>,
    #[options(help = "Run for this many frames.", default = "600", meta = "N")]
    pub frames: usize,
    #[options(help = "Keep running while the program waits for a key.")]
    pub no_stop: bool,
    #[options(help = "Set the target instructions per second.", default = "700", meta = "IPS")]
    pub ips: u32,
    #[options(help = "Dump the registers after running.")]
    pub registers: bool,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    tracing_subscriber::fmt()
        .with_max_level(if options.debug {
            Level::TRACE
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut cpu = CPU::new(Flags {
        quirks: options.mode.unwrap_or_default().into(),
        ips: options.ips,
        ..Default::default()
    });
    cpu.load_program_bytes(&std::fs::read(&options.file)?)?;

    let result = run(&mut cpu, options.frames, !options.no_stop);
    cpu.screen().print_screen();
    if options.registers {
        cpu.dump();
    }
    if let Err(e) = result {
        eprintln!("{}", e.bold().red());
    }
    Ok(())
}

/// Runs up to `frames` frames, stopping early at a key wait if `stop_at_key` is set
fn run(cpu: &mut CPU, frames: usize, stop_at_key: bool) -> Result<()> {
    for frame in 0..frames {
        cpu.frame()?;
        if stop_at_key && cpu.is_waiting_for_key() {
            info!(frame, cycle = cpu.cycle(), "waiting for key");
            break;
        }
    }
    Ok(())
}
