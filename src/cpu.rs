// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;
pub mod quirks;

pub use self::{
    flags::Flags,
    quirks::{Mode, Quirks},
};
use self::{
    instruction::{Insn, Word},
    mem::Mem,
};
use crate::{
    error::{Error, Result},
    screen::Screen,
};
use tracing::{debug, trace, warn};

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Represents the internal state of the CPU interpreter
#[derive(Clone, Debug, PartialEq)]
pub struct CPU {
    /// Configuration which isn't inherent to the chip-8. Includes [Quirks], target IPS, etc.
    flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    keys: [bool; 16],
    keypause: bool,
    // Execution data
    cycle: usize,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the given [Flags].
    ///
    /// Memory starts out holding only the font, and the program counter is at `0x200`.
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let cpu = CPU::new(Flags {
    ///     quirks: Mode::Chip8.into(),
    ///     ..Default::default()
    /// });
    /// assert!(cpu.quirks().shift_copies_vy);
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(flags: Flags) -> Self {
        CPU {
            flags,
            mem: Mem::new(),
            screen: Screen::new(),
            stack: vec![],
            pc: Mem::PROGRAM,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            keys: [false; 16],
            keypause: false,
            cycle: 0,
        }
    }

    /// Loads bytes into the CPU's program space, starting at `0x200`.
    ///
    /// Returns [Error::ProgramTooLarge] if the program doesn't fit.
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(0x00, cpu.mem()[0x200]);
    /// assert_eq!(0xe0, cpu.mem()[0x201]);
    /// // Programs must fit in 0x200..0x1000
    /// cpu.load_program_bytes(&[0; 0xe01]).unwrap_err();
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        debug!(len = rom.len(), "loaded program");
        Ok(self)
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    ///
    /// // press key `7`
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = cpu.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, true)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// // press key `7`
    /// cpu.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, false)
    }

    /// Sets the state of a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    pub fn set_key(&mut self, key: usize, pressed: bool) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref != pressed;
        *keyref = pressed;
        Ok(changed)
    }

    /// Gets the state of every key on the keypad
    pub fn keys(&self) -> &[bool; 16] {
        &self.keys
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// cpu.set_v(0x10, 0x41).unwrap_err();
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        let gpr = self.v.get_mut(reg).ok_or(Error::InvalidRegister { reg })?;
        *gpr = value;
        Ok(())
    }

    /// Gets a slice of the entire general purpose registers
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// // Create a new CPU, and set v0 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x0, 0x41).unwrap();
    /// assert_eq!(
    ///     cpu.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// )
    /// ```
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0, cpu.i());
    /// ```
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the return addresses on the call stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the value in the Sound Timer register
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0, cpu.sound());
    /// ```
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the value in the Delay Timer register
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0, cpu.delay());
    /// ```
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Decrements the Delay Timer, stopping at 0
    pub fn decrement_delay(&mut self) {
        self.delay = self.delay.saturating_sub(1);
    }

    /// Decrements the Sound Timer, stopping at 0
    pub fn decrement_sound(&mut self) {
        self.sound = self.sound.saturating_sub(1);
    }

    /// Decrements both timers. Should be called at [Flags::refresh_rate] (60Hz).
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// cpu.tick_timers();
    /// assert_eq!(0, cpu.delay());
    /// assert_eq!(0, cpu.sound());
    /// ```
    pub fn tick_timers(&mut self) {
        self.decrement_delay();
        self.decrement_sound();
    }

    /// Gets the number of instructions the CPU has executed
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0x0, cpu.cycle());
    /// ```
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Returns true if the last instruction was a key wait (`Fx0A`) with no key held.
    pub fn is_waiting_for_key(&self) -> bool {
        self.keypause
    }

    /// Gets the screen, for rendering
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets a view of the whole address space
    pub fn mem(&self) -> &[u8] {
        self.mem.as_slice()
    }

    /// Gets the [Flags] the CPU was constructed with
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Gets the active [Quirks]
    pub fn quirks(&self) -> &Quirks {
        &self.flags.quirks
    }

    /// Resets the emulator.
    ///
    /// Touches the stack, pc, registers, timers, keys, screen, and cycle count.
    ///
    /// Does not touch [Flags] or memory, so the loaded program can be run again.
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x12, 0x34]).unwrap();
    /// cpu.tick().unwrap();
    /// assert_eq!(0x234, cpu.pc());
    /// cpu.reset();
    /// assert_eq!(0x200, cpu.pc());
    /// assert_eq!(0x12, cpu.mem()[0x200]);
    /// ```
    pub fn reset(&mut self) {
        // clear the stack
        self.stack.truncate(0);
        // Reset the program counter
        self.pc = Mem::PROGRAM;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        // I/O
        self.keys = [false; 16];
        self.keypause = false;
        self.screen.clear();
        // Execution data
        self.cycle = 0;
        debug!("reset");
    }

    /// Executes `steps` instructions, stopping at the first error.
    ///
    /// Does not touch the timers.
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.multistep(0x20)
    ///     .expect("The program should only have valid opcodes.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(0x20, cpu.cycle());
    /// ```
    pub fn multistep(&mut self, steps: usize) -> Result<&mut Self> {
        for _ in 0..steps {
            self.tick()?;
        }
        Ok(self)
    }

    /// Runs one frame: [Flags::instructions_per_frame] instructions, then one timer tick.
    pub fn frame(&mut self) -> Result<&mut Self> {
        self.multistep(self.flags.instructions_per_frame())?;
        self.tick_timers();
        Ok(self)
    }

    /// Executes a single instruction
    ///
    /// Returns [Error::UnimplementedInstruction] if the instruction at `pc` is unimplemented,
    /// [Error::StackUnderflow] on a return with an empty call stack, and
    /// [Error::InvalidAddress] if `pc` is past the end of memory.
    /// The CPU should not be stepped further after an error.
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.tick()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::UnimplementedInstruction] if the instruction is not implemented.
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// dbg!(cpu.tick())
    ///     .expect_err("Should return Error::UnimplementedInstruction { 0xffff }");
    /// ```
    pub fn tick(&mut self) -> Result<&mut Self> {
        // fetch opcode
        let word = self
            .mem
            .word(self.pc)
            .map(Word::from_be_bytes)
            .ok_or(Error::InvalidAddress { addr: self.pc })?;
        // decode opcode
        let insn = Insn::try_from(word).map_err(|e| {
            warn!(pc = self.pc, "{e}");
            e
        })?;
        self.cycle += 1;
        trace!(cycle = self.cycle, pc = self.pc, word = word.word(), ?insn);
        self.pc = self.pc.wrapping_add(2);
        self.execute(insn)?;
        Ok(self)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use trill::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        eprintln!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

impl Default for CPU {
    /// Constructs a new CPU with default [Flags]
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0000` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    /// | quirks | none    | See [Quirks]
    ///
    /// # Examples
    /// ```rust
    /// use trill::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU::new(Flags::default())
    }
}
