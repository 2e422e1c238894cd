// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(missing_docs)]
//! Platform-specific IO/UI code, and some debug functionality.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use minifb::*;
use owo_colors::OwoColorize;
use trill::{error::Result, Screen, CPU};

#[derive(Clone, Debug)]
pub struct UIBuilder {
    pub width: usize,
    pub height: usize,
    pub name: Option<&'static str>,
    pub rom: Option<PathBuf>,
    pub window_options: WindowOptions,
}

impl UIBuilder {
    pub fn new(width: usize, height: usize, rom: impl AsRef<Path>) -> Self {
        UIBuilder {
            width,
            height,
            rom: Some(rom.as_ref().to_owned()),
            ..Default::default()
        }
    }
    pub fn build(&self) -> Result<UI> {
        let ui = UI {
            window: Window::new(
                self.name.unwrap_or_default(),
                self.width,
                self.height,
                self.window_options,
            )?,
            keyboard: Default::default(),
            fb: FrameBuffer::new(self.width, self.height),
            rom: self.rom.to_owned().unwrap_or_default(),
            time: Instant::now(),
            paused: false,
        };
        Ok(ui)
    }
}

impl Default for UIBuilder {
    fn default() -> Self {
        UIBuilder {
            width: Screen::WIDTH,
            height: Screen::HEIGHT,
            name: Some("Trill"),
            rom: None,
            window_options: WindowOptions {
                title: true,
                resize: false,
                scale: Scale::X16,
                scale_mode: ScaleMode::AspectRatioStretch,
                none: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBufferFormat {
    pub fg: u32,
    pub bg: u32,
}

impl Default for FrameBufferFormat {
    fn default() -> Self {
        FrameBufferFormat {
            fg: 0x0011a434,
            bg: 0x001E2431,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBuffer {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    format: FrameBufferFormat,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            buffer: vec![FrameBufferFormat::default().bg; width * height],
            width,
            height,
            format: Default::default(),
        }
    }
    /// Copies the lit pixels of `screen` into the buffer
    pub fn draw(&mut self, screen: &Screen) {
        for (x, y, lit) in screen.iter() {
            if let Some(pixel) = self.buffer.get_mut(y * self.width + x) {
                *pixel = if lit { self.format.fg } else { self.format.bg };
            }
        }
    }
    pub fn render(&mut self, window: &mut Window, screen: &Screen) -> Result<()> {
        self.draw(screen);
        window.update_with_buffer(&self.buffer, self.width, self.height)?;
        Ok(())
    }
    pub fn pixels(&self) -> &[u32] {
        &self.buffer
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(Screen::WIDTH, Screen::HEIGHT)
    }
}

#[derive(Debug)]
pub struct UI {
    window: Window,
    keyboard: Vec<Key>,
    fb: FrameBuffer,
    rom: PathBuf,
    time: Instant,
    pub paused: bool,
}

impl UI {
    /// Presents one frame. Returns false once the window has been closed.
    pub fn frame(&mut self, cpu: &CPU) -> Result<bool> {
        if !self.window.is_open() {
            return Ok(false);
        }
        let name = self
            .rom
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sound = if cpu.sound() > 0 { " ♪" } else { "" };
        if self.paused {
            self.window.set_title(&format!("Trill ⏸ {name}{sound}"));
        } else {
            self.window.set_title(&format!(
                "Trill ▶ {name} {:02.02}{sound}",
                (1.0 / self.time.elapsed().as_secs_f64())
            ));
        }
        self.time = Instant::now();
        // update framebuffer
        self.fb.render(&mut self.window, cpu.screen())?;
        Ok(true)
    }

    /// Forwards the keyboard to the keypad, and handles UI keybinds.
    /// Returns false when the user asks to quit.
    pub fn keys(&mut self, cpu: &mut CPU) -> Result<bool> {
        let held = self.window.get_keys();
        for &key in self.keyboard.iter().filter(|key| !held.contains(key)) {
            if let Some(key) = identify_key(key) {
                cpu.release(key)?;
            }
        }
        // handle keybinds for the UI
        for &key in held.iter().filter(|key| !self.keyboard.contains(key)) {
            use Key::*;
            match key {
                F1 | Comma => cpu.dump(),
                F2 | Period => cpu.screen().print_screen(),
                F5 | Backslash => {
                    self.paused = !self.paused;
                    eprintln!("{}.", (if self.paused { "Paused" } else { "Unpaused" }).cyan());
                }
                F6 | Enter if self.paused => {
                    eprintln!("{}", "Step".cyan());
                    cpu.tick()?;
                }
                F9 | Delete => {
                    eprintln!("{} {:03x}", "Reset at".cyan(), cpu.pc());
                    cpu.reset();
                }
                Escape => return Ok(false),
                key => {
                    if let Some(key) = identify_key(key) {
                        cpu.press(key)?;
                    }
                }
            }
        }
        self.keyboard = held;
        Ok(true)
    }
}

/// Maps the left side of a QWERTY keyboard onto the hexadecimal keypad
///
/// ```text
/// 1 2 3 4    1 2 3 C
/// Q W E R    4 5 6 D
/// A S D F    7 8 9 E
/// Z X C V    A 0 B F
/// ```
pub fn identify_key(key: Key) -> Option<usize> {
    match key {
        Key::Key1 => Some(0x1),
        Key::Key2 => Some(0x2),
        Key::Key3 => Some(0x3),
        Key::Key4 => Some(0xc),
        Key::Q => Some(0x4),
        Key::W => Some(0x5),
        Key::E => Some(0x6),
        Key::R => Some(0xD),
        Key::A => Some(0x7),
        Key::S => Some(0x8),
        Key::D => Some(0x9),
        Key::F => Some(0xE),
        Key::Z => Some(0xA),
        Key::X => Some(0x0),
        Key::C => Some(0xB),
        Key::V => Some(0xF),
        _ => None,
    }
}
