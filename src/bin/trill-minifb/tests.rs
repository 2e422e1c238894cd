//! Tests for trill-minifb

use super::ui::*;
use minifb::Key;
use std::{collections::hash_map::DefaultHasher, hash::Hash};
use trill::*;

mod ui_builder {
    use super::*;
    #[test]
    fn default() {
        let ui_builder = UIBuilder::default();
        assert_eq!((Screen::WIDTH, Screen::HEIGHT), (ui_builder.width, ui_builder.height));
        println!("{ui_builder:?}");
    }
    #[test]
    fn new() {
        let ui_builder = UIBuilder::new(32, 64, "dummy.ch8");
        assert_eq!(Some("dummy.ch8".into()), ui_builder.rom);
    }
}

mod framebuffer_format {
    use super::*;
    #[test]
    #[allow(clippy::redundant_clone)]
    fn clone() {
        let fbf = FrameBufferFormat {
            fg: 0x12345678,
            bg: 0x90abcdef,
        };
        let fbf2 = fbf.clone();
        assert_eq!(fbf, fbf2);
    }
    #[test]
    fn ord() {
        assert!(
            FrameBufferFormat::default()
                == FrameBufferFormat {
                    fg: 0xffffff,
                    bg: 0xffffff,
                }
                .min(FrameBufferFormat::default())
        );
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        FrameBufferFormat::default().hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod framebuffer {
    use super::*;
    #[test]
    fn new() {
        assert_eq!(FrameBuffer::new(64, 32), FrameBuffer::default());
    }
    #[test]
    fn draw() {
        let mut cpu = CPU::default();
        // draw the `0` glyph at (0, 0)
        cpu.load_program_bytes(&[0xd0, 0x05]).unwrap();
        cpu.tick().unwrap();
        let mut fb = FrameBuffer::default();
        fb.draw(cpu.screen());
        let format = FrameBufferFormat::default();
        assert_eq!(format.fg, fb.pixels()[0]);
        assert_eq!(format.bg, fb.pixels()[4]);
        assert_eq!(format.bg, fb.pixels()[64 + 1]);
        assert_eq!(format.fg, fb.pixels()[64 + 3]);
    }
}

#[test]
fn identify_key() {
    let layout = [
        Key::X, Key::Key1, Key::Key2, Key::Key3, Key::Q, Key::W, Key::E, Key::A, Key::S, Key::D,
        Key::Z, Key::C, Key::Key4, Key::R, Key::F, Key::V,
    ];
    for (hex, key) in layout.into_iter().enumerate() {
        assert_eq!(Some(hex), super::ui::identify_key(key));
    }
    assert_eq!(None, super::ui::identify_key(Key::Escape));
}
