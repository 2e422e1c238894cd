//! Testing methods on Trill's structs
use std::{collections::hash_map::DefaultHasher, hash::Hash};
use trill::prelude::*;

#[test]
fn cpu() {
    let cpu = CPU::default(); // Default
    let cpu2 = cpu.clone(); // Clone
    assert_eq!(cpu, cpu2); // PartialEq
    println!("{cpu:?}"); // Debug
}

#[test]
fn error() {
    let error = Error::UnimplementedInstruction { word: 0x1234 };
    // Print it with Display and Debug
    println!("{error} {error:?}");
    assert_eq!("opcode 1234 not recognized", error.to_string());
}

#[test]
fn io_error() {
    let error: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
    assert!(matches!(error, Error::IoError(_)));
}

mod quirks {
    use super::*;

    #[test]
    fn from_true() {
        let quirks_true = Quirks::from(true);
        assert_eq!(
            quirks_true,
            Quirks {
                shift_copies_vy: true,
                jump_uses_vx: true,
                dma_moves_i: true,
                add_i_sets_vf: true,
            }
        )
    }

    #[test]
    fn from_false() {
        let quirks_false = Quirks::from(false);
        assert_eq!(quirks_false, Quirks::default());
    }

    #[test]
    #[allow(clippy::clone_on_copy)]
    fn clone() {
        let q1 = Quirks {
            shift_copies_vy: false,
            jump_uses_vx: true,
            dma_moves_i: false,
            add_i_sets_vf: true,
        };
        let q2 = q1.clone();
        assert_eq!(q1, q2);
    }

    #[test]
    fn debug() {
        println!("{:?}", Quirks::from(true));
    }

    #[test]
    fn eq() {
        assert_ne!(Quirks::from(false), Quirks::from(true));
    }

    #[test]
    fn ord() {
        assert!(Quirks::from(false) < Quirks::from(true));
        assert!(Quirks::from(true) == Quirks::from(false).max(Quirks::from(true)));
    }

    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Quirks::from(true).hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod mode {
    use super::*;

    #[test]
    fn default() {
        assert_eq!(Mode::Modern, Mode::default());
    }

    #[test]
    fn from_str() {
        assert_eq!(Mode::Chip8, "chip8".parse::<Mode>().unwrap());
        assert_eq!(Mode::Chip8, "VIP".parse::<Mode>().unwrap());
        assert_eq!(Mode::SChip, "SuperChip".parse::<Mode>().unwrap());
        assert_eq!(Mode::Modern, "modern".parse::<Mode>().unwrap());
        "xo-chip".parse::<Mode>().unwrap_err();
    }

    #[test]
    fn into_quirks() {
        let chip8 = Quirks::from(Mode::Chip8);
        assert!(chip8.shift_copies_vy && chip8.dma_moves_i);
        assert!(!chip8.jump_uses_vx && !chip8.add_i_sets_vf);
        let schip = Quirks::from(Mode::SChip);
        assert!(schip.jump_uses_vx);
        assert!(!schip.shift_copies_vy && !schip.dma_moves_i && !schip.add_i_sets_vf);
    }

    #[test]
    fn ord_hash() {
        assert!(Mode::Modern < Mode::SChip);
        let mut hasher = DefaultHasher::new();
        Mode::Chip8.hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod flags {
    use super::*;

    #[test]
    fn default() {
        let flags = Flags::default();
        assert_eq!(Quirks::default(), flags.quirks);
        assert_eq!((700, 60), (flags.ips, flags.refresh_rate));
    }

    #[test]
    fn from_mode() {
        let flags = Flags::from(Mode::Chip8);
        assert_eq!(Quirks::from(Mode::Chip8), flags.quirks);
        assert_eq!(700, flags.ips);
    }

    #[test]
    fn instructions_per_frame() {
        let flags = Flags {
            ips: 1000,
            refresh_rate: 0,
            ..Default::default()
        };
        // A refresh rate of zero is treated as one
        assert_eq!(1000, flags.instructions_per_frame());
    }

    #[test]
    fn debug_hash() {
        println!("{:?}", Flags::default());
        let mut hasher = DefaultHasher::new();
        Flags::default().hash(&mut hasher);
    }
}

mod screen {
    use super::*;

    #[test]
    fn default() {
        let screen = Screen::default();
        assert_eq!(screen, Screen::new());
        assert!(screen.is_blank());
        assert_eq!(Screen::WIDTH * Screen::HEIGHT, screen.iter().count());
    }

    #[test]
    fn display() {
        let mut cpu = CPU::default();
        cpu.load_program_bytes(&[0xd0, 0x05]).unwrap();
        cpu.tick().unwrap();
        let text = cpu.screen().to_string();
        assert_eq!(Screen::HEIGHT, text.lines().count());
        assert!(text.lines().next().unwrap().contains("████"));
    }

    #[test]
    fn print_screen() {
        Screen::default().print_screen();
    }

    #[test]
    fn clone_hash() {
        let screen = Screen::default();
        let mut hasher = DefaultHasher::new();
        screen.clone().hash(&mut hasher);
        println!("{screen:?}");
    }
}

mod instruction {
    use super::*;

    #[test]
    #[allow(clippy::clone_on_copy)]
    fn word() {
        let word = Word::new(0xd12f);
        assert_eq!(word, word.clone());
        assert_eq!(Word::from(0xd12f_u16), word);
        assert_eq!((0xd, 1, 2, 0xf), (word.op(), word.x(), word.y(), word.n()));
        println!("{word:?}");
    }

    #[test]
    fn insn() {
        assert_eq!(
            Insn::draw { x: 1, y: 2, n: 0xf },
            Insn::try_from(Word::new(0xd12f)).unwrap()
        );
        assert_eq!(Insn::cls, Insn::try_from(0x00e0_u16).unwrap());
        assert_eq!(Insn::font { x: 3 }, Insn::try_from(0xf329_u16).unwrap());
        println!("{:?}", Insn::ret);
        let mut hasher = DefaultHasher::new();
        Insn::ret.hash(&mut hasher);
    }
}

mod mem {
    use super::*;

    #[test]
    fn default_debug() {
        let mem = Mem::default();
        assert_eq!(mem, Mem::new());
        println!("{mem:?}");
    }
}
