//! Testing Trill's public API by running small programs
use trill::prelude::*;

/// Constructs a CPU with the given flags, and loads a program into it
fn load(flags: Flags, rom: &[u8]) -> CPU {
    let mut cpu = CPU::new(flags);
    cpu.load_program_bytes(rom)
        .expect("test programs should fit in memory");
    cpu
}

mod programs {
    use super::*;

    #[test]
    fn counting_loop() {
        let mut cpu = load(
            Flags::default(),
            &[
                0x60, 0x00, // v0 = 0
                0x70, 0x01, // v0 += 1
                0x30, 0x0a, // skip if v0 == 10
                0x12, 0x02, // jmp 0x202
                0x12, 0x08, // jmp 0x208 (halt)
            ],
        );
        cpu.multistep(100).unwrap();
        assert_eq!(10, cpu.v()[0]);
        assert_eq!(0x208, cpu.pc());
    }

    #[test]
    fn subroutine() {
        let mut cpu = load(
            Flags::default(),
            &[
                0x22, 0x06, // call 0x206
                0x22, 0x06, // call 0x206
                0x12, 0x04, // jmp 0x204 (halt)
                0x71, 0x01, // v1 += 1
                0x00, 0xee, // ret
            ],
        );
        cpu.multistep(7).unwrap();
        assert_eq!(2, cpu.v()[1]);
        assert_eq!(0x204, cpu.pc());
        assert!(cpu.stack().is_empty());
    }

    #[test]
    fn bcd_roundtrip() {
        let mut cpu = load(
            Flags::default(),
            &[
                0x6a, 0x7b, // vA = 123
                0xa3, 0x00, // I = 0x300
                0xfa, 0x33, // bcd vA
                0xf2, 0x65, // v0..=v2 = I[0..3]
            ],
        );
        cpu.multistep(4).unwrap();
        assert_eq!([1, 2, 3], cpu.v()[0..3]);
        assert_eq!([1, 2, 3], cpu.mem()[0x300..0x303]);
        assert_eq!(0x300, cpu.i());
    }

    #[test]
    fn draw_glyph() {
        let mut cpu = load(
            Flags::default(),
            &[
                0x60, 0x08, // v0 = 8
                0xf0, 0x29, // I = glyph(v0)
                0x61, 0x02, // v1 = 2
                0xd1, 0x15, // draw 5 rows at (v1, v1)
            ],
        );
        cpu.multistep(4).unwrap();
        let rows = cpu.screen().rows();
        // `8` is 0xf0, 0x90, 0xf0, 0x90, 0xf0
        for (row, byte) in rows[2..7].iter().zip([0xf0u64, 0x90, 0xf0, 0x90, 0xf0]) {
            assert_eq!(byte << (56 - 2), *row);
        }
        assert_eq!(0, cpu.v()[0xf]);
        assert_eq!(16, cpu.screen().iter().filter(|&(_, _, lit)| lit).count());
    }

    #[test]
    fn draw_and_erase() {
        let mut cpu = load(
            Flags::default(),
            &[
                0xa0, 0x00, // I = glyph 0
                0xd0, 0x05, // draw
                0xd0, 0x05, // draw again
            ],
        );
        cpu.multistep(2).unwrap();
        assert!(!cpu.screen().is_blank());
        assert_eq!(0, cpu.v()[0xf]);
        cpu.tick().unwrap();
        assert!(cpu.screen().is_blank());
        assert_eq!(1, cpu.v()[0xf]);
    }

    #[test]
    fn wait_for_key() {
        let mut cpu = load(
            Flags::default(),
            &[
                0xf3, 0x0a, // v3 = wait for key
                0x12, 0x02, // jmp 0x202 (halt)
            ],
        );
        // Without a key held, the program stays put
        cpu.multistep(10).unwrap();
        assert!(cpu.is_waiting_for_key());
        assert_eq!(0x200, cpu.pc());
        // Hold a key, and the program continues
        cpu.press(0xb).unwrap();
        cpu.tick().unwrap();
        assert!(!cpu.is_waiting_for_key());
        assert_eq!(0x202, cpu.pc());
        assert_eq!(0xb, cpu.v()[3]);
    }

    #[test]
    fn skip_on_key() {
        let mut cpu = load(
            Flags::default(),
            &[
                0x65, 0x17, // v5 = 0x17 (key 7)
                0xe5, 0x9e, // skip if key v5 held
                0x12, 0x02, // jmp 0x202
                0x12, 0x06, // jmp 0x206 (halt)
            ],
        );
        cpu.multistep(8).unwrap();
        assert_eq!(0x204, cpu.pc());
        cpu.set_key(7, true).unwrap();
        cpu.multistep(2).unwrap();
        assert_eq!(0x206, cpu.pc());
    }

    #[test]
    fn timers() {
        let flags = Flags {
            ips: 240,
            ..Default::default()
        };
        let mut cpu = load(
            flags,
            &[
                0x60, 0x05, // v0 = 5
                0xf0, 0x15, // delay = v0
                0xf0, 0x18, // sound = v0
                0xf1, 0x07, // v1 = delay
                0x12, 0x08, // jmp 0x208 (halt)
            ],
        );
        assert_eq!(4, cpu.flags().instructions_per_frame());
        cpu.frame().unwrap();
        assert_eq!(5, cpu.v()[1]);
        assert_eq!((4, 4), (cpu.delay(), cpu.sound()));
        for _ in 0..10 {
            cpu.frame().unwrap();
        }
        assert_eq!((0, 0), (cpu.delay(), cpu.sound()));
    }

    #[test]
    fn reset_reruns_program() {
        let rom = [0x70, 0x01, 0x12, 0x00];
        let mut cpu = load(Flags::default(), &rom);
        cpu.multistep(10).unwrap();
        assert_eq!(5, cpu.v()[0]);
        cpu.reset();
        assert_eq!(0, cpu.v()[0]);
        assert_eq!(0, cpu.cycle());
        cpu.multistep(10).unwrap();
        assert_eq!(5, cpu.v()[0]);
    }
}

mod quirks {
    use super::*;

    /// v1 = 3; v2 = 0x81; v1 = (v1 or v2) >> 1
    const SHIFT: &[u8] = &[0x61, 0x03, 0x62, 0x81, 0x81, 0x26];

    #[test]
    fn shift_modern() {
        let mut cpu = load(Flags::default(), SHIFT);
        cpu.multistep(3).unwrap();
        assert_eq!((0x01, 1), (cpu.v()[1], cpu.v()[0xf]));
    }

    #[test]
    fn shift_chip8() {
        let mut cpu = load(Mode::Chip8.into(), SHIFT);
        cpu.multistep(3).unwrap();
        assert_eq!((0x40, 1), (cpu.v()[1], cpu.v()[0xf]));
    }

    /// v0 = 2; v3 = 4; jmp 0x300 + (v0 or v3)
    const JUMP: &[u8] = &[0x60, 0x02, 0x63, 0x04, 0xb3, 0x00];

    #[test]
    fn jump_modern() {
        let mut cpu = load(Flags::default(), JUMP);
        cpu.multistep(3).unwrap();
        assert_eq!(0x302, cpu.pc());
    }

    #[test]
    fn jump_schip() {
        let mut cpu = load(Mode::SChip.into(), JUMP);
        cpu.multistep(3).unwrap();
        assert_eq!(0x304, cpu.pc());
    }

    /// I = 0x300; v0..=v3 -> I
    const DMA: &[u8] = &[0xa3, 0x00, 0xf3, 0x55];

    #[test]
    fn dma_modern() {
        let mut cpu = load(Flags::default(), DMA);
        cpu.multistep(2).unwrap();
        assert_eq!(0x300, cpu.i());
    }

    #[test]
    fn dma_chip8() {
        let mut cpu = load(Mode::Chip8.into(), DMA);
        cpu.multistep(2).unwrap();
        assert_eq!(0x304, cpu.i());
    }

    /// I = 0xfff; v0 = 1; I += v0
    const ADD_I: &[u8] = &[0xaf, 0xff, 0x60, 0x01, 0xf0, 0x1e];

    #[test]
    fn add_i() {
        let mut cpu = load(Flags::default(), ADD_I);
        cpu.multistep(3).unwrap();
        assert_eq!((0x1000, 0), (cpu.i(), cpu.v()[0xf]));

        let mut cpu = load(
            Quirks {
                add_i_sets_vf: true,
                ..Default::default()
            }
            .into(),
            ADD_I,
        );
        cpu.multistep(3).unwrap();
        assert_eq!((0x1000, 1), (cpu.i(), cpu.v()[0xf]));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unimplemented_instruction() {
        let mut cpu = load(Flags::default(), &[0x00, 0xe0, 0xff, 0xff]);
        cpu.tick().unwrap();
        match cpu.tick() {
            Err(Error::UnimplementedInstruction { word }) => assert_eq!(0xffff, word),
            other => unreachable!("{other:?}"),
        }
    }

    #[test]
    fn stack_underflow() {
        let mut cpu = load(Flags::default(), &[0x00, 0xe0, 0x00, 0xee]);
        match cpu.multistep(2) {
            Err(Error::StackUnderflow { addr }) => assert_eq!(0x202, addr),
            other => unreachable!("{other:?}"),
        }
    }

    #[test]
    fn invalid_address() {
        let mut cpu = load(Flags::default(), &[0x1f, 0xff]);
        cpu.tick().unwrap();
        match cpu.tick() {
            Err(Error::InvalidAddress { addr }) => assert_eq!(0xfff, addr),
            other => unreachable!("{other:?}"),
        }
    }

    #[test]
    fn program_too_large() {
        let mut cpu = CPU::default();
        match cpu.load_program_bytes(&[0; 0xe01]) {
            Err(Error::ProgramTooLarge { len, max }) => assert_eq!((0xe01, 0xe00), (len, max)),
            other => unreachable!("{other:?}"),
        }
        // The largest program fits exactly
        cpu.load_program_bytes(&[0xa5; 0xe00]).unwrap();
        assert_eq!(0xa5, cpu.mem()[0xfff]);
    }

    #[test]
    fn press_invalid_key() {
        let mut cpu = CPU::default();
        let cpu2 = cpu.clone();
        cpu.press(0x21345134)
            .expect_err("This should produce an Error::InvalidKey");
        // no change has been made, everything is safe.
        assert_eq!(cpu, cpu2);
    }

    #[test]
    fn release_invalid_key() {
        let mut cpu = CPU::default();
        let cpu2 = cpu.clone();
        cpu.release(0x21345134)
            .expect_err("This should produce an Error::InvalidKey");
        // no change has been made, everything is safe.
        assert_eq!(cpu, cpu2);
    }

    #[test]
    fn set_invalid_reg() {
        let mut cpu = CPU::default();
        let cpu2 = cpu.clone();
        cpu.set_v(0x21345134, 0xff)
            .expect_err("This should produce an Error::InvalidRegister");
        // no change has been made
        assert_eq!(cpu, cpu2);
    }

    #[test]
    fn invalid_mode() {
        match "cosmac".parse::<Mode>() {
            Err(Error::InvalidMode { mode }) => assert_eq!("cosmac", mode),
            other => unreachable!("{other:?}"),
        }
    }
}
