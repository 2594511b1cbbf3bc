/// Tests for CPU-generation gating: which opcodes each CPU type accepts
/// and how rejected opcodes are rendered.

use m68kdasm::{disassemble, is_valid_instruction, valid_opcode_count, CpuType};

/// Opcode words and the first CPU generation that accepts them.
const FIRST_ACCEPTED: &[(u16, CpuType)] = &[
    (0x4E71, CpuType::M68000), // nop
    (0x4E75, CpuType::M68000), // rts
    (0x4E74, CpuType::M68010), // rtd
    (0x4E7A, CpuType::M68010), // movec
    (0x0E50, CpuType::M68010), // moves.w
    (0x42C0, CpuType::M68010), // move CCR, D0
    (0x4848, CpuType::M68010), // bkpt
    (0x49C0, CpuType::M68020), // extb.l
    (0x4C00, CpuType::M68020), // mull
    (0x0ED0, CpuType::M68020), // cas.l
    (0xE8C0, CpuType::M68020), // bftst
    (0x60FF, CpuType::M68020), // bra.l
    (0xF000, CpuType::M68020), // cpgen
    (0x0C3A, CpuType::M68020), // cmpi.b (d16,PC)
    (0xF620, CpuType::M68040), // move16
    (0xF4D8, CpuType::M68040), // cinva
];

fn generation_rank(cpu: CpuType) -> u8 {
    match cpu {
        CpuType::M68000 | CpuType::M68008 => 0,
        CpuType::M68010 => 1,
        CpuType::M68EC020 | CpuType::M68020 | CpuType::M68030 => 2,
        CpuType::M68040 => 3,
    }
}

#[test]
fn test_first_accepting_generation() {
    for &(opcode, first) in FIRST_ACCEPTED {
        for cpu in CpuType::ALL {
            let expected = generation_rank(cpu) >= generation_rank(first);
            assert_eq!(
                is_valid_instruction(opcode, cpu),
                expected,
                "opcode {opcode:04x} on {cpu}"
            );
        }
    }
}

#[test]
fn test_68020_only_instructions() {
    for opcode in [0x06C0, 0x06C8, 0x06D0] {
        assert!(is_valid_instruction(opcode, CpuType::M68020));
        assert!(is_valid_instruction(opcode, CpuType::M68EC020));
        assert!(!is_valid_instruction(opcode, CpuType::M68030));
        assert!(!is_valid_instruction(opcode, CpuType::M68040));
        assert!(!is_valid_instruction(opcode, CpuType::M68010));
    }
}

#[test]
fn test_rejected_opcode_rendering() {
    let bytes = [0x49u8, 0xC0, 0xFF, 0xFF];
    for cpu in [CpuType::M68000, CpuType::M68008, CpuType::M68010] {
        let d = disassemble(&bytes, 0, cpu);
        assert_eq!(d.text, "dc.w $49c0; ILLEGAL");
        assert_eq!(d.length, 2);
    }
}

#[test]
fn test_line_a_and_line_f_on_every_cpu() {
    for cpu in CpuType::ALL {
        let d = disassemble(&[0xA1u8, 0x23], 0, cpu);
        assert_eq!(d.text, "dc.w    $a123; opcode 1010");
        assert_eq!(d.length, 2);
        let d = disassemble(&[0xFFu8, 0xFF], 0, cpu);
        assert_eq!(d.text, "dc.w    $ffff; opcode 1111");
        assert_eq!(d.length, 2);
    }
}

#[test]
fn test_68008_and_68ec020_share_instruction_sets() {
    assert_eq!(valid_opcode_count(CpuType::M68008), valid_opcode_count(CpuType::M68000));
    assert_eq!(valid_opcode_count(CpuType::M68EC020), valid_opcode_count(CpuType::M68020));
    // 68030 loses callm/rtm
    assert!(valid_opcode_count(CpuType::M68030) < valid_opcode_count(CpuType::M68020));
}

#[test]
fn test_address_bus_width() {
    // nop at 0x0, rts at 0x2; the high address bits are dropped on narrow buses
    let bytes = [0x4Eu8, 0x71, 0x4E, 0x75];
    assert_eq!(disassemble(&bytes, 0x0040_0002, CpuType::M68008).text, "rts");
    assert_eq!(disassemble(&bytes, 0x0100_0002, CpuType::M68EC020).text, "rts");
    assert_eq!(disassemble(&bytes, 0x0100_0002, CpuType::M68030).text, "ori.b   #$0, D0");
}
