/// End-to-end disassembly of small 68000 programs through the public API:
/// walking a mapped image, stepping hints, packed results and listings.

use m68kdasm::{
    disassemble, disassemble_raw, format_disassembly, generate_listing, CpuType, Error,
    FormatOptions, InstructionStream, ListingOptions, MemoryImage, StepFlag, DASMFLAG_LENGTHMASK,
    DASMFLAG_STEP_OVER, DASMFLAG_SUPPORTED,
};

const ROM_BASE: u32 = 0x00fc_0000;

#[rustfmt::skip]
const BOOT_CODE: [u8; 24] = [
    0x4F, 0xF9, 0x00, 0x04, 0x00, 0x00, // lea     ($40000).l, A7
    0x41, 0xFA, 0x00, 0x10,             // lea     ($10,PC), A0
    0x70, 0x07,                         // moveq   #$7, D0
    0x20, 0xD8,                         // move.l  (A0)+, (A0)+
    0x51, 0xC8, 0xFF, 0xFC,             // dbra    D0, fc000c
    0x4E, 0xB9, 0x00, 0xFC, 0x01, 0x00, // jsr     ($fc0100).l
];

fn walk(image: &MemoryImage, cpu: CpuType) -> Vec<(u32, String)> {
    let mut out = Vec::new();
    let mut pc = image.base();
    while pc < image.end() {
        let d = disassemble(image, pc, cpu);
        out.push((pc, d.text));
        pc += d.length;
    }
    out
}

// ─── Walking an Image ────────────────────────────────────────────────

#[test]
fn test_boot_code_walk() {
    let image = MemoryImage::new(&BOOT_CODE, ROM_BASE);
    let lines = walk(&image, CpuType::M68000);
    let expected = [
        (0xfc0000, "lea     ($40000).l, A7"),
        (0xfc0006, "lea     ($10,PC), A0"),
        (0xfc000a, "moveq   #$7, D0"),
        (0xfc000c, "move.l  (A0)+, (A0)+"),
        (0xfc000e, "dbra    D0, fc000c"),
        (0xfc0012, "jsr     ($fc0100).l"),
    ];
    assert_eq!(lines.len(), expected.len());
    for ((pc, text), (want_pc, want_text)) in lines.iter().zip(expected) {
        assert_eq!(*pc, want_pc);
        assert_eq!(text, want_text);
    }
}

#[test]
fn test_same_text_on_every_cpu() {
    let image = MemoryImage::new(&BOOT_CODE, ROM_BASE);
    let reference = walk(&image, CpuType::M68000);
    // The 68008 decodes only 22 address bits, which cannot reach the ROM
    for cpu in CpuType::ALL.into_iter().filter(|&cpu| cpu != CpuType::M68008) {
        assert_eq!(walk(&image, cpu), reference, "{cpu}");
    }
}

// ─── Stepping and Packed Results ─────────────────────────────────────

#[test]
fn test_step_hints() {
    let image = MemoryImage::new(&BOOT_CODE, ROM_BASE);
    let dbra = disassemble(&image, 0xfc000e, CpuType::M68000);
    assert_eq!(dbra.step, StepFlag::StepOver);
    let jsr = disassemble(&image, 0xfc0012, CpuType::M68000);
    assert_eq!(jsr.step, StepFlag::StepOver);
    assert_eq!(jsr.packed(), 6 | DASMFLAG_STEP_OVER | DASMFLAG_SUPPORTED);
    assert_eq!(jsr.packed() & DASMFLAG_LENGTHMASK, jsr.length);

    let moveq = disassemble(&image, 0xfc000a, CpuType::M68000);
    assert_eq!(moveq.step, StepFlag::None);
    assert_eq!(moveq.packed(), 2 | DASMFLAG_SUPPORTED);

    let returns: [&[u8]; 4] = [&[0x4E, 0x75], &[0x4E, 0x73], &[0x4E, 0x77], &[0x4E, 0x74, 0, 0]];
    for bytes in returns {
        assert_eq!(disassemble(bytes, 0, CpuType::M68010).step, StepFlag::StepOut);
    }
}

#[test]
fn test_raw_cpu_ids() {
    let image = MemoryImage::new(&BOOT_CODE, ROM_BASE);
    let d = disassemble_raw(&image, ROM_BASE, 1).unwrap();
    assert_eq!(d.text, "lea     ($40000).l, A7");
    assert_eq!(disassemble_raw(&image, ROM_BASE, 8), Err(Error::UnsupportedCpuType(8)));
}

// ─── Custom Streams ──────────────────────────────────────────────────

/// Every word reads as the same value.
struct Flood(u16);

impl InstructionStream for Flood {
    fn read_u16(&self, _address: u32) -> u16 {
        self.0
    }
}

#[test]
fn test_custom_stream_and_pc_wrap() {
    let d = disassemble(&Flood(0x4EB9), 0xffff_fffe, CpuType::M68040);
    assert_eq!(d.text, "jsr     ($4eb94eb9).l");
    assert_eq!(d.length, 6);
    assert_eq!(d.address, 0xffff_fffe);
}

#[test]
fn test_operand_reads_stay_in_order() {
    // move.w ($1234).w, ($5678).l reads source extension first
    let bytes = [0x33u8, 0xF8, 0x12, 0x34, 0x00, 0x00, 0x56, 0x78];
    let d = disassemble(&bytes, 0, CpuType::M68000);
    assert_eq!(d.text, "move.w  ($1234).w, ($5678).l");
    assert_eq!(d.length, 8);
}

// ─── Formatting and Listings ─────────────────────────────────────────

#[test]
fn test_format_columns() {
    let image = MemoryImage::new(&BOOT_CODE, ROM_BASE);
    let d = disassemble(&image, ROM_BASE, CpuType::M68000);
    let fmt = format_disassembly(&image, &d, &FormatOptions { uppercase: true });
    assert_eq!(fmt.hex_bytes, "4FF900040000");
    assert_eq!(fmt.mnemonic, "LEA");
    assert_eq!(fmt.operands, "($40000).l, A7");
}

#[test]
fn test_listing_of_boot_code() {
    let options = ListingOptions {
        base_address: ROM_BASE,
        show_hex: false,
        show_line_numbers: false,
        ..ListingOptions::default()
    };
    let lines = generate_listing(&BOOT_CODE, &options);
    assert_eq!(lines[1].text, "; instructions: 6, bytes: 24/24");
    assert_eq!(lines[3].text, "00FC0000  lea     ($40000).l, A7");
    assert_eq!(lines.last().map(|l| l.text.as_str()), Some("00FC0012  jsr     ($fc0100).l"));
}
