use crate::m68k::decode::Disassembly;
use crate::m68k::stream::InstructionStream;

/// Options controlling assembly output formatting.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Use uppercase mnemonics (MOVE.L vs move.l). Operands are left alone.
    pub uppercase: bool,
}

/// A formatted instruction ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedInstruction {
    /// Hex bytes column (e.g., "4E75").
    pub hex_bytes: String,
    /// Mnemonic with size suffix (e.g., "move.l" or "rts").
    pub mnemonic: String,
    /// Operand text including any trailing CPU tag (e.g., "D0, D1").
    pub operands: String,
    /// The complete disassembly line with the mnemonic case applied.
    pub text: String,
}

/// Split a disassembly into display columns, reading the instruction bytes
/// back from `stream` through the decoding CPU's address mask.
pub fn format_disassembly<S: InstructionStream + ?Sized>(
    stream: &S,
    disassembly: &Disassembly,
    opts: &FormatOptions,
) -> FormattedInstruction {
    let hex_bytes = (0..disassembly.length / 2)
        .map(|i| format!("{:04X}", stream.read_u16(disassembly.word_address(i))))
        .collect::<String>();

    let (mnemonic, rest) = match disassembly.text.split_once(' ') {
        Some((mnemonic, rest)) => (mnemonic, rest),
        None => (disassembly.text.as_str(), ""),
    };
    let mnemonic = if opts.uppercase {
        mnemonic.to_uppercase()
    } else {
        mnemonic.to_string()
    };
    let text = format!("{mnemonic}{}", &disassembly.text[mnemonic.len()..]);

    FormattedInstruction {
        hex_bytes,
        mnemonic,
        operands: rest.trim_start().to_string(),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m68k::decode::disassemble;
    use crate::m68k::stream::MemoryImage;
    use crate::m68k::variants::CpuType;

    fn format(bytes: &[u8], opts: &FormatOptions) -> FormattedInstruction {
        let image = MemoryImage::new(bytes, 0x1000);
        let d = disassemble(&image, 0x1000, CpuType::M68000);
        format_disassembly(&image, &d, opts)
    }

    #[test]
    fn format_rts() {
        let fmt = format(&[0x4e, 0x75], &FormatOptions::default());
        assert_eq!(fmt.hex_bytes, "4E75");
        assert_eq!(fmt.mnemonic, "rts");
        assert_eq!(fmt.operands, "");
        assert_eq!(fmt.text, "rts");
    }

    #[test]
    fn format_move_long() {
        let fmt = format(&[0x22, 0x00], &FormatOptions::default());
        assert_eq!(fmt.mnemonic, "move.l");
        assert_eq!(fmt.operands, "D0, D1");
        assert_eq!(fmt.text, "move.l  D0, D1");
    }

    #[test]
    fn format_jsr_displacement() {
        let fmt = format(&[0x4e, 0xae, 0xfd, 0xd8], &FormatOptions::default());
        assert_eq!(fmt.hex_bytes, "4EAEFDD8");
        assert_eq!(fmt.mnemonic, "jsr");
        assert_eq!(fmt.operands, "(-$228,A6)");
    }

    #[test]
    fn format_uppercase_mnemonic_only() {
        let opts = FormatOptions { uppercase: true };
        assert_eq!(format(&[0x4e, 0x71], &opts).text, "NOP");
        let fmt = format(&[0x0c, 0x00, 0x00, 0xff], &opts);
        assert_eq!(fmt.mnemonic, "CMPI.B");
        assert_eq!(fmt.text, "CMPI.B  #-$1, D0");
    }

    #[test]
    fn hex_is_read_at_masked_address() {
        // A 68008 sees $FC0000 as $3C0000.
        let image = MemoryImage::new(&[0x4e, 0x71, 0x4e, 0x75], 0x3c0000);
        let d = disassemble(&image, 0xfc0002, CpuType::M68008);
        let fmt = format_disassembly(&image, &d, &FormatOptions::default());
        assert_eq!(fmt.text, "rts");
        assert_eq!(fmt.hex_bytes, "4E75");
    }

    #[test]
    fn format_illegal_word() {
        let fmt = format(&[0x4a, 0xfc], &FormatOptions::default());
        assert_eq!(fmt.mnemonic, "dc.w");
        assert_eq!(fmt.operands, "$4afc; ILLEGAL");
    }
}
