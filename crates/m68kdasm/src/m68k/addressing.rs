use super::decode::DisassemblerContext;
use super::hex::{signed_hex_16, signed_hex_32, signed_hex_8};
use super::instruction::Size;
use super::stream::InstructionStream;

/// Effective address category, one per bit of an opcode pattern's EA mask.
///
/// The 68k encodes effective addresses as a 3-bit mode and a 3-bit register
/// field. Modes 0-6 use the register field directly; mode 7 overloads it
/// to select among absolute, PC-relative and immediate modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaCategory {
    /// Dn
    DataDirect,
    /// An
    AddressDirect,
    /// (An)
    AddressIndirect,
    /// (An)+
    AddressPostIncrement,
    /// -(An)
    AddressPreDecrement,
    /// (d16,An)
    AddressDisplacement,
    /// (d8,An,Xn) and the 68020 full extension formats
    AddressIndex,
    /// (xxx).w
    AbsoluteShort,
    /// (xxx).l
    AbsoluteLong,
    /// #imm
    Immediate,
    /// (d16,PC)
    PcDisplacement,
    /// (d8,PC,Xn) and the 68020 full extension formats
    PcIndex,
}

impl EaCategory {
    /// Classify the low six bits of `field`. Mode 7 registers 5-7 have no
    /// category.
    pub fn from_field(field: u16) -> Option<Self> {
        let reg = field & 7;
        match (field >> 3) & 7 {
            0 => Some(EaCategory::DataDirect),
            1 => Some(EaCategory::AddressDirect),
            2 => Some(EaCategory::AddressIndirect),
            3 => Some(EaCategory::AddressPostIncrement),
            4 => Some(EaCategory::AddressPreDecrement),
            5 => Some(EaCategory::AddressDisplacement),
            6 => Some(EaCategory::AddressIndex),
            _ => match reg {
                0 => Some(EaCategory::AbsoluteShort),
                1 => Some(EaCategory::AbsoluteLong),
                2 => Some(EaCategory::PcDisplacement),
                3 => Some(EaCategory::PcIndex),
                4 => Some(EaCategory::Immediate),
                _ => None,
            },
        }
    }

    /// The bit this category occupies in a 12-bit EA mask.
    pub fn mask_bit(self) -> u16 {
        match self {
            EaCategory::DataDirect => 0x800,
            EaCategory::AddressDirect => 0x400,
            EaCategory::AddressIndirect => 0x200,
            EaCategory::AddressPostIncrement => 0x100,
            EaCategory::AddressPreDecrement => 0x080,
            EaCategory::AddressDisplacement => 0x040,
            EaCategory::AddressIndex => 0x020,
            EaCategory::AbsoluteShort => 0x010,
            EaCategory::AbsoluteLong => 0x008,
            EaCategory::Immediate => 0x004,
            EaCategory::PcDisplacement => 0x002,
            EaCategory::PcIndex => 0x001,
        }
    }
}

/// Whether the EA field in the low six bits of `field` is permitted by
/// `ea_mask`. A zero mask permits everything, including the undefined
/// mode 7 encodings.
pub fn ea_allowed(field: u16, ea_mask: u16) -> bool {
    if ea_mask == 0 {
        return true;
    }
    EaCategory::from_field(field).is_some_and(|cat| ea_mask & cat.mask_bit() != 0)
}

/// Render the effective address in the low six bits of `field`, consuming
/// any extension words from the context. `size` only matters for
/// immediates.
pub fn ea_mode_str<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    field: u16,
    size: Size,
) -> String {
    let rn = field & 7;
    match (field >> 3) & 7 {
        0 => format!("D{rn}"),
        1 => format!("A{rn}"),
        2 => format!("(A{rn})"),
        3 => format!("(A{rn})+"),
        4 => format!("-(A{rn})"),
        5 => format!("({},A{rn})", signed_hex_16(ctx.read_imm_16())),
        6 => {
            let ext = ctx.read_imm_16();
            indexed(ctx, ext, &format!("A{rn}"))
        }
        _ => match rn {
            0 => format!("({}).w", signed_hex_16(ctx.read_imm_16())),
            1 => format!("({}).l", signed_hex_32(ctx.read_imm_32())),
            2 => format!("({},PC)", signed_hex_16(ctx.read_imm_16())),
            3 => {
                let ext = ctx.read_imm_16();
                indexed(ctx, ext, "PC")
            }
            4 => match size {
                Size::Byte => format!("#${:x}", ctx.read_imm_8()),
                Size::Word => format!("#${:x}", ctx.read_imm_16()),
                Size::Long => format!("#${:x}", ctx.read_imm_32()),
            },
            _ => format!("INVALID {:x}", field & 0x3f),
        },
    }
}

// ─── Indexed Modes ───────────────────────────────────────────────────

const EXT_FULL: u16 = 0x0100;
const EXT_BASE_SUPPRESS: u16 = 0x0080;
const EXT_INDEX_SUPPRESS: u16 = 0x0040;

fn index_scale(ext: u16) -> u16 {
    (ext >> 9) & 3
}

fn index_register(ext: u16) -> String {
    let kind = if ext & 0x8000 != 0 { 'A' } else { 'D' };
    let size = if ext & 0x0800 != 0 { 'l' } else { 'w' };
    let mut out = format!("{kind}{}.{size}", (ext >> 12) & 7);
    if index_scale(ext) != 0 {
        out.push_str(&format!("*{}", 1u32 << index_scale(ext)));
    }
    out
}

/// Mode 6 and mode 7/3: brief or full extension format relative to `base`.
fn indexed<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    ext: u16,
    base: &str,
) -> String {
    let pre_68020 = ctx.cpu().is_pre_68020();
    if pre_68020 && index_scale(ext) != 0 {
        return "<invalid mode>".to_string();
    }
    if ext & EXT_FULL != 0 && !pre_68020 {
        return full_extension(ctx, ext, base);
    }
    format!("({},{base},{})", signed_hex_8(ext as u8), index_register(ext))
}

/// 68020 full extension word: base/outer displacements, optional memory
/// indirection with pre- or post-indexing, suppressible base and index.
fn full_extension<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    ext: u16,
    base: &str,
) -> String {
    if (ext & 0xe4) == 0xc4 || (ext & 0xe2) == 0xc0 {
        return "0".to_string();
    }

    let bd_size = (ext >> 4) & 3;
    let iis = ext & 7;
    let index_suppressed = ext & EXT_INDEX_SUPPRESS != 0;
    if bd_size == 0 || iis == 4 || (index_suppressed && iis > 4) {
        return "<invalid mode>".to_string();
    }

    let bd = match bd_size {
        2 => ctx.read_imm_16() as i16 as u32,
        3 => ctx.read_imm_32(),
        _ => 0,
    };
    let od = match iis & 3 {
        2 => ctx.read_imm_16() as i16 as u32,
        3 => ctx.read_imm_32(),
        _ => 0,
    };

    let base_reg = if ext & EXT_BASE_SUPPRESS == 0 { base } else { "" };
    let index = if index_suppressed { String::new() } else { index_register(ext) };
    let preindex = (1..=3).contains(&iis);
    let postindex = iis > 4;

    let mut inner: Vec<String> = Vec::new();
    if bd != 0 || (base_reg.is_empty() && index.is_empty()) {
        inner.push(signed_hex_32(bd));
    }
    if !base_reg.is_empty() {
        inner.push(base_reg.to_string());
    }

    let mut out = String::from("(");
    if preindex || postindex {
        if preindex && !index.is_empty() {
            inner.push(index.clone());
        }
        out.push('[');
        out.push_str(&inner.join(","));
        out.push(']');
        if postindex && !index.is_empty() {
            out.push(',');
            out.push_str(&index);
        }
        if od != 0 {
            out.push(',');
            out.push_str(&signed_hex_32(od));
        }
    } else {
        if !index.is_empty() {
            inner.push(index);
        }
        out.push_str(&inner.join(","));
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m68k::variants::CpuType;

    fn render(words: &[u16], field: u16, size: Size, cpu: CpuType) -> (String, u32) {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        let mut ctx = DisassemblerContext::new(&bytes, 0, cpu);
        let text = ea_mode_str(&mut ctx, field, size);
        (text, ctx.pc())
    }

    #[test]
    fn categories_and_mask_bits() {
        assert_eq!(EaCategory::from_field(0x00), Some(EaCategory::DataDirect));
        assert_eq!(EaCategory::from_field(0x3c), Some(EaCategory::Immediate));
        assert_eq!(EaCategory::from_field(0x3d), None);
        assert!(ea_allowed(0x3d, 0));
        assert!(!ea_allowed(0x3d, 0xfff));
        assert!(!ea_allowed(0x08, 0xbf8));
        assert!(ea_allowed(0x39, 0xbf8));
        assert!(!ea_allowed(0x3c, 0xbf8));
        assert!(ea_allowed(0x3b, 0x27b));
    }

    #[test]
    fn register_modes_consume_nothing() {
        assert_eq!(render(&[], 0x03, Size::Word, CpuType::M68000), ("D3".into(), 0));
        assert_eq!(render(&[], 0x0b, Size::Word, CpuType::M68000), ("A3".into(), 0));
        assert_eq!(render(&[], 0x13, Size::Word, CpuType::M68000), ("(A3)".into(), 0));
        assert_eq!(render(&[], 0x1b, Size::Word, CpuType::M68000), ("(A3)+".into(), 0));
        assert_eq!(render(&[], 0x23, Size::Word, CpuType::M68000), ("-(A3)".into(), 0));
    }

    #[test]
    fn displacement_and_absolute() {
        assert_eq!(render(&[0xfff0], 0x2c, Size::Word, CpuType::M68000), ("(-$10,A4)".into(), 2));
        assert_eq!(render(&[0x1234], 0x38, Size::Word, CpuType::M68000), ("($1234).w".into(), 2));
        assert_eq!(
            render(&[0x1234, 0x5678], 0x39, Size::Word, CpuType::M68000),
            ("($12345678).l".into(), 4)
        );
        assert_eq!(render(&[0x0010], 0x3a, Size::Word, CpuType::M68000), ("($10,PC)".into(), 2));
    }

    #[test]
    fn immediates_by_size() {
        assert_eq!(render(&[0x00ff], 0x3c, Size::Byte, CpuType::M68000), ("#$ff".into(), 2));
        assert_eq!(render(&[0x1234], 0x3c, Size::Word, CpuType::M68000), ("#$1234".into(), 2));
        assert_eq!(
            render(&[0x1234, 0x5678], 0x3c, Size::Long, CpuType::M68000),
            ("#$12345678".into(), 4)
        );
    }

    #[test]
    fn brief_index() {
        // D2.w*4, disp 4
        assert_eq!(
            render(&[0x2404], 0x33, Size::Word, CpuType::M68020),
            ("($4,A3,D2.w*4)".into(), 2)
        );
        assert_eq!(render(&[0x0004], 0x3b, Size::Word, CpuType::M68000), ("($4,PC,D0.w)".into(), 2));
        assert_eq!(render(&[0x8800], 0x30, Size::Word, CpuType::M68000), ("($0,A0,A0.l)".into(), 2));
    }

    #[test]
    fn scaled_index_rejected_before_68020() {
        assert_eq!(
            render(&[0x2404], 0x33, Size::Word, CpuType::M68010),
            ("<invalid mode>".into(), 2)
        );
    }

    #[test]
    fn full_format_falls_back_to_brief_before_68020() {
        // Full bit set, no scale: rendered as brief on a 68000
        assert_eq!(render(&[0x0170], 0x30, Size::Word, CpuType::M68000), ("($70,A0,D0.w)".into(), 2));
    }

    #[test]
    fn full_format_base_displacement() {
        // (bd.l,A1,D0.w*2): BD long, no memory indirection
        assert_eq!(
            render(&[0x0330, 0x0001, 0x0000], 0x31, Size::Word, CpuType::M68020),
            ("($10000,A1,D0.w*2)".into(), 6)
        );
    }

    #[test]
    fn full_format_memory_indirect() {
        // ([$10,A0],D1.l*4,$20): post-indexed, word bd and od
        assert_eq!(
            render(&[0x1d26, 0x0010, 0x0020], 0x30, Size::Word, CpuType::M68020),
            ("([$10,A0],D1.l*4,$20)".into(), 6)
        );
        // ([$10,A0,D1.l*4],$20): pre-indexed
        assert_eq!(
            render(&[0x1d22, 0x0010, 0x0020], 0x30, Size::Word, CpuType::M68020),
            ("([$10,A0,D1.l*4],$20)".into(), 6)
        );
        // ([-$4,PC]): base PC, index suppressed, null od
        assert_eq!(
            render(&[0x0161, 0xfffc], 0x3b, Size::Word, CpuType::M68030),
            ("([-$4,PC])".into(), 4)
        );
    }

    #[test]
    fn full_format_reserved_and_zero() {
        // BD size 00 is reserved
        assert_eq!(render(&[0x0100], 0x30, Size::Word, CpuType::M68020), ("<invalid mode>".into(), 2));
        // I/IS = 100 is reserved
        assert_eq!(render(&[0x0114], 0x30, Size::Word, CpuType::M68020), ("<invalid mode>".into(), 2));
        // Base and index suppressed, null displacement
        assert_eq!(render(&[0x01d0], 0x30, Size::Word, CpuType::M68020), ("0".into(), 2));
    }

    #[test]
    fn undefined_mode_seven() {
        assert_eq!(render(&[], 0x3d, Size::Word, CpuType::M68000), ("INVALID 3d".into(), 0));
    }
}
