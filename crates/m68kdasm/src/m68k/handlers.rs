//! Text rendering for every instruction family.
//!
//! Each arm of [`InstructionKind::format`] reads the operand words its
//! family needs from the context, in encoding order, and returns the
//! Motorola-syntax line. Mnemonics are padded to a fixed column; the few
//! families whose traditional layout breaks that column format their text
//! directly.

use super::addressing::ea_mode_str;
use super::decode::{illegal_text, DisassemblerContext, StepFlag};
use super::hex::{imm_signed_16, imm_signed_32, imm_signed_8, imm_unsigned, signed_hex_16, signed_hex_8};
use super::instruction::{
    coprocessor_condition, BitfieldOp, CacheOp, Condition, CoprocessorOp, ExtendOp,
    InstructionKind, Move16Form, MovemForm, Size,
};
use super::opcodes::move_destination;
use super::stream::InstructionStream;

use InstructionKind as K;

/// Shift and quick-arithmetic counts; a zero field means eight.
const QUICK_DATA: [u16; 8] = [8, 1, 2, 3, 4, 5, 6, 7];

/// Join a mnemonic and its operands, padding the mnemonic to eight
/// columns. Longer mnemonics get a single separating space.
fn op(mnemonic: &str, operands: &str) -> String {
    if operands.is_empty() {
        mnemonic.to_string()
    } else if mnemonic.len() < 8 {
        format!("{mnemonic:<8}{operands}")
    } else {
        format!("{mnemonic} {operands}")
    }
}

fn reg_x(ir: u16) -> u16 {
    (ir >> 9) & 7
}

fn reg_y(ir: u16) -> u16 {
    ir & 7
}

/// `D3` or `A3` from a register-select bit and number.
fn general_register(address: bool, number: u16) -> String {
    format!("{}{number}", if address { 'A' } else { 'D' })
}

fn ea<S: InstructionStream + ?Sized>(ctx: &mut DisassemblerContext<'_, S>, size: Size) -> String {
    let ir = ctx.ir();
    ea_mode_str(ctx, ir, size)
}

fn read_immediate<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    size: Size,
    signed: bool,
) -> String {
    match (size, signed) {
        (Size::Byte, true) => imm_signed_8(ctx.read_imm_8()),
        (Size::Word, true) => imm_signed_16(ctx.read_imm_16()),
        (Size::Long, true) => imm_signed_32(ctx.read_imm_32()),
        (Size::Byte, false) => imm_unsigned(ctx.read_imm_8() as u32),
        (Size::Word, false) => imm_unsigned(ctx.read_imm_16() as u32),
        (Size::Long, false) => imm_unsigned(ctx.read_imm_32()),
    }
}

fn condition(ir: u16) -> &'static str {
    Condition::from_bits(ir >> 8).suffix()
}

/// MOVEM register mask as `D0-D3/A0/A5-A7`. Predecrement masks are stored
/// bit-reversed (bit 15 is D0).
fn register_list(mask: u16, reversed: bool) -> String {
    let bit = |index: u16| if reversed { 15 - index } else { index };
    let set = |index: u16| mask & (1 << bit(index)) != 0;

    let mut parts = Vec::new();
    for (prefix, offset) in [('D', 0), ('A', 8)] {
        let mut i = 0;
        while i < 8 {
            if set(offset + i) {
                let first = i;
                while i < 7 && set(offset + i + 1) {
                    i += 1;
                }
                if i > first {
                    parts.push(format!("{prefix}{first}-{prefix}{i}"));
                } else {
                    parts.push(format!("{prefix}{first}"));
                }
            }
            i += 1;
        }
    }
    parts.join("/")
}

/// Names and CPU tags of MOVEC control registers.
fn control_register(code: u16) -> (String, &'static str) {
    let (name, cpus) = match code {
        0x000 => ("SFC", "1+"),
        0x001 => ("DFC", "1+"),
        0x800 => ("USP", "1+"),
        0x801 => ("VBR", "1+"),
        0x002 => ("CACR", "2+"),
        0x802 => ("CAAR", "2,3"),
        0x803 => ("MSP", "2+"),
        0x804 => ("ISP", "2+"),
        0x003 => ("TC", "4+"),
        0x004 => ("ITT0", "4+"),
        0x005 => ("ITT1", "4+"),
        0x006 => ("DTT0", "4+"),
        0x007 => ("DTT1", "4+"),
        0x805 => ("MMUSR", "4+"),
        0x806 => ("URP", "4+"),
        0x807 => ("SRP", "4+"),
        _ => return (signed_hex_16(code), "?"),
    };
    (name.to_string(), cpus)
}

/// Bit field `{offset:width}` from a bit field extension word. A zero
/// immediate width means 32.
fn bitfield_spec(ext: u16) -> String {
    let offset = if ext & 0x0800 != 0 {
        format!("D{}", (ext >> 6) & 7)
    } else {
        ((ext >> 6) & 31).to_string()
    };
    let width = if ext & 0x0020 != 0 {
        format!("D{}", ext & 7)
    } else {
        match ext & 31 {
            0 => "32".to_string(),
            w => w.to_string(),
        }
    };
    format!("{{{offset}:{width}}}")
}

impl InstructionKind {
    /// Render the instruction whose opcode word is already in `ctx`,
    /// consuming its operand words.
    pub fn format<S: InstructionStream + ?Sized>(self, ctx: &mut DisassemblerContext<'_, S>) -> String {
        let ir = ctx.ir();
        match self {
            K::Illegal => illegal_text(ir),
            K::Line1010 => op("dc.w", &format!("${ir:04x}; opcode 1010")),
            K::Line1111 => op("dc.w", &format!("${ir:04x}; opcode 1111")),

            K::AluEr(alu, size) => {
                let src = ea(ctx, size);
                op(&format!("{}{}", alu.name(), size.suffix()), &format!("{src}, D{}", reg_x(ir)))
            }
            K::AluRe(alu, size) => {
                let dst = ea(ctx, size);
                op(&format!("{}{}", alu.name(), size.suffix()), &format!("D{}, {dst}", reg_x(ir)))
            }
            K::AluAddr(alu, size) => {
                let src = ea(ctx, size);
                op(&format!("{}a{}", alu.name(), size.suffix()), &format!("{src}, A{}", reg_x(ir)))
            }
            K::Immediate(alu, size) => {
                let imm = read_immediate(ctx, size, alu.signed_immediate());
                let dst = ea(ctx, size);
                op(&format!("{}i{}", alu.name(), size.suffix()), &format!("{imm}, {dst}"))
            }
            K::ImmediatePc(size) => {
                let imm = read_immediate(ctx, size, true);
                let dst = ea(ctx, size);
                op(&format!("cmpi{}", size.suffix()), &format!("{imm}, {dst}; (2+)"))
            }
            K::ImmToCcr(alu) => {
                let imm = read_immediate(ctx, Size::Byte, false);
                op(&format!("{}i", alu.name()), &format!("{imm}, CCR"))
            }
            K::ImmToSr(alu) => {
                let imm = read_immediate(ctx, Size::Word, false);
                op(&format!("{}i", alu.name()), &format!("{imm}, SR"))
            }
            K::Addq(size) | K::Subq(size) => {
                let name = if matches!(self, K::Addq(_)) { "addq" } else { "subq" };
                let dst = ea(ctx, size);
                op(
                    &format!("{name}{}", size.suffix()),
                    &format!("#{}, {dst}", QUICK_DATA[reg_x(ir) as usize]),
                )
            }
            K::ExtendRr(ext_op, size) => op(
                &extend_mnemonic(ext_op, size),
                &format!("D{}, D{}", reg_y(ir), reg_x(ir)),
            ),
            K::ExtendMm(ext_op, size) => op(
                &extend_mnemonic(ext_op, size),
                &format!("-(A{}), -(A{})", reg_y(ir), reg_x(ir)),
            ),
            K::Cmpm(size) => op(
                &format!("cmpm{}", size.suffix()),
                &format!("(A{})+, (A{})+", reg_y(ir), reg_x(ir)),
            ),
            K::Unary(unary, size) => {
                let dst = ea(ctx, size);
                op(&format!("{}{}", unary.name(), size.suffix()), &dst)
            }
            K::TstExtended(size) => {
                let dst = ea(ctx, size);
                op(&format!("tst{}", size.suffix()), &format!("{dst}; (2+)"))
            }
            K::Nbcd => {
                let dst = ea(ctx, Size::Byte);
                op("nbcd", &dst)
            }
            K::Tas => {
                let dst = ea(ctx, Size::Byte);
                op("tas", &dst)
            }
            K::Ext(size) => op(&format!("ext{}", size.suffix()), &format!("D{}", reg_y(ir))),
            K::Extb => op("extb.l", &format!("D{}; (2+)", reg_y(ir))),
            K::Swap => op("swap", &format!("D{}", reg_y(ir))),
            K::ExgDd => op("exg", &format!("D{}, D{}", reg_x(ir), reg_y(ir))),
            K::ExgAa => op("exg", &format!("A{}, A{}", reg_x(ir), reg_y(ir))),
            K::ExgDa => op("exg", &format!("D{}, A{}", reg_x(ir), reg_y(ir))),
            K::MulDiv(muldiv) => {
                let src = ea(ctx, Size::Word);
                op(&format!("{}.w", muldiv.name()), &format!("{src}, D{}", reg_x(ir)))
            }
            K::Divl => format_divl(ctx),
            K::Mull => format_mull(ctx),
            K::Pack { memory } | K::Unpk { memory } => {
                let name = if matches!(self, K::Pack { .. }) { "pack" } else { "unpk" };
                let adjust = read_immediate(ctx, Size::Word, false);
                let regs = if memory {
                    format!("-(A{}), -(A{})", reg_y(ir), reg_x(ir))
                } else {
                    format!("D{}, D{}", reg_y(ir), reg_x(ir))
                };
                op(name, &format!("{regs}, {adjust}; (2+)"))
            }

            K::ShiftImm(shift, size) => op(
                &format!("{}{}", shift.name(), size.suffix()),
                &format!("#{}, D{}", QUICK_DATA[reg_x(ir) as usize], reg_y(ir)),
            ),
            K::ShiftReg(shift, size) => op(
                &format!("{}{}", shift.name(), size.suffix()),
                &format!("D{}, D{}", reg_x(ir), reg_y(ir)),
            ),
            K::ShiftMem(shift) => {
                let dst = ea(ctx, Size::Word);
                op(&format!("{}.w", shift.name()), &dst)
            }
            K::BitReg(bit) => {
                let dst = ea(ctx, Size::Byte);
                op(bit.name(), &format!("D{}, {dst}", reg_x(ir)))
            }
            K::BitImm(bit) => {
                let number = read_immediate(ctx, Size::Byte, false);
                let dst = ea(ctx, Size::Byte);
                op(bit.name(), &format!("{number}, {dst}"))
            }
            K::Bitfield(field) => format_bitfield(ctx, field),

            K::Bcc(size) | K::Bra(size) | K::Bsr(size) => format_branch(ctx, self, size),
            K::Dbra => {
                let target = ctx.pc().wrapping_add(ctx.read_imm_16() as i16 as u32);
                op("dbra", &format!("D{}, {target:x}", reg_y(ir)))
            }
            K::Dbcc => {
                let target = ctx.pc().wrapping_add(ctx.read_imm_16() as i16 as u32);
                op(&format!("db{}", condition(ir)), &format!("D{}, {target:x}", reg_y(ir)))
            }
            K::Scc => {
                let dst = ea(ctx, Size::Byte);
                op(&format!("s{}", condition(ir)), &dst)
            }
            K::Trapcc(None) => format!("trap{:<2}; (2+)", condition(ir)),
            K::Trapcc(Some(size)) => {
                let operand = read_immediate(ctx, size, false);
                op(&format!("trap{}", condition(ir)), &format!("{operand}; (2+)"))
            }
            K::Jmp => {
                let dst = ea(ctx, Size::Long);
                op("jmp", &dst)
            }
            K::Jsr => {
                let dst = ea(ctx, Size::Long);
                op("jsr", &dst)
            }
            K::Rts => "rts".to_string(),
            K::Rte => "rte".to_string(),
            K::Rtr => "rtr".to_string(),
            K::Rtd => {
                let displacement = read_immediate(ctx, Size::Word, true);
                op("rtd", &format!("{displacement}; (1+)"))
            }
            K::Rtm => op("rtm", &format!("{}; (2+)", general_register(ir & 0x8 != 0, reg_y(ir)))),
            K::Callm => {
                let argc = read_immediate(ctx, Size::Byte, false);
                let dst = ea(ctx, Size::Byte);
                op("callm", &format!("{argc}, {dst}; (2)"))
            }
            K::Trap => op("trap", &format!("#${:x}", ir & 0xf)),
            K::Trapv => "trapv".to_string(),
            K::Chk(size) => {
                let bound = ea(ctx, size);
                let tag = if size == Size::Long { "; (2+)" } else { "" };
                op(&format!("chk{}", size.suffix()), &format!("{bound}, D{}{tag}", reg_x(ir)))
            }
            K::Chk2Cmp2(size) => {
                let ext = ctx.read_imm_16();
                let bounds = ea(ctx, size);
                let name = if ext & 0x0800 != 0 { "chk2" } else { "cmp2" };
                let reg = general_register(ext & 0x8000 != 0, (ext >> 12) & 7);
                op(&format!("{name}{}", size.suffix()), &format!("{bounds}, {reg}; (2+)"))
            }
            K::Bkpt => format!("bkpt #{}; (1+)", reg_y(ir)),
            K::Stop => {
                let sr = read_immediate(ctx, Size::Word, true);
                op("stop", &sr)
            }
            K::Reset => "reset".to_string(),
            K::Nop => "nop".to_string(),

            K::Move(size) => {
                let src = ea(ctx, size);
                let dst = ea_mode_str(ctx, move_destination(ir), size);
                op(&format!("move{}", size.suffix()), &format!("{src}, {dst}"))
            }
            K::Movea(size) => {
                let src = ea(ctx, size);
                op(&format!("movea{}", size.suffix()), &format!("{src}, A{}", reg_x(ir)))
            }
            K::Moveq => op("moveq", &format!("#{}, D{}", signed_hex_8(ir as u8), reg_x(ir))),
            K::MoveToCcr => {
                let src = ea(ctx, Size::Byte);
                op("move", &format!("{src}, CCR"))
            }
            K::MoveFromCcr => {
                let dst = ea(ctx, Size::Byte);
                op("move", &format!("CCR, {dst}; (1+)"))
            }
            K::MoveToSr => {
                let src = ea(ctx, Size::Word);
                op("move", &format!("{src}, SR"))
            }
            K::MoveFromSr => {
                let dst = ea(ctx, Size::Word);
                op("move", &format!("SR, {dst}"))
            }
            K::MoveToUsp => op("move", &format!("A{}, USP", reg_y(ir))),
            K::MoveFromUsp => op("move", &format!("USP, A{}", reg_y(ir))),
            K::Movec => {
                let ext = ctx.read_imm_16();
                let (control, cpus) = control_register(ext & 0xfff);
                let reg = general_register(ext & 0x8000 != 0, (ext >> 12) & 7);
                if ir & 1 != 0 {
                    op("movec", &format!("{reg}, {control}; ({cpus})"))
                } else {
                    op("movec", &format!("{control}, {reg}; ({cpus})"))
                }
            }
            K::Movem(form, size) => {
                let mask = ctx.read_imm_16();
                let mem = ea(ctx, size);
                let mnemonic = format!("movem{}", size.suffix());
                match form {
                    MovemForm::Predecrement => op(&mnemonic, &format!("{}, {mem}", register_list(mask, true))),
                    MovemForm::RegToMem => op(&mnemonic, &format!("{}, {mem}", register_list(mask, false))),
                    MovemForm::MemToReg => op(&mnemonic, &format!("{mem}, {}", register_list(mask, false))),
                }
            }
            K::MovepEr(size) => {
                let displacement = ctx.read_imm_16();
                op(
                    &format!("movep{}", size.suffix()),
                    &format!("(${displacement:x},A{}), D{}", reg_y(ir), reg_x(ir)),
                )
            }
            K::MovepRe(size) => {
                let displacement = ctx.read_imm_16();
                op(
                    &format!("movep{}", size.suffix()),
                    &format!("D{}, (${displacement:x},A{})", reg_x(ir), reg_y(ir)),
                )
            }
            K::Moves(size) => {
                let ext = ctx.read_imm_16();
                let mem = ea(ctx, size);
                let reg = general_register(ext & 0x8000 != 0, (ext >> 12) & 7);
                let operands = if ext & 0x0800 != 0 {
                    format!("{reg}, {mem}; (1+)")
                } else {
                    format!("{mem}, {reg}; (1+)")
                };
                op(&format!("moves{}", size.suffix()), &operands)
            }
            K::Move16(form) => format_move16(ctx, form),
            K::Lea => {
                let src = ea(ctx, Size::Long);
                op("lea", &format!("{src}, A{}", reg_x(ir)))
            }
            K::Pea => {
                let src = ea(ctx, Size::Long);
                op("pea", &src)
            }
            K::Link(size) => {
                let displacement = read_immediate(ctx, size, true);
                let tag = if size == Size::Long { "; (2+)" } else { "" };
                op("link", &format!("A{}, {displacement}{tag}", reg_y(ir)))
            }
            K::Unlk => op("unlk", &format!("A{}", reg_y(ir))),
            K::Cas(size) => {
                let ext = ctx.read_imm_16();
                let dst = ea(ctx, size);
                op(
                    &format!("cas{}", size.suffix()),
                    &format!("D{}, D{}, {dst}; (2+)", ext & 7, (ext >> 8) & 7),
                )
            }
            K::Cas2(size) => {
                let ext = ctx.read_imm_32();
                let field = |shift: u32| (ext >> shift) & 7;
                op(
                    &format!("cas2{}", size.suffix()),
                    &format!(
                        "D{}:D{}:D{}:D{}, ({}{}):({}{}); (2+)",
                        field(16),
                        field(0),
                        field(22),
                        field(6),
                        if ext & 0x8000_0000 != 0 { 'A' } else { 'D' },
                        field(28),
                        if ext & 0x0000_8000 != 0 { 'A' } else { 'D' },
                        field(12),
                    ),
                )
            }

            K::Coprocessor(cp) => format_coprocessor(ctx, cp),
            K::Cache(cache) => format_cache(ir, cache),
        }
    }

    /// Debugger stepping hint for this family.
    pub fn step_flag(self) -> StepFlag {
        match self {
            K::Bsr(_) | K::Jsr | K::Dbra | K::Dbcc | K::Chk(_) | K::Trapcc(_) | K::Trapv => {
                StepFlag::StepOver
            }
            K::Rts | K::Rte | K::Rtr | K::Rtd | K::Rtm => StepFlag::StepOut,
            _ => StepFlag::None,
        }
    }
}

/// BCD operations carry no size suffix.
fn extend_mnemonic(ext_op: ExtendOp, size: Size) -> String {
    match ext_op {
        ExtendOp::Abcd | ExtendOp::Sbcd => ext_op.name().to_string(),
        ExtendOp::Addx | ExtendOp::Subx => format!("{}{}", ext_op.name(), size.suffix()),
    }
}

fn format_branch<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    kind: InstructionKind,
    size: Size,
) -> String {
    let ir = ctx.ir();
    // Displacements are relative to the word after the opcode.
    let base = ctx.pc();
    let (target, tag) = match size {
        Size::Byte => (base.wrapping_add(ir as u8 as i8 as u32), ""),
        Size::Word => (base.wrapping_add(ctx.read_imm_16() as i16 as u32), ""),
        Size::Long => (base.wrapping_add(ctx.read_imm_32()), "; (2+)"),
    };
    let mnemonic = match kind {
        K::Bra(_) => "bra".to_string(),
        K::Bsr(_) => "bsr".to_string(),
        _ => format!("b{}", condition(ir)),
    };
    op(&mnemonic, &format!("{target:x}{tag}"))
}

fn format_bitfield<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    field: BitfieldOp,
) -> String {
    let ext = ctx.read_imm_16();
    let dst = ea(ctx, Size::Byte);
    let spec = bitfield_spec(ext);
    if field.has_register() {
        op(field.name(), &format!("D{}, {dst} {spec}; (2+)", (ext >> 12) & 7))
    } else {
        op(field.name(), &format!("{dst} {spec}; (2+)"))
    }
}

fn format_divl<S: InstructionStream + ?Sized>(ctx: &mut DisassemblerContext<'_, S>) -> String {
    let ext = ctx.read_imm_16();
    let src = ea(ctx, Size::Long);
    let sign = if ext & 0x0800 != 0 { 's' } else { 'u' };
    let (dr, dq) = (ext & 7, (ext >> 12) & 7);
    if ext & 0x0400 != 0 {
        op(&format!("div{sign}.l"), &format!("{src}, D{dr}-D{dq}; (2+)"))
    } else if dr == dq {
        op(&format!("div{sign}.l"), &format!("{src}, D{dq}; (2+)"))
    } else {
        op(&format!("div{sign}l.l"), &format!("{src}, D{dr}:D{dq}; (2+)"))
    }
}

fn format_mull<S: InstructionStream + ?Sized>(ctx: &mut DisassemblerContext<'_, S>) -> String {
    let ext = ctx.read_imm_16();
    let src = ea(ctx, Size::Long);
    let sign = if ext & 0x0800 != 0 { 's' } else { 'u' };
    if ext & 0x0400 != 0 {
        format!("mul{sign}.l {src}, D{}-D{}; (2+)", ext & 7, (ext >> 12) & 7)
    } else {
        op(&format!("mul{sign}.l"), &format!("{src}, D{}; (2+)", (ext >> 12) & 7))
    }
}

fn format_move16<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    form: Move16Form,
) -> String {
    let ay = reg_y(ctx.ir());
    let operands = match form {
        Move16Form::PostIncBoth => {
            let ax = (ctx.read_imm_16() >> 12) & 7;
            format!("(A{ay})+, (A{ax})+")
        }
        Move16Form::PostIncToAbs => format!("(A{ay})+, {}", imm_unsigned(ctx.read_imm_32())),
        Move16Form::AbsToPostInc => format!("{}, (A{ay})+", imm_unsigned(ctx.read_imm_32())),
        Move16Form::IndirectToAbs => format!("(A{ay}), {}", imm_unsigned(ctx.read_imm_32())),
        Move16Form::AbsToIndirect => format!("{}, (A{ay})", imm_unsigned(ctx.read_imm_32())),
    };
    op("move16", &format!("{operands}; (4)"))
}

fn format_cache(ir: u16, cache: CacheOp) -> String {
    let name = match cache {
        CacheOp::Cinv => "cinv",
        CacheOp::Cpush => "cpush",
    };
    let caches = (ir >> 6) & 3;
    match (ir >> 3) & 3 {
        0 => format!("{name} (illegal scope); (4)"),
        1 => op(&format!("{name}l"), &format!("{caches}, (A{}); (4)", reg_y(ir))),
        2 => op(&format!("{name}p"), &format!("{caches}, (A{}); (4)", reg_y(ir))),
        _ => op(&format!("{name}a"), &format!("{caches}; (4)")),
    }
}

/// Coprocessor interface instructions. The coprocessor id is the register
/// field of the opcode; the condition predicate comes from the opcode for
/// cpBcc and from the first extension word otherwise.
fn format_coprocessor<S: InstructionStream + ?Sized>(
    ctx: &mut DisassemblerContext<'_, S>,
    cp: CoprocessorOp,
) -> String {
    let ir = ctx.ir();
    let id = reg_x(ir);
    let base = ctx.pc();
    match cp {
        CoprocessorOp::Bcc(size) => {
            let ext = ctx.read_imm_16();
            let target = match size {
                Size::Long => base.wrapping_add(ctx.peek_imm_32()),
                _ => base.wrapping_add(ctx.peek_imm_16() as i16 as u32),
            };
            let displacement = read_immediate(ctx, Size::Word, true);
            op(
                &format!("{id}b{:<4}", coprocessor_condition(ir)),
                &format!("{displacement}; {target:x} (extension = {ext:x}) (2-3)"),
            )
        }
        CoprocessorOp::Dbcc => {
            let ext1 = ctx.read_imm_16();
            let ext2 = ctx.read_imm_16();
            let target = base.wrapping_add(ctx.peek_imm_16() as i16 as u32);
            let displacement = read_immediate(ctx, Size::Word, true);
            format!(
                "{id}db{:<4} D{},{displacement}; {target:x} (extension = {ext2:x}) (2-3)",
                coprocessor_condition(ext1),
                reg_y(ir)
            )
        }
        CoprocessorOp::Gen => {
            let command = read_immediate(ctx, Size::Long, false);
            op(&format!("{id}gen"), &format!("{command}; (2-3)"))
        }
        CoprocessorOp::Restore => {
            let src = ea(ctx, Size::Byte);
            format!("{id}restore {src}; (2-3)")
        }
        CoprocessorOp::Save => {
            let dst = ea(ctx, Size::Byte);
            op(&format!("{id}save"), &format!("{dst}; (2-3)"))
        }
        CoprocessorOp::Scc => {
            let ext1 = ctx.read_imm_16();
            let ext2 = ctx.read_imm_16();
            let dst = ea(ctx, Size::Byte);
            format!(
                "{id}s{:<4}  {dst}; (extension = {ext2:x}) (2-3)",
                coprocessor_condition(ext1)
            )
        }
        CoprocessorOp::Trapcc(size) => {
            let ext1 = ctx.read_imm_16();
            let ext2 = ctx.read_imm_16();
            let predicate = coprocessor_condition(ext1);
            match size {
                None => format!("{id}trap{predicate:<4}; (extension = {ext2:x}) (2-3)"),
                Some(size) => {
                    let operand = read_immediate(ctx, size, false);
                    format!("{id}trap{predicate:<4} {operand}; (extension = {ext2:x}) (2-3)")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m68k::decode::disassemble;
    use crate::m68k::variants::CpuType;

    fn dasm(words: &[u16], cpu: CpuType) -> (String, u32) {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        let d = disassemble(&bytes, 0, cpu);
        (d.text, d.length)
    }

    fn text(words: &[u16]) -> String {
        dasm(words, CpuType::M68040).0
    }

    #[test]
    fn mnemonic_padding() {
        assert_eq!(op("nop", ""), "nop");
        assert_eq!(op("move.l", "D0, D1"), "move.l  D0, D1");
        assert_eq!(op("movea.w", "D0, A1"), "movea.w D0, A1");
        assert_eq!(op("1restore", "(A0)"), "1restore (A0)");
    }

    #[test]
    fn register_lists() {
        assert_eq!(register_list(0x0000, false), "");
        assert_eq!(register_list(0x000f, false), "D0-D3");
        assert_eq!(register_list(0x8101, false), "D0/A0/A7");
        assert_eq!(register_list(0xfffe, false), "D1-D7/A0-A7");
        // reversed: bit 15 is D0, bit 0 is A7
        assert_eq!(register_list(0xc001, true), "D0-D1/A7");
    }

    #[test]
    fn bitfield_offsets_and_widths() {
        assert_eq!(bitfield_spec(0x0000), "{0:32}");
        assert_eq!(bitfield_spec(0x0148), "{5:8}");
        assert_eq!(bitfield_spec(0x08a3), "{D2:D3}");
    }

    #[test]
    fn arithmetic_forms() {
        assert_eq!(text(&[0xd041]), "add.w   D1, D0");
        assert_eq!(text(&[0xd390]), "add.l   D1, (A0)");
        assert_eq!(text(&[0xd1c8]), "adda.l  A0, A0");
        assert_eq!(text(&[0x0641, 0xfffe]), "addi.w  #-$2, D1");
        assert_eq!(text(&[0x0241, 0xfffe]), "andi.w  #$fffe, D1");
        assert_eq!(text(&[0x5e48]), "addq.w  #7, A0");
        assert_eq!(text(&[0x5148]), "subq.w  #8, A0");
        assert_eq!(text(&[0xc300]), "abcd    D0, D1");
        assert_eq!(text(&[0xd389]), "addx.l  -(A1), -(A1)");
        assert_eq!(text(&[0xb308]), "cmpm.b  (A0)+, (A1)+");
        assert_eq!(text(&[0x023c, 0x00fe]), "andi    #$fe, CCR");
        assert_eq!(text(&[0x007c, 0x0700]), "ori     #$700, SR");
    }

    #[test]
    fn shifts_and_bits() {
        assert_eq!(text(&[0xe148]), "lsl.w   #8, D0");
        assert_eq!(text(&[0xe2a8]), "lsr.l   D1, D0");
        assert_eq!(text(&[0xe7d0]), "rol.w   (A0)");
        assert_eq!(text(&[0x0800, 0x0003]), "btst    #$3, D0");
        assert_eq!(text(&[0x03c0]), "bset    D1, D0");
    }

    #[test]
    fn branches() {
        assert_eq!(dasm(&[0x6000, 0x0010], CpuType::M68000), ("bra     12".into(), 4));
        assert_eq!(text(&[0x66fe]), "bne     0");
        assert_eq!(text(&[0x6100, 0xfffe]), "bsr     0");
        assert_eq!(dasm(&[0x67ff, 0x0000, 0x0010], CpuType::M68020), ("beq     12; (2+)".into(), 6));
        assert_eq!(dasm(&[0x61ff, 0x0000, 0x0010], CpuType::M68020), ("bsr     12; (2+)".into(), 6));
        assert_eq!(text(&[0x51c8, 0xfffc]), "dbra    D0, fffffffe");
        assert_eq!(text(&[0x56c9, 0x0004]), "dbne    D1, 6");
        assert_eq!(text(&[0x57c0]), "seq     D0");
    }

    #[test]
    fn trapcc_forms() {
        assert_eq!(dasm(&[0x50fc], CpuType::M68020), ("trapt ; (2+)".into(), 2));
        assert_eq!(dasm(&[0x57fa, 0x1234], CpuType::M68020), ("trapeq  #$1234; (2+)".into(), 4));
        assert_eq!(text(&[0x4e41]), "trap    #$1");
    }

    #[test]
    fn data_movement() {
        assert_eq!(text(&[0x2200]), "move.l  D0, D1");
        assert_eq!(text(&[0x33fc, 0x1234, 0x0000, 0x4000]), "move.w  #$1234, ($4000).l");
        assert_eq!(text(&[0x2040]), "movea.l D0, A0");
        assert_eq!(text(&[0x44fc, 0x0012]), "move    #$12, CCR");
        assert_eq!(text(&[0x40c0]), "move    SR, D0");
        assert_eq!(text(&[0x42c0]), "move    CCR, D0; (1+)");
        assert_eq!(text(&[0x4e60]), "move    A0, USP");
        assert_eq!(text(&[0x4e6f]), "move    USP, A7");
        assert_eq!(text(&[0x48e7, 0xfffe]), "movem.l D0-D7/A0-A6, -(A7)");
        assert_eq!(text(&[0x4cdf, 0x7fff]), "movem.l (A7)+, D0-D7/A0-A6");
        assert_eq!(text(&[0x0188, 0x0010]), "movep.w D0, ($10,A0)");
        assert_eq!(text(&[0x0149, 0x0020]), "movep.l ($20,A1), D0");
        assert_eq!(text(&[0x41f9, 0x0000, 0x1000]), "lea     ($1000).l, A0");
        assert_eq!(text(&[0x4e56, 0xfff8]), "link    A6, #-$8");
        assert_eq!(text(&[0x4e5e]), "unlk    A6");
    }

    #[test]
    fn control_registers() {
        assert_eq!(dasm(&[0x4e7a, 0x0801], CpuType::M68010), ("movec   VBR, D0; (1+)".into(), 4));
        assert_eq!(dasm(&[0x4e7b, 0x9002], CpuType::M68020), ("movec   A1, CACR; (2+)".into(), 4));
        assert_eq!(text(&[0x4e7a, 0x0123]), "movec   $123, D0; (?)");
        assert_eq!(dasm(&[0x0e50, 0x8800], CpuType::M68010), ("moves.w A0, (A0); (1+)".into(), 4));
        assert_eq!(dasm(&[0x0e50, 0x1000], CpuType::M68010), ("moves.w (A0), D1; (1+)".into(), 4));
    }

    #[test]
    fn long_multiply_and_divide() {
        assert_eq!(dasm(&[0x4c00, 0x1800], CpuType::M68020).0, "muls.l  D0, D1; (2+)");
        assert_eq!(dasm(&[0x4c00, 0x1c02], CpuType::M68020).0, "muls.l D0, D2-D1; (2+)");
        assert_eq!(dasm(&[0x4c40, 0x1001], CpuType::M68020).0, "divu.l  D0, D1; (2+)");
        assert_eq!(dasm(&[0x4c40, 0x1801], CpuType::M68020).0, "divs.l  D0, D1; (2+)");
        assert_eq!(dasm(&[0x4c40, 0x1402], CpuType::M68020).0, "divu.l  D0, D2-D1; (2+)");
        assert_eq!(dasm(&[0x4c40, 0x1002], CpuType::M68020).0, "divul.l D0, D2:D1; (2+)");
        assert_eq!(text(&[0x81c1]), "divs.w  D1, D0");
    }

    #[test]
    fn m68020_extensions() {
        assert_eq!(dasm(&[0xe9c0, 0x2148], CpuType::M68020), ("bfextu  D2, D0 {5:8}; (2+)".into(), 4));
        assert_eq!(dasm(&[0xeac0, 0x0000], CpuType::M68020), ("bfchg   D0 {0:32}; (2+)".into(), 4));
        assert_eq!(dasm(&[0x0cd0, 0x0081], CpuType::M68020), ("cas.w   D1, D0, (A0); (2+)".into(), 4));
        assert_eq!(
            dasm(&[0x0cfc, 0x8042, 0x9083], CpuType::M68020),
            ("cas2.w  D2:D3:D1:D2, (A0):(A1); (2+)".into(), 6)
        );
        assert_eq!(dasm(&[0x02d0, 0x9800], CpuType::M68020), ("chk2.w  (A0), A1; (2+)".into(), 4));
        assert_eq!(dasm(&[0x02d0, 0x1000], CpuType::M68020), ("cmp2.w  (A0), D1; (2+)".into(), 4));
        assert_eq!(dasm(&[0x4101], CpuType::M68020), ("chk.l   D1, D0; (2+)".into(), 2));
        assert_eq!(dasm(&[0x49c3], CpuType::M68020), ("extb.l  D3; (2+)".into(), 2));
        assert_eq!(dasm(&[0x4808, 0x0001, 0x0000], CpuType::M68020), ("link    A0, #$10000; (2+)".into(), 6));
        assert_eq!(dasm(&[0x8141, 0x0030], CpuType::M68020), ("pack    D1, D0, #$30; (2+)".into(), 4));
        assert_eq!(dasm(&[0x8189, 0x0030], CpuType::M68020), ("unpk    -(A1), -(A0), #$30; (2+)".into(), 4));
        assert_eq!(dasm(&[0x06d0, 0x0002], CpuType::M68020), ("callm   #$2, (A0); (2)".into(), 4));
        assert_eq!(dasm(&[0x06c9], CpuType::M68020), ("rtm     A1; (2+)".into(), 2));
        assert_eq!(dasm(&[0x4a48], CpuType::M68020), ("tst.w   A0; (2+)".into(), 2));
        assert_eq!(dasm(&[0x0c3a, 0x0001, 0x0010], CpuType::M68020), ("cmpi.b  #$1, ($10,PC); (2+)".into(), 6));
    }

    #[test]
    fn coprocessor_forms() {
        assert_eq!(dasm(&[0xf200, 0x1234, 0x5678], CpuType::M68020), ("1gen    #$12345678; (2-3)".into(), 6));
        assert_eq!(dasm(&[0xf350], CpuType::M68020), ("1restore (A0); (2-3)".into(), 2));
        assert_eq!(dasm(&[0xf310], CpuType::M68020), ("1save   (A0); (2-3)".into(), 2));
        assert_eq!(
            dasm(&[0xf281, 0x0000, 0x0010], CpuType::M68020),
            ("1beq    #$10; 12 (extension = 0) (2-3)".into(), 6)
        );
        assert_eq!(
            dasm(&[0xf249, 0x0001, 0x0000, 0xfffa], CpuType::M68020),
            ("1dbeq   D1,#-$6; fffffffc (extension = 0) (2-3)".into(), 8)
        );
        assert_eq!(
            dasm(&[0xf240, 0x000f, 0x0000], CpuType::M68020),
            ("1st     D0; (extension = 0) (2-3)".into(), 6)
        );
        assert_eq!(
            dasm(&[0xf27c, 0x0001, 0x0000], CpuType::M68020),
            ("1trapeq  ; (extension = 0) (2-3)".into(), 6)
        );
        assert_eq!(
            dasm(&[0xf27a, 0x0001, 0x0000, 0x0042], CpuType::M68020),
            ("1trapeq   #$42; (extension = 0) (2-3)".into(), 8)
        );
    }

    #[test]
    fn m68040_forms() {
        assert_eq!(dasm(&[0xf620, 0x9000], CpuType::M68040), ("move16  (A0)+, (A1)+; (4)".into(), 4));
        assert_eq!(
            dasm(&[0xf600, 0x0000, 0x1000], CpuType::M68040),
            ("move16  (A0)+, #$1000; (4)".into(), 6)
        );
        assert_eq!(
            dasm(&[0xf618, 0x0000, 0x1000], CpuType::M68040),
            ("move16  #$1000, (A0); (4)".into(), 6)
        );
        assert_eq!(dasm(&[0xf4c8], CpuType::M68040).0, "cinvl   3, (A0); (4)");
        assert_eq!(dasm(&[0xf458], CpuType::M68040).0, "cinva   1; (4)");
        assert_eq!(dasm(&[0xf400], CpuType::M68040).0, "cinv (illegal scope); (4)");
        assert_eq!(dasm(&[0xf4f0], CpuType::M68040).0, "cpushp  3, (A0); (4)");
    }

    #[test]
    fn line_a_and_bkpt() {
        assert_eq!(text(&[0xa123]), "dc.w    $a123; opcode 1010");
        assert_eq!(dasm(&[0xf1c0], CpuType::M68000).0, "dc.w    $f1c0; opcode 1111");
        assert_eq!(dasm(&[0x484b], CpuType::M68010).0, "bkpt #3; (1+)");
        assert_eq!(text(&[0x4e72, 0x2700]), "stop    #$2700");
        assert_eq!(dasm(&[0x4e74, 0x0008], CpuType::M68010).0, "rtd     #$8; (1+)");
    }

    #[test]
    fn step_flags() {
        assert_eq!(K::Bsr(Size::Word).step_flag(), StepFlag::StepOver);
        assert_eq!(K::Trapcc(None).step_flag(), StepFlag::StepOver);
        assert_eq!(K::Chk(Size::Long).step_flag(), StepFlag::StepOver);
        assert_eq!(K::Rtm.step_flag(), StepFlag::StepOut);
        assert_eq!(K::Bra(Size::Word).step_flag(), StepFlag::None);
        assert_eq!(K::Jmp.step_flag(), StepFlag::None);
    }

    #[test]
    fn bcd_mnemonics_have_no_size() {
        assert_eq!(extend_mnemonic(ExtendOp::Sbcd, Size::Byte), "sbcd");
        assert_eq!(extend_mnemonic(ExtendOp::Subx, Size::Word), "subx.w");
        assert_eq!(text(&[0x8300]), "sbcd    D0, D1");
        assert_eq!(text(&[0x9f4e]), "subx.w  -(A6), -(A7)");
    }
}
