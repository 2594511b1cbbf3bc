//! Opcode pattern table and the 65536-entry dispatch table built from it.
//!
//! Each pattern is a `(mask, match, ea_mask)` triple. An opcode word
//! belongs to the first pattern, most specific mask first, for which
//! `opcode & mask == match` and whose EA mask admits the opcode's EA field.

use log::debug;

use super::addressing::ea_allowed;
use super::instruction::{
    AluOp, BitOp, BitfieldOp, CacheOp, CoprocessorOp, ExtendOp, InstructionKind, Move16Form,
    MovemForm, MulDivOp, ShiftOp, Size, UnaryOp,
};
use super::variants::CpuSet;

use CoprocessorOp as Cp;
use InstructionKind as K;
use Size::{Byte as B, Long as L, Word as W};

/// One instruction family's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodePattern {
    pub kind: InstructionKind,
    pub mask: u16,
    pub matches: u16,
    /// Permitted EA categories; zero disables the check.
    pub ea_mask: u16,
    /// CPU generations on which the family exists.
    pub cpus: CpuSet,
}

impl OpcodePattern {
    const fn new(kind: InstructionKind, mask: u16, matches: u16, ea_mask: u16) -> Self {
        OpcodePattern {
            kind,
            mask,
            matches,
            ea_mask,
            cpus: CpuSet::ALL,
        }
    }

    const fn on(self, cpus: CpuSet) -> Self {
        OpcodePattern { cpus, ..self }
    }

    /// Whether `opcode` is encoded by this pattern.
    pub fn accepts(&self, opcode: u16) -> bool {
        if opcode & self.mask != self.matches {
            return false;
        }
        if matches!(self.kind, K::Move(_)) && !ea_allowed(move_destination(opcode), 0xbf8) {
            return false;
        }
        ea_allowed(opcode, self.ea_mask)
    }

    pub fn is_illegal(&self) -> bool {
        self.kind == K::Illegal
    }
}

/// MOVE keeps its destination EA in bits 6-11 with register and mode
/// swapped; rearrange it into the usual mode:register layout.
pub fn move_destination(opcode: u16) -> u16 {
    ((opcode >> 9) & 7) | ((opcode >> 3) & 0x38)
}

const ILLEGAL_PATTERN: OpcodePattern = OpcodePattern::new(K::Illegal, 0xffff, 0x4afc, 0x000);

/// Pattern assigned to every opcode no other pattern accepts.
pub static ILLEGAL: OpcodePattern = ILLEGAL_PATTERN;

const M010: CpuSet = CpuSet::M68010_PLUS;
const M020: CpuSet = CpuSet::M68020_PLUS;
const M020_ONLY: CpuSet = CpuSet::M68020_ONLY;
const M040: CpuSet = CpuSet::M68040_PLUS;

#[rustfmt::skip]
pub static OPCODE_PATTERNS: &[OpcodePattern] = &[
    OpcodePattern::new(K::Line1010,                          0xf000, 0xa000, 0x000),
    OpcodePattern::new(K::Line1111,                          0xf000, 0xf000, 0x000),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Abcd, B),       0xf1f8, 0xc100, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Abcd, B),       0xf1f8, 0xc108, 0x000),
    OpcodePattern::new(K::AluEr(AluOp::Add, B),              0xf1c0, 0xd000, 0xbff),
    OpcodePattern::new(K::AluEr(AluOp::Add, W),              0xf1c0, 0xd040, 0xfff),
    OpcodePattern::new(K::AluEr(AluOp::Add, L),              0xf1c0, 0xd080, 0xfff),
    OpcodePattern::new(K::AluRe(AluOp::Add, B),              0xf1c0, 0xd100, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::Add, W),              0xf1c0, 0xd140, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::Add, L),              0xf1c0, 0xd180, 0x3f8),
    OpcodePattern::new(K::AluAddr(AluOp::Add, W),            0xf1c0, 0xd0c0, 0xfff),
    OpcodePattern::new(K::AluAddr(AluOp::Add, L),            0xf1c0, 0xd1c0, 0xfff),
    OpcodePattern::new(K::Immediate(AluOp::Add, B),          0xffc0, 0x0600, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Add, W),          0xffc0, 0x0640, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Add, L),          0xffc0, 0x0680, 0xbf8),
    OpcodePattern::new(K::Addq(B),                           0xf1c0, 0x5000, 0xbf8),
    OpcodePattern::new(K::Addq(W),                           0xf1c0, 0x5040, 0xff8),
    OpcodePattern::new(K::Addq(L),                           0xf1c0, 0x5080, 0xff8),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Addx, B),       0xf1f8, 0xd100, 0x000),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Addx, W),       0xf1f8, 0xd140, 0x000),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Addx, L),       0xf1f8, 0xd180, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Addx, B),       0xf1f8, 0xd108, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Addx, W),       0xf1f8, 0xd148, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Addx, L),       0xf1f8, 0xd188, 0x000),
    OpcodePattern::new(K::AluEr(AluOp::And, B),              0xf1c0, 0xc000, 0xbff),
    OpcodePattern::new(K::AluEr(AluOp::And, W),              0xf1c0, 0xc040, 0xbff),
    OpcodePattern::new(K::AluEr(AluOp::And, L),              0xf1c0, 0xc080, 0xbff),
    OpcodePattern::new(K::AluRe(AluOp::And, B),              0xf1c0, 0xc100, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::And, W),              0xf1c0, 0xc140, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::And, L),              0xf1c0, 0xc180, 0x3f8),
    OpcodePattern::new(K::ImmToCcr(AluOp::And),              0xffff, 0x023c, 0x000),
    OpcodePattern::new(K::ImmToSr(AluOp::And),               0xffff, 0x027c, 0x000),
    OpcodePattern::new(K::Immediate(AluOp::And, B),          0xffc0, 0x0200, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::And, W),          0xffc0, 0x0240, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::And, L),          0xffc0, 0x0280, 0xbf8),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Asr, B),         0xf1f8, 0xe000, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Asr, W),         0xf1f8, 0xe040, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Asr, L),         0xf1f8, 0xe080, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Asr, B),         0xf1f8, 0xe020, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Asr, W),         0xf1f8, 0xe060, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Asr, L),         0xf1f8, 0xe0a0, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Asr),            0xffc0, 0xe0c0, 0x3f8),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Asl, B),         0xf1f8, 0xe100, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Asl, W),         0xf1f8, 0xe140, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Asl, L),         0xf1f8, 0xe180, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Asl, B),         0xf1f8, 0xe120, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Asl, W),         0xf1f8, 0xe160, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Asl, L),         0xf1f8, 0xe1a0, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Asl),            0xffc0, 0xe1c0, 0x3f8),
    OpcodePattern::new(K::Bcc(B),                            0xf000, 0x6000, 0x000),
    OpcodePattern::new(K::Bcc(W),                            0xf0ff, 0x6000, 0x000),
    OpcodePattern::new(K::Bcc(L),                            0xf0ff, 0x60ff, 0x000).on(M020),
    OpcodePattern::new(K::BitReg(BitOp::Bchg),               0xf1c0, 0x0140, 0xbf8),
    OpcodePattern::new(K::BitImm(BitOp::Bchg),               0xffc0, 0x0840, 0xbf8),
    OpcodePattern::new(K::BitReg(BitOp::Bclr),               0xf1c0, 0x0180, 0xbf8),
    OpcodePattern::new(K::BitImm(BitOp::Bclr),               0xffc0, 0x0880, 0xbf8),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bfchg),       0xffc0, 0xeac0, 0xa78).on(M020),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bfclr),       0xffc0, 0xecc0, 0xa78).on(M020),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bfexts),      0xffc0, 0xebc0, 0xa7b).on(M020),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bfextu),      0xffc0, 0xe9c0, 0xa7b).on(M020),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bfffo),       0xffc0, 0xedc0, 0xa7b).on(M020),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bfins),       0xffc0, 0xefc0, 0xa78).on(M020),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bfset),       0xffc0, 0xeec0, 0xa78).on(M020),
    OpcodePattern::new(K::Bitfield(BitfieldOp::Bftst),       0xffc0, 0xe8c0, 0xa7b).on(M020),
    OpcodePattern::new(K::Bkpt,                              0xfff8, 0x4848, 0x000).on(M010),
    OpcodePattern::new(K::Bra(B),                            0xff00, 0x6000, 0x000),
    OpcodePattern::new(K::Bra(W),                            0xffff, 0x6000, 0x000),
    OpcodePattern::new(K::Bra(L),                            0xffff, 0x60ff, 0x000).on(M020),
    OpcodePattern::new(K::BitReg(BitOp::Bset),               0xf1c0, 0x01c0, 0xbf8),
    OpcodePattern::new(K::BitImm(BitOp::Bset),               0xffc0, 0x08c0, 0xbf8),
    OpcodePattern::new(K::Bsr(B),                            0xff00, 0x6100, 0x000),
    OpcodePattern::new(K::Bsr(W),                            0xffff, 0x6100, 0x000),
    OpcodePattern::new(K::Bsr(L),                            0xffff, 0x61ff, 0x000).on(M020),
    OpcodePattern::new(K::BitReg(BitOp::Btst),               0xf1c0, 0x0100, 0xbff),
    OpcodePattern::new(K::BitImm(BitOp::Btst),               0xffc0, 0x0800, 0xbfb),
    OpcodePattern::new(K::Callm,                             0xffc0, 0x06c0, 0x27b).on(M020_ONLY),
    OpcodePattern::new(K::Cas(B),                            0xffc0, 0x0ac0, 0x3f8).on(M020),
    OpcodePattern::new(K::Cas(W),                            0xffc0, 0x0cc0, 0x3f8).on(M020),
    OpcodePattern::new(K::Cas(L),                            0xffc0, 0x0ec0, 0x3f8).on(M020),
    OpcodePattern::new(K::Cas2(W),                           0xffff, 0x0cfc, 0x000).on(M020),
    OpcodePattern::new(K::Cas2(L),                           0xffff, 0x0efc, 0x000).on(M020),
    OpcodePattern::new(K::Chk(W),                            0xf1c0, 0x4180, 0xbff),
    OpcodePattern::new(K::Chk(L),                            0xf1c0, 0x4100, 0xbff).on(M020),
    OpcodePattern::new(K::Chk2Cmp2(B),                       0xffc0, 0x00c0, 0x27b).on(M020),
    OpcodePattern::new(K::Chk2Cmp2(W),                       0xffc0, 0x02c0, 0x27b).on(M020),
    OpcodePattern::new(K::Chk2Cmp2(L),                       0xffc0, 0x04c0, 0x27b).on(M020),
    OpcodePattern::new(K::Cache(CacheOp::Cinv),              0xff20, 0xf400, 0x000).on(M040),
    OpcodePattern::new(K::Unary(UnaryOp::Clr, B),            0xffc0, 0x4200, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Clr, W),            0xffc0, 0x4240, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Clr, L),            0xffc0, 0x4280, 0xbf8),
    OpcodePattern::new(K::AluEr(AluOp::Cmp, B),              0xf1c0, 0xb000, 0xbff),
    OpcodePattern::new(K::AluEr(AluOp::Cmp, W),              0xf1c0, 0xb040, 0xfff),
    OpcodePattern::new(K::AluEr(AluOp::Cmp, L),              0xf1c0, 0xb080, 0xfff),
    OpcodePattern::new(K::AluAddr(AluOp::Cmp, W),            0xf1c0, 0xb0c0, 0xfff),
    OpcodePattern::new(K::AluAddr(AluOp::Cmp, L),            0xf1c0, 0xb1c0, 0xfff),
    OpcodePattern::new(K::Immediate(AluOp::Cmp, B),          0xffc0, 0x0c00, 0xbf8),
    OpcodePattern::new(K::ImmediatePc(B),                    0xffff, 0x0c3a, 0x000).on(M020),
    OpcodePattern::new(K::ImmediatePc(B),                    0xffff, 0x0c3b, 0x000).on(M020),
    OpcodePattern::new(K::Immediate(AluOp::Cmp, W),          0xffc0, 0x0c40, 0xbf8),
    OpcodePattern::new(K::ImmediatePc(W),                    0xffff, 0x0c7a, 0x000).on(M020),
    OpcodePattern::new(K::ImmediatePc(W),                    0xffff, 0x0c7b, 0x000).on(M020),
    OpcodePattern::new(K::Immediate(AluOp::Cmp, L),          0xffc0, 0x0c80, 0xbf8),
    OpcodePattern::new(K::ImmediatePc(L),                    0xffff, 0x0cba, 0x000).on(M020),
    OpcodePattern::new(K::ImmediatePc(L),                    0xffff, 0x0cbb, 0x000).on(M020),
    OpcodePattern::new(K::Cmpm(B),                           0xf1f8, 0xb108, 0x000),
    OpcodePattern::new(K::Cmpm(W),                           0xf1f8, 0xb148, 0x000),
    OpcodePattern::new(K::Cmpm(L),                           0xf1f8, 0xb188, 0x000),
    OpcodePattern::new(K::Coprocessor(Cp::Bcc(W)),           0xf1c0, 0xf080, 0x000).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Bcc(L)),           0xf1c0, 0xf0c0, 0x000).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Dbcc),             0xf1f8, 0xf048, 0x000).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Gen),              0xf1c0, 0xf000, 0x000).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Restore),          0xf1c0, 0xf140, 0x37f).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Save),             0xf1c0, 0xf100, 0x2f8).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Scc),              0xf1c0, 0xf040, 0xbf8).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Trapcc(None)),     0xf1ff, 0xf07c, 0x000).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Trapcc(Some(W))),  0xf1ff, 0xf07a, 0x000).on(M020),
    OpcodePattern::new(K::Coprocessor(Cp::Trapcc(Some(L))),  0xf1ff, 0xf07b, 0x000).on(M020),
    OpcodePattern::new(K::Cache(CacheOp::Cpush),             0xff20, 0xf420, 0x000).on(M040),
    OpcodePattern::new(K::Dbcc,                              0xf0f8, 0x50c8, 0x000),
    OpcodePattern::new(K::Dbra,                              0xfff8, 0x51c8, 0x000),
    OpcodePattern::new(K::MulDiv(MulDivOp::Divs),            0xf1c0, 0x81c0, 0xbff),
    OpcodePattern::new(K::MulDiv(MulDivOp::Divu),            0xf1c0, 0x80c0, 0xbff),
    OpcodePattern::new(K::Divl,                              0xffc0, 0x4c40, 0xbff).on(M020),
    OpcodePattern::new(K::AluRe(AluOp::Eor, B),              0xf1c0, 0xb100, 0xbf8),
    OpcodePattern::new(K::AluRe(AluOp::Eor, W),              0xf1c0, 0xb140, 0xbf8),
    OpcodePattern::new(K::AluRe(AluOp::Eor, L),              0xf1c0, 0xb180, 0xbf8),
    OpcodePattern::new(K::ImmToCcr(AluOp::Eor),              0xffff, 0x0a3c, 0x000),
    OpcodePattern::new(K::ImmToSr(AluOp::Eor),               0xffff, 0x0a7c, 0x000),
    OpcodePattern::new(K::Immediate(AluOp::Eor, B),          0xffc0, 0x0a00, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Eor, W),          0xffc0, 0x0a40, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Eor, L),          0xffc0, 0x0a80, 0xbf8),
    OpcodePattern::new(K::ExgDd,                             0xf1f8, 0xc140, 0x000),
    OpcodePattern::new(K::ExgAa,                             0xf1f8, 0xc148, 0x000),
    OpcodePattern::new(K::ExgDa,                             0xf1f8, 0xc188, 0x000),
    OpcodePattern::new(K::Extb,                              0xfff8, 0x49c0, 0x000).on(M020),
    OpcodePattern::new(K::Ext(W),                            0xfff8, 0x4880, 0x000),
    OpcodePattern::new(K::Ext(L),                            0xfff8, 0x48c0, 0x000),
    ILLEGAL_PATTERN,
    OpcodePattern::new(K::Jmp,                               0xffc0, 0x4ec0, 0x27b),
    OpcodePattern::new(K::Jsr,                               0xffc0, 0x4e80, 0x27b),
    OpcodePattern::new(K::Lea,                               0xf1c0, 0x41c0, 0x27b),
    OpcodePattern::new(K::Link(W),                           0xfff8, 0x4e50, 0x000),
    OpcodePattern::new(K::Link(L),                           0xfff8, 0x4808, 0x000).on(M020),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Lsr, B),         0xf1f8, 0xe008, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Lsr, W),         0xf1f8, 0xe048, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Lsr, L),         0xf1f8, 0xe088, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Lsr, B),         0xf1f8, 0xe028, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Lsr, W),         0xf1f8, 0xe068, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Lsr, L),         0xf1f8, 0xe0a8, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Lsr),            0xffc0, 0xe2c0, 0x3f8),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Lsl, B),         0xf1f8, 0xe108, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Lsl, W),         0xf1f8, 0xe148, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Lsl, L),         0xf1f8, 0xe188, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Lsl, B),         0xf1f8, 0xe128, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Lsl, W),         0xf1f8, 0xe168, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Lsl, L),         0xf1f8, 0xe1a8, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Lsl),            0xffc0, 0xe3c0, 0x3f8),
    OpcodePattern::new(K::Move(B),                           0xf000, 0x1000, 0xbff),
    OpcodePattern::new(K::Move(W),                           0xf000, 0x3000, 0xfff),
    OpcodePattern::new(K::Move(L),                           0xf000, 0x2000, 0xfff),
    OpcodePattern::new(K::Movea(W),                          0xf1c0, 0x3040, 0xfff),
    OpcodePattern::new(K::Movea(L),                          0xf1c0, 0x2040, 0xfff),
    OpcodePattern::new(K::MoveToCcr,                         0xffc0, 0x44c0, 0xbff),
    OpcodePattern::new(K::MoveFromCcr,                       0xffc0, 0x42c0, 0xbf8).on(M010),
    OpcodePattern::new(K::MoveToSr,                          0xffc0, 0x46c0, 0xbff),
    OpcodePattern::new(K::MoveFromSr,                        0xffc0, 0x40c0, 0xbf8),
    OpcodePattern::new(K::MoveToUsp,                         0xfff8, 0x4e60, 0x000),
    OpcodePattern::new(K::MoveFromUsp,                       0xfff8, 0x4e68, 0x000),
    OpcodePattern::new(K::Movec,                             0xfffe, 0x4e7a, 0x000).on(M010),
    OpcodePattern::new(K::Movem(MovemForm::Predecrement, W), 0xfff8, 0x48a0, 0x000),
    OpcodePattern::new(K::Movem(MovemForm::Predecrement, L), 0xfff8, 0x48e0, 0x000),
    OpcodePattern::new(K::Movem(MovemForm::RegToMem, W),     0xffc0, 0x4880, 0x2f8),
    OpcodePattern::new(K::Movem(MovemForm::RegToMem, L),     0xffc0, 0x48c0, 0x2f8),
    OpcodePattern::new(K::Movem(MovemForm::MemToReg, W),     0xffc0, 0x4c80, 0x37b),
    OpcodePattern::new(K::Movem(MovemForm::MemToReg, L),     0xffc0, 0x4cc0, 0x37b),
    OpcodePattern::new(K::MovepEr(W),                        0xf1f8, 0x0108, 0x000),
    OpcodePattern::new(K::MovepEr(L),                        0xf1f8, 0x0148, 0x000),
    OpcodePattern::new(K::MovepRe(W),                        0xf1f8, 0x0188, 0x000),
    OpcodePattern::new(K::MovepRe(L),                        0xf1f8, 0x01c8, 0x000),
    OpcodePattern::new(K::Moves(B),                          0xffc0, 0x0e00, 0x3f8).on(M010),
    OpcodePattern::new(K::Moves(W),                          0xffc0, 0x0e40, 0x3f8).on(M010),
    OpcodePattern::new(K::Moves(L),                          0xffc0, 0x0e80, 0x3f8).on(M010),
    OpcodePattern::new(K::Moveq,                             0xf100, 0x7000, 0x000),
    OpcodePattern::new(K::Move16(Move16Form::PostIncBoth),   0xfff8, 0xf620, 0x000).on(M040),
    OpcodePattern::new(K::Move16(Move16Form::PostIncToAbs),  0xfff8, 0xf600, 0x000).on(M040),
    OpcodePattern::new(K::Move16(Move16Form::AbsToPostInc),  0xfff8, 0xf608, 0x000).on(M040),
    OpcodePattern::new(K::Move16(Move16Form::IndirectToAbs), 0xfff8, 0xf610, 0x000).on(M040),
    OpcodePattern::new(K::Move16(Move16Form::AbsToIndirect), 0xfff8, 0xf618, 0x000).on(M040),
    OpcodePattern::new(K::MulDiv(MulDivOp::Muls),            0xf1c0, 0xc1c0, 0xbff),
    OpcodePattern::new(K::MulDiv(MulDivOp::Mulu),            0xf1c0, 0xc0c0, 0xbff),
    OpcodePattern::new(K::Mull,                              0xffc0, 0x4c00, 0xbff).on(M020),
    OpcodePattern::new(K::Nbcd,                              0xffc0, 0x4800, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Neg, B),            0xffc0, 0x4400, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Neg, W),            0xffc0, 0x4440, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Neg, L),            0xffc0, 0x4480, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Negx, B),           0xffc0, 0x4000, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Negx, W),           0xffc0, 0x4040, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Negx, L),           0xffc0, 0x4080, 0xbf8),
    OpcodePattern::new(K::Nop,                               0xffff, 0x4e71, 0x000),
    OpcodePattern::new(K::Unary(UnaryOp::Not, B),            0xffc0, 0x4600, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Not, W),            0xffc0, 0x4640, 0xbf8),
    OpcodePattern::new(K::Unary(UnaryOp::Not, L),            0xffc0, 0x4680, 0xbf8),
    OpcodePattern::new(K::AluEr(AluOp::Or, B),               0xf1c0, 0x8000, 0xbff),
    OpcodePattern::new(K::AluEr(AluOp::Or, W),               0xf1c0, 0x8040, 0xbff),
    OpcodePattern::new(K::AluEr(AluOp::Or, L),               0xf1c0, 0x8080, 0xbff),
    OpcodePattern::new(K::AluRe(AluOp::Or, B),               0xf1c0, 0x8100, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::Or, W),               0xf1c0, 0x8140, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::Or, L),               0xf1c0, 0x8180, 0x3f8),
    OpcodePattern::new(K::ImmToCcr(AluOp::Or),               0xffff, 0x003c, 0x000),
    OpcodePattern::new(K::ImmToSr(AluOp::Or),                0xffff, 0x007c, 0x000),
    OpcodePattern::new(K::Immediate(AluOp::Or, B),           0xffc0, 0x0000, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Or, W),           0xffc0, 0x0040, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Or, L),           0xffc0, 0x0080, 0xbf8),
    OpcodePattern::new(K::Pack { memory: false },            0xf1f8, 0x8140, 0x000).on(M020),
    OpcodePattern::new(K::Pack { memory: true },             0xf1f8, 0x8148, 0x000).on(M020),
    OpcodePattern::new(K::Pea,                               0xffc0, 0x4840, 0x27b),
    OpcodePattern::new(K::Reset,                             0xffff, 0x4e70, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Ror, B),         0xf1f8, 0xe018, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Ror, W),         0xf1f8, 0xe058, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Ror, L),         0xf1f8, 0xe098, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Ror, B),         0xf1f8, 0xe038, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Ror, W),         0xf1f8, 0xe078, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Ror, L),         0xf1f8, 0xe0b8, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Ror),            0xffc0, 0xe6c0, 0x3f8),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Rol, B),         0xf1f8, 0xe118, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Rol, W),         0xf1f8, 0xe158, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Rol, L),         0xf1f8, 0xe198, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Rol, B),         0xf1f8, 0xe138, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Rol, W),         0xf1f8, 0xe178, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Rol, L),         0xf1f8, 0xe1b8, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Rol),            0xffc0, 0xe7c0, 0x3f8),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Roxr, B),        0xf1f8, 0xe010, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Roxr, W),        0xf1f8, 0xe050, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Roxr, L),        0xf1f8, 0xe090, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Roxr, B),        0xf1f8, 0xe030, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Roxr, W),        0xf1f8, 0xe070, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Roxr, L),        0xf1f8, 0xe0b0, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Roxr),           0xffc0, 0xe4c0, 0x3f8),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Roxl, B),        0xf1f8, 0xe110, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Roxl, W),        0xf1f8, 0xe150, 0x000),
    OpcodePattern::new(K::ShiftImm(ShiftOp::Roxl, L),        0xf1f8, 0xe190, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Roxl, B),        0xf1f8, 0xe130, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Roxl, W),        0xf1f8, 0xe170, 0x000),
    OpcodePattern::new(K::ShiftReg(ShiftOp::Roxl, L),        0xf1f8, 0xe1b0, 0x000),
    OpcodePattern::new(K::ShiftMem(ShiftOp::Roxl),           0xffc0, 0xe5c0, 0x3f8),
    OpcodePattern::new(K::Rtd,                               0xffff, 0x4e74, 0x000).on(M010),
    OpcodePattern::new(K::Rte,                               0xffff, 0x4e73, 0x000),
    OpcodePattern::new(K::Rtm,                               0xfff0, 0x06c0, 0x000).on(M020_ONLY),
    OpcodePattern::new(K::Rtr,                               0xffff, 0x4e77, 0x000),
    OpcodePattern::new(K::Rts,                               0xffff, 0x4e75, 0x000),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Sbcd, B),       0xf1f8, 0x8100, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Sbcd, B),       0xf1f8, 0x8108, 0x000),
    OpcodePattern::new(K::Scc,                               0xf0c0, 0x50c0, 0xbf8),
    OpcodePattern::new(K::Stop,                              0xffff, 0x4e72, 0x000),
    OpcodePattern::new(K::AluEr(AluOp::Sub, B),              0xf1c0, 0x9000, 0xbff),
    OpcodePattern::new(K::AluEr(AluOp::Sub, W),              0xf1c0, 0x9040, 0xfff),
    OpcodePattern::new(K::AluEr(AluOp::Sub, L),              0xf1c0, 0x9080, 0xfff),
    OpcodePattern::new(K::AluRe(AluOp::Sub, B),              0xf1c0, 0x9100, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::Sub, W),              0xf1c0, 0x9140, 0x3f8),
    OpcodePattern::new(K::AluRe(AluOp::Sub, L),              0xf1c0, 0x9180, 0x3f8),
    OpcodePattern::new(K::AluAddr(AluOp::Sub, W),            0xf1c0, 0x90c0, 0xfff),
    OpcodePattern::new(K::AluAddr(AluOp::Sub, L),            0xf1c0, 0x91c0, 0xfff),
    OpcodePattern::new(K::Immediate(AluOp::Sub, B),          0xffc0, 0x0400, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Sub, W),          0xffc0, 0x0440, 0xbf8),
    OpcodePattern::new(K::Immediate(AluOp::Sub, L),          0xffc0, 0x0480, 0xbf8),
    OpcodePattern::new(K::Subq(B),                           0xf1c0, 0x5100, 0xbf8),
    OpcodePattern::new(K::Subq(W),                           0xf1c0, 0x5140, 0xff8),
    OpcodePattern::new(K::Subq(L),                           0xf1c0, 0x5180, 0xff8),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Subx, B),       0xf1f8, 0x9100, 0x000),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Subx, W),       0xf1f8, 0x9140, 0x000),
    OpcodePattern::new(K::ExtendRr(ExtendOp::Subx, L),       0xf1f8, 0x9180, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Subx, B),       0xf1f8, 0x9108, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Subx, W),       0xf1f8, 0x9148, 0x000),
    OpcodePattern::new(K::ExtendMm(ExtendOp::Subx, L),       0xf1f8, 0x9188, 0x000),
    OpcodePattern::new(K::Swap,                              0xfff8, 0x4840, 0x000),
    OpcodePattern::new(K::Tas,                               0xffc0, 0x4ac0, 0xbf8),
    OpcodePattern::new(K::Trap,                              0xfff0, 0x4e40, 0x000),
    OpcodePattern::new(K::Trapcc(None),                      0xf0ff, 0x50fc, 0x000).on(M020),
    OpcodePattern::new(K::Trapcc(Some(W)),                   0xf0ff, 0x50fa, 0x000).on(M020),
    OpcodePattern::new(K::Trapcc(Some(L)),                   0xf0ff, 0x50fb, 0x000).on(M020),
    OpcodePattern::new(K::Trapv,                             0xffff, 0x4e76, 0x000),
    OpcodePattern::new(K::Unary(UnaryOp::Tst, B),            0xffc0, 0x4a00, 0xbf8),
    OpcodePattern::new(K::TstExtended(B),                    0xffff, 0x4a3a, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(B),                    0xffff, 0x4a3b, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(B),                    0xffff, 0x4a3c, 0x000).on(M020),
    OpcodePattern::new(K::Unary(UnaryOp::Tst, W),            0xffc0, 0x4a40, 0xbf8),
    OpcodePattern::new(K::TstExtended(W),                    0xfff8, 0x4a48, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(W),                    0xffff, 0x4a7a, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(W),                    0xffff, 0x4a7b, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(W),                    0xffff, 0x4a7c, 0x000).on(M020),
    OpcodePattern::new(K::Unary(UnaryOp::Tst, L),            0xffc0, 0x4a80, 0xbf8),
    OpcodePattern::new(K::TstExtended(L),                    0xfff8, 0x4a88, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(L),                    0xffff, 0x4aba, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(L),                    0xffff, 0x4abb, 0x000).on(M020),
    OpcodePattern::new(K::TstExtended(L),                    0xffff, 0x4abc, 0x000).on(M020),
    OpcodePattern::new(K::Unlk,                              0xfff8, 0x4e58, 0x000),
    OpcodePattern::new(K::Unpk { memory: false },            0xf1f8, 0x8180, 0x000).on(M020),
    OpcodePattern::new(K::Unpk { memory: true },             0xf1f8, 0x8188, 0x000).on(M020),
];

/// Dispatch table mapping every opcode word to its pattern.
pub struct OpcodeTable {
    entries: Vec<&'static OpcodePattern>,
}

impl OpcodeTable {
    pub fn lookup(&self, opcode: u16) -> &'static OpcodePattern {
        self.entries[opcode as usize]
    }

    /// Number of opcode words that resolve to a real instruction family.
    pub fn defined_count(&self) -> usize {
        self.entries.iter().filter(|p| !p.is_illegal()).count()
    }
}

/// Build the dispatch table from [`OPCODE_PATTERNS`].
///
/// Patterns are tried in order of descending mask popcount; ties keep
/// declaration order. Unmatched opcodes resolve to the illegal pattern.
/// Pure: every call returns an identical table.
pub fn build_opcode_table() -> OpcodeTable {
    let mut sorted: Vec<&'static OpcodePattern> = OPCODE_PATTERNS.iter().collect();
    sorted.sort_by_key(|p| std::cmp::Reverse(p.mask.count_ones()));

    let entries: Vec<&'static OpcodePattern> = (0..=u16::MAX)
        .map(|opcode| {
            sorted
                .iter()
                .copied()
                .find(|p| p.accepts(opcode))
                .unwrap_or(&ILLEGAL)
        })
        .collect();

    let table = OpcodeTable { entries };
    debug!(
        "built opcode table: {} patterns, {} defined opcodes",
        OPCODE_PATTERNS.len(),
        table.defined_count()
    );
    table
}
