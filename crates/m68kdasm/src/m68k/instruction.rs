/// Operation size suffix (.b, .w, .l).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Byte,
    Word,
    Long,
}

impl Size {
    /// Size suffix for Motorola syntax.
    pub fn suffix(&self) -> &'static str {
        match self {
            Size::Byte => ".b",
            Size::Word => ".w",
            Size::Long => ".l",
        }
    }
}

/// Condition codes for Bcc, DBcc, Scc, and TRAPcc instructions.
///
/// These correspond to the 4-bit condition field (bits 11-8) in
/// the opcode word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// 0000: True (always)
    True,
    /// 0001: False (never)
    False,
    /// 0010: High (!C & !Z)
    Hi,
    /// 0011: Low or Same (C | Z)
    Ls,
    /// 0100: Carry Clear / High or Same (!C)
    Cc,
    /// 0101: Carry Set / Low (C)
    Cs,
    /// 0110: Not Equal (!Z)
    Ne,
    /// 0111: Equal (Z)
    Eq,
    /// 1000: Overflow Clear (!V)
    Vc,
    /// 1001: Overflow Set (V)
    Vs,
    /// 1010: Plus (!N)
    Pl,
    /// 1011: Minus (N)
    Mi,
    /// 1100: Greater or Equal
    Ge,
    /// 1101: Less Than
    Lt,
    /// 1110: Greater Than
    Gt,
    /// 1111: Less or Equal
    Le,
}

impl Condition {
    /// Condition from the low four bits of `bits`.
    pub fn from_bits(bits: u16) -> Self {
        const ALL: [Condition; 16] = [
            Condition::True,
            Condition::False,
            Condition::Hi,
            Condition::Ls,
            Condition::Cc,
            Condition::Cs,
            Condition::Ne,
            Condition::Eq,
            Condition::Vc,
            Condition::Vs,
            Condition::Pl,
            Condition::Mi,
            Condition::Ge,
            Condition::Lt,
            Condition::Gt,
            Condition::Le,
        ];
        ALL[(bits & 0xF) as usize]
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Condition::True => "t",
            Condition::False => "f",
            Condition::Hi => "hi",
            Condition::Ls => "ls",
            Condition::Cc => "cc",
            Condition::Cs => "cs",
            Condition::Ne => "ne",
            Condition::Eq => "eq",
            Condition::Vc => "vc",
            Condition::Vs => "vs",
            Condition::Pl => "pl",
            Condition::Mi => "mi",
            Condition::Ge => "ge",
            Condition::Lt => "lt",
            Condition::Gt => "gt",
            Condition::Le => "le",
        }
    }
}

/// Coprocessor condition predicate names, indexed by the low six bits of
/// the condition field. Undefined predicates render as `?`.
pub fn coprocessor_condition(bits: u16) -> &'static str {
    const NAMES: [&str; 32] = [
        "f", "eq", "ogt", "oge", "olt", "ole", "ogl", "or", "un", "ueq", "ugt", "uge", "ult",
        "ule", "ne", "t", "sf", "seq", "gt", "ge", "lt", "le", "gl", "gle", "ngle", "ngl", "nle",
        "nlt", "nge", "ngt", "sne", "st",
    ];
    NAMES.get((bits & 0x3f) as usize).copied().unwrap_or("?")
}

// ─── Instruction Families ────────────────────────────────────────────

/// Two-operand ALU operations sharing the `<op>.s <ea>, Dn` and
/// `<op>.s Dn, <ea>` encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    And,
    Or,
    Eor,
    Cmp,
}

impl AluOp {
    pub fn name(self) -> &'static str {
        match self {
            AluOp::Add => "add",
            AluOp::Sub => "sub",
            AluOp::And => "and",
            AluOp::Or => "or",
            AluOp::Eor => "eor",
            AluOp::Cmp => "cmp",
        }
    }

    /// Arithmetic immediates are shown signed; logical ones unsigned.
    pub fn signed_immediate(self) -> bool {
        matches!(self, AluOp::Add | AluOp::Sub | AluOp::Cmp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Asr,
    Asl,
    Lsr,
    Lsl,
    Roxr,
    Roxl,
    Ror,
    Rol,
}

impl ShiftOp {
    pub fn name(self) -> &'static str {
        match self {
            ShiftOp::Asr => "asr",
            ShiftOp::Asl => "asl",
            ShiftOp::Lsr => "lsr",
            ShiftOp::Lsl => "lsl",
            ShiftOp::Roxr => "roxr",
            ShiftOp::Roxl => "roxl",
            ShiftOp::Ror => "ror",
            ShiftOp::Rol => "rol",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    Btst,
    Bchg,
    Bclr,
    Bset,
}

impl BitOp {
    pub fn name(self) -> &'static str {
        match self {
            BitOp::Btst => "btst",
            BitOp::Bchg => "bchg",
            BitOp::Bclr => "bclr",
            BitOp::Bset => "bset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitfieldOp {
    Bfchg,
    Bfclr,
    Bfexts,
    Bfextu,
    Bfffo,
    Bfins,
    Bfset,
    Bftst,
}

impl BitfieldOp {
    pub fn name(self) -> &'static str {
        match self {
            BitfieldOp::Bfchg => "bfchg",
            BitfieldOp::Bfclr => "bfclr",
            BitfieldOp::Bfexts => "bfexts",
            BitfieldOp::Bfextu => "bfextu",
            BitfieldOp::Bfffo => "bfffo",
            BitfieldOp::Bfins => "bfins",
            BitfieldOp::Bfset => "bfset",
            BitfieldOp::Bftst => "bftst",
        }
    }

    /// Operations naming a data register from the extension word.
    pub fn has_register(self) -> bool {
        matches!(
            self,
            BitfieldOp::Bfexts | BitfieldOp::Bfextu | BitfieldOp::Bfffo | BitfieldOp::Bfins
        )
    }
}

/// Single-operand `<op>.s <ea>` instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Clr,
    Neg,
    Negx,
    Not,
    Tst,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Clr => "clr",
            UnaryOp::Neg => "neg",
            UnaryOp::Negx => "negx",
            UnaryOp::Not => "not",
            UnaryOp::Tst => "tst",
        }
    }
}

/// Word multiply/divide, `<op>.w <ea>, Dn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulDivOp {
    Divs,
    Divu,
    Muls,
    Mulu,
}

impl MulDivOp {
    pub fn name(self) -> &'static str {
        match self {
            MulDivOp::Divs => "divs",
            MulDivOp::Divu => "divu",
            MulDivOp::Muls => "muls",
            MulDivOp::Mulu => "mulu",
        }
    }
}

/// Register pair instructions with `Dx, Dy` and `-(Ax), -(Ay)` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendOp {
    Addx,
    Subx,
    Abcd,
    Sbcd,
}

impl ExtendOp {
    pub fn name(self) -> &'static str {
        match self {
            ExtendOp::Addx => "addx",
            ExtendOp::Subx => "subx",
            ExtendOp::Abcd => "abcd",
            ExtendOp::Sbcd => "sbcd",
        }
    }
}

/// Coprocessor interface instructions, line F with a coprocessor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoprocessorOp {
    Bcc(Size),
    Dbcc,
    Gen,
    Restore,
    Save,
    Scc,
    /// No operand, or a word/long operand.
    Trapcc(Option<Size>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOp {
    Cinv,
    Cpush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move16Form {
    /// (Ax)+, (Ay)+
    PostIncBoth,
    /// (Ay)+, abs.l
    PostIncToAbs,
    /// abs.l, (Ay)+
    AbsToPostInc,
    /// (Ay), abs.l
    IndirectToAbs,
    /// abs.l, (Ay)
    AbsToIndirect,
}

/// MOVEM direction and addressing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovemForm {
    /// Registers to predecrement memory; reversed register mask.
    Predecrement,
    /// Registers to memory.
    RegToMem,
    /// Memory to registers.
    MemToReg,
}

/// Instruction family selected by the dispatch table.
///
/// Each variant renders one or more of the rows in the opcode pattern
/// table; payloads carry what the row fixes (operation, size, form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    Illegal,
    Line1010,
    Line1111,

    // Arithmetic and logic
    AluEr(AluOp, Size),
    AluRe(AluOp, Size),
    AluAddr(AluOp, Size),
    Immediate(AluOp, Size),
    ImmediatePc(Size),
    ImmToCcr(AluOp),
    ImmToSr(AluOp),
    Addq(Size),
    Subq(Size),
    ExtendRr(ExtendOp, Size),
    ExtendMm(ExtendOp, Size),
    Cmpm(Size),
    Unary(UnaryOp, Size),
    TstExtended(Size),
    Nbcd,
    Tas,
    Ext(Size),
    Extb,
    Swap,
    ExgDd,
    ExgAa,
    ExgDa,
    MulDiv(MulDivOp),
    Divl,
    Mull,
    Pack { memory: bool },
    Unpk { memory: bool },

    // Shifts and bits
    ShiftImm(ShiftOp, Size),
    ShiftReg(ShiftOp, Size),
    ShiftMem(ShiftOp),
    BitReg(BitOp),
    BitImm(BitOp),
    Bitfield(BitfieldOp),

    // Program control
    Bcc(Size),
    Bra(Size),
    Bsr(Size),
    Dbra,
    Dbcc,
    Scc,
    Trapcc(Option<Size>),
    Jmp,
    Jsr,
    Rts,
    Rte,
    Rtr,
    Rtd,
    Rtm,
    Callm,
    Trap,
    Trapv,
    Chk(Size),
    Chk2Cmp2(Size),
    Bkpt,
    Stop,
    Reset,
    Nop,

    // Data movement
    Move(Size),
    Movea(Size),
    Moveq,
    MoveToCcr,
    MoveFromCcr,
    MoveToSr,
    MoveFromSr,
    MoveToUsp,
    MoveFromUsp,
    Movec,
    Movem(MovemForm, Size),
    MovepEr(Size),
    MovepRe(Size),
    Moves(Size),
    Move16(Move16Form),
    Lea,
    Pea,
    Link(Size),
    Unlk,
    Cas(Size),
    Cas2(Size),

    // Coprocessor and cache
    Coprocessor(CoprocessorOp),
    Cache(CacheOp),
}
