use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Opcode {
    ADD,
    ADDU,
    SUB,
    AND,
    OR,
    SLT,
    MULT,
    DIV,
    MFHI,
    MFLO,
    SLL,
    SRL,
    SRA,
    JR,
    ADDI,
    ADDIU,
    SLTI,
    ANDI,
    ORI,
    LB,
    LW,
    SB,
    SW,
    BEQ,
    BNE,
    J,
    JAL,
}

impl Opcode {
    /// Legacy "no opcode" value, one past the last valid opcode.
    pub const UNDEFINED: u8 = Opcode::COUNT as u8;

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Equality branches: the displacement is a signed word count.
    pub fn is_branch(self) -> bool {
        matches!(self, Opcode::BEQ | Opcode::BNE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Format {
    RegReg,
    RegImm,
    Jump,
}

/// Operand roles of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Role {
    RS,
    RT,
    RD,
    IMM,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub op: Opcode,
    pub format: Format,
    pub opcode: u8,
    pub funct: u8,
    /// Operand roles in print order.
    pub args: &'static [Role],
}

impl OpcodeEntry {
    pub fn position(&self, role: Role) -> Option<usize> {
        self.args.iter().position(|arg| *arg == role)
    }
}

macro_rules! entry {
    ($op:ident, $format:ident, $opcode:expr, $funct:expr, [$($arg:ident),*]) => {
        OpcodeEntry {
            op: Opcode::$op,
            format: Format::$format,
            opcode: $opcode,
            funct: $funct,
            args: &[$(Role::$arg),*],
        }
    };
}

// Indexed by `Opcode` discriminant.
static ENTRIES: [OpcodeEntry; Opcode::COUNT] = [
    entry!(ADD, RegReg, 0b000000, 0b100000, [RD, RS, RT]),
    entry!(ADDU, RegReg, 0b000000, 0b100001, [RD, RS, RT]),
    entry!(SUB, RegReg, 0b000000, 0b100010, [RD, RS, RT]),
    entry!(AND, RegReg, 0b000000, 0b100100, [RD, RS, RT]),
    entry!(OR, RegReg, 0b000000, 0b100101, [RD, RS, RT]),
    entry!(SLT, RegReg, 0b000000, 0b101010, [RD, RS, RT]),
    entry!(MULT, RegReg, 0b000000, 0b011000, [RS, RT]),
    entry!(DIV, RegReg, 0b000000, 0b011010, [RS, RT]),
    entry!(MFHI, RegReg, 0b000000, 0b010000, [RD]),
    entry!(MFLO, RegReg, 0b000000, 0b010010, [RD]),
    entry!(SLL, RegReg, 0b000000, 0b000000, [RD, RT, IMM]),
    entry!(SRL, RegReg, 0b000000, 0b000010, [RD, RT, IMM]),
    entry!(SRA, RegReg, 0b000000, 0b000011, [RD, RT, IMM]),
    entry!(JR, RegReg, 0b000000, 0b001000, [RS]),
    entry!(ADDI, RegImm, 0b001000, 0, [RT, RS, IMM]),
    entry!(ADDIU, RegImm, 0b001001, 0, [RT, RS, IMM]),
    entry!(SLTI, RegImm, 0b001010, 0, [RT, RS, IMM]),
    entry!(ANDI, RegImm, 0b001100, 0, [RT, RS, IMM]),
    entry!(ORI, RegImm, 0b001101, 0, [RT, RS, IMM]),
    entry!(LB, RegImm, 0b100000, 0, [RT, IMM, RS]),
    entry!(LW, RegImm, 0b100011, 0, [RT, IMM, RS]),
    entry!(SB, RegImm, 0b101000, 0, [RT, IMM, RS]),
    entry!(SW, RegImm, 0b101011, 0, [RT, IMM, RS]),
    entry!(BEQ, RegImm, 0b000100, 0, [RS, RT, IMM]),
    entry!(BNE, RegImm, 0b000101, 0, [RS, RT, IMM]),
    entry!(J, Jump, 0b000010, 0, [IMM]),
    entry!(JAL, Jump, 0b000011, 0, [IMM]),
];

/// Supported opcodes, keyed by their (opcode, funct) bit patterns.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    entries: &'static [OpcodeEntry],
    keys: BiMap<(u8, u8), Opcode>,
}

impl OpcodeTable {
    /// Primary opcode shared by the register-register family.
    pub const REG_REG: u8 = 0b000000;

    pub fn new() -> Self {
        let keys = ENTRIES
            .iter()
            .map(|entry| ((entry.opcode, entry.funct), entry.op))
            .collect();
        Self {
            entries: &ENTRIES,
            keys,
        }
    }

    /// The funct field only takes part for the register-register family.
    pub fn lookup(&self, opcode: u8, funct: u8) -> Option<Opcode> {
        let key = match opcode {
            Self::REG_REG => (opcode, funct),
            _ => (opcode, 0),
        };
        self.keys.get_by_left(&key).copied()
    }

    /// (opcode, funct) bit patterns of `op`.
    pub fn bits(&self, op: Opcode) -> (u8, u8) {
        self.keys.get_by_right(&op).copied().unwrap_or_default()
    }

    pub fn entry(&self, op: Opcode) -> &OpcodeEntry {
        &self.entries[op as usize]
    }

    pub fn format(&self, op: Opcode) -> Format {
        self.entry(op).format
    }

    pub fn mnemonic(&self, op: Opcode) -> &'static str {
        self.entry(op).op.into()
    }

    pub fn operand_count(&self, op: Opcode) -> usize {
        self.entry(op).args.len()
    }

    pub fn position(&self, op: Opcode, role: Role) -> Option<usize> {
        self.entry(op).position(role)
    }

    pub fn rs_position(&self, op: Opcode) -> Option<usize> {
        self.position(op, Role::RS)
    }

    pub fn rt_position(&self, op: Opcode) -> Option<usize> {
        self.position(op, Role::RT)
    }

    pub fn rd_position(&self, op: Opcode) -> Option<usize> {
        self.position(op, Role::RD)
    }

    pub fn imm_position(&self, op: Opcode) -> Option<usize> {
        self.position(op, Role::IMM)
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}
