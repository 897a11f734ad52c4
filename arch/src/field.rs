use crate::op::{Format, Opcode, Role};

/// Width of an instruction word in bits.
pub const WORD_BITS: usize = 32;

/// Instructions are word aligned; jump and branch targets count words.
pub const WORD_SCALE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Unsigned,
    Signed,
}

/// A bit range of the instruction word, counted from the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub len: usize,
    pub sign: Sign,
    pub scaled: bool,
}

impl Field {
    const fn unsigned(offset: usize, len: usize) -> Self {
        Field {
            offset,
            len,
            sign: Sign::Unsigned,
            scaled: false,
        }
    }

    const fn signed(offset: usize, len: usize) -> Self {
        Field {
            offset,
            len,
            sign: Sign::Signed,
            scaled: false,
        }
    }

    const fn words(self) -> Self {
        Field {
            scaled: true,
            ..self
        }
    }

    /// Raw bits of the field, right aligned.
    pub fn bits(&self, word: u32) -> u32 {
        (word >> (WORD_BITS - self.offset - self.len)) & mask(self.len)
    }

    /// Field value after sign interpretation and word scaling.
    pub fn value(&self, word: u32) -> i32 {
        let bits = self.bits(word);
        let value = match self.sign {
            Sign::Unsigned => bits as i32,
            Sign::Signed => twos_complement(bits, self.len),
        };
        if self.scaled {
            value * WORD_SCALE
        } else {
            value
        }
    }
}

/// Interprets the low `len` bits as a two's complement number.
///
/// A clear sign bit yields the plain magnitude. A set one inverts the bits,
/// adds one and negates the resulting magnitude.
pub fn twos_complement(bits: u32, len: usize) -> i32 {
    let mask = mask(len);
    let bits = bits & mask;
    if (bits >> (len - 1)) & 1 == 0 {
        return bits as i32;
    }
    let magnitude = (!bits).wrapping_add(1) & mask;
    (magnitude as i64).wrapping_neg() as i32
}

fn mask(len: usize) -> u32 {
    if len >= WORD_BITS {
        u32::MAX
    } else {
        (1 << len) - 1
    }
}

pub const OPCODE: Field = Field::unsigned(0, 6);
pub const FUNCT: Field = Field::unsigned(26, 6);

/// Field layouts. A branch is the register-immediate layout with a word
/// scaled displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    RegReg,
    RegImm,
    Branch,
    Jump,
}

impl Layout {
    pub fn of(format: Format, op: Opcode) -> Self {
        match format {
            Format::RegReg => Layout::RegReg,
            Format::RegImm if op.is_branch() => Layout::Branch,
            Format::RegImm => Layout::RegImm,
            Format::Jump => Layout::Jump,
        }
    }

    pub fn fields(self) -> &'static [(Role, Field)] {
        match self {
            Layout::RegReg => &REG_REG,
            Layout::RegImm => &REG_IMM,
            Layout::Branch => &BRANCH,
            Layout::Jump => &JUMP,
        }
    }

    pub fn field(self, role: Role) -> Option<Field> {
        self.fields()
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, field)| *field)
    }
}

// The shamt slot of the register-register layout fills the immediate role.
static REG_REG: [(Role, Field); 4] = [
    (Role::RS, Field::unsigned(6, 5)),
    (Role::RT, Field::unsigned(11, 5)),
    (Role::RD, Field::unsigned(16, 5)),
    (Role::IMM, Field::unsigned(21, 5)),
];

static REG_IMM: [(Role, Field); 3] = [
    (Role::RS, Field::unsigned(6, 5)),
    (Role::RT, Field::unsigned(11, 5)),
    (Role::IMM, Field::signed(16, 16)),
];

static BRANCH: [(Role, Field); 3] = [
    (Role::RS, Field::unsigned(6, 5)),
    (Role::RT, Field::unsigned(11, 5)),
    (Role::IMM, Field::signed(16, 16).words()),
];

static JUMP: [(Role, Field); 1] = [(Role::IMM, Field::unsigned(6, 26).words())];
