use crate::{
    op::Opcode,
    reg::{self, Reg},
};

use color_print::cformat;

/// One decoded instruction.
///
/// The default value is the end-of-sequence marker: no opcode and no
/// registers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Instruction {
    op: Option<Opcode>,
    rs: Option<Reg>,
    rt: Option<Reg>,
    rd: Option<Reg>,
    imm: i32,
    encoding: String,
    assembly: String,
}

impl Instruction {
    pub fn new(op: i32, rs: i32, rt: i32, rd: i32, imm: i32) -> Self {
        let mut inst = Self::default();
        inst.set_values(op, rs, rt, rd, imm);
        inst
    }

    /// Sets every field at once. Out of range opcodes become undefined and
    /// out of range registers become absent.
    pub fn set_values(&mut self, op: i32, rs: i32, rt: i32, rd: i32, imm: i32) {
        self.op = u8::try_from(op).ok().and_then(|op| Opcode::try_from(op).ok());
        self.rs = Reg::from_index(rs);
        self.rt = Reg::from_index(rt);
        self.rd = Reg::from_index(rd);
        self.imm = imm;
    }

    pub fn set_encoding(&mut self, encoding: &str) {
        self.encoding = encoding.to_string();
    }

    pub fn set_assembly(&mut self, assembly: &str) {
        self.assembly = assembly.to_string();
    }

    /// True for the end-of-sequence marker.
    pub fn is_end(&self) -> bool {
        self.op.is_none()
    }

    pub fn opcode(&self) -> Option<Opcode> {
        self.op
    }

    pub fn rs(&self) -> Option<Reg> {
        self.rs
    }

    pub fn rt(&self) -> Option<Reg> {
        self.rt
    }

    pub fn rd(&self) -> Option<Reg> {
        self.rd
    }

    pub fn imm(&self) -> i32 {
        self.imm
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    /// Fields with the legacy sentinels: (opcode, rs, rt, rd, imm), where a
    /// missing opcode is `Opcode::UNDEFINED` and a missing register is 32.
    pub fn legacy(&self) -> (u8, i32, i32, i32, i32) {
        let op = self.op.map_or(Opcode::UNDEFINED, u8::from);
        (
            op,
            reg::sentinel(self.rs),
            reg::sentinel(self.rt),
            reg::sentinel(self.rd),
            self.imm,
        )
    }
}

impl Instruction {
    pub fn cformat(&self) -> String {
        fn slot(reg: Option<Reg>) -> String {
            reg.map(|r| format!("${}", r)).unwrap_or_else(|| "-".to_string())
        }

        match self.op {
            Some(op) => cformat!(
                "<r>{:<6}</> rs:<b>{:<5}</> rt:<b>{:<5}</> rd:<b>{:<5}</> imm:<y>{}</>",
                op.to_string(),
                slot(self.rs),
                slot(self.rt),
                slot(self.rd),
                self.imm
            ),
            None => cformat!("<dim>end</>"),
        }
    }
}
