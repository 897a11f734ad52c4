use arch::{
    field::{self, Layout},
    inst::Instruction,
    op::{OpcodeTable, Role},
    reg::{self, RegisterTable},
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use crate::{
    error::Error,
    render::{self, Style},
};

/// Characters per input line, one per instruction bit.
pub const LINE_BITS: usize = field::WORD_BITS;

// ----------------------------------------------------------------------------
// Parser

/// Decodes a whole file of binary instruction lines up front.
///
/// Any malformed line invalidates the file: the error is kept, no
/// instruction is exposed, and iteration yields only the end marker.
#[derive(Debug)]
pub struct MachLangParser {
    insts: Vec<Instruction>,
    cursor: usize,
    error: Option<Error>,
    registers: RegisterTable,
    opcodes: OpcodeTable,
    style: Style,
}

impl MachLangParser {
    pub fn open(path: &str, style: Style) -> Self {
        match read_lines(path) {
            Ok(lines) => Self::parse(&lines, style),
            Err(err) => {
                let mut parser = Self::empty(style);
                parser.error = Some(err);
                parser
            }
        }
    }

    /// Decodes raw lines, the first one being line 1.
    pub fn parse<S: AsRef<[u8]>>(lines: &[S], style: Style) -> Self {
        let mut parser = Self::empty(style);
        let decoded = lines
            .iter()
            .enumerate()
            .map(|(idx, raw)| parser.decode(idx + 1, raw.as_ref()))
            .collect::<Result<Vec<_>, _>>();
        match decoded {
            Ok(insts) => parser.insts = insts,
            Err(err) => parser.error = Some(err),
        }
        parser
    }

    fn empty(style: Style) -> Self {
        Self {
            insts: vec![],
            cursor: 0,
            error: None,
            registers: RegisterTable::new(),
            opcodes: OpcodeTable::new(),
            style,
        }
    }

    pub fn is_format_correct(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Hands back the parser only if every line decoded.
    pub fn into_result(mut self) -> Result<Self, Error> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    /// Next decoded instruction, or the end marker once exhausted.
    pub fn next_instruction(&mut self) -> Instruction {
        match self.insts.get(self.cursor) {
            Some(inst) => {
                self.cursor += 1;
                inst.clone()
            }
            None => Instruction::default(),
        }
    }
}

impl Iterator for MachLangParser {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        let inst = self.next_instruction();
        (!inst.is_end()).then_some(inst)
    }
}

/// Raw lines of `path`, split on `\n` only. Bytes are kept as read so a
/// stray non-UTF-8 byte is reported by the decoder against its line.
pub fn read_lines(path: &str) -> Result<Vec<Vec<u8>>, Error> {
    let file = File::open(path).map_err(|err| Error::FileOpen(path.to_string(), err))?;
    BufReader::new(file)
        .split(b'\n')
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::FileRead)
}

// ----------------------------------------------------------------------------
// Decode

impl MachLangParser {
    fn decode(&self, line: usize, raw: &[u8]) -> Result<Instruction, Error> {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let word = validate(line, raw)?;

        let opcode = field::OPCODE.bits(word) as u8;
        let funct = field::FUNCT.bits(word) as u8;
        let op = self
            .opcodes
            .lookup(opcode, funct)
            .ok_or(Error::UnknownOpcode {
                line,
                opcode,
                funct,
            })?;
        let entry = self.opcodes.entry(op);

        let (mut rs, mut rt, mut rd) = (None, None, None);
        let mut imm = 0;
        for (role, range) in Layout::of(entry.format, op).fields() {
            if entry.position(*role).is_none() {
                continue;
            }
            let value = range.value(word);
            if *role == Role::IMM {
                imm = value;
                continue;
            }
            let reg = self
                .registers
                .resolve(value)
                .ok_or(Error::InvalidRegister {
                    line,
                    role: *role,
                    index: value,
                })?;
            match role {
                Role::RS => rs = Some(reg),
                Role::RT => rt = Some(reg),
                _ => rd = Some(reg),
            }
        }

        let mut inst = Instruction::default();
        inst.set_values(
            op as i32,
            reg::sentinel(rs),
            reg::sentinel(rt),
            reg::sentinel(rd),
            imm,
        );
        inst.set_encoding(&format!("{word:0width$b}", width = LINE_BITS));
        let text = render::render(&inst, &self.opcodes, &self.registers, &self.style);
        inst.set_assembly(&text);
        Ok(inst)
    }
}

/// Checks the line shape and packs it into a word, first column as MSB.
fn validate(line: usize, raw: &[u8]) -> Result<u32, Error> {
    let len = raw.len();
    if len != LINE_BITS {
        return Err(Error::LineLength { line, len });
    }
    if let Some((idx, &found)) = raw
        .iter()
        .enumerate()
        .find(|(_, b)| !matches!(**b, b'0' | b'1'))
    {
        return Err(Error::LineAlphabet {
            line,
            column: idx + 1,
            found,
        });
    }
    Ok(raw
        .iter()
        .fold(0u32, |word, bit| (word << 1) | u32::from(bit - b'0')))
}
