use arch::{
    inst::Instruction,
    op::{Format, OpcodeTable, Role},
    reg::{self, Reg, RegisterTable},
};

/// Prefix of every register operand.
pub const SIGIL: char = '$';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    /// `$t0` instead of `$8`
    pub reg_names: bool,
}

/// Assembly text of `inst`: the mnemonic, a tab, then the operands.
pub fn render(
    inst: &Instruction,
    opcodes: &OpcodeTable,
    registers: &RegisterTable,
    style: &Style,
) -> String {
    let Some(op) = inst.opcode() else {
        return String::new();
    };
    let entry = opcodes.entry(op);
    let hex = entry.format == Format::Jump || op.is_branch();

    let reg = |r: Option<Reg>| {
        let index = reg::sentinel(r);
        if style.reg_names {
            format!("{SIGIL}{}", registers.name(index))
        } else {
            format!("{SIGIL}{index}")
        }
    };
    let operand = |role: Role| match role {
        Role::RS => reg(inst.rs()),
        Role::RT => reg(inst.rt()),
        Role::RD => reg(inst.rd()),
        Role::IMM if hex => format!("{:#x}", inst.imm()),
        Role::IMM => inst.imm().to_string(),
    };

    let operands = match entry.format {
        // Load/store addressing: rt, imm(rs)
        Format::RegImm if entry.position(Role::IMM) == Some(1) => format!(
            "{}, {}({})",
            operand(Role::RT),
            operand(Role::IMM),
            operand(Role::RS)
        ),
        _ => entry
            .args
            .iter()
            .map(|role| operand(*role))
            .collect::<Vec<_>>()
            .join(", "),
    };

    format!("{}\t{}", opcodes.mnemonic(op), operands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::op::Opcode;

    const NONE: i32 = RegisterTable::NOT_FOUND;

    fn text(op: Opcode, rs: i32, rt: i32, rd: i32, imm: i32, style: Style) -> String {
        let inst = Instruction::new(op as i32, rs, rt, rd, imm);
        render(&inst, &OpcodeTable::new(), &RegisterTable::new(), &style)
    }

    macro_rules! test_render {
        ($($name:ident: ($op:ident, $rs:expr, $rt:expr, $rd:expr, $imm:expr) => $expect:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let got = text(Opcode::$op, $rs, $rt, $rd, $imm, Style::default());
                    assert_eq!(got, $expect);
                }
            )*
        }
    }

    test_render! {
        test_add: (ADD, 9, 10, 8, 0) => "add\t$8, $9, $10",
        test_slt: (SLT, 4, 5, 2, 0) => "slt\t$2, $4, $5",
        test_mult: (MULT, 9, 10, NONE, 0) => "mult\t$9, $10",
        test_mflo: (MFLO, NONE, NONE, 8, 0) => "mflo\t$8",
        test_sra: (SRA, NONE, 9, 8, 3) => "sra\t$8, $9, 3",
        test_jr: (JR, 31, NONE, NONE, 0) => "jr\t$31",
        test_addi: (ADDI, 9, 8, NONE, -5) => "addi\t$8, $9, -5",
        test_lb: (LB, 9, 8, NONE, -4) => "lb\t$8, -4($9)",
        test_sw: (SW, 29, 31, NONE, 8) => "sw\t$31, 8($29)",
        test_beq: (BEQ, 9, 10, NONE, -4) => "beq\t$9, $10, 0xfffffffc",
        test_bne: (BNE, 8, 0, NONE, 12) => "bne\t$8, $0, 0xc",
        test_j: (J, NONE, NONE, NONE, 16) => "j\t0x10",
        test_jal: (JAL, NONE, NONE, NONE, 0x400000) => "jal\t0x400000",
    }

    #[test]
    fn test_reg_names() {
        let style = Style { reg_names: true };
        assert_eq!(text(Opcode::ADD, 9, 10, 8, 0, style), "add\t$t0, $t1, $t2");
        assert_eq!(text(Opcode::LW, 29, 31, NONE, 4, style), "lw\t$ra, 4($sp)");
    }

    #[test]
    fn test_end_marker_renders_empty() {
        let inst = Instruction::default();
        let got = render(
            &inst,
            &OpcodeTable::new(),
            &RegisterTable::new(),
            &Style::default(),
        );
        assert_eq!(got, "");
    }
}
