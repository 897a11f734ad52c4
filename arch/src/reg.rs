use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

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
pub enum Reg {
    ZERO,
    AT,
    V0,
    V1,
    A0,
    A1,
    A2,
    A3,
    T0,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    T8,
    T9,
    K0,
    K1,
    GP,
    SP,
    FP,
    RA,
}

impl Reg {
    pub fn parse(s: &str) -> Result<Self, String> {
        let name = s.strip_prefix('$').unwrap_or(s);
        match name.to_ascii_lowercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown reg name: {s}")),
        }
    }

    pub fn index(self) -> u8 {
        self.into()
    }

    pub fn from_index(index: i32) -> Option<Self> {
        u8::try_from(index).ok().and_then(|idx| Reg::try_from(idx).ok())
    }
}

/// Register number <-> canonical name.
#[derive(Debug, Clone)]
pub struct RegisterTable {
    map: BiMap<u8, &'static str>,
}

impl RegisterTable {
    /// Number of addressable registers.
    pub const COUNT: usize = Reg::COUNT;

    /// Legacy "not found" register index, one past the last register.
    pub const NOT_FOUND: i32 = Reg::COUNT as i32;

    pub fn new() -> Self {
        let map: BiMap<u8, &'static str> =
            Reg::iter().map(|reg| (reg.index(), reg.into())).collect();
        Self { map }
    }

    /// Register encoded by `index`, or `None` outside `0..32`.
    pub fn resolve(&self, index: i32) -> Option<Reg> {
        u8::try_from(index)
            .ok()
            .filter(|idx| self.map.contains_left(idx))
            .and_then(|idx| Reg::try_from(idx).ok())
    }

    /// Canonical name of register `index`, or `""` outside `0..32`.
    pub fn name(&self, index: i32) -> &str {
        u8::try_from(index)
            .ok()
            .and_then(|idx| self.map.get_by_left(&idx).copied())
            .unwrap_or("")
    }

    /// Register number for a name such as `t0` or `$t0`.
    pub fn index(&self, name: &str) -> Option<u8> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.map.get_by_right(name).copied()
    }
}

impl Default for RegisterTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts an optional register back to its legacy index (32 when absent).
pub fn sentinel(reg: Option<Reg>) -> i32 {
    reg.map_or(RegisterTable::NOT_FOUND, |r| r.index() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bounds() {
        let regs = RegisterTable::new();
        assert_eq!(regs.resolve(0), Some(Reg::ZERO));
        assert_eq!(regs.resolve(31), Some(Reg::RA));
        assert_eq!(regs.resolve(32), None);
        assert_eq!(regs.resolve(-1), None);
        assert_eq!(regs.resolve(i32::MIN), None);
        assert_eq!(regs.resolve(256), None);
    }

    #[test]
    fn test_resolve_agrees_with_name() {
        let regs = RegisterTable::new();
        for idx in -1..=RegisterTable::COUNT as i32 {
            match regs.resolve(idx) {
                Some(reg) => assert_eq!(regs.name(idx), <&str>::from(reg)),
                None => assert_eq!(regs.name(idx), ""),
            }
        }
    }

    #[test]
    fn test_name() {
        let regs = RegisterTable::new();
        assert_eq!(regs.name(0), "zero");
        assert_eq!(regs.name(8), "t0");
        assert_eq!(regs.name(29), "sp");
        assert_eq!(regs.name(31), "ra");
        assert_eq!(regs.name(32), "");
        assert_eq!(regs.name(-5), "");
    }

    #[test]
    fn test_bidirectional() {
        let regs = RegisterTable::new();
        for idx in 0..RegisterTable::COUNT as i32 {
            let name = regs.name(idx);
            assert_eq!(regs.index(name), Some(idx as u8));
            assert_eq!(regs.index(&format!("${name}")), Some(idx as u8));
        }
        assert_eq!(regs.index("t10"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Reg::parse("s2"), Ok(Reg::S2));
        assert_eq!(Reg::parse("$ZERO"), Ok(Reg::ZERO));
        assert!(Reg::parse("hoge").is_err());
        assert_eq!(Reg::T9.to_string(), "t9");
    }

    #[test]
    fn test_sentinel() {
        assert_eq!(sentinel(Some(Reg::T0)), 8);
        assert_eq!(sentinel(None), 32);
    }
}
