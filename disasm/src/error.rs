use arch::op::Role;
use color_print::ceprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Line {line}: expected 32 bits, found {len} characters")]
    LineLength { line: usize, len: usize },

    #[error("Line {line}: `{}` at column {column} is not a binary digit", .found.escape_ascii())]
    LineAlphabet {
        line: usize,
        column: usize,
        found: u8,
    },

    #[error("Line {line}: unknown opcode field 0b{opcode:06b} (funct 0b{funct:06b})")]
    UnknownOpcode { line: usize, opcode: u8, funct: u8 },

    #[error("Line {line}: invalid {role} register {index}")]
    InvalidRegister { line: usize, role: Role, index: i32 },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to load config: {0}")]
    Config(String, #[source] serde_yaml::Error),
}

impl Error {
    /// 1-based line of a decode error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::LineLength { line, .. }
            | Error::LineAlphabet { line, .. }
            | Error::UnknownOpcode { line, .. }
            | Error::InvalidRegister { line, .. } => Some(*line),
            Error::FileOpen(..) | Error::FileRead(_) | Error::Config(..) => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[Vec<u8>]) {
        ceprintln!("<red,bold>error</>: {}", self);
        if let Some(source) = std::error::Error::source(self) {
            ceprintln!("  <blue>=</> {}", source);
        }

        let Some(line_num) = self.line() else {
            return;
        };
        let line_content = lines
            .get(line_num - 1)
            .map(|s| String::from_utf8_lossy(s))
            .unwrap_or_default();

        ceprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        ceprintln!("      <blue>|</>");
    }
}
