pub mod config;
pub mod error;
pub mod parser;
pub mod render;

pub use config::Config;
pub use error::Error;
pub use parser::MachLangParser;
pub use render::Style;
