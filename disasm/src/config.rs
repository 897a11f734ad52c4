use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::{error::Error, render::Style};

/// Options read from a YAML file, e.g.
///
/// ```yaml
/// reg_names: true
/// dump: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reg_names: bool,
    pub dump: bool,
}

impl Config {
    pub fn load(file: Option<&str>) -> Result<Self, Error> {
        match file {
            Some(fname) => {
                let file =
                    File::open(fname).map_err(|err| Error::FileOpen(fname.to_string(), err))?;
                serde_yaml::from_reader(BufReader::new(file))
                    .map_err(|err| Error::Config(fname.to_string(), err))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn style(&self) -> Style {
        Style {
            reg_names: self.reg_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml() {
        let cfg: Config = serde_yaml::from_str("reg_names: true\n").unwrap();
        assert_eq!(
            cfg,
            Config {
                reg_names: true,
                dump: false
            }
        );
        assert!(cfg.style().reg_names);
    }

    #[test]
    fn test_no_file() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("mipsdis-cfg-{}.yml", std::process::id()));
        std::fs::write(&path, "dump: true\nreg_names: false\n").unwrap();
        let cfg = Config::load(path.to_str());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            cfg.unwrap(),
            Config {
                reg_names: false,
                dump: true
            }
        );
    }

    #[test]
    fn test_bad_yaml() {
        let path = std::env::temp_dir().join(format!("mipsdis-bad-{}.yml", std::process::id()));
        std::fs::write(&path, "reg_names: [1, 2\n").unwrap();
        let cfg = Config::load(path.to_str());
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(cfg, Err(Error::Config(..))));
    }
}
