use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Where the generator looks for its inputs.
///
/// Every field may be omitted from the YAML file. Relative paths are taken
/// from the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub kernel_name: String,
    pub binary: String,
    pub boot_source: String,
    pub boot_header: String,
    pub drivers: String,
    pub header_extension: String,
    pub nm: String,
    pub objdump: String,
    /// Seconds before a dump tool is killed; `None` waits forever.
    pub tool_timeout: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kernel_name: "CALADANOS".to_string(),
            binary: "build/kernel/kernel.elf".to_string(),
            boot_source: "boot/src/boot32.asm".to_string(),
            boot_header: "boot/src/header.asm".to_string(),
            drivers: "drivers".to_string(),
            header_extension: "h".to_string(),
            nm: "nm".to_string(),
            objdump: "objdump".to_string(),
            tool_timeout: Some(30),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::FileOpen(name.clone(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(name, e))
    }

    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Config("<inline>".to_string(), e))
    }
}

/// Input locations resolved against a project root.
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
    pub binary: PathBuf,
    pub boot_source: PathBuf,
    pub boot_header: PathBuf,
    pub drivers: PathBuf,
}

impl Paths {
    pub fn resolve(root: &Path, config: &Config) -> Self {
        Paths {
            root: root.to_path_buf(),
            binary: root.join(&config.binary),
            boot_source: root.join(&config.boot_source),
            boot_header: root.join(&config.boot_header),
            drivers: root.join(&config.drivers),
        }
    }

    /// `path` relative to the root with `/` separators, for provenance.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
