use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceStyle {
    Letters,  // `P` for white pawn, `p` for black pawn, etc.
    Unicode,
}

impl FromStr for PieceStyle {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "letters" => Ok(PieceStyle::Letters),
            "unicode" => Ok(PieceStyle::Unicode),
            _ => Err(anyhow::anyhow!("Unknown piece style '{s}'")),
        }
    }
}

// Missing fields fall back to defaults, so an empty file is a valid config.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub pieces: PieceStyle,
    pub colored: bool,
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            pieces: PieceStyle::Letters,
            colored: true,
            log_level: "warn".to_owned(),
        }
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<ConsoleConfig> {
    if contents.trim().is_empty() {
        return Ok(ConsoleConfig::default());
    }
    serde_yaml::from_str(contents).context("Parsing config file")
}

pub fn read_config_file(path: &Path) -> anyhow::Result<ConsoleConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Reading config file '{}'", path.display()))?;
    parse_config(&contents)
}
