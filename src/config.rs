/// Module for the configuration handling of the command line tool.
use std::fs::File;
use std::path::PathBuf;

use super::*;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Configuration {
    #[serde(default)]
    pub output: OutputConfiguration,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct OutputConfiguration {
    #[serde(default)]
    pub format: OutputFormat,
    /// Also print the raw payload of decoded links as hex.
    #[serde(default)]
    pub hex_dump: bool,
}

impl Default for OutputConfiguration {
    fn default() -> Self {
        OutputConfiguration {
            format: OutputFormat::Debug,
            hex_dump: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Debug,
    Yaml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Debug
    }
}

pub fn read_configuration(path: &PathBuf) -> Result<Configuration> {
    let f = File::open(path)?;
    let configuration = serde_yaml::from_reader(f)?;
    Ok(configuration)
}
