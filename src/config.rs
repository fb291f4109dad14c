//! Integration jobs described in JSON.
//!
//! ```json
//! { "rule": "simpson", "start": 4, "end": 6, "intervals": 4, "formula": "(x^4) + x" }
//! ```
//!
//! A job file holds one such object or an array of them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quadrature::{Integrator, Rule};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrationConfig {
    pub rule: Rule,
    pub start: f64,
    pub end: f64,
    pub intervals: usize,
    pub formula: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobFile {
    One(IntegrationConfig),
    Many(Vec<IntegrationConfig>),
}

impl IntegrationConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<IntegrationConfig>> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Vec<IntegrationConfig>> {
        let file: JobFile = serde_json::from_reader(reader)?;
        let jobs = match file {
            JobFile::One(job) => vec![job],
            JobFile::Many(jobs) => jobs,
        };
        log::debug!("loaded {} integration job(s)", jobs.len());
        Ok(jobs)
    }

    /// Parse the formula and validate the rule's parameters.
    pub fn build(&self) -> Result<Integrator> {
        Integrator::from_formula(
            self.rule,
            self.start,
            self.end,
            self.intervals,
            &self.formula,
        )
    }
}
