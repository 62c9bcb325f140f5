//! Link scope: the whole board or one job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::JobId;

const GLOBAL: &str = "global";

/// Access boundary of a shareable link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// All jobs.
    Global,
    /// A single job posting.
    Job(JobId),
}

impl LinkScope {
    /// Return the job id for job-scoped links.
    pub fn job_id(&self) -> Option<JobId> {
        match self {
            Self::Global => None,
            Self::Job(id) => Some(*id),
        }
    }

    /// Build a scope from an optional job id; `None` means global.
    pub fn from_job(job: Option<JobId>) -> Self {
        job.map_or(Self::Global, Self::Job)
    }

    /// Value used for the `scope` query parameter.
    pub fn query_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LinkScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "{GLOBAL}"),
            Self::Job(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for LinkScope {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(GLOBAL) {
            return Ok(Self::Global);
        }
        s.parse::<JobId>().map(Self::Job)
    }
}

impl Serialize for LinkScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Global => serializer.serialize_str(GLOBAL),
            Self::Job(id) => id.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScope {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for LinkScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawScope::deserialize(deserializer)? {
            RawScope::Number(n) => Ok(Self::Job(JobId(n))),
            RawScope::Text(s) if s.trim().is_empty() => Ok(Self::Global),
            RawScope::Text(s) => s
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid link scope '{s}'"))),
        }
    }
}
