//! Report profiles: the two prompt/template variants the service can run with.
//!
//! `Extended` is canonical: seven report sections and a labelled multi-line prompt.
//! `Compact` keeps six sections and squeezes the prompt onto a single line.
//! Both store the full submission field set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{COMPACT_REPORT_SYSTEM, EXTENDED_REPORT_SYSTEM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportProfile {
    #[default]
    Extended,
    Compact,
}

/// Sampling parameters sent with every completion request for a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ReportProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportProfile::Extended => "extended",
            ReportProfile::Compact => "compact",
        }
    }

    /// Highest numbered section heading ("N.") the report template produces.
    pub fn section_count(&self) -> u8 {
        match self {
            ReportProfile::Extended => 7,
            ReportProfile::Compact => 6,
        }
    }

    pub fn system_instructions(&self) -> &'static str {
        match self {
            ReportProfile::Extended => EXTENDED_REPORT_SYSTEM,
            ReportProfile::Compact => COMPACT_REPORT_SYSTEM,
        }
    }

    pub fn sampling(&self) -> Sampling {
        match self {
            ReportProfile::Extended => Sampling {
                temperature: 0.8,
                top_p: Some(0.95),
                max_tokens: Some(4096),
            },
            ReportProfile::Compact => Sampling {
                temperature: 0.7,
                top_p: None,
                max_tokens: None,
            },
        }
    }
}

impl fmt::Display for ReportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown report profile '{0}'")]
pub struct UnknownProfile(pub String);

impl FromStr for ReportProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extended" => Ok(ReportProfile::Extended),
            "compact" => Ok(ReportProfile::Compact),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}
