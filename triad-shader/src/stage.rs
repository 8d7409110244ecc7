//! Shading stage tags.
//!
//! The stage is always supplied by the caller alongside the source. Nothing in
//! this crate tries to guess it from the shader text.

use crate::error::DialectError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingStage {
    Vertex,
    Fragment,
}

impl ShadingStage {
    pub fn is_fragment(self) -> bool {
        self == ShadingStage::Fragment
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShadingStage::Vertex => "vertex",
            ShadingStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShadingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShadingStage {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertex" | "vert" | "vs" => Ok(ShadingStage::Vertex),
            "fragment" | "frag" | "fs" | "pixel" => Ok(ShadingStage::Fragment),
            _ => Err(DialectError::UnknownStage(s.to_string())),
        }
    }
}
