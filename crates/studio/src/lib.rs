#![deny(unsafe_code)]
//! Composition driver for the marbling engine.
//!
//! This crate sits between `marbling-core` (the deterministic warps) and the
//! CLI. It owns everything the core deliberately leaves out: the seeded PRNG,
//! random tool drawing, reproducible recipes, min-max normalization and PNG
//! snapshots.

pub mod draw;
pub mod normalize;
pub mod prng;
pub mod recipe;

#[cfg(feature = "png")]
pub mod snapshot;

use std::fmt;
use std::str::FromStr;

use marbling_core::MarblingError;
use serde::{Deserialize, Serialize};

pub use prng::Xorshift64;
pub use recipe::Recipe;

/// All recognized tool method names.
const METHOD_NAMES: &[&str] = &["ink-drop", "tine-line"];

/// Which tool a randomized composition repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolMethod {
    InkDrop,
    TineLine,
}

impl ToolMethod {
    /// Looks up a method by name or by its one-letter short form
    /// (`I`, `T`, case insensitive).
    ///
    /// Returns `MarblingError::UnknownTool` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, MarblingError> {
        match name.to_ascii_lowercase().as_str() {
            "i" | "ink-drop" => Ok(ToolMethod::InkDrop),
            "t" | "tine-line" => Ok(ToolMethod::TineLine),
            _ => Err(MarblingError::UnknownTool(name.to_string())),
        }
    }

    /// Canonical kebab-case name, as written in recipes.
    pub fn name(self) -> &'static str {
        match self {
            ToolMethod::InkDrop => "ink-drop",
            ToolMethod::TineLine => "tine-line",
        }
    }

    /// Returns a slice of all recognized method names.
    pub fn list_names() -> &'static [&'static str] {
        METHOD_NAMES
    }
}

impl fmt::Display for ToolMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolMethod {
    type Err = MarblingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
