//! MIME detection capability.
//!
//! The registry only consults a sniffer for files that no extension rule
//! claimed. Sniffers are best effort: they return `None` instead of failing.
//!
//! - [`MagicSniffer`]: inspects the first bytes of the file
//! - [`GuessSniffer`]: guesses from the path suffix
//! - [`FallbackSniffer`]: tries several sniffers in order
//! - [`NoSniffer`]: disables the MIME tier

mod guess;
mod magic;

pub use guess::GuessSniffer;
pub use magic::MagicSniffer;

use crate::impl_case_insensitive_deserialize;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A best-effort MIME detection strategy.
pub trait MimeSniffer: Send + Sync {
    /// Detect the MIME type of the file at `path`, or `None` if unknown.
    fn sniff(&self, path: &Path) -> Option<String>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Tries each sniffer in order and returns the first detection.
pub struct FallbackSniffer {
    sniffers: Vec<Box<dyn MimeSniffer>>,
}

impl FallbackSniffer {
    pub fn new() -> Self {
        Self {
            sniffers: Vec::new(),
        }
    }

    pub fn push(mut self, sniffer: impl MimeSniffer + 'static) -> Self {
        self.sniffers.push(Box::new(sniffer));
        self
    }

    pub fn len(&self) -> usize {
        self.sniffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sniffers.is_empty()
    }
}

impl Default for FallbackSniffer {
    fn default() -> Self {
        Self::new().push(MagicSniffer::default()).push(GuessSniffer)
    }
}

impl MimeSniffer for FallbackSniffer {
    fn sniff(&self, path: &Path) -> Option<String> {
        self.sniffers.iter().find_map(|sniffer| {
            let detected = sniffer.sniff(path);
            tracing::trace!("{} sniffed {:?} as {:?}", sniffer.name(), path, detected);
            detected
        })
    }

    fn name(&self) -> &str {
        "FallbackSniffer"
    }
}

/// Never detects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSniffer;

impl MimeSniffer for NoSniffer {
    fn sniff(&self, _path: &Path) -> Option<String> {
        None
    }
}

/// Sniffer selection made once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnifferChoice {
    /// Content sniffing, then suffix guessing
    #[default]
    Auto,
    Magic,
    Guess,
    None,
}

impl_case_insensitive_deserialize!(
    SnifferChoice,
    Auto => "auto",
    Magic => "magic",
    Guess => "guess",
    None => "none"
);

impl SnifferChoice {
    pub fn build(self) -> Box<dyn MimeSniffer> {
        match self {
            SnifferChoice::Auto => Box::new(FallbackSniffer::default()),
            SnifferChoice::Magic => Box::new(MagicSniffer::default()),
            SnifferChoice::Guess => Box::new(GuessSniffer),
            SnifferChoice::None => Box::new(NoSniffer),
        }
    }
}

impl fmt::Display for SnifferChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnifferChoice::Auto => "auto",
            SnifferChoice::Magic => "magic",
            SnifferChoice::Guess => "guess",
            SnifferChoice::None => "none",
        })
    }
}

impl std::str::FromStr for SnifferChoice {
    type Err = String;

    /// Same spellings as the config file accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deserializer: StrDeserializer<'_, ValueError> = s.into_deserializer();
        Self::deserialize(deserializer).map_err(|e| e.to_string())
    }
}
