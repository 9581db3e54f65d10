//! Build context: the environment facts every check consults.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Host platform, as far as bundle layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a platform name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform '{0}' (expected macos, linux or other)")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            "other" => Ok(Platform::Other),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// Immutable facts about the build under test.
///
/// Resolved once at harness start and passed by value into every check,
/// so checks never query the environment themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    /// A packaged, distributable build carrying its own trust store and
    /// highlighting engine.
    pub frozen: bool,
    /// Running under continuous integration.
    pub ci: bool,
    pub platform: Platform,
}

impl BuildContext {
    pub fn new(platform: Platform) -> Self {
        Self {
            frozen: false,
            ci: false,
            platform,
        }
    }

    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_aliases() {
        assert_eq!("darwin".parse::<Platform>(), Ok(Platform::MacOs));
        assert_eq!("Linux".parse::<Platform>(), Ok(Platform::Linux));
        assert_eq!("other".parse::<Platform>(), Ok(Platform::Other));
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn platform_display_round_trips() {
        for p in [Platform::MacOs, Platform::Linux, Platform::Other] {
            assert_eq!(p.to_string().parse::<Platform>(), Ok(p));
        }
    }

    #[test]
    fn context_builders() {
        let ctx = BuildContext::new(Platform::Linux).with_ci(true);
        assert!(ctx.ci);
        assert!(!ctx.frozen);
        assert_eq!(ctx.platform, Platform::Linux);
    }

    #[test]
    fn context_serializes_platform_lowercase() {
        let ctx = BuildContext::new(Platform::MacOs).with_frozen(true);
        let json = serde_json::to_value(ctx).expect("serialize");
        assert_eq!(json["platform"], "macos");
        assert_eq!(json["frozen"], true);
    }
}
