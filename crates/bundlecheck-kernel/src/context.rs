//! Build context detection.
//!
//! The context is resolved once per run. Explicit overrides win, then the
//! environment, then the config file.

use bundlecheck_types::{BuildContext, Platform};

/// Set to `true` by CI providers.
pub const CI_ENV: &str = "CI";

/// Marks a frozen, distributable build.
pub const FROZEN_ENV: &str = "BUNDLECHECK_FROZEN";

/// Values supplied on the command line, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextOverrides {
    pub frozen: Option<bool>,
    pub ci: Option<bool>,
    pub platform: Option<Platform>,
}

/// Detect the context from the process environment.
pub fn detect(overrides: ContextOverrides, config_frozen: bool) -> BuildContext {
    detect_with(overrides, config_frozen, |key| std::env::var(key).ok())
}

/// Detect the context using `env` to look up variables.
pub fn detect_with<F>(overrides: ContextOverrides, config_frozen: bool, env: F) -> BuildContext
where
    F: Fn(&str) -> Option<String>,
{
    let platform = overrides.platform.unwrap_or_else(Platform::current);
    let ci = overrides
        .ci
        .unwrap_or_else(|| env(CI_ENV).is_some_and(|v| truthy(&v)));
    let frozen = overrides.frozen.unwrap_or_else(|| {
        env(FROZEN_ENV)
            .map(|v| truthy(&v))
            .unwrap_or(config_frozen)
    });

    let ctx = BuildContext::new(platform).with_ci(ci).with_frozen(frozen);
    tracing::debug!(?ctx, "resolved build context");
    ctx
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1")
}
