//! bundlecheck command line.
//!
//! Resolves configuration and build context, runs the standard suite once and
//! renders the report. The exit code is 0 when no check failed, 1 otherwise.

pub mod report;

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bundlecheck_kernel::context::{self, ContextOverrides};
use bundlecheck_kernel::{HarnessConfig, Runner};
use bundlecheck_types::Platform;
use clap::Parser;

use crate::report::TextReport;

/// Verify that a packaged build is complete and loadable.
#[derive(Debug, Clone, Parser)]
#[command(name = "bundlecheck", version, about)]
pub struct Cli {
    /// Configuration file (default: $BUNDLECHECK_CONFIG, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Bundle root: install prefix on Linux, the .app on macOS
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Application name the bundle is built for
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Treat the build as frozen and distributable
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub frozen: Option<bool>,

    /// Running under continuous integration (default: $CI)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub ci: Option<bool>,

    /// Target platform: macos, linux or other (default: host)
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<Platform>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log harness progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ContextOverrides {
        ContextOverrides {
            frozen: self.frozen,
            ci: self.ci,
            platform: self.platform,
        }
    }

    /// Apply command line values on top of the loaded configuration.
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(root) = &self.root {
            config.bundle_root = root.clone();
        }
        if let Some(app_name) = &self.app_name {
            config.app_name = app_name.clone();
        }
    }
}

/// Run the suite and write the report to `out`. Returns the exit code.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    let mut config =
        HarnessConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);

    let ctx = context::detect(cli.overrides(), config.frozen);
    tracing::info!(
        root = %config.bundle_root.display(),
        app = %config.app_name,
        platform = %ctx.platform,
        frozen = ctx.frozen,
        ci = ctx.ci,
        "checking bundle"
    );

    let report = Runner::standard(&config, ctx).run(&ctx);

    if cli.json {
        report::render_json(&report, out).context("failed to write report")?;
    } else {
        let color = !cli.no_color && std::io::stdout().is_terminal();
        TextReport::new(color)
            .render(&report, out)
            .context("failed to write report")?;
    }
    out.flush().context("failed to write report")?;

    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_flags_mean_true() {
        let cli = Cli::try_parse_from(["bundlecheck", "--frozen", "--ci"]).expect("parse");
        assert_eq!(cli.frozen, Some(true));
        assert_eq!(cli.ci, Some(true));
    }

    #[test]
    fn flags_accept_explicit_values() {
        let cli = Cli::try_parse_from(["bundlecheck", "--ci", "false", "--platform", "darwin"])
            .expect("parse");
        assert_eq!(cli.ci, Some(false));
        assert_eq!(cli.frozen, None);
        assert_eq!(cli.platform, Some(Platform::MacOs));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(Cli::try_parse_from(["bundlecheck", "--platform", "beos"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from(["bundlecheck", "--root", "/opt/demo", "--app-name", "demo"])
            .expect("parse");
        let mut config = HarnessConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.bundle_root, PathBuf::from("/opt/demo"));
        assert_eq!(config.app_name, "demo");
    }
}
