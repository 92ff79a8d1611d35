//! Command line argument parsing and validation.
//!
//! The binary takes the main JAR and class positionally, the JDK locations
//! and runtime version as options, and forwards anything after `--` to
//! jpackage untouched.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::bundler::{BuildLayout, BuildParameters, DEFAULT_WIX_URL, TargetPlatform};
use crate::error::ConfigError;

/// Build a native installer with a minimized Java runtime
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_jvm",
    version,
    about = "Build a native installer with a minimized Java runtime",
    long_about = "Stage a JVM application, link a custom runtime with the modules it uses, \
and package it as an RPM or MSI with jpackage.

Usage:
  kodegen_bundler_jvm app.jar com.example.Main --jre-version 17 --linux
  kodegen_bundler_jvm app.jar com.example.Main --jdk-home C:\\jdk-17 --jre-version 17 --windows -- --name MyApp"
)]
#[command(group(
    ArgGroup::new("platform")
        .required(true)
        .args(["windows", "linux"])
))]
pub struct Args {
    /// Main application JAR
    #[arg(value_name = "MAIN_JAR")]
    pub main_jar: PathBuf,

    /// Fully qualified main class
    #[arg(value_name = "MAIN_CLASS")]
    pub main_class: String,

    /// JDK providing jdeps and jpackage
    #[arg(long, env = "JAVA_HOME", value_name = "DIR")]
    pub jdk_home: Option<PathBuf>,

    /// JDK whose jmods are linked into the runtime image [default: JDK home]
    #[arg(long, value_name = "DIR")]
    pub jre_home: Option<PathBuf>,

    /// Major version of the runtime, e.g. 17
    #[arg(long, value_name = "VERSION")]
    pub jre_version: u32,

    /// License identifier recorded in the RPM metadata
    #[arg(long, value_name = "LICENSE")]
    pub license_name: Option<String>,

    /// Build a Windows MSI installer
    #[arg(long)]
    pub windows: bool,

    /// Build a Linux RPM package
    #[arg(long)]
    pub linux: bool,

    /// Build output directory holding `libs/` and receiving `installer/`
    #[arg(long, value_name = "DIR", default_value = "target")]
    pub target_dir: PathBuf,

    /// Download location of the WiX binaries archive
    #[arg(long, value_name = "URL", default_value = DEFAULT_WIX_URL, hide = true)]
    pub wix_url: String,

    /// Print the detected modules and runtime image after the build
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Arguments passed verbatim to jpackage
    #[arg(last = true, value_name = "JPACKAGE_ARGS")]
    pub jpackage_args: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Selected installer platform
    pub fn platform(&self) -> TargetPlatform {
        if self.windows {
            TargetPlatform::Windows
        } else {
            TargetPlatform::Linux
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.quiet { "error" } else { "info" }
    }

    /// Converts the arguments into validated build parameters
    pub fn to_parameters(&self) -> Result<BuildParameters, ConfigError> {
        let jdk_home = self
            .jdk_home
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingJdkHome)?;

        let mut builder = BuildParameters::builder()
            .main_jar(&self.main_jar)
            .main_class(&self.main_class)
            .jdk_home(jdk_home)
            .jre_version(self.jre_version)
            .license_name(self.license_name.clone())
            .platform(self.platform())
            .jpackage_extra(self.jpackage_args.clone())
            .layout(BuildLayout::new(&self.target_dir))
            .toolchain_url(&self.wix_url);
        if let Some(jre_home) = &self.jre_home {
            builder = builder.jre_home(jre_home);
        }
        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("kodegen_bundler_jvm").chain(argv.iter().copied()))
    }

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_positionals_options_and_passthrough() {
        let args = parse(&[
            "app.jar",
            "com.example.Main",
            "--jdk-home",
            "/jdk",
            "--jre-version",
            "17",
            "--linux",
            "--license-name",
            "MIT",
            "--",
            "--name",
            "Demo",
        ])
        .unwrap();

        assert_eq!(args.main_jar, PathBuf::from("app.jar"));
        assert_eq!(args.main_class, "com.example.Main");
        assert_eq!(args.platform(), TargetPlatform::Linux);
        assert_eq!(args.jpackage_args, ["--name", "Demo"]);
        assert_eq!(args.wix_url, DEFAULT_WIX_URL);

        let params = args.to_parameters().unwrap();
        assert_eq!(params.license_name(), Some("MIT"));
        assert_eq!(params.jre_home(), params.jdk_home());
        assert!(params.layout().target_dir().ends_with("target"));
    }

    #[test]
    fn positionals_and_passthrough_with_windows() {
        let args = parse(&[
            "dist/app.jar",
            "com.example.Main",
            "--jdk-home",
            "/jdk",
            "--jre-version",
            "17",
            "--windows",
            "--",
            "--name",
            "Demo",
            "--app-version",
            "2.0",
        ])
        .unwrap();

        assert_eq!(args.main_jar, PathBuf::from("dist/app.jar"));
        assert_eq!(args.main_class, "com.example.Main");
        assert_eq!(args.platform(), TargetPlatform::Windows);
        assert_eq!(args.jpackage_args, ["--name", "Demo", "--app-version", "2.0"]);
    }

    #[test]
    fn quiet_lowers_default_log_filter() {
        let base = ["a.jar", "Main", "--jre-version", "17", "--linux"];
        assert_eq!(parse(&base).unwrap().default_log_filter(), "info");

        let mut quiet = base.to_vec();
        quiet.push("-q");
        assert_eq!(parse(&quiet).unwrap().default_log_filter(), "error");
    }

    #[test]
    fn platform_flags_are_exclusive_and_required() {
        let both = parse(&["a.jar", "Main", "--jre-version", "17", "--linux", "--windows"]);
        assert!(both.is_err());
        let neither = parse(&["a.jar", "Main", "--jre-version", "17"]);
        assert!(neither.is_err());
    }

    #[test]
    fn absent_jdk_home_is_a_configuration_error() {
        let mut args = parse(&["a.jar", "Main", "--jre-version", "11", "--windows"]).unwrap();
        args.jdk_home = None;
        assert!(matches!(args.to_parameters(), Err(ConfigError::MissingJdkHome)));
    }

    #[test]
    fn explicit_jre_home_wins() {
        let args = parse(&[
            "a.jar",
            "Main",
            "--jdk-home",
            "/jdk",
            "--jre-home",
            "/jre",
            "--jre-version",
            "21",
            "--windows",
        ])
        .unwrap();
        let params = args.to_parameters().unwrap();
        assert!(params.jre_home().ends_with("jre"));
        assert_eq!(params.platform(), TargetPlatform::Windows);
    }
}
