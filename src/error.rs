//! Error types for installer builds.
//!
//! Every pipeline stage reports failures through its own variant so the
//! top-level handler can say which stage broke and what to try next.

use std::path::PathBuf;
use thiserror::Error;

use crate::bundler;

/// Result type alias for installer builds
pub type Result<T> = std::result::Result<T, InstallerError>;

/// Main error type for an installer build
#[derive(Error, Debug)]
pub enum InstallerError {
    /// Required path or environment input could not be resolved
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Staging the build inputs failed
    #[error("Staging failed: {0}")]
    Staging(#[source] bundler::Error),

    /// jdeps failed or found nothing to link
    #[error("Dependency analysis failed: {0}")]
    DependencyAnalysis(#[source] bundler::Error),

    /// jlink failed
    #[error("Runtime link failed: {0}")]
    Link(#[source] bundler::Error),

    /// The WiX toolchain could not be downloaded or extracted
    #[error("Toolchain provisioning failed: {0}")]
    ToolchainProvision(#[source] bundler::Error),

    /// jpackage failed
    #[error("Packaging failed: {0}")]
    Packaging(#[source] bundler::Error),
}

/// Configuration errors, raised before any stage touches the filesystem
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `--jdk-home` nor `JAVA_HOME` was provided
    #[error("JDK home is not set. Pass --jdk-home or set JAVA_HOME")]
    MissingJdkHome,

    /// A required parameter was not provided
    #[error("Missing required parameter: {name}")]
    MissingParameter {
        /// Parameter name
        name: &'static str,
    },

    /// A path could not be made absolute
    #[error("Cannot resolve path {path}: {source}")]
    UnresolvablePath {
        /// Path as given
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A JDK tool executable was not found in its home
    #[error("{tool} not found in {home}: {reason}")]
    ToolNotFound {
        /// Tool name
        tool: &'static str,
        /// Searched JDK home
        home: PathBuf,
        /// Reason reported by the lookup
        reason: String,
    },

    /// The toolchain download URL is malformed
    #[error("Invalid toolchain URL '{url}': {source}")]
    InvalidToolchainUrl {
        /// URL as given
        url: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },
}

impl InstallerError {
    /// Name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            InstallerError::Configuration(_) => "configuration",
            InstallerError::Staging(_) => "staging",
            InstallerError::DependencyAnalysis(_) => "dependency analysis",
            InstallerError::Link(_) => "runtime link",
            InstallerError::ToolchainProvision(_) => "toolchain provisioning",
            InstallerError::Packaging(_) => "packaging",
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            InstallerError::Configuration(ConfigError::MissingJdkHome) => vec![
                "Pass --jdk-home /path/to/jdk".to_string(),
                "Or export JAVA_HOME before running the build".to_string(),
            ],
            InstallerError::Configuration(ConfigError::ToolNotFound { tool, .. }) => vec![
                format!("Check that the JDK home contains bin/{tool}"),
                "jpackage requires JDK 14 or newer".to_string(),
            ],
            InstallerError::Staging(_) => vec![
                "Build the application first so target/libs and the main JAR exist".to_string(),
                "Close programs holding files open under target/installer".to_string(),
            ],
            InstallerError::DependencyAnalysis(bundler::Error::EmptyModuleSet) => vec![
                "Verify the main JAR and its libraries were staged into target/installer/libs"
                    .to_string(),
                "Check that --jre-version matches the JARs' multi-release layout".to_string(),
            ],
            InstallerError::Link(_) => vec![
                "Check that --jre-home points at a JDK with a jmods directory".to_string(),
                "Run the build again; the installer directory is recreated on every build"
                    .to_string(),
            ],
            InstallerError::ToolchainProvision(_) => vec![
                "Check network access to github.com".to_string(),
                "Or extract WiX 3.11 binaries into target/installer/wix manually".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
