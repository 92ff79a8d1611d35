//! # kodegen_bundler_jvm
//!
//! Native installers for JVM applications with a minimized Java runtime.
//!
//! The build stages the application's JARs, asks jdeps which JDK modules
//! they use, links exactly those modules into a runtime image with jlink and
//! packages everything with jpackage as a Linux RPM or a Windows MSI. The
//! WiX toolchain needed for MSI output is downloaded once and cached.
//!
//! ## Usage
//!
//! ```bash
//! kodegen_bundler_jvm app.jar com.example.Main --jre-version 17 --linux
//! kodegen_bundler_jvm app.jar com.example.Main --jre-version 17 --windows -- --name MyApp
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod bundler;
pub mod cli;
pub mod error;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main types for public API
pub use bundler::{BuildParameters, BuildReport, BundledArtifact, Bundler, PackageType, TargetPlatform};
pub use cli::Args;
pub use error::{ConfigError, InstallerError, Result};
