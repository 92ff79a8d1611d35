//! Native installer builder for JVM applications.
//!
//! This module turns a JAR plus its libraries into a Linux RPM or Windows MSI
//! that ships a minimized Java runtime, driving the JDK tools jdeps, jlink and
//! jpackage.
//!
//! # Layout
//!
//! All paths come from a [`BuildLayout`] rooted at the build output directory:
//!
//! ```text
//! target/libs/            prebuilt libraries
//! target/installer/libs/  staged inputs
//! target/installer/jvm/   linked runtime image
//! target/installer/wix/   WiX toolchain cache (Windows, kept across builds)
//! ```
//!
//! # Supported Formats
//!
//! | Platform | Formats | Notes |
//! |----------|---------|-------|
//! | Linux | .rpm | Optional license metadata |
//! | Windows | .msi | WiX 3.11 downloaded on first build |
//!
//! # Integration
//!
//! ```no_run
//! use kodegen_bundler_jvm::bundler::{BuildParameters, Bundler, TargetPlatform};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = BuildParameters::builder()
//!     .main_jar("target/app.jar")
//!     .main_class("com.example.Main")
//!     .jdk_home("/usr/lib/jvm/java-17")
//!     .jre_version(17)
//!     .platform(TargetPlatform::Windows)
//!     .build()?;
//!
//! let report = Bundler::new(params).bundle().await?;
//! println!("{} installer(s)", report.artifacts.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
pub mod error;
pub mod platform;
pub mod runtime;
pub mod settings;
pub mod stage;
pub mod tool;
pub mod utils;

// Public re-exports
pub use builder::{BuildReport, BuildState, BundledArtifact, Bundler};
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::PackageType;
pub use platform::windows::wix::Toolchain;
pub use runtime::ModuleSet;
pub use settings::{
    BuildLayout, BuildParameters, BuildParametersBuilder, DEFAULT_JAVA_OPTIONS, DEFAULT_WIX_URL,
    TargetPlatform,
};
pub use tool::{JdkTools, ProcessRunner, ToolInvocation, ToolRunner};
