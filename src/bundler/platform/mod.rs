//! Platform-specific packaging with jpackage.
//!
//! The common jpackage invocation is the same on every platform; each
//! platform module appends its own options.
//!
//! # Supported Platforms
//!
//! | Platform | Package Types | Module |
//! |----------|--------------|---------|
//! | Linux | .rpm | [`linux`] |
//! | Windows | .msi | [`windows`] |

pub mod linux;
pub mod windows;

use std::fmt;
use std::path::Path;

use crate::bundler::{
    error::Context,
    settings::{BuildParameters, DEFAULT_JAVA_OPTIONS, TargetPlatform},
    tool::{ToolInvocation, ToolRunner},
};
use crate::error::{InstallerError, Result};

/// Installer formats produced by the bundler.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PackageType {
    /// Windows Installer package (.msi), built with WiX.
    Msi,
    /// RPM package (.rpm) for Fedora, RHEL, openSUSE and derivatives.
    Rpm,
}

impl PackageType {
    /// Returns the short name for this package type, as passed to `jpackage --type`.
    pub fn short_name(&self) -> &'static str {
        match self {
            PackageType::Msi => "msi",
            PackageType::Rpm => "rpm",
        }
    }

    /// File extension of the produced installer.
    pub fn extension(&self) -> &'static str {
        self.short_name()
    }

    /// Package type built for a target platform.
    pub fn for_platform(platform: TargetPlatform) -> Self {
        match platform {
            TargetPlatform::Windows => PackageType::Msi,
            TargetPlatform::Linux => PackageType::Rpm,
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Builds the platform-independent part of the jpackage invocation.
///
/// Pass-through arguments go last so they can override earlier options.
pub fn common_invocation(jpackage: &Path, params: &BuildParameters) -> ToolInvocation {
    let layout = params.layout();
    ToolInvocation::new("jpackage", jpackage)
        .arg("--input")
        .path_arg(&layout.staged_libs_dir())
        .arg("--dest")
        .path_arg(layout.installer_dir())
        .arg("--runtime-image")
        .path_arg(&layout.runtime_image_dir())
        .args(["--java-options", DEFAULT_JAVA_OPTIONS])
        .arg("--main-jar")
        .path_arg(params.main_jar())
        .arg("--main-class")
        .arg(params.main_class())
        .args(params.jpackage_extra().iter().cloned())
}

/// Extends `common` for the selected platform and runs jpackage.
///
/// On Windows the WiX toolchain is provisioned first.
pub async fn package<R: ToolRunner>(
    runner: &R,
    params: &BuildParameters,
    common: ToolInvocation,
) -> Result<PackageType> {
    let package_type = PackageType::for_platform(params.platform());

    let invocation = match params.platform() {
        TargetPlatform::Linux => {
            log::info!("Packaging Linux RPM installer");
            linux::rpm::invocation(common, params.license_name())
        }
        TargetPlatform::Windows => {
            log::info!("Starting packaging Windows MSI installer");
            let toolchain = windows::wix::provision(
                &params.layout().toolchain_dir(),
                params.toolchain_url(),
            )
            .await
            .map_err(InstallerError::ToolchainProvision)?;
            windows::msi::invocation(common, &toolchain)
        }
    };

    log::info!("Calling jpackage to package the {} installer", package_type);
    runner
        .run(&invocation)
        .await
        .context("running jpackage")
        .map_err(InstallerError::Packaging)?;

    Ok(package_type)
}
