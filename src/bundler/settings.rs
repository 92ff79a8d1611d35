//! Configuration structures for installer builds.
//!
//! [`BuildParameters`] carries everything a build needs and is immutable
//! once built. [`BuildLayout`] is the explicit path configuration that every
//! stage receives instead of reaching for hardcoded locations, which lets
//! tests run whole builds inside temporary directories.

use std::fmt;
use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;

use crate::error::ConfigError;

/// Fixed heap option passed to the packaged launcher.
pub const DEFAULT_JAVA_OPTIONS: &str = "-Xmx4096m";

/// WiX 3.11 binaries used by jpackage to emit MSI installers.
pub const DEFAULT_WIX_URL: &str =
    "https://github.com/wixtoolset/wix3/releases/download/wix3112rtm/wix311-binaries.zip";

/// Installer platform selected on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TargetPlatform {
    /// Windows MSI installer, requires the WiX toolchain.
    Windows,
    /// Linux RPM package.
    Linux,
}

impl TargetPlatform {
    /// Returns the platform the current binary was compiled for, if supported.
    pub fn host() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else {
            None
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetPlatform::Windows => write!(f, "windows"),
            TargetPlatform::Linux => write!(f, "linux"),
        }
    }
}

/// Directory layout for one build.
///
/// ```text
/// <target>/libs           prebuilt libraries (input)
/// <target>/installer      installer root, jpackage --dest
///     libs/               staged libraries, rebuilt every build
///     jvm/                jlink runtime image, rebuilt every build
///     wix/                WiX toolchain cache, kept across builds
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildLayout {
    target_dir: PathBuf,
    installer_dir: PathBuf,
}

impl BuildLayout {
    /// Name of the toolchain cache directory inside the installer root.
    pub const TOOLCHAIN_DIR_NAME: &'static str = "wix";

    /// Creates a layout rooted at the given build output directory.
    pub fn new<P: AsRef<Path>>(target_dir: P) -> Self {
        let target_dir = target_dir.as_ref().to_path_buf();
        let installer_dir = target_dir.join("installer");
        Self {
            target_dir,
            installer_dir,
        }
    }

    /// Build output root.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Directory holding the previously built libraries.
    pub fn libs_source_dir(&self) -> PathBuf {
        self.target_dir.join("libs")
    }

    /// Installer output root, wiped (except the toolchain cache) every build.
    pub fn installer_dir(&self) -> &Path {
        &self.installer_dir
    }

    /// Staged libraries read by jdeps and jpackage.
    pub fn staged_libs_dir(&self) -> PathBuf {
        self.installer_dir.join("libs")
    }

    /// Output directory of jlink.
    pub fn runtime_image_dir(&self) -> PathBuf {
        self.installer_dir.join("jvm")
    }

    /// Persistent WiX toolchain cache.
    pub fn toolchain_dir(&self) -> PathBuf {
        self.installer_dir.join(Self::TOOLCHAIN_DIR_NAME)
    }
}

impl Default for BuildLayout {
    fn default() -> Self {
        Self::new("target")
    }
}

/// Immutable inputs of an installer build.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_jvm::bundler::{BuildParameters, TargetPlatform};
///
/// # fn example() -> Result<(), kodegen_bundler_jvm::error::ConfigError> {
/// let params = BuildParameters::builder()
///     .main_jar("target/app.jar")
///     .main_class("com.example.Main")
///     .jdk_home("/usr/lib/jvm/java-17")
///     .jre_version(17)
///     .platform(TargetPlatform::Linux)
///     .build()?;
/// assert_eq!(params.jre_home(), params.jdk_home());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BuildParameters {
    main_jar: PathBuf,
    main_class: String,
    jdk_home: PathBuf,
    jre_home: PathBuf,
    jre_version: u32,
    license_name: Option<String>,
    platform: TargetPlatform,
    jpackage_extra: Vec<String>,
    layout: BuildLayout,
    toolchain_url: String,
}

impl BuildParameters {
    /// Starts a new parameter builder.
    pub fn builder() -> BuildParametersBuilder {
        BuildParametersBuilder::default()
    }

    /// Main application JAR.
    pub fn main_jar(&self) -> &Path {
        &self.main_jar
    }

    /// Fully qualified main class.
    pub fn main_class(&self) -> &str {
        &self.main_class
    }

    /// JDK providing jdeps and jpackage.
    pub fn jdk_home(&self) -> &Path {
        &self.jdk_home
    }

    /// JDK/JRE whose `jmods` the runtime image is linked from.
    pub fn jre_home(&self) -> &Path {
        &self.jre_home
    }

    /// Runtime major version, used as jdeps `--multi-release`.
    pub fn jre_version(&self) -> u32 {
        self.jre_version
    }

    /// SPDX license identifier for the RPM metadata.
    pub fn license_name(&self) -> Option<&str> {
        self.license_name.as_deref()
    }

    /// Installer platform.
    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    /// Arguments appended verbatim to the jpackage invocation.
    pub fn jpackage_extra(&self) -> &[String] {
        &self.jpackage_extra
    }

    /// Directory layout of this build.
    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Where the WiX toolchain is downloaded from when the cache is empty.
    pub fn toolchain_url(&self) -> &str {
        &self.toolchain_url
    }
}

/// Builder for [`BuildParameters`].
#[derive(Debug, Default)]
pub struct BuildParametersBuilder {
    main_jar: Option<PathBuf>,
    main_class: Option<String>,
    jdk_home: Option<PathBuf>,
    jre_home: Option<PathBuf>,
    jre_version: Option<u32>,
    license_name: Option<String>,
    platform: Option<TargetPlatform>,
    jpackage_extra: Vec<String>,
    layout: Option<BuildLayout>,
    toolchain_url: Option<String>,
}

impl BuildParametersBuilder {
    /// Sets the main application JAR. Required.
    pub fn main_jar<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.main_jar = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the entry point class. Required.
    pub fn main_class(mut self, class: impl Into<String>) -> Self {
        self.main_class = Some(class.into());
        self
    }

    /// Sets the JDK home. Required.
    pub fn jdk_home<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.jdk_home = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the runtime home for jlink.
    ///
    /// Default: the JDK home
    pub fn jre_home<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.jre_home = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the runtime major version. Required.
    pub fn jre_version(mut self, version: u32) -> Self {
        self.jre_version = Some(version);
        self
    }

    /// Sets the license identifier used for RPM metadata.
    pub fn license_name(mut self, license: Option<String>) -> Self {
        self.license_name = license;
        self
    }

    /// Sets the installer platform. Required.
    pub fn platform(mut self, platform: TargetPlatform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets pass-through jpackage arguments.
    pub fn jpackage_extra(mut self, args: Vec<String>) -> Self {
        self.jpackage_extra = args;
        self
    }

    /// Sets the directory layout.
    ///
    /// Default: [`BuildLayout::default()`] (relative `target`)
    pub fn layout(mut self, layout: BuildLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Overrides the WiX download location.
    ///
    /// Default: [`DEFAULT_WIX_URL`]
    pub fn toolchain_url(mut self, url: impl Into<String>) -> Self {
        self.toolchain_url = Some(url.into());
        self
    }

    /// Validates and builds the parameters.
    ///
    /// All paths are made absolute against the current directory.
    pub fn build(self) -> Result<BuildParameters, ConfigError> {
        let main_jar = self.main_jar.ok_or(ConfigError::MissingParameter {
            name: "main jar",
        })?;
        let main_class = self
            .main_class
            .filter(|class| !class.trim().is_empty())
            .ok_or(ConfigError::MissingParameter { name: "main class" })?;
        let jdk_home = self.jdk_home.ok_or(ConfigError::MissingJdkHome)?;
        let jre_version = self.jre_version.ok_or(ConfigError::MissingParameter {
            name: "runtime version",
        })?;
        let platform = self.platform.ok_or(ConfigError::MissingParameter {
            name: "platform",
        })?;

        let toolchain_url = self
            .toolchain_url
            .unwrap_or_else(|| DEFAULT_WIX_URL.to_string());
        url::Url::parse(&toolchain_url).map_err(|source| ConfigError::InvalidToolchainUrl {
            url: toolchain_url.clone(),
            source,
        })?;

        let jdk_home = absolute(&jdk_home)?;
        let jre_home = match self.jre_home {
            Some(path) => absolute(&path)?,
            None => jdk_home.clone(),
        };
        let layout = self.layout.unwrap_or_default();
        let layout = BuildLayout::new(absolute(layout.target_dir())?);

        Ok(BuildParameters {
            main_jar: absolute(&main_jar)?,
            main_class,
            jdk_home,
            jre_home,
            jre_version,
            license_name: self.license_name.filter(|l| !l.is_empty()),
            platform,
            jpackage_extra: self.jpackage_extra,
            layout,
            toolchain_url,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(|source| ConfigError::UnresolvablePath {
            path: path.to_path_buf(),
            source,
        })
}
