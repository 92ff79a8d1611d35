//! Build orchestration.
//!
//! The [`Bundler`] runs the pipeline stages in a fixed order:
//!
//! 1. Stage the prebuilt libraries and the main JAR
//! 2. Detect the required modules with jdeps
//! 3. Link a minimized runtime image with jlink
//! 4. Package the installer with jpackage (provisioning WiX on Windows)
//! 5. Report the produced installers with size and checksum
//!
//! The first failing stage ends the build; nothing after it runs and no
//! partially written output is rolled back. The next build wipes it.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_jvm::bundler::{BuildParameters, Bundler, TargetPlatform};
//!
//! # async fn example() -> kodegen_bundler_jvm::error::Result<()> {
//! let params = BuildParameters::builder()
//!     .main_jar("target/app.jar")
//!     .main_class("com.example.Main")
//!     .jdk_home("/usr/lib/jvm/java-17")
//!     .jre_version(17)
//!     .platform(TargetPlatform::Linux)
//!     .build()?;
//!
//! let mut bundler = Bundler::new(params);
//! let report = bundler.bundle().await?;
//!
//! for artifact in &report.artifacts {
//!     println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
//!     println!("SHA256: {}", artifact.checksum);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::bundler::{
    error::ErrorExt,
    platform::{self, PackageType},
    runtime::{ModuleSet, jdeps, jlink},
    settings::{BuildParameters, TargetPlatform},
    stage,
    tool::{JdkTools, ProcessRunner, ToolRunner},
    utils::fs,
};
use crate::error::{InstallerError, Result};

/// Pipeline progress of one build.
///
/// Moves strictly forward; `Failed` is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildState {
    /// Nothing has run yet
    Start,
    /// Staging area rebuilt
    Staged,
    /// jdeps reported a non-empty module set
    ModulesDetected,
    /// Runtime image linked
    RuntimeLinked,
    /// jpackage finished
    Packaged,
    /// Artifacts collected
    Done,
    /// A stage failed
    Failed,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildState::Start => "start",
            BuildState::Staged => "staged",
            BuildState::ModulesDetected => "modules detected",
            BuildState::RuntimeLinked => "runtime linked",
            BuildState::Packaged => "packaged",
            BuildState::Done => "done",
            BuildState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// An installer produced by the build.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Installer format.
    pub package_type: PackageType,

    /// Location of the installer file.
    pub path: PathBuf,

    /// Size of the installer in bytes.
    pub size: u64,

    /// SHA-256 checksum of the installer, hex encoded.
    ///
    /// This can be published alongside the artifact for users to verify downloads.
    pub checksum: String,
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Modules linked into the runtime image.
    pub modules: ModuleSet,
    /// The linked runtime image.
    pub runtime_image: PathBuf,
    /// Installers found in the installer root after packaging.
    pub artifacts: Vec<BundledArtifact>,
}

/// Main build orchestrator.
///
/// Generic over the [`ToolRunner`] so tests can script the JDK tools.
pub struct Bundler<R = ProcessRunner> {
    params: BuildParameters,
    runner: R,
    state: BuildState,
}

impl<R> fmt::Debug for Bundler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundler")
            .field("params", &self.params)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Bundler<ProcessRunner> {
    /// Creates a bundler that runs the real JDK tools.
    pub fn new(params: BuildParameters) -> Self {
        Self::with_runner(params, ProcessRunner)
    }
}

impl<R: ToolRunner> Bundler<R> {
    /// Creates a bundler using `runner` for every external tool.
    pub fn with_runner(params: BuildParameters, runner: R) -> Self {
        Self {
            params,
            runner,
            state: BuildState::Start,
        }
    }

    /// Returns the tool runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Returns how far the last build got.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Runs the whole pipeline.
    ///
    /// On error the state is [`BuildState::Failed`] and the error names the
    /// stage that broke.
    pub async fn bundle(&mut self) -> Result<BuildReport> {
        self.state = BuildState::Start;
        match self.run_stages().await {
            Ok(report) => Ok(report),
            Err(e) => {
                log::debug!("Build stopped during {} after reaching '{}'", e.stage(), self.state);
                self.state = BuildState::Failed;
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self) -> Result<BuildReport> {
        let params = &self.params;
        log::info!("JDK home is {}", params.jdk_home().display());
        log::info!("JRE home is {}", params.jre_home().display());

        let tools = JdkTools::locate(params.jdk_home(), params.jre_home())?;

        if TargetPlatform::host() != Some(params.platform()) {
            log::warn!(
                "Target platform {} differs from the host; jpackage cannot cross-package",
                params.platform()
            );
        }

        let staged = stage::prepare(params)
            .await
            .map_err(InstallerError::Staging)?;
        self.state = BuildState::Staged;

        let modules = jdeps::detect_modules(&self.runner, &tools.jdeps, params.jre_version(), &staged)
            .await
            .map_err(InstallerError::DependencyAnalysis)?;
        self.state = BuildState::ModulesDetected;

        let runtime_image = params.layout().runtime_image_dir();
        jlink::link_runtime(&self.runner, &tools.jlink, params.jre_home(), &modules, &runtime_image)
            .await
            .map_err(InstallerError::Link)?;
        self.state = BuildState::RuntimeLinked;

        let common = platform::common_invocation(&tools.jpackage, params);
        let package_type = platform::package(&self.runner, params, common).await?;
        self.state = BuildState::Packaged;

        let artifacts = collect_artifacts(params.layout().installer_dir(), package_type)
            .await
            .map_err(InstallerError::Packaging)?;
        if artifacts.is_empty() {
            log::warn!(
                "jpackage succeeded but no .{} file was found in {}",
                package_type.extension(),
                params.layout().installer_dir().display()
            );
        }
        self.state = BuildState::Done;

        log::info!("Finished creating installer");
        Ok(BuildReport {
            modules,
            runtime_image,
            artifacts,
        })
    }
}

/// Collects the installers of `package_type` in `installer_dir`.
async fn collect_artifacts(
    installer_dir: &Path,
    package_type: PackageType,
) -> crate::bundler::Result<Vec<BundledArtifact>> {
    let mut artifacts = Vec::new();
    for path in fs::list_dir_sorted(installer_dir).await? {
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(package_type.extension()));
        if !matches || !path.is_file() {
            continue;
        }

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;
        log::debug!("Found installer {} ({} bytes)", path.display(), size);

        artifacts.push(BundledArtifact {
            package_type,
            path,
            size,
            checksum,
        });
    }
    Ok(artifacts)
}

/// Calculates the SHA-256 checksum of a file, reading it in 8KB chunks.
async fn calculate_sha256(path: &Path) -> crate::bundler::Result<String> {
    use sha2::{Digest, Sha256};
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
