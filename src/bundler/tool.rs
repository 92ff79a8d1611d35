//! External tool invocation.
//!
//! jdeps, jlink and jpackage are black boxes driven through [`ToolRunner`].
//! The production [`ProcessRunner`] spawns real processes; tests swap in a
//! recording runner to script tool output and assert which tools ran.

use std::ffi::OsString;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::bundler::error::{Error, Result};
use crate::error::ConfigError;

/// A fully assembled external tool command line.
///
/// Built by consuming builder methods, then only read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolInvocation {
    tool: &'static str,
    program: PathBuf,
    args: Vec<String>,
    search_paths: Vec<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl ToolInvocation {
    /// Starts an invocation of `program`, reported as `tool` in logs and errors.
    pub fn new(tool: &'static str, program: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            program: program.into(),
            args: Vec::new(),
            search_paths: Vec::new(),
            working_dir: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    /// Makes `dir` visible on the child's executable search path.
    pub fn search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    /// Runs the child in `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Short tool name.
    pub fn tool(&self) -> &'static str {
        self.tool
    }

    /// Executable to run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Extra executable directories for the child process.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Directory the child runs in, if not the current one.
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Returns the value after `flag`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// `PATH` for the child: the inherited value followed by the extra directories.
    ///
    /// Returns `None` when no extra directories were requested.
    pub fn child_path_env(&self) -> Result<Option<OsString>> {
        if self.search_paths.is_empty() {
            return Ok(None);
        }
        let inherited = std::env::var_os("PATH");
        let mut paths: Vec<PathBuf> = inherited
            .as_deref()
            .map(|p| std::env::split_paths(p).collect())
            .unwrap_or_default();
        paths.extend(self.search_paths.iter().cloned());
        Ok(Some(std::env::join_paths(paths)?))
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external tools to completion.
///
/// Both methods block the pipeline until the tool exits; there is no timeout.
pub trait ToolRunner {
    /// Runs the tool with inherited stdio. A non-zero exit is an error.
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<()>> + Send;

    /// Runs the tool and returns its standard output. A non-zero exit is an error.
    fn capture(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// [`ToolRunner`] that spawns real processes with `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    fn command(invocation: &ToolInvocation) -> Result<tokio::process::Command> {
        let mut cmd = tokio::process::Command::new(invocation.program());
        cmd.args(invocation.arguments());
        if let Some(path) = invocation.child_path_env()? {
            cmd.env("PATH", path);
        }
        if let Some(dir) = invocation.working_dir() {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }
}

impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        log::debug!("{} parameters are '{}'", invocation.tool(), invocation);

        let status = Self::command(invocation)?
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: invocation.program().display().to_string(),
                error,
            })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                tool: invocation.tool().to_string(),
                code: status.code(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    async fn capture(&self, invocation: &ToolInvocation) -> Result<Vec<u8>> {
        log::debug!("{} parameters are '{}'", invocation.tool(), invocation);

        let output = Self::command(invocation)?
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: invocation.program().display().to_string(),
                error,
            })?;

        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: invocation.tool().to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output.stdout)
    }
}

/// Resolved JDK tool executables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JdkTools {
    /// `jdeps` from the JDK home
    pub jdeps: PathBuf,
    /// `jlink` from the runtime home
    pub jlink: PathBuf,
    /// `jpackage` from the JDK home
    pub jpackage: PathBuf,
}

impl JdkTools {
    /// Locates the tools under `<home>/bin`, honouring the platform's
    /// executable suffix.
    pub fn locate(jdk_home: &Path, jre_home: &Path) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            jdeps: locate_tool("jdeps", jdk_home)?,
            jlink: locate_tool("jlink", jre_home)?,
            jpackage: locate_tool("jpackage", jdk_home)?,
        })
    }
}

fn locate_tool(tool: &'static str, home: &Path) -> std::result::Result<PathBuf, ConfigError> {
    let bin = home.join("bin");
    let cwd = std::env::current_dir().map_err(|source| ConfigError::UnresolvablePath {
        path: PathBuf::from("."),
        source,
    })?;
    let path = which::which_in(tool, Some(&bin), cwd).map_err(|e| ConfigError::ToolNotFound {
        tool,
        home: home.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::debug!("Found {} at {}", tool, path.display());
    Ok(path)
}
