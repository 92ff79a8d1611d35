//! Test doubles for the external tool seam.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::bundler::{Error, Result, ToolInvocation, ToolRunner};

/// Records every invocation and replays scripted tool output.
///
/// Successful runs leave behind what the real tools would: `jlink` creates
/// its `--output` directory and `jpackage` writes a small installer file of
/// the requested `--type` into `--dest`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<ToolInvocation>>,
    outputs: HashMap<&'static str, Vec<u8>>,
    failing: HashSet<&'static str>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the standard output returned for `tool`.
    pub fn with_output(mut self, tool: &'static str, stdout: &str) -> Self {
        self.outputs.insert(tool, stdout.as_bytes().to_vec());
        self
    }

    /// Makes `tool` exit with status 1.
    pub fn failing(mut self, tool: &'static str) -> Self {
        self.failing.insert(tool);
        self
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, tool: &str) -> Vec<ToolInvocation> {
        self.calls()
            .into_iter()
            .filter(|c| c.tool() == tool)
            .collect()
    }

    fn record(&self, invocation: &ToolInvocation) -> Result<()> {
        self.calls.lock().unwrap().push(invocation.clone());
        if self.failing.contains(invocation.tool()) {
            return Err(Error::ToolFailed {
                tool: invocation.tool().to_string(),
                code: Some(1),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

impl ToolRunner for RecordingRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        self.record(invocation)?;
        match invocation.tool() {
            "jlink" => {
                if let Some(output) = invocation.value_of("--output") {
                    std::fs::create_dir_all(output)?;
                }
            }
            "jpackage" => {
                if let (Some(dest), Some(kind)) =
                    (invocation.value_of("--dest"), invocation.value_of("--type"))
                {
                    std::fs::create_dir_all(dest)?;
                    std::fs::write(Path::new(dest).join(format!("app-1.0.{kind}")), b"installer")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn capture(&self, invocation: &ToolInvocation) -> Result<Vec<u8>> {
        self.record(invocation)?;
        Ok(self
            .outputs
            .get(invocation.tool())
            .cloned()
            .unwrap_or_default())
    }
}

/// Creates a JDK home whose `bin` holds placeholder jdeps, jlink and jpackage
/// executables, enough for tool lookup.
pub fn fake_jdk_home(root: &Path) -> PathBuf {
    let home = root.join("jdk");
    let bin = home.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    for tool in ["jdeps", "jlink", "jpackage"] {
        let path = bin.join(format!("{tool}{}", std::env::consts::EXE_SUFFIX));
        std::fs::write(&path, b"#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }
    home
}

/// Seeds `<root>/target/libs` with two libraries and writes `<root>/app.jar`.
///
/// Returns the build output root and the main JAR.
pub fn seed_build_inputs(root: &Path) -> (PathBuf, PathBuf) {
    let target = root.join("target");
    let libs = target.join("libs");
    std::fs::create_dir_all(&libs).unwrap();
    std::fs::write(libs.join("commons-lang3.jar"), b"lib").unwrap();
    std::fs::write(libs.join("slf4j-api.jar"), b"lib").unwrap();
    let jar = root.join("app.jar");
    std::fs::write(&jar, b"app").unwrap();
    (target, jar)
}
