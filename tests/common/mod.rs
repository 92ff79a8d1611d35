//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kodegen_bundler_jvm::bundler::{Error, Result, ToolInvocation, ToolRunner};

/// Records invocations, replays scripted stdout and mimics tool side effects.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<ToolInvocation>>,
    outputs: HashMap<&'static str, Vec<u8>>,
    failing: HashSet<&'static str>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, tool: &'static str, stdout: &str) -> Self {
        self.outputs.insert(tool, stdout.as_bytes().to_vec());
        self
    }

    pub fn failing(mut self, tool: &'static str) -> Self {
        self.failing.insert(tool);
        self
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, tool: &str) -> Vec<ToolInvocation> {
        self.calls().into_iter().filter(|c| c.tool() == tool).collect()
    }

    fn record(&self, invocation: &ToolInvocation) -> Result<()> {
        self.calls.lock().unwrap().push(invocation.clone());
        if self.failing.contains(invocation.tool()) {
            return Err(Error::ToolFailed {
                tool: invocation.tool().to_string(),
                code: Some(1),
                stderr: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

impl ToolRunner for ScriptedRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        self.record(invocation)?;
        if invocation.tool() == "jlink" {
            if let Some(output) = invocation.value_of("--output") {
                std::fs::create_dir_all(output)?;
            }
        }
        Ok(())
    }

    async fn capture(&self, invocation: &ToolInvocation) -> Result<Vec<u8>> {
        self.record(invocation)?;
        Ok(self.outputs.get(invocation.tool()).cloned().unwrap_or_default())
    }
}

/// Writes an executable file; on unix the content is a shell script.
pub fn write_executable(path: &Path, script: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, script).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// A JDK home with placeholder tools that exit successfully.
pub fn placeholder_jdk(root: &Path) -> PathBuf {
    let home = root.join("jdk");
    for tool in ["jdeps", "jlink", "jpackage"] {
        let name = format!("{tool}{}", std::env::consts::EXE_SUFFIX);
        write_executable(&home.join("bin").join(name), "#!/bin/sh\nexit 0\n");
    }
    home
}

/// Build output root with `libs/` populated, plus the main JAR next to it.
pub struct BuildInputs {
    pub target: PathBuf,
    pub main_jar: PathBuf,
}

pub fn seed_inputs(root: &Path) -> BuildInputs {
    let target = root.join("target");
    let libs = target.join("libs");
    std::fs::create_dir_all(&libs).unwrap();
    std::fs::write(libs.join("guava.jar"), b"lib").unwrap();
    std::fs::write(libs.join("jackson-core.jar"), b"lib").unwrap();
    let main_jar = root.join("app.jar");
    std::fs::write(&main_jar, b"app").unwrap();
    BuildInputs { target, main_jar }
}

/// Minimal WiX binaries archive.
pub fn wix_archive() -> Vec<u8> {
    use std::io::Write;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for name in ["candle.exe", "light.exe", "doc/LICENSE.txt"] {
        writer
            .start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(name.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
