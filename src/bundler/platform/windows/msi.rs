//! MSI installer options for Windows.

use super::wix::Toolchain;
use crate::bundler::tool::ToolInvocation;

/// Installer UX flags: directory chooser, desktop shortcut, shortcut prompt,
/// per-user install option and start-menu entry.
pub const MSI_UX_FLAGS: [&str; 5] = [
    "--win-dir-chooser",
    "--win-shortcut",
    "--win-shortcut-prompt",
    "--win-per-user-install",
    "--win-menu",
];

/// Extends the common jpackage invocation for an MSI installer.
///
/// The WiX binaries are put on the child's `PATH`; the parent process
/// environment is left alone.
pub fn invocation(common: ToolInvocation, toolchain: &Toolchain) -> ToolInvocation {
    log::info!("Adding WiX toolset to PATH for jpackage");
    common
        .args(["--type", "msi"])
        .args(MSI_UX_FLAGS)
        .search_path(toolchain.bin_dir())
}
