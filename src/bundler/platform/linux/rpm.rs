//! RPM package (.rpm) options for Red Hat-based distributions.

use crate::bundler::tool::ToolInvocation;

/// Extends the common jpackage invocation for an RPM package.
///
/// The license type is only emitted when a license was given; jpackage
/// otherwise leaves the RPM `License:` tag to its own default.
pub fn invocation(common: ToolInvocation, license_name: Option<&str>) -> ToolInvocation {
    let invocation = common.args(["--type", "rpm", "--linux-shortcut"]);
    match license_name {
        Some(license) => invocation.args(["--linux-rpm-license-type", license]),
        None => invocation,
    }
}
