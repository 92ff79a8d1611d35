//! Linux bundling support.
//!
//! jpackage builds `.rpm` packages natively on Linux with `rpm-build`
//! installed; see [`rpm`] for the options this crate passes.
//!
//! # Output Location
//!
//! The package lands in the installer root, e.g.
//! `target/installer/myapp-1.0-1.x86_64.rpm`.

pub mod rpm;
