//! Windows bundling support for MSI installers.
//!
//! jpackage drives WiX 3 to produce `.msi` files. WiX is not expected to be
//! installed: [`wix`] downloads it on first use and caches it next to the
//! installer output.
//!
//! # Build Requirements
//!
//! | Format | Required Tools | Download |
//! |--------|----------------|----------|
//! | .msi | WiX 3.x (`candle.exe`, `light.exe`) | Auto-downloaded by bundler |
//!
//! # Output Location
//!
//! The installer lands in the installer root, e.g. `target/installer/MyApp-1.0.msi`.

pub mod msi;
pub mod wix;
