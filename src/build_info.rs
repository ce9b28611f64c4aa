//! Version details embedded by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `kanji-battle 0.1.0 (2026-10-19, abc1234)`
pub fn version_line() -> String {
    format!(
        "{} {} ({}, {})",
        PACKAGE_NAME, PACKAGE_VERSION, BUILD_DATE, BUILD_COMMIT
    )
}
