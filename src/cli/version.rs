//! Version reporting.

/// Package version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The `--version` output line.
pub fn version_line() -> String {
    format!("medicare {} (api client)", VERSION)
}

/// Print the version line to `out`.
pub fn write_version<W: std::io::Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", version_line())
}
