//! Template generation for the `init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::SETTINGS_FILE_NAME;

/// Template swift-format-plugin.toml with documentation
pub const SETTINGS_TEMPLATE: &str = r#"# swift-format-plugin.toml - Settings for the swift-format lint/format runner
#
# The runner collects the Swift sources of your package targets and hands
# them to swift-format. Formatting rules themselves live in .swiftformat
# (preferred) or .swift-format next to Package.swift.

[tool]
# Executable name looked up on PATH.
# Default: "swift-format"
# name = "swift-format"

# Absolute path to the executable. Skips the PATH lookup when set.
# path = "/usr/bin/swift-format"

[invocation]
# Ask swift-format to process files in parallel.
# Default: true
# parallel = true

# Extension of the source files handed to swift-format.
# Default: "swift"
# extension = "swift"
"#;

/// Write the template into `dir`.
///
/// Returns an error if the file already exists.
pub fn generate_settings_file(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(SETTINGS_FILE_NAME);

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{SETTINGS_FILE_NAME} already exists"),
        ));
    }

    fs::write(&path, SETTINGS_TEMPLATE)?;
    Ok(path)
}
