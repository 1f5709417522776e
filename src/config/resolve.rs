//! swift-format configuration discovery

use std::path::{Path, PathBuf};

/// Preferred configuration file name.
pub const PRIMARY_CONFIG_FILE: &str = ".swiftformat";

/// Fallback configuration file name.
pub const SECONDARY_CONFIG_FILE: &str = ".swift-format";

/// Recognized names, in preference order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [PRIMARY_CONFIG_FILE, SECONDARY_CONFIG_FILE];

pub const MISSING_CONFIGURATION_WARNING: &str =
    "No .swiftformat or .swift-format configuration found. Using default swift-format rules.";

/// Find the swift-format configuration that applies to `root`.
///
/// `.swiftformat` wins over `.swift-format`. Existence is the only check,
/// the content is left to swift-format. Nothing is cached: every call looks
/// at the filesystem again.
pub fn resolve_configuration(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.exists())
}

/// Pick the configuration out of an explicit list of input files.
///
/// Used when there is no package root to search, only the files a build
/// target declares. Preference order is the same as [`resolve_configuration`].
pub fn resolve_from_inputs<'a, I>(inputs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut secondary = None;

    for path in inputs {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(PRIMARY_CONFIG_FILE) => return Some(path.to_path_buf()),
            Some(SECONDARY_CONFIG_FILE) if secondary.is_none() => {
                secondary = Some(path.to_path_buf());
            }
            _ => {}
        }
    }

    secondary
}
