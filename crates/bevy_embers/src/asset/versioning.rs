//! Asset format version tracking and compatibility validation.

// every asset format version, oldest first
// "0.0": initial format
// "0.1": added affectors
const VERSIONS: &[&str] = &["0.0", "0.1"];

// versions whose upgrade from the previous entry requires manual migration
const BREAKING: &[&str] = &[];

/// The result of validating an asset's `embers_version` against the current
/// format version.
pub enum VersionStatus {
    /// The asset version matches the current format version.
    Current,
    /// The asset version is older but can be auto-upgraded.
    Outdated {
        /// The version found in the asset.
        found: String,
        /// The current format version.
        current: &'static str,
    },
    /// The asset version is older and has breaking changes that prevent auto-upgrade.
    Incompatible {
        /// The version found in the asset.
        found: String,
        /// The current format version.
        current: &'static str,
    },
    /// The asset version is not recognized (might be from a newer Embers).
    Unknown,
}

/// Returns the current asset format version string.
pub fn current_format_version() -> &'static str {
    VERSIONS[VERSIONS.len() - 1]
}

/// Returns `true` if an asset can be automatically upgraded from one version
/// to another without any breaking changes in between.
pub fn can_auto_upgrade(from: &str, to: &str) -> bool {
    let Some(from_idx) = VERSIONS.iter().position(|v| *v == from) else {
        return false;
    };
    let Some(to_idx) = VERSIONS.iter().position(|v| *v == to) else {
        return false;
    };
    from_idx < to_idx
        && VERSIONS[from_idx + 1..=to_idx]
            .iter()
            .all(|v| !BREAKING.contains(v))
}

/// Validates a version string against the current format version.
pub fn validate_version(version: &str) -> VersionStatus {
    let current = current_format_version();
    if version == current {
        VersionStatus::Current
    } else if !VERSIONS.contains(&version) {
        VersionStatus::Unknown
    } else if can_auto_upgrade(version, current) {
        VersionStatus::Outdated {
            found: version.to_string(),
            current,
        }
    } else {
        VersionStatus::Incompatible {
            found: version.to_string(),
            current,
        }
    }
}
