use std::fmt::Write;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the SDK bundles served under `/sdk/{version}/`.
///
/// Bump together with the SDK package that is deployed next to the server,
/// or override at build time with `LIVEPAD_SDK_VERSION`.
pub const SDK_VERSION: &str = match option_env!("LIVEPAD_SDK_VERSION") {
    Some(version) => version,
    None => "0.3.173",
};

/// Returns a formatted version string including build metadata if available.
#[must_use]
pub fn version_string() -> String {
    let mut s = format!("livepad {VERSION} (sdk {SDK_VERSION})");

    if let Some(hash) = option_env!("LIVEPAD_BUILD_GIT_HASH") {
        let _ = write!(s, " ({hash})");
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_empty() {
        assert!(!VERSION.is_empty());
        assert!(!SDK_VERSION.is_empty());
    }

    #[test]
    fn test_version_string_contains_versions() {
        let vs = version_string();
        assert!(vs.starts_with("livepad "));
        assert!(vs.contains(VERSION));
        assert!(vs.contains(SDK_VERSION));
    }
}
