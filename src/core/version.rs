//! Language version compatibility between a CGE file and the compiler.

/// Version of the CGE language understood by this front end.
pub const CGE_VERSION: &str = "0.4";

/// Compiler version that accepts every file.
pub const DEV_VERSION: &str = "dev";

/// Majors must match; on major `0` the minors must match too, otherwise the
/// compiler's minor must be at least the file's. Unparsable minors never match.
pub fn is_compatible(file_version: &str, compiler_version: &str) -> bool {
    if compiler_version == DEV_VERSION {
        return true;
    }
    let (file_major, file_minor) = split(file_version);
    let (compiler_major, compiler_minor) = split(compiler_version);

    if file_major != compiler_major {
        return false;
    }
    if compiler_major == "0" && file_minor != compiler_minor {
        return false;
    }
    match (file_minor.parse::<u64>(), compiler_minor.parse::<u64>()) {
        (Ok(file), Ok(compiler)) => compiler >= file,
        _ => false,
    }
}

fn split(version: &str) -> (&str, &str) {
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or("");
    let minor = parts.next().unwrap_or("0");
    (major, minor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_matches_anything() {
        assert!(is_compatible("9.9", "dev"));
        assert!(is_compatible("0.1", "dev"));
    }

    #[test]
    fn zero_major_requires_exact_minor() {
        assert!(is_compatible("0.4", "0.4"));
        assert!(!is_compatible("0.3", "0.4"));
        assert!(!is_compatible("0.5", "0.4"));
    }

    #[test]
    fn stable_major_allows_older_files() {
        assert!(is_compatible("1.2", "1.4"));
        assert!(is_compatible("1.4.7", "1.4"));
        assert!(!is_compatible("1.5", "1.4"));
        assert!(!is_compatible("2.0", "1.4"));
    }

    #[test]
    fn mismatched_major_is_incompatible() {
        assert!(!is_compatible("9.9", "0.4"));
    }

    #[test]
    fn missing_minor_counts_as_zero() {
        assert!(is_compatible("1", "1.3"));
        assert!(is_compatible("0", "0.0"));
    }
}
