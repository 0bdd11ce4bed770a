//! Path normalization for folder references

/// Use `/` as the only separator so references written on Windows match.
///
/// A backslash is a legal name character elsewhere and is kept.
#[cfg(windows)]
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(not(windows))]
pub fn normalize_path(path: &str) -> String {
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[cfg(windows)]
    #[test]
    fn backslashes_become_slashes() {
        assert_eq!(normalize_path(r"Documents\Work\2020"), "Documents/Work/2020");
        assert_eq!(normalize_path("a/b"), "a/b");
    }

    #[cfg(not(windows))]
    #[test]
    fn backslashes_are_kept_as_name_characters() {
        assert_eq!(normalize_path(r"Documents\Work"), r"Documents\Work");
        assert_eq!(normalize_path("a/b"), "a/b");
    }
}
