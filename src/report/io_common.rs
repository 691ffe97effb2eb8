use std::path::Path;

/// The last component of a path, or the path itself when it has none.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The input type implied by the extension of a file.
pub fn provider_from_extension(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => "xlsx",
        _ => "csv",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("tests/data/small/small.csv"), "small.csv");
        assert_eq!(simplify_file_name("small.csv"), "small.csv");
        assert_eq!(simplify_file_name(".."), "..");
    }

    #[test]
    fn providers() {
        assert_eq!(provider_from_extension("a/b.XLSX"), "xlsx");
        assert_eq!(provider_from_extension("a/b.csv"), "csv");
        assert_eq!(provider_from_extension("answers"), "csv");
    }
}
