use bundle_fs::normalize;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalize_is_idempotent(s in "\\PC*") {
        if let Ok(first) = normalize(&s) {
            let second = normalize(first.as_str());
            prop_assert_eq!(second, Ok(first));
        }
    }

    #[test]
    fn test_normalized_paths_hold_invariants(
        segments in prop::collection::vec("[A-Za-z0-9_ .\\\\/-]{0,8}", 1..5)
    ) {
        let raw = format!("{}.toml", segments.join("/"));
        if let Ok(path) = normalize(&raw) {
            let as_str = path.as_str();
            prop_assert!(!as_str.contains('\\'));
            prop_assert!(!as_str.starts_with('/'));
            prop_assert!(!as_str.ends_with('/'));
            prop_assert!(as_str.to_ascii_lowercase().ends_with(".toml"));
            for segment in path.segments() {
                prop_assert!(!segment.is_empty());
                prop_assert!(segment != "." && segment != "..");
            }
        }
    }
}
