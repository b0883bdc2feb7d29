//! Path normalization.
//!
//! # Responsibilities
//! - Produce the lookup key shared by registration and dispatch
//! - Lower-case the path (routing is case-insensitive)
//! - Resolve `.`/`..` segments and collapse separators against `/`
//!
//! # Design Decisions
//! - Total function: every input yields a rooted path, `""` becomes `/`
//! - `..` above the root is clamped at the root
//! - Characters are lower-cased one at a time, with no context rules, so
//!   every case variant of a path maps to the same key
//! - Purely lexical, never touches the filesystem

/// Normalize a request or registration path into its lookup key.
pub fn normalize(path: &str) -> String {
    let lowered: String = path.chars().flat_map(char::to_lowercase).collect();

    let mut segments: Vec<&str> = Vec::new();
    for segment in lowered.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut key = String::with_capacity(lowered.len() + 1);
    if segments.is_empty() {
        key.push('/');
    }
    for segment in segments {
        key.push('/');
        key.push_str(segment);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::Rng;

    const SAMPLES: &[&str] = &[
        "",
        "/",
        "///",
        "a",
        "a/b",
        "/a/b/",
        "A/B/C",
        "./a/./b",
        "a/../../b",
        "/../..",
        "a//b///c",
        "/Hello/World/..",
        "ÄPFEL/Straße",
        "..a/b..",
    ];

    #[test]
    fn root_collapse() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("///"), "/");
        assert_eq!(normalize("."), "/");
        assert_eq!(normalize("/./"), "/");
    }

    #[test]
    fn adds_leading_and_strips_trailing_separator() {
        assert_eq!(normalize("a/b"), "/a/b");
        assert_eq!(normalize("/a/b/"), "/a/b");
        assert_eq!(normalize("a//b///c"), "/a/b/c");
    }

    #[test]
    fn resolves_dot_segments() {
        assert_eq!(normalize("/a/./b"), "/a/b");
        assert_eq!(normalize("/a/b/../c"), "/a/c");
        assert_eq!(normalize("/a/b/c/../.."), "/a");
    }

    #[test]
    fn clamps_parent_segments_at_root() {
        assert_eq!(normalize(".."), "/");
        assert_eq!(normalize("/../../a"), "/a");
        assert_eq!(normalize("a/../../b"), "/b");
    }

    #[test]
    fn dots_inside_names_are_kept() {
        assert_eq!(normalize("..a/b.."), "/..a/b..");
        assert_eq!(normalize("/file.txt"), "/file.txt");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(normalize("/A/b/C"), normalize("/a/B/c"));
        assert_eq!(normalize("ÄPFEL"), "/äpfel");
    }

    #[test]
    fn final_sigma_has_no_special_case() {
        assert_eq!(normalize("ΑΣ"), normalize("Ασ"));
        assert_eq!(normalize("ΑΣ"), "/ασ");
        assert_eq!(normalize("/ΟΔΟΣ/Β"), "/οδοσ/β");
    }

    #[test]
    fn idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input {sample:?}");
        }
    }

    #[test]
    fn output_is_rooted_without_trailing_separator() {
        for sample in SAMPLES {
            let key = normalize(sample);
            assert!(key.starts_with('/'), "input {sample:?}");
            assert!(key == "/" || !key.ends_with('/'), "input {sample:?}");
            assert!(!key.contains("//"), "input {sample:?}");
        }
    }

    const TOKENS: &[&str] = &[
        "/", "//", ".", "..", "a", "B", "Σ", "σ", "ς", "Ä", "ä", "İ", "ß", "x.y", "Ω",
    ];

    fn random_path(rng: &mut impl Rng) -> String {
        let len = rng.gen_range(0..12);
        (0..len)
            .map(|_| *TOKENS.choose(rng).unwrap())
            .collect()
    }

    /// Randomly swap letters for another case, skipping characters whose case
    /// mapping does not round-trip (`ς` upper-cases to `Σ`, `ß` to `SS`).
    fn flip_case(path: &str, rng: &mut impl Rng) -> String {
        path.chars()
            .map(|c| {
                let lower: String = c.to_lowercase().collect();
                let upper: String = c.to_uppercase().collect();
                let upper_lowered: String = upper.chars().flat_map(char::to_lowercase).collect();
                if upper_lowered != lower {
                    return c.to_string();
                }
                if rng.gen_bool(0.5) {
                    upper
                } else {
                    lower
                }
            })
            .collect()
    }

    #[test]
    fn random_paths_hold_normalization_properties() {
        let mut rng = rand::thread_rng();
        for _ in 0..2_000 {
            let path = random_path(&mut rng);
            let key = normalize(&path);

            assert_eq!(normalize(&key), key, "not idempotent for {path:?}");
            assert!(key.starts_with('/'), "not rooted for {path:?}");
            assert!(key == "/" || !key.ends_with('/'), "trailing separator for {path:?}");
            assert!(!key.contains("//"), "repeated separator for {path:?}");

            let flipped = flip_case(&path, &mut rng);
            assert_eq!(normalize(&flipped), key, "{path:?} vs {flipped:?}");
        }
    }
}
