//! Collision-resistant filename assignment.
//!
//! Assigned names follow `<base>-<epoch-millis>-<random>[.ext]` where the
//! random component is drawn from `[0, 1e9)`. Uniqueness is probabilistic,
//! not cryptographic; at expected request rates the birthday bound on
//! a ~1e9 space per millisecond makes collisions negligible.

use chrono::Utc;
use rand::Rng;
use std::path::Path;

const MAX_BASE_LENGTH: usize = 100;

/// Reduce a client-supplied filename to a safe base: directory components
/// stripped, non-portable characters replaced, length capped.
fn sanitize_base(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .take(MAX_BASE_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('_').is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

/// Derive a unique assigned name from the original filename.
pub fn assigned_name(original: &str) -> String {
    // Only the final path component counts; clients may send full paths.
    let file_name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(original);

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    let base = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");

    let unique_suffix = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        rand::rng().random_range(0..1_000_000_000u32)
    );

    match ext {
        Some(ext) if !ext.is_empty() => {
            format!("{}-{}.{}", sanitize_base(base), unique_suffix, ext)
        }
        _ => format!("{}-{}", sanitize_base(base), unique_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keeps_base_and_extension() {
        let name = assigned_name("beach.jpg");
        assert!(name.starts_with("beach-"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn strips_directory_components() {
        let name = assigned_name("../../etc/passwd.png");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert!(name.starts_with("passwd-"));
    }

    #[test]
    fn replaces_unsafe_characters() {
        let name = assigned_name("my photo (1).webp");
        assert!(name.starts_with("my_photo__1_-"));
        assert!(name.ends_with(".webp"));
    }

    #[test]
    fn handles_missing_extension() {
        let name = assigned_name("snapshot");
        assert!(name.starts_with("snapshot-"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn names_are_unique_across_many_calls() {
        let names: HashSet<String> = (0..1000).map(|_| assigned_name("tour.jpg")).collect();
        assert_eq!(names.len(), 1000);
    }
}
