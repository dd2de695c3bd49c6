//! Keyword guessing from media filenames
//!
//! Release filenames are noisy ("Movie.Name.2020.1080P.BluRay.x264-GRP.mkv").
//! This module derives search keywords from them, ordered most-specific
//! first, with the fully cleaned basename always last as a fallback.

use regex::Regex;
use std::path::Path;

/// Substrings stripped from the basename before splitting, in order:
/// a resolution-dimension token, a known release-group bracket tag and
/// a known fansub-group literal.
const CLEANUP_PATTERNS: [&str; 3] = [r"\d{3,4}x\d{3,4}", r"^飞鸟娱乐[\[(].+[\])]", "YYeTs人人影视"];

/// Resolution markers checked when no year token splits the name.
/// First marker found wins; the rest are not scanned.
const RESOLUTION_MARKERS: [&str; 3] = ["1080P", "720P", "360P"];

/// Derive search keyword candidates from a media filename.
///
/// Always returns at least one candidate; the last one is the cleaned
/// basename itself.
pub fn guess_names(filename: &str) -> Vec<String> {
    let basename = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let mut basename = basename.replace(['.', '-'], " ");

    for pattern in CLEANUP_PATTERNS {
        basename = strip_first_match(&basename, pattern);
    }

    let mut candidates = Vec::new();

    // Year split: a 4-digit token with a space on both sides. A 4-digit
    // run found anywhere past the start suppresses the resolution split
    // even when the surrounding-space check fails.
    let bytes = basename.as_bytes();
    let mut has_year = false;
    if let Some(m) = Regex::new(r"\d{4}")
        .ok()
        .and_then(|re| re.find(&basename))
    {
        let index = m.start();
        if index > 0 {
            has_year = true;
            // Bounds-checked: a year as the last token has no byte after it
            if bytes[index - 1] == b' ' && bytes.get(index + 4) == Some(&b' ') {
                candidates.push(basename[..index].trim().to_string());
            }
        }
    }

    // Resolution split: first marker hit anywhere past the start wins
    if !has_year {
        let upper = basename.to_ascii_uppercase();
        for marker in RESOLUTION_MARKERS {
            if let Some(index) = upper.find(marker) {
                if index > 0 {
                    candidates.push(basename[..index].trim().to_string());
                    break;
                }
            }
        }
    }

    candidates.push(basename);
    candidates
}

/// Remove a pattern's first match from `name` and trim, or return the
/// name unchanged when the pattern does not match (or fails to compile).
fn strip_first_match(name: &str, pattern: &str) -> String {
    let matched = Regex::new(pattern).ok().and_then(|re| re.find(name));
    match matched {
        Some(m) if !m.as_str().is_empty() => {
            let stripped = format!("{}{}", &name[..m.start()], &name[m.end()..]);
            stripped.trim().to_string()
        }
        _ => name.to_string(),
    }
}
