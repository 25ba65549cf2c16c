//! Filename sanitization for persisted downloads

/// Maximum filename length written to the user's filesystem
const MAX_FILENAME_LEN: usize = 200;

/// Make an engine-produced file name safe to write into the destination
/// directory.
///
/// # Security
/// - Removes path traversal sequences (`..`)
/// - Removes leading dots (prevents hidden files)
/// - Replaces characters invalid on common filesystems
/// - Never yields an empty name
pub fn sanitize_filename(name: &str) -> String {
    const INVALID_CHARS: [char; 10] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];

    let mut sanitized: String = name
        .replace("..", "")
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect();

    sanitized = sanitized
        .trim()
        .trim_start_matches('.')
        .trim_end_matches(|c| c == '.' || c == ' ')
        .to_string();

    while sanitized.contains("__") {
        sanitized = sanitized.replace("__", "_");
    }

    if sanitized.is_empty() {
        return "unnamed_file".to_string();
    }

    if sanitized.len() > MAX_FILENAME_LEN {
        // Keep a short extension when truncating.
        if let Some(dot_pos) = sanitized.rfind('.') {
            let extension = sanitized[dot_pos..].to_string();
            if extension.len() < 10 {
                truncate_at_char_boundary(&mut sanitized, MAX_FILENAME_LEN - extension.len());
                sanitized.push_str(&extension);
                return sanitized;
            }
        }
        truncate_at_char_boundary(&mut sanitized, MAX_FILENAME_LEN);
    }

    sanitized
}

/// `String::truncate` panics mid-codepoint; back off to the nearest boundary
fn truncate_at_char_boundary(s: &mut String, mut max: usize) {
    while !s.is_char_boundary(max) {
        max -= 1;
    }
    s.truncate(max);
}
