/// Separator characters ignored by normalized comparison.
const SEPARATORS: [char; 3] = ['-', '_', ' '];

/// Canonical comparison key: separators removed, trimmed, uppercased.
///
/// `"ABC-123"`, `"abc_123"`, `"ABC 123"` and `"ABC123"` all map to `"ABC123"`.
pub fn normalize_id(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !SEPARATORS.contains(c)).collect();
    stripped.trim().to_uppercase()
}
