/// Trailing segment of a backend-assigned path, whichever separator
/// convention the server used. The whole string when no separator is present.
pub fn last_segment(path: &str) -> &str {
    match path.rfind(|c| c == '\\' || c == '/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
