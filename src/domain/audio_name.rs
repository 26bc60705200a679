/// Characters that must never reach the filesystem in a stored filename.
const FORBIDDEN: [char; 10] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|', ';'];

/// Fallback when the download response names nothing usable.
const DEFAULT_NAME: &str = "unknown.mp3";

/// Derives the unique on-disk name for a downloaded recording:
/// `{unix_timestamp}_{sanitized original name}.mp3`.
///
/// The original name comes from the `Content-Disposition` header, trying
/// the UTF-8 `filename*=` directive first, then the quoted `filename=`
/// directive, then falling back to `unknown.mp3`. The timestamp prefix
/// keeps concurrent downloads from colliding unless two requests derive a
/// name within the same second with identical source names.
pub fn derive_audio_filename(content_disposition: Option<&str>, unix_timestamp: i64) -> String {
    let original = content_disposition
        .and_then(filename_from_content_disposition)
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let mut name: String = original
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();

    if !name.ends_with(".mp3") {
        name.push_str(".mp3");
    }

    format!("{}_{}", unix_timestamp, name)
}

/// Extracts a filename from a `Content-Disposition` header value.
fn filename_from_content_disposition(header: &str) -> Option<String> {
    if let Some(name) = extended_filename(header) {
        return Some(name);
    }
    quoted_filename(header)
}

/// The RFC 5987 `filename*=utf-8''value` form. The value is taken verbatim
/// (percent-escapes included); sanitization handles anything hostile.
fn extended_filename(header: &str) -> Option<String> {
    let lower = header.to_ascii_lowercase();
    let start = lower.find("filename*=utf-8''")? + "filename*=utf-8''".len();
    let value: String = header[start..]
        .chars()
        .take_while(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | '%' | '+'))
        .collect();

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The plain `filename="value"` form.
fn quoted_filename(header: &str) -> Option<String> {
    let lower = header.to_ascii_lowercase();
    let start = lower.find("filename=\"")? + "filename=\"".len();
    let rest = &header[start..];
    let end = rest.find('"')?;
    let value = &rest[..end];

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
