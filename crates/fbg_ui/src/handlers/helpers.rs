//! Helper functions for handler modules.

use percent_encoding::percent_decode_str;

/// Clean up a file URL (from drag-drop or a paste) to a regular path.
///
/// Takes the first non-comment line of a `text/uri-list`, strips `file://`
/// and percent-decodes it. Plain paths pass through trimmed.
pub fn clean_file_url(url: &str) -> String {
    let first_uri = url
        .lines()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or("");

    let path = match first_uri.strip_prefix("file://") {
        Some(rest) => {
            let decoded = percent_decode_str(rest).decode_utf8_lossy().into_owned();
            strip_drive_slash(decoded)
        }
        None => first_uri.trim_matches('"').to_string(),
    };

    path.trim().to_string()
}

/// `/C:/dir/file.bas` from a Windows file URI becomes `C:/dir/file.bas`.
fn strip_drive_slash(path: String) -> String {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        path[1..].to_string()
    } else {
        path
    }
}
