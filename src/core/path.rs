//! Recognising remote-addressable (UNC) paths and pulling the server name out
//! of them.

/// Longest authority taken from a UNC path, in characters. Matches the DNS
/// host-name limit so fully qualified server names survive intact.
pub const MAX_AUTHORITY_LENGTH: usize = 255;

const UNC_PREFIX: &str = r"\\";
const LONG_UNC_PREFIX: &str = r"\\?\UNC\";

/// `\\server\share\...` or `\\?\UNC\server\share\...`.
///
/// The `\\?\` and `\\.\` device namespaces are local unless they name `UNC`.
pub fn is_remote_addressable(path: &str) -> bool {
    remote_tail(path).is_some()
}

/// Server name of a remote-addressable path, `None` for local paths.
pub fn extract_authority(path: &str) -> Option<&str> {
    extract_authority_bounded(path, MAX_AUTHORITY_LENGTH)
}

/// Like [`extract_authority`], but never looks at more than `bound` characters
/// of the server segment.
pub fn extract_authority_bounded(path: &str, bound: usize) -> Option<&str> {
    let tail = remote_tail(path)?;

    let mut end = tail.len();
    for (count, (index, ch)) in tail.char_indices().enumerate() {
        if count == bound || is_separator(ch) {
            end = index;
            break;
        }
    }

    let authority = &tail[..end];
    (!authority.is_empty()).then_some(authority)
}

// Everything after the UNC prefix, starting at the server name.
fn remote_tail(path: &str) -> Option<&str> {
    if path
        .get(..LONG_UNC_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LONG_UNC_PREFIX))
    {
        return Some(&path[LONG_UNC_PREFIX.len()..]);
    }

    let tail = path.strip_prefix(UNC_PREFIX)?;
    let mut chars = tail.chars();
    match (chars.next(), chars.next()) {
        (Some('?' | '.'), Some('\\')) => None,
        _ => Some(tail),
    }
}

fn is_separator(ch: char) -> bool {
    ch == '\\' || ch == '/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unc_path_yields_server() {
        assert_eq!(extract_authority(r"\\SERVER1\share\sub\file.txt"), Some("SERVER1"));
        assert_eq!(
            extract_authority(r"\\fs01.corp.example.com\home"),
            Some("fs01.corp.example.com")
        );
    }

    #[test]
    fn server_without_share_is_whole_tail() {
        assert_eq!(extract_authority(r"\\SERVER1"), Some("SERVER1"));
    }

    #[test]
    fn long_unc_form_is_remote() {
        assert!(is_remote_addressable(r"\\?\UNC\srv\share\f.txt"));
        assert!(is_remote_addressable(r"\\?\unc\srv\share\f.txt"));
        assert_eq!(extract_authority(r"\\?\UNC\srv\share\f.txt"), Some("srv"));
    }

    #[test]
    fn local_paths_have_no_authority() {
        for path in [
            r"C:\Windows\notepad.exe",
            r"\\?\C:\data",
            r"\\.\pipe\name",
            r"relative\file",
            "Z:",
        ] {
            assert!(!is_remote_addressable(path), "{path}");
            assert_eq!(extract_authority(path), None, "{path}");
        }
    }

    #[test]
    fn empty_server_segment_is_no_authority() {
        assert!(is_remote_addressable(r"\\\share"));
        assert_eq!(extract_authority(r"\\\share"), None);
        assert_eq!(extract_authority(r"\\"), None);
    }

    #[test]
    fn forward_slash_ends_the_server_name() {
        assert_eq!(extract_authority(r"\\SERVER1/share"), Some("SERVER1"));
    }

    #[test]
    fn scan_stops_at_the_bound() {
        let server = "a".repeat(1000);
        let path = format!(r"\\{server}\share");
        assert_eq!(extract_authority(&path).map(str::len), Some(MAX_AUTHORITY_LENGTH));
        assert_eq!(extract_authority_bounded(&path, 15), Some("aaaaaaaaaaaaaaa"));
    }

    #[test]
    fn bound_counts_characters_not_bytes() {
        let path = r"\\сервер-файлов\share";
        assert_eq!(extract_authority_bounded(path, 6), Some("сервер"));
    }
}
