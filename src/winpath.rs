//! Syntactic helpers for Windows path strings. Nothing here touches the filesystem.

pub const SEPARATOR: char = '\\';
pub const UNC_PREFIX: &str = "\\\\";

fn is_separator(ch: char) -> bool {
    ch == '\\' || ch == '/'
}

pub fn is_unc(path: &str) -> bool {
    path.starts_with(UNC_PREFIX)
}

fn has_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Byte length of the root: `\\server\share\`, `C:\`, `C:` or a single leading separator.
fn root_len(path: &str) -> usize {
    let mut chars = path.char_indices();
    match (chars.next(), chars.next()) {
        (Some((_, a)), Some((_, b))) if is_separator(a) && is_separator(b) => {
            let rest = &path[2..];
            let Some(server_end) = rest.find(is_separator) else {
                return path.len();
            };
            let after_server = &rest[server_end + 1..];
            match after_server.find(is_separator) {
                Some(share_end) => 2 + server_end + 1 + share_end + 1,
                None => path.len(),
            }
        }
        (Some((_, a)), _) if is_separator(a) => 1,
        _ if has_drive(path) => {
            if path[2..].starts_with(is_separator) {
                3
            } else {
                2
            }
        }
        _ => 0,
    }
}

fn has_unc_root(path: &str) -> bool {
    let mut chars = path.chars();
    matches!((chars.next(), chars.next()), (Some(a), Some(b)) if is_separator(a) && is_separator(b))
}

/// Drive-qualified (`C:`) or UNC text, in either separator style.
pub fn is_windows_rooted(path: &str) -> bool {
    has_drive(path) || has_unc_root(path)
}

/// Collapses repeated separators and resolves `.` and `..` segments.
///
/// A leading pair of separators of either kind is a UNC root: it comes out as
/// `\\server\share\` and `..` never climbs above it.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let unc = has_unc_root(path);
    let (prefix, rest) = if unc {
        let root = root_len(path);
        let server_share = path[2..root].trim_end_matches(is_separator).replace('/', "\\");
        (format!("{}{}{}", UNC_PREFIX, server_share, SEPARATOR), &path[root..])
    } else if has_drive(path) {
        (path[..2].to_string(), &path[2..])
    } else {
        (String::new(), path)
    };
    let absolute = unc || rest.starts_with(is_separator);
    let trailing = rest.len() > 1 && rest.ends_with(is_separator);

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let mut out = prefix;
    if absolute && !unc {
        out.push(SEPARATOR);
    }
    if parts.is_empty() {
        if !absolute {
            out.push('.');
        }
        return out;
    }
    out.push_str(&parts.join("\\"));
    if trailing {
        out.push(SEPARATOR);
    }
    out
}

/// Parent directory of `path`, never climbing above its root.
pub fn parent(path: &str) -> String {
    let root = root_len(path);
    if path.len() <= root {
        return path.to_string();
    }

    let rest = path[root..].trim_end_matches(is_separator);
    match rest.rfind(is_separator) {
        Some(idx) => {
            let head = rest[..idx].trim_end_matches(is_separator);
            if head.is_empty() {
                path[..root].to_string()
            } else {
                format!("{}{}", &path[..root], head)
            }
        }
        None if root > 0 => path[..root].to_string(),
        None => ".".to_string(),
    }
}
