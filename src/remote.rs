use crate::config::Config;
use crate::error::{Result, RevealError};
use crate::winpath::{SEPARATOR, UNC_PREFIX};

/// Maps a WSL-backed remote identifier onto its `\\<host>\<distro>\...` share path.
pub fn resolve_remote(cfg: &Config, scheme: &str, authority: &str, path: &str) -> Result<String> {
    if scheme != cfg.remote_scheme {
        return Err(RevealError::UnsupportedScheme(scheme.to_string()));
    }

    let distro = wsl_distro(cfg, authority)?;
    let internal = percent_decode(path)?.replace('/', &SEPARATOR.to_string());

    Ok(format!(
        "{}{}{}{}{}",
        UNC_PREFIX, cfg.unc_host, SEPARATOR, distro, internal
    ))
}

/// Decoded distribution name named by a `wsl+<distro>` authority.
pub fn wsl_distro(cfg: &Config, authority: &str) -> Result<String> {
    let Some(encoded) = authority.strip_prefix(cfg.wsl_authority_prefix.as_str()) else {
        return Err(RevealError::UnsupportedAuthority(authority.to_string()));
    };

    let distro = percent_decode(encoded)?;
    if distro.is_empty() {
        return Err(RevealError::MissingDistro);
    }
    Ok(distro)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Strict `%XX` decoding; the decoded bytes must be UTF-8.
pub fn percent_decode(input: &str) -> Result<String> {
    let malformed = || RevealError::MalformedEncoding(input.to_string());
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value).ok_or_else(malformed)?;
            let lo = bytes.get(i + 2).copied().and_then(hex_value).ok_or_else(malformed)?;
            out.push(hi << 4 | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(out).map_err(|_| malformed())
}
