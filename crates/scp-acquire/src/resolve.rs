use crate::error::{FetchError, Result};

/// Base of the per-article path on the archive.
pub const ARCHIVE_BASE_URL: &str = "http://www.scp-wiki.net";

/// Turn a command-line argument into the URL to fetch.
///
/// Anything starting with `http` is taken verbatim. Otherwise the argument
/// must be an article number, which is zero-padded to three digits:
/// `7` becomes `http://www.scp-wiki.net/scp-007`.
pub fn resolve(arg: &str) -> Result<String> {
    resolve_with_base(arg, ARCHIVE_BASE_URL)
}

/// [`resolve`] against another archive host; numbers become `{base}/scp-NNN`.
pub fn resolve_with_base(arg: &str, base: &str) -> Result<String> {
    if arg.starts_with("http") {
        return Ok(arg.to_string());
    }

    let number: i64 = arg.parse().map_err(|source| FetchError::InvalidArgument {
        input: arg.to_string(),
        source,
    })?;

    Ok(article_url(base, number))
}

pub fn article_url(base: &str, number: i64) -> String {
    format!("{base}/scp-{number:03}")
}
