//! Parse raw response header lines and session cookies.

/// Parses the status code out of a status line like `HTTP/1.1 200 OK`.
pub(crate) fn parse_status_line(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}

/// Collects `name: value` pairs from header lines.
///
/// When redirects were followed the lines hold several responses; only the
/// block after the last status line is kept.
pub(crate) fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if parse_status_line(line).is_some() {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}

/// Builds a `Cookie` request header value from `Set-Cookie` response values.
///
/// Keeps the leading `name=value` pair of each value and drops attributes
/// (`Path`, `HttpOnly`, ...). Returns `None` when no cookie was set.
pub fn cookie_from_set_cookie<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let pairs: Vec<&str> = values
        .into_iter()
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|p| p.contains('='))
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
