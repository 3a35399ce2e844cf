use reqwest::Url;

/// Normalize a server source to a canonical base URL string.
///
/// Accepts a full `http(s)://` URL or a bare `host:port`/`host` shorthand.
/// Trailing slashes are trimmed so joined endpoint paths stay stable.
pub fn normalize_server_source(raw: &str) -> String {
    let s = raw.trim().trim_end_matches('/');
    if s.contains("://") {
        s.to_string()
    } else {
        format!("http://{s}")
    }
}

pub fn server_url(raw: &str) -> anyhow::Result<Url> {
    let normalized = normalize_server_source(raw);
    let url = Url::parse(&normalized)
        .map_err(|e| anyhow::anyhow!("invalid server source {raw:?}: {e}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("server source {raw:?} cannot be used as a base url");
    }
    Ok(url)
}
