//! Display host extraction for story links.

use url::Url;

const SCHEMES: [&str; 2] = ["https://", "http://"];
const WWW: &str = "www.";

/// Host of `raw_url` as shown next to a story title, e.g. `w3.org` for
/// `https://www.w3.org/TR/`.
///
/// Returns an empty string when the URL cannot be parsed or has no host.
pub fn display_host(raw_url: &str) -> String {
    if raw_url.is_empty() {
        return String::new();
    }

    match Url::parse(raw_url) {
        Ok(url) => url.host_str().map(trim_subdomain).unwrap_or_default(),
        Err(e) => {
            tracing::debug!("Could not parse story URL {:?}: {}", raw_url, e);
            String::new()
        }
    }
}

/// Strip one leading `http://` or `https://`, then one leading `www.` label.
///
/// Only the literal `www.` label is removed, so `w3.org` stays intact.
pub fn trim_subdomain(host: &str) -> String {
    let host = SCHEMES
        .iter()
        .find_map(|scheme| host.strip_prefix(scheme))
        .unwrap_or(host);

    host.strip_prefix(WWW).unwrap_or(host).to_string()
}
