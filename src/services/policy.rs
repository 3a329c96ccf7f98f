use url::Url;

/// True when `input` starts with `http://` or `https://` (any case).
pub fn has_web_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        input
            .get(..prefix.len())
            .map(|head| head.eq_ignore_ascii_case(prefix))
            .unwrap_or(false)
    })
}

/// Canonical comparison key for a URL or bare host: lowercase host, one
/// leading `www.` and one trailing `/` removed, no scheme/port/path.
///
/// Never fails; unparseable input goes through [`manual_domain`].
pub fn normalize_domain(input: &str) -> String {
    let s = input.trim();
    let candidate = if has_web_scheme(s) {
        s.to_string()
    } else {
        format!("https://{}", s)
    };

    match Url::parse(&candidate) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => finish(&host.to_ascii_lowercase()),
            _ => manual_domain(s),
        },
        Err(_) => manual_domain(s),
    }
}

/// String-surgery fallback used when structured parsing fails.
pub fn manual_domain(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let rest = match lowered.split_once("://") {
        Some((_, after)) => after,
        None => lowered.as_str(),
    };
    let authority = match rest.find(['/', '?', '#']) {
        Some(0) => rest,
        Some(idx) => &rest[..idx],
        None => rest,
    };
    finish(authority)
}

fn finish(host: &str) -> String {
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.strip_suffix('/').unwrap_or(host).to_string()
}

/// Scheme of a navigation target, lowercased. Falls back to the text before
/// `://` when the target does not parse.
pub fn url_scheme(url: &str) -> Option<String> {
    match Url::parse(url.trim()) {
        Ok(parsed) => Some(parsed.scheme().to_string()),
        Err(_) => url
            .trim()
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .filter(|scheme| !scheme.is_empty()),
    }
}

/// `domain` is `entry` itself or one of its sub-domains.
pub fn domain_matches_entry(domain: &str, entry: &str) -> bool {
    if entry.is_empty() {
        return false;
    }
    if domain == entry {
        return true;
    }
    domain
        .strip_suffix(entry)
        .map(|head| head.ends_with('.'))
        .unwrap_or(false)
}

/// First blocked entry covering `domain`, compared in normalized form.
pub fn find_blocking_entry<'a>(domain: &str, blocked: &'a [String]) -> Option<&'a str> {
    blocked
        .iter()
        .find(|entry| domain_matches_entry(domain, &normalize_domain(entry)))
        .map(|entry| entry.as_str())
}
