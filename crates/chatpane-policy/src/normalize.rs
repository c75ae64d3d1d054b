//! Turning raw link text into something the URL parser accepts

/// Shape of a raw navigation target after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Nothing left after trimming
    Empty,
    /// Fragment, query or path relative to the current document
    Relative,
    /// Absolute URL text, scheme-prefixed when one was missing
    Absolute(String),
}

/// Trim the input and prepend `https://` to bare hosts such as
/// `openai.com/pricing` or `localhost:3000`.
pub fn normalize(raw: &str) -> Candidate {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Candidate::Empty;
    }
    if is_relative_reference(trimmed) {
        return Candidate::Relative;
    }
    if !has_scheme(trimmed) && looks_like_host(trimmed) {
        return Candidate::Absolute(format!("https://{}", trimmed));
    }
    Candidate::Absolute(trimmed.to_string())
}

/// References resolved against the current page
pub fn is_relative_reference(s: &str) -> bool {
    (s.starts_with('/') && !s.starts_with("//"))
        || s.starts_with('#')
        || s.starts_with('?')
        || s.starts_with("./")
        || s.starts_with("../")
}

/// Whether the input starts with a URL scheme.
///
/// `host:1234` is a host with a port, not a scheme named `host`.
pub fn has_scheme(s: &str) -> bool {
    let Some(colon) = s.find(':') else {
        return false;
    };

    let scheme = &s[..colon];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return false;
    }

    let rest = &s[colon + 1..];
    let port_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let is_port =
        port_len > 0 && (rest.len() == port_len || rest[port_len..].starts_with(['/', '?', '#']));
    !is_port
}

/// Whether a scheme-less input begins with something that reads as a host
pub fn looks_like_host(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) || s.starts_with("//") {
        return false;
    }

    let authority = s.split(['/', '?', '#']).next().unwrap_or_default();
    let host = match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        Some(_) => return false,
        None => authority,
    };

    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| !is_valid_label(label)) {
        return false;
    }

    let is_ipv4 = labels.len() == 4
        && labels
            .iter()
            .all(|label| label.len() <= 3 && label.bytes().all(|b| b.is_ascii_digit()));
    let tld = labels[labels.len() - 1];
    is_ipv4 || (tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic()))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
