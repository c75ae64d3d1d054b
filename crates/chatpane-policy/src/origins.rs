//! Trusted first-party domains

use chatpane_core::OriginMatching;

/// The set of domains whose pages stay inside the shell window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedOrigins {
    domains: Vec<String>,
    matching: OriginMatching,
}

impl TrustedOrigins {
    /// Build the set from raw domain entries.
    ///
    /// Entries are trimmed, lowercased and stripped of leading dots; empty
    /// entries are dropped.
    pub fn new<I, S>(domains: I, matching: OriginMatching) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain
                .as_ref()
                .trim()
                .trim_start_matches('.')
                .trim_end_matches('.')
                .to_ascii_lowercase();
            if !domain.is_empty() && !normalized.contains(&domain) {
                normalized.push(domain);
            }
        }

        Self {
            domains: normalized,
            matching,
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn matching(&self) -> OriginMatching {
        self.matching
    }

    /// Check whether a URL host belongs to a trusted domain
    pub fn matches(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }

        self.domains.iter().any(|domain| match self.matching {
            OriginMatching::Suffix => {
                host == *domain
                    || (host.len() > domain.len()
                        && host.ends_with(domain.as_str())
                        && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
            }
            OriginMatching::Contains => host.contains(domain.as_str()),
        })
    }
}
