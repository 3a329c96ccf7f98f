//! Navigation decision core.
//!
//! Pure given the loaded policy: no network access, no writes beyond the
//! policy store's self-initialising first read.

use crate::domain::constants::WEB_SCHEMES;
use crate::domain::models::{Verdict, VerdictReason};
use crate::services::policy::{find_blocking_entry, normalize_domain, url_scheme};
use crate::services::policy_store::PolicyStore;

pub fn is_safe(store: &PolicyStore, url: &str, safe_mode: bool) -> bool {
    evaluate(store, url, safe_mode).accepted
}

/// Decides whether `url` may be visited.
///
/// With safe mode off everything is accepted. Otherwise the policy is read
/// fresh, non-http(s) targets are rejected, and the normalized host is
/// rejected when it equals or is a sub-domain of a blocked entry. The allow
/// list is not consulted.
pub fn evaluate(store: &PolicyStore, url: &str, safe_mode: bool) -> Verdict {
    if !safe_mode {
        return verdict(url, Some(normalize_domain(url)), VerdictReason::SafeModeOff);
    }

    let snapshot = match store.snapshot() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "policy unreadable, rejecting navigation");
            return verdict(
                url,
                None,
                VerdictReason::PolicyUnavailable {
                    message: e.to_string(),
                },
            );
        }
    };

    let scheme = url_scheme(url);
    if !scheme
        .as_deref()
        .map(|s| WEB_SCHEMES.contains(&s))
        .unwrap_or(false)
    {
        tracing::debug!(url, ?scheme, "rejected scheme");
        return verdict(url, None, VerdictReason::UnsupportedScheme { scheme });
    }

    let domain = normalize_domain(url);
    if let Some(entry) = find_blocking_entry(&domain, &snapshot.policy.blocked_domains) {
        tracing::debug!(url, domain = %domain, entry, "blocked");
        let entry = entry.to_string();
        return verdict(url, Some(domain), VerdictReason::Blocked { entry });
    }

    tracing::debug!(url, domain = %domain, version = %snapshot.version, "accepted");
    verdict(url, Some(domain), VerdictReason::NotBlocked)
}

fn verdict(url: &str, domain: Option<String>, reason: VerdictReason) -> Verdict {
    let accepted = matches!(reason, VerdictReason::SafeModeOff | VerdictReason::NotBlocked);
    Verdict {
        accepted,
        url: url.to_string(),
        domain,
        reason,
    }
}
