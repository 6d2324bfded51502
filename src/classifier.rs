//! Decides whether a profile exists from a platform's raw HTTP response.
//!
//! Several platforms answer `200 OK` for missing profiles too (soft-404), so
//! the status code alone is not trusted. The decision order is:
//!
//! 1. a platform specific marker in the body means the profile exists,
//! 2. `404` means it does not,
//! 3. a generic "not found" phrase in the body means it does not,
//! 4. anything else is assumed to exist.
//!
//! The last rule trades precision for recall: an unknown error page that
//! avoids every phrase below is reported as a hit.

/// Body markers that prove a profile page was served, per platform.
const PLATFORM_SIGNALS: [(&str, &[&str]); 4] = [
    ("Reddit", &["reddit.com/user"]),
    ("YouTube", &["channel", "videocount"]),
    ("Twitter / X", &["followers", "following"]),
    ("LinkedIn", &["public-profile"]),
];

/// Phrases that mark an error page served with a success status.
pub const NOT_FOUND_KEYWORDS: [&str; 7] = [
    "page not found",
    "not found",
    "does not exist",
    "no such",
    "unavailable",
    "user not found",
    "sorry, this",
];

const NOT_FOUND_STATUS: u16 = 404;

/// Returns `true` when the response indicates the profile exists.
///
/// ```rust
/// # use cybereye::classifier::classify;
/// assert!(!classify("GitHub", 404, ""));
/// assert!(classify("Twitter / X", 200, "12 Followers"));
/// ```
pub fn classify(platform_name: &str, status_code: u16, body: &str) -> bool {
    let body = body.to_lowercase();

    if has_platform_signal(platform_name, &body) {
        return true;
    }

    if status_code == NOT_FOUND_STATUS {
        return false;
    }

    !NOT_FOUND_KEYWORDS.iter().any(|keyword| body.contains(keyword))
}

/// `body` must already be lower-cased.
fn has_platform_signal(platform_name: &str, body: &str) -> bool {
    PLATFORM_SIGNALS
        .iter()
        .find(|(name, _)| *name == platform_name)
        .is_some_and(|(_, markers)| markers.iter().any(|marker| body.contains(marker)))
}

#[cfg(test)]
mod tests {
    use super::classify;
    use parameterized::parameterized;

    #[test]
    fn status_404_is_not_found() {
        assert!(!classify("GitHub", 404, "<html>hello</html>"));
    }

    #[test]
    fn soft_404_phrase_is_not_found() {
        assert!(!classify("GitHub", 200, "<h1>User not found</h1>"));
    }

    #[test]
    fn plain_200_defaults_to_found() {
        assert!(classify("GitHub", 200, "<title>alice123 (Alice)</title>"));
    }

    #[test]
    fn platform_signal_beats_negative_keyword() {
        let body = "Sorry, this page is unavailable. 1,204 Followers";
        assert!(classify("Twitter / X", 200, body));
    }

    #[test]
    fn platform_signal_beats_404() {
        assert!(classify("Reddit", 404, "see reddit.com/user/alice"));
    }

    #[test]
    fn platform_signal_only_applies_to_its_platform() {
        assert!(!classify("GitHub", 200, "not found, 12 followers"));
    }

    #[test]
    fn classification_ignores_case() {
        assert!(!classify("Kaggle", 200, "THIS PAGE DOES NOT EXIST"));
        assert!(classify("LinkedIn", 200, "<div class=\"PUBLIC-PROFILE\">"));
    }

    #[parameterized(body = {
        "page not found",
        "Not Found",
        "this account does not exist",
        "no such user",
        "profile unavailable",
        "user not found",
        "Sorry, this page isn't available.",
    })]
    fn every_negative_keyword_is_detected(body: &str) {
        assert!(!classify("Keybase", 200, body));
    }

    #[parameterized(platform = {
        "Reddit", "YouTube", "YouTube", "Twitter / X", "Twitter / X", "LinkedIn",
    }, body = {
        "reddit.com/user/alice",
        "channel not found",
        "\"videoCount\":\"12\"",
        "Followers",
        "Following",
        "public-profile",
    })]
    fn platform_signals_mark_existence(platform: &str, body: &str) {
        assert!(classify(platform, 200, body));
    }
}
