//! The fixed set of platforms a username is probed against.
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use text_placeholder::Template;

/// Name of the placeholder every URL template carries exactly once.
pub const SUBJECT_PLACEHOLDER: &str = "username";

/// One external platform and the profile URL pattern used to probe it.
///
/// Targets are created once from [`list_targets`] and shared read-only
/// between every concurrent probe of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Display name of the platform, unique within the registry.
    pub platform_name: String,
    /// Profile URL with a single `{{username}}` placeholder.
    pub url_template: String,
}

impl Target {
    /// Builds a target from a platform name and URL template.
    pub fn new(platform_name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
            url_template: url_template.into(),
        }
    }

    /// Substitutes `subject` into the URL template.
    ///
    /// ```rust
    /// # use cybereye::registry::Target;
    /// let target = Target::new("GitHub", "https://github.com/{{username}}");
    /// assert_eq!(target.resolve("alice123"), "https://github.com/alice123");
    /// ```
    pub fn resolve(&self, subject: &str) -> String {
        let mut table = HashMap::new();
        table.insert(SUBJECT_PLACEHOLDER, subject);
        Template::new(&self.url_template).fill_with_hashmap(&table)
    }
}

const PLATFORMS: [(&str, &str); 17] = [
    ("GitHub", "https://github.com/{{username}}"),
    ("GitLab", "https://gitlab.com/{{username}}"),
    ("LeetCode", "https://leetcode.com/{{username}}"),
    ("Kaggle", "https://www.kaggle.com/{{username}}"),
    ("TryHackMe", "https://tryhackme.com/p/{{username}}"),
    ("HackTheBox", "https://app.hackthebox.com/profile/{{username}}"),
    ("Replit", "https://replit.com/@{{username}}"),
    ("Twitter / X", "https://x.com/{{username}}"),
    ("Reddit", "https://www.reddit.com/user/{{username}}"),
    ("YouTube", "https://www.youtube.com/@{{username}}"),
    ("Twitch", "https://www.twitch.tv/{{username}}"),
    ("Facebook", "https://www.facebook.com/{{username}}"),
    ("LinkedIn", "https://www.linkedin.com/in/{{username}}"),
    ("Roblox", "https://www.roblox.com/user.aspx?username={{username}}"),
    ("Minecraft", "https://namemc.com/profile/{{username}}"),
    ("Chess.com", "https://www.chess.com/member/{{username}}"),
    ("Keybase", "https://keybase.io/{{username}}"),
];

static REGISTRY: Lazy<Vec<Target>> = Lazy::new(|| {
    PLATFORMS
        .iter()
        .map(|(name, template)| Target::new(*name, *template))
        .collect()
});

/// Returns every known target in declaration order.
///
/// Reports are always ordered the way this list is, never by probe
/// completion.
pub fn list_targets() -> &'static [Target] {
    &REGISTRY
}

/// Returns the registry without the platforms named in `exclude`.
///
/// Names are compared case-insensitively. Unknown names are ignored.
pub fn select_targets(exclude: &[String]) -> Vec<Target> {
    let selected: Vec<Target> = list_targets()
        .iter()
        .filter(|target| {
            !exclude
                .iter()
                .any(|name| name.trim().eq_ignore_ascii_case(&target.platform_name))
        })
        .cloned()
        .collect();

    debug!(
        "Selected {} of {} targets (excluded {:?})",
        selected.len(),
        list_targets().len(),
        exclude
    );
    selected
}
