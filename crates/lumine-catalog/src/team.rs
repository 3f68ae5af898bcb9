//! Team roster
//!
//! The roster combines the hand-written `team.json` (core team) with the
//! maintainers named in the device catalog. A core member who also maintains
//! devices gets those devices attached; other maintainers are listed on their
//! own.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::device::CatalogDevice;
use crate::error::CatalogError;

/// Avatar used when no GitHub profile is known
pub const PLACEHOLDER_AVATAR: &str =
    "https://ui-avatars.com/api/?name=Avatar&background=0D8ABC&color=fff&bold=true";

static GITHUB_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([a-zA-Z0-9-]+)").expect("github user pattern is valid")
});

/// A core team member from `team.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    /// Display name
    pub name: String,
    /// Role title
    pub role: Option<String>,
    /// Member kind, `team` unless stated
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Short bio, falls back to the role
    pub description: Option<String>,
    /// Avatar URL
    pub image: Option<String>,
    /// GitHub handle or profile URL
    pub github: Option<String>,
    /// Telegram handle or URL
    pub telegram: Option<String>,
    /// Contact address
    pub email: Option<String>,
    /// LinkedIn profile URL
    pub linkedin: Option<String>,
}

impl TeamMember {
    /// Fill in `kind` and `description` defaults
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.kind.as_deref().is_none_or(str::is_empty) {
            self.kind = Some("team".to_string());
        }
        if self.description.as_deref().is_none_or(str::is_empty) {
            self.description = self.role.clone();
        }
        self
    }
}

/// Parse `team.json`, a list of team members
///
/// # Errors
///
/// Returns `CatalogError::JsonParse` if the document is not a JSON list of
/// member records.
pub fn parse_team(json: &str) -> Result<Vec<TeamMember>, CatalogError> {
    let members: Vec<TeamMember> = serde_json::from_str(json)?;
    Ok(members.into_iter().map(TeamMember::normalized).collect())
}

/// Avatar URL for a GitHub profile URL, or the placeholder
///
/// Only values containing `github.com/<user>` yield a profile picture.
#[must_use]
pub fn avatar_url(github: Option<&str>) -> String {
    github
        .and_then(|g| GITHUB_USER.captures(g))
        .and_then(|caps| caps.get(1))
        .map(|user| format!("https://github.com/{}.png", user.as_str()))
        .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string())
}

/// Profile link for a handle or URL under `base`
fn profile_url(value: Option<&str>, base: &str) -> Option<String> {
    match value {
        Some(v) if v.starts_with("http") => Some(v.to_string()),
        Some(v) if !v.is_empty() => Some(format!("{base}/{v}")),
        _ => None,
    }
}

/// GitHub profile link for a handle or URL
#[must_use]
pub fn github_profile_url(github: Option<&str>) -> Option<String> {
    profile_url(github, "https://github.com")
}

/// Telegram link for a handle or URL
#[must_use]
pub fn telegram_profile_url(telegram: Option<&str>) -> Option<String> {
    profile_url(telegram, "https://t.me")
}

/// A device reference in a maintainer listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRef {
    /// Marketing name
    pub name: String,
    /// Short device identifier
    pub codename: String,
}

/// A device maintainer derived from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    /// Display name as first seen
    pub name: String,
    /// GitHub handle or URL from the first device listing them
    pub github: String,
    /// Telegram handle or URL from the first device listing them
    pub telegram: String,
    /// Maintained devices in catalog order
    pub devices: Vec<DeviceRef>,
    /// `Name (codename)` list of maintained devices
    pub role: String,
    /// Avatar URL
    pub image: String,
}

/// A core member with their maintained devices attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreMember {
    /// The `team.json` record
    #[serde(flatten)]
    pub member: TeamMember,
    /// Avatar URL (explicit image or GitHub avatar)
    pub avatar: String,
    /// Devices this member maintains
    pub devices: Vec<DeviceRef>,
    /// Maintainer role text, when they maintain devices
    pub maintainer_role: Option<String>,
    /// Whether the member also maintains devices
    pub is_core_maintainer: bool,
}

/// Core team plus maintainers who are not on it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Core team in `team.json` order
    pub core: Vec<CoreMember>,
    /// Remaining maintainers in catalog order
    pub maintainers: Vec<Maintainer>,
}

fn find_maintainer<'a>(maintainers: &'a [Maintainer], name: &str) -> Option<&'a Maintainer> {
    let key = name.to_lowercase();
    maintainers.iter().find(|m| m.name.to_lowercase() == key)
}

/// Group catalog devices by maintainer name (case-insensitive)
#[must_use]
pub fn collect_maintainers(devices: &[CatalogDevice]) -> Vec<Maintainer> {
    let mut maintainers: Vec<Maintainer> = Vec::new();

    for entry in devices {
        let device = &entry.device;
        let Some(name) = device.maintainer.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        let device_ref = DeviceRef {
            name: device.name.clone(),
            codename: device.codename.clone(),
        };

        let key = name.to_lowercase();
        match maintainers
            .iter_mut()
            .find(|m| m.name.to_lowercase() == key)
        {
            Some(existing) => existing.devices.push(device_ref),
            None => maintainers.push(Maintainer {
                name: name.to_string(),
                github: device.github.clone().unwrap_or_default(),
                telegram: device.telegram.clone().unwrap_or_default(),
                devices: vec![device_ref],
                role: String::new(),
                image: String::new(),
            }),
        }
    }

    for maintainer in &mut maintainers {
        maintainer.role = maintainer
            .devices
            .iter()
            .map(|d| format!("{} ({})", d.name, d.codename))
            .collect::<Vec<_>>()
            .join(", ");
        maintainer.image = avatar_url(Some(&maintainer.github));
    }

    maintainers
}

/// Merge the core team with catalog maintainers
///
/// Pass an empty device slice when the catalog could not be loaded; the core
/// team is then returned without maintainer data.
#[must_use]
pub fn build_roster(team: Vec<TeamMember>, devices: &[CatalogDevice]) -> Roster {
    let maintainers = collect_maintainers(devices);

    let core: Vec<CoreMember> = team
        .into_iter()
        .map(TeamMember::normalized)
        .map(|member| {
            let maintained = find_maintainer(&maintainers, &member.name);
            let avatar = member
                .image
                .clone()
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| avatar_url(member.github.as_deref()));
            CoreMember {
                avatar,
                devices: maintained.map(|m| m.devices.clone()).unwrap_or_default(),
                maintainer_role: maintained.map(|m| m.role.clone()),
                is_core_maintainer: maintained.is_some(),
                member,
            }
        })
        .collect();

    let others = maintainers
        .iter()
        .filter(|m| {
            let key = m.name.to_lowercase();
            !core.iter().any(|c| c.member.name.to_lowercase() == key)
        })
        .cloned()
        .collect();

    Roster {
        core,
        maintainers: others,
    }
}
