//! Page selection.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Onboarding,
    #[default]
    Dashboard,
    Checkin,
    Evolution,
    Experiments,
    Settings,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Onboarding,
        Page::Dashboard,
        Page::Checkin,
        Page::Evolution,
        Page::Experiments,
        Page::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Onboarding => "onboarding",
            Page::Dashboard => "dashboard",
            Page::Checkin => "checkin",
            Page::Evolution => "evolution",
            Page::Experiments => "experiments",
            Page::Settings => "settings",
        }
    }

    /// Lenient parse: anything unrecognized lands on the dashboard.
    pub fn parse(s: &str) -> Page {
        let s = s.trim();
        Page::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .unwrap_or_default()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Page::parse(s))
    }
}
