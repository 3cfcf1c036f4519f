use serde::{Deserialize, Serialize};

/// Viewport widths at or below this are treated as a phone layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Desktop,
    Mobile,
}

impl LayoutMode {
    pub fn detect(user_agent: Option<&str>, viewport_width: f64) -> Self {
        let agent_match = user_agent.is_some_and(is_mobile_agent);
        if agent_match || viewport_width <= MOBILE_BREAKPOINT {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

fn is_mobile_agent(agent: &str) -> bool {
    let agent = agent.to_ascii_lowercase();
    MOBILE_AGENTS.iter().any(|needle| agent.contains(needle))
}
