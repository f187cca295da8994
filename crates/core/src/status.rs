use std::fmt;

use serde::Serialize;

macro_rules! icon_url {
    ($name:literal) => {
        concat!(
            "https://raw.githubusercontent.com/nikhilesh-sdie/gitFlowNotifier/main/icons/",
            $name,
            ".png"
        )
    };
}

/// Canonical outcome of a workflow run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusId {
    Success,
    Failure,
    Cancelled,
    Skipped,
    Unknown,
}

impl StatusId {
    /// Catalog order.
    pub const ALL: [Self; 5] =
        [Self::Success, Self::Failure, Self::Cancelled, Self::Skipped, Self::Unknown];

    /// Classify a raw conclusion reported by GitHub. Matching is
    /// case-insensitive; anything unrecognized is `Unknown`.
    pub fn from_conclusion(conclusion: &str) -> Self {
        match conclusion.to_lowercase().as_str() {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "cancelled" => Self::Cancelled,
            "skipped" => Self::Skipped,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the run finished with a definite pass/fail verdict.
    pub const fn is_terminal(&self) -> bool { matches!(self, Self::Success | Self::Failure) }

    pub fn descriptor(self) -> &'static StatusDescriptor {
        match self {
            Self::Success => &SUCCESS,
            Self::Failure => &FAILURE,
            Self::Cancelled => &CANCELLED,
            Self::Skipped => &SKIPPED,
            Self::Unknown => &UNKNOWN,
        }
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Adaptive Card text color used for the status fact.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum CardColor {
    Good,
    Attention,
    Default,
}

impl CardColor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Attention => "Attention",
            Self::Default => "Default",
        }
    }
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Presentation attached to a [`StatusId`].
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct StatusDescriptor {
    pub id: StatusId,
    pub icon: &'static str,
    pub title: &'static str,
    pub image_url: &'static str,
    pub color: CardColor,
}

static SUCCESS: StatusDescriptor = StatusDescriptor {
    id: StatusId::Success,
    icon: "✓",
    title: "Success!",
    image_url: icon_url!("success"),
    color: CardColor::Good,
};

static FAILURE: StatusDescriptor = StatusDescriptor {
    id: StatusId::Failure,
    icon: "✗",
    title: "Failure",
    image_url: icon_url!("failure"),
    color: CardColor::Attention,
};

static CANCELLED: StatusDescriptor = StatusDescriptor {
    id: StatusId::Cancelled,
    icon: "o",
    title: "Cancelled",
    image_url: icon_url!("cancelled"),
    color: CardColor::Default,
};

static SKIPPED: StatusDescriptor = StatusDescriptor {
    id: StatusId::Skipped,
    icon: "⤼",
    title: "Skipped",
    image_url: icon_url!("skipped"),
    color: CardColor::Default,
};

static UNKNOWN: StatusDescriptor = StatusDescriptor {
    id: StatusId::Unknown,
    icon: "?",
    title: "No job context has been provided",
    image_url: icon_url!("unknown"),
    color: CardColor::Default,
};

/// Look up the descriptor for a raw conclusion string.
pub fn resolve(conclusion: &str) -> &'static StatusDescriptor {
    StatusId::from_conclusion(conclusion).descriptor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let cases: &[(&str, StatusId)] = &[
            ("success", StatusId::Success),
            ("SUCCESS", StatusId::Success),
            ("Success", StatusId::Success),
            ("failure", StatusId::Failure),
            ("FaIlUrE", StatusId::Failure),
            ("cancelled", StatusId::Cancelled),
            ("skipped", StatusId::Skipped),
            ("unknown", StatusId::Unknown),
            ("UNKNOWN", StatusId::Unknown),
            ("weird_value", StatusId::Unknown),
            ("timed_out", StatusId::Unknown),
            ("action_required", StatusId::Unknown),
            (" success", StatusId::Unknown),
            ("", StatusId::Unknown),
        ];
        for &(conclusion, expected) in cases {
            assert_eq!(resolve(conclusion).id, expected, "conclusion {conclusion:?}");
        }
    }

    #[test]
    fn test_descriptor_ids_match() {
        for id in StatusId::ALL {
            assert_eq!(id.descriptor().id, id);
            assert_eq!(StatusId::from_conclusion(id.as_str()), id);
            assert!(id.descriptor().image_url.ends_with(&format!("/{id}.png")));
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(resolve("success").color, CardColor::Good);
        assert_eq!(resolve("failure").color, CardColor::Attention);
        assert_eq!(resolve("cancelled").color, CardColor::Default);
        assert_eq!(resolve("skipped").color, CardColor::Default);
        assert_eq!(resolve("weird_value").color, CardColor::Default);
        assert_eq!(resolve("weird_value").title, "No job context has been provided");
    }

    #[test]
    fn test_is_terminal() {
        let terminal: Vec<_> = StatusId::ALL.into_iter().filter(StatusId::is_terminal).collect();
        assert_eq!(terminal, [StatusId::Success, StatusId::Failure]);
    }
}
