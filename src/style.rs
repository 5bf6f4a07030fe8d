//! Category and group based marker styling.

use serde::Serialize;
use std::fmt;

/// Visual style shared by markers and polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Style {
    pub color: &'static str,
    pub icon: &'static str,
}

pub const DEFAULT_STYLE: Style = Style {
    color: "#3b82f6",
    icon: "📍",
};

/// Closed set of known category codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryCode {
    Wildfire,
    Earthquake,
    Flood,
    Storm,
    Conflict,
    Protest,
    Election,
    Accident,
    Health,
    Concert,
    Award,
    Historical,
}

impl CategoryCode {
    /// Exact, case-sensitive match against the wire code.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "WILDFIRE" => Some(CategoryCode::Wildfire),
            "EARTHQUAKE" => Some(CategoryCode::Earthquake),
            "FLOOD" => Some(CategoryCode::Flood),
            "STORM" => Some(CategoryCode::Storm),
            "CONFLICT" => Some(CategoryCode::Conflict),
            "PROTEST" => Some(CategoryCode::Protest),
            "ELECTION" => Some(CategoryCode::Election),
            "ACCIDENT" => Some(CategoryCode::Accident),
            "HEALTH" => Some(CategoryCode::Health),
            "CONCERT" => Some(CategoryCode::Concert),
            "AWARD" => Some(CategoryCode::Award),
            "HISTORICAL" => Some(CategoryCode::Historical),
            _ => None,
        }
    }

    pub fn style(self) -> Style {
        match self {
            CategoryCode::Wildfire => Style {
                color: "#ef4444",
                icon: "🔥",
            },
            CategoryCode::Earthquake => Style {
                color: "#a16207",
                icon: "🌋",
            },
            CategoryCode::Flood => Style {
                color: "#0ea5e9",
                icon: "🌊",
            },
            CategoryCode::Storm => Style {
                color: "#6366f1",
                icon: "🌀",
            },
            CategoryCode::Conflict => Style {
                color: "#b91c1c",
                icon: "⚔️",
            },
            CategoryCode::Protest => Style {
                color: "#f97316",
                icon: "📢",
            },
            CategoryCode::Election => Style {
                color: "#14b8a6",
                icon: "🗳️",
            },
            CategoryCode::Accident => Style {
                color: "#eab308",
                icon: "⚠️",
            },
            CategoryCode::Health => Style {
                color: "#22c55e",
                icon: "🏥",
            },
            CategoryCode::Concert => Style {
                color: "#a855f7",
                icon: "🎤",
            },
            CategoryCode::Award => Style {
                color: "#facc15",
                icon: "🏆",
            },
            CategoryCode::Historical => Style {
                color: "#78716c",
                icon: "🏛️",
            },
        }
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryCode::Wildfire => write!(f, "WILDFIRE"),
            CategoryCode::Earthquake => write!(f, "EARTHQUAKE"),
            CategoryCode::Flood => write!(f, "FLOOD"),
            CategoryCode::Storm => write!(f, "STORM"),
            CategoryCode::Conflict => write!(f, "CONFLICT"),
            CategoryCode::Protest => write!(f, "PROTEST"),
            CategoryCode::Election => write!(f, "ELECTION"),
            CategoryCode::Accident => write!(f, "ACCIDENT"),
            CategoryCode::Health => write!(f, "HEALTH"),
            CategoryCode::Concert => write!(f, "CONCERT"),
            CategoryCode::Award => write!(f, "AWARD"),
            CategoryCode::Historical => write!(f, "HISTORICAL"),
        }
    }
}

/// Group specific fallback used when a record has no recognised category.
fn group_style(group_id: &str) -> Option<Style> {
    match group_id {
        "bts-chronicle" => Some(Style {
            color: "#8b5cf6",
            icon: "💜",
        }),
        "world-history" => Some(Style {
            color: "#92400e",
            icon: "📜",
        }),
        "disaster-watch" => Some(Style {
            color: "#dc2626",
            icon: "🚨",
        }),
        _ => None,
    }
}

/// Resolve a style: category code first, then the group fallback, then the default.
pub fn resolve(category_code: Option<&str>, group_id: Option<&str>) -> Style {
    category_code
        .and_then(CategoryCode::parse)
        .map(CategoryCode::style)
        .or_else(|| group_id.and_then(group_style))
        .unwrap_or(DEFAULT_STYLE)
}
