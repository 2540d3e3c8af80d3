//! Streak tiers and the milestone cadence.
//!
//! Seven tiers cover every streak of three days or more. The visual theme is
//! opaque to the core; it is handed to the presentation layer as is.

use serde::{Deserialize, Serialize};

/// Stable identifier of a tier, safe to persist and put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    Ember,
    Kindled,
    Burning,
    Iron,
    Storm,
    Undying,
    Eternal,
}

impl TierKind {
    pub fn tier(self) -> &'static Tier {
        // TIERS is ordered by kind.
        &TIERS[self as usize]
    }
}

/// Particle burst settings for a celebration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleTheme {
    pub colors: &'static [&'static str],
    pub count: u32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualTheme {
    pub color: &'static str,
    pub glow: &'static str,
    pub text_color: &'static str,
    pub aura: &'static str,
    pub particles: ParticleTheme,
}

/// A named bucket of streak lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tier {
    pub kind: TierKind,
    pub min_days: u32,
    /// Inclusive; `None` for the open-ended top tier.
    pub max_days: Option<u32>,
    pub name: &'static str,
    pub flavor: &'static str,
    pub theme: VisualTheme,
}

impl Tier {
    pub fn contains(&self, days: u32) -> bool {
        days >= self.min_days && self.max_days.map_or(true, |max| days <= max)
    }

    /// Position in the catalog, 0 for the lowest tier.
    pub fn index(&self) -> usize {
        self.kind as usize
    }
}

/// Tiers below this length do not exist.
pub const MIN_TIER_DAYS: u32 = 3;

pub static TIERS: [Tier; 7] = [
    Tier {
        kind: TierKind::Ember,
        min_days: 3,
        max_days: Some(9),
        name: "The Ember",
        flavor: "a spark that refuses to die",
        theme: VisualTheme {
            color: "#e07b3a",
            glow: "rgba(224,123,58,0.7)",
            text_color: "#e07b3a",
            aura: "radial-gradient(circle, rgba(224,123,58,0.4), transparent 70%)",
            particles: ParticleTheme {
                colors: &["#e07b3a", "#f4a55a", "#fff8e0"],
                count: 18,
                speed: 1.2,
            },
        },
    },
    Tier {
        kind: TierKind::Kindled,
        min_days: 10,
        max_days: Some(19),
        name: "Kindled",
        flavor: "something stirs within the smoke",
        theme: VisualTheme {
            color: "#e8a030",
            glow: "rgba(232,160,48,0.75)",
            text_color: "#e8a030",
            aura: "radial-gradient(circle, rgba(232,160,48,0.45), transparent 70%)",
            particles: ParticleTheme {
                colors: &["#e8a030", "#ffce55", "#ffe9a0"],
                count: 24,
                speed: 1.5,
            },
        },
    },
    Tier {
        kind: TierKind::Burning,
        min_days: 20,
        max_days: Some(29),
        name: "The Burning One",
        flavor: "the heat grows undeniable",
        theme: VisualTheme {
            color: "#d4451a",
            glow: "rgba(212,69,26,0.8)",
            text_color: "#e05a30",
            aura: "radial-gradient(circle, rgba(212,69,26,0.5), transparent 70%)",
            particles: ParticleTheme {
                colors: &["#d4451a", "#ff7040", "#ffb080"],
                count: 30,
                speed: 1.8,
            },
        },
    },
    Tier {
        kind: TierKind::Iron,
        min_days: 30,
        max_days: Some(49),
        name: "Iron Discipline",
        flavor: "will forged in the fire",
        theme: VisualTheme {
            color: "#7ab3d4",
            glow: "rgba(122,179,212,0.8)",
            text_color: "#7ab3d4",
            aura: "radial-gradient(circle, rgba(122,179,212,0.5), rgba(212,69,26,0.2), transparent 70%)",
            particles: ParticleTheme {
                colors: &["#7ab3d4", "#aad4f0", "#e0f4ff", "#d4451a"],
                count: 36,
                speed: 2.0,
            },
        },
    },
    Tier {
        kind: TierKind::Storm,
        min_days: 50,
        max_days: Some(74),
        name: "Storm Forged",
        flavor: "lightning in the marrow",
        theme: VisualTheme {
            color: "#b06ee0",
            glow: "rgba(176,110,224,0.85)",
            text_color: "#c490f0",
            aura: "radial-gradient(circle, rgba(176,110,224,0.55), rgba(70,30,120,0.3), transparent 70%)",
            particles: ParticleTheme {
                colors: &["#b06ee0", "#d0a0ff", "#7040b0", "#fff"],
                count: 42,
                speed: 2.4,
            },
        },
    },
    Tier {
        kind: TierKind::Undying,
        min_days: 75,
        max_days: Some(99),
        name: "The Undying",
        flavor: "beyond pain. beyond doubt.",
        theme: VisualTheme {
            color: "#3dba6f",
            glow: "rgba(61,186,111,0.9)",
            text_color: "#5de090",
            aura: "radial-gradient(circle, rgba(61,186,111,0.6), rgba(10,60,30,0.4), transparent 70%)",
            particles: ParticleTheme {
                colors: &["#3dba6f", "#7fffc0", "#c9a84c", "#fff"],
                count: 50,
                speed: 2.8,
            },
        },
    },
    Tier {
        kind: TierKind::Eternal,
        min_days: 100,
        max_days: None,
        name: "Eternal Flame",
        flavor: "you have become the ritual.",
        theme: VisualTheme {
            color: "#c9a84c",
            glow: "rgba(255,220,80,1)",
            text_color: "#ffe44a",
            aura: "radial-gradient(circle, rgba(255,220,80,0.7), rgba(200,80,20,0.4), rgba(100,20,80,0.2), transparent 70%)",
            particles: ParticleTheme {
                colors: &["#c9a84c", "#fff8a0", "#ff9a30", "#3dba6f", "#fff"],
                count: 60,
                speed: 3.2,
            },
        },
    },
];

/// The tier whose range contains `days`, or `None` below three days.
pub fn get_tier(days: u32) -> Option<&'static Tier> {
    TIERS.iter().find(|t| t.contains(days))
}

/// Day 3, then every 10th day through 99, then every 25th.
pub fn is_milestone(days: u32) -> bool {
    match days {
        3 => true,
        0..=9 => false,
        10..=99 => days % 10 == 0,
        _ => days % 25 == 0,
    }
}
