//! Motivational reward tiers derived from the adherence score.
//!
//! The core only maps a score to one of four discrete tiers; how the tier
//! is displayed (emoji or plain token) is chosen once at startup and baked
//! into the banner, never re-decided per call.

use serde::{Deserialize, Serialize};

/// Discrete reward tier for an adherence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Trophy,
    Smile,
    ThumbsUp,
    Seedling,
}

impl RewardTier {
    /// Tier for a score in `[0.0, 100.0]`. Thresholds are inclusive.
    pub fn for_score(score: f64) -> Self {
        if score >= 92.0 {
            RewardTier::Trophy
        } else if score >= 80.0 {
            RewardTier::Smile
        } else if score >= 60.0 {
            RewardTier::ThumbsUp
        } else {
            RewardTier::Seedling
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            RewardTier::Trophy => "\u{1F3C6}",
            RewardTier::Smile => "\u{1F60A}",
            RewardTier::ThumbsUp => "\u{1F44D}",
            RewardTier::Seedling => "\u{1F331}",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            RewardTier::Trophy => "[trophy]",
            RewardTier::Smile => "[smile]",
            RewardTier::ThumbsUp => "[thumbs-up]",
            RewardTier::Seedling => "[seedling]",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RewardTier::Trophy => "Fantastic adherence!",
            RewardTier::Smile => "Great job! Keep it up.",
            RewardTier::ThumbsUp => "Nice progress\u{2014}keep going!",
            RewardTier::Seedling => "Build your streak and unlock rewards.",
        }
    }
}

/// How the reward symbol is rendered. Selected once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardStyle {
    #[default]
    Emoji,
    Plain,
}

impl std::str::FromStr for RewardStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emoji" => Ok(RewardStyle::Emoji),
            "plain" => Ok(RewardStyle::Plain),
            other => Err(format!("unknown reward style: {other}")),
        }
    }
}

/// Rendered reward banner handed to the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardBanner {
    pub tier: RewardTier,
    pub symbol: String,
    pub message: String,
}

impl RewardBanner {
    pub fn for_score(score: f64, style: RewardStyle) -> Self {
        let tier = RewardTier::for_score(score);
        let symbol = match style {
            RewardStyle::Emoji => tier.emoji(),
            RewardStyle::Plain => tier.token(),
        };
        Self {
            tier,
            symbol: symbol.to_string(),
            message: tier.message().to_string(),
        }
    }
}
