//! Motivational tips shown alongside the daily overview.

use rand::Rng;

pub const DEFAULT_TIPS: [&str; 5] = [
    "Small steps matter\u{2014}one dose at a time.",
    "Keep water nearby to make taking medicines easier.",
    "Set gentle reminders that suit your routine.",
    "Celebrate streaks\u{2014}consistency builds health!",
    "Place your medicine box where you can easily see it.",
];

/// Pick one tip at random.
pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DEFAULT_TIPS[rng.gen_range(0..DEFAULT_TIPS.len())]
}
