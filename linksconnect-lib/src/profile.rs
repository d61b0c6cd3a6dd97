use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use derive_more::{Deref, From};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use uuid::Uuid;

/// Opaque identifier of a golfer profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Deref, From, derive_more::Display)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// A fresh random identifier for a newly created profile.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A golf handicap index. Lower is better; negative values are "plus" handicaps,
/// i.e. players better than scratch.
///
/// The [`Display`] impl renders plus handicaps as `+` followed by the absolute
/// value, and everything else as the shortest decimal that round-trips, so a
/// stored `12.3` prints as `12.3` and `0` prints as `0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, From)]
#[serde(transparent)]
pub struct Handicap(f64);

impl Handicap {
    pub const SCRATCH: Self = Self(0.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_plus(self) -> bool {
        self.0 < 0.0
    }

    pub fn band(self) -> HandicapBand {
        if self.0 < 10.0 {
            HandicapBand::Low
        } else if self.0 < 20.0 {
            HandicapBand::Mid
        } else {
            HandicapBand::High
        }
    }
}

impl Display for Handicap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // `abs` also turns -0.0 into 0.0 so it doesn't print as "-0"
        if self.is_plus() {
            write!(f, "+{}", self.0.abs())
        } else {
            write!(f, "{}", self.0.abs())
        }
    }
}

/// Skill band a handicap falls into, used to colour-code golfer cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandicapBand {
    /// Under 10
    Low,
    /// 10 up to but not including 20
    Mid,
    /// 20 and above
    High,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    EnumIter,
    EnumString,
    ValueEnum,
)]
pub enum PlayStyle {
    Casual,
    #[default]
    #[serde(rename = "Weekend Warrior")]
    #[strum(to_string = "Weekend Warrior")]
    WeekendWarrior,
    Competitive,
    Pro,
}

impl PlayStyle {
    /// Longer label shown next to the option when picking a play style.
    pub fn tagline(self) -> &'static str {
        match self {
            PlayStyle::Casual => "Casual (Here for the beer)",
            PlayStyle::WeekendWarrior => "Weekend Warrior",
            PlayStyle::Competitive => "Competitive",
            PlayStyle::Pro => "Pro / Scratch",
        }
    }
}

/// A golfer, either the local user or a candidate shown in the feed.
///
/// Profiles are values: once built they are never mutated, only replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct GolferProfile {
    #[getset(get = "pub")]
    pub(crate) id: ProfileId,
    #[getset(get = "pub")]
    pub(crate) name: String,
    #[getset(get_copy = "pub")]
    pub(crate) age: u32,
    #[getset(get_copy = "pub")]
    pub(crate) handicap: Handicap,
    #[getset(get = "pub")]
    pub(crate) location: String,
    #[getset(get = "pub")]
    pub(crate) home_course: String,
    #[getset(get = "pub")]
    pub(crate) bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ghin_number: Option<String>,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub(crate) play_style: PlayStyle,
}

impl GolferProfile {
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn ghin_number(&self) -> Option<&str> {
        self.ghin_number.as_deref()
    }

    /// GHIN number as shown on the profile screen.
    pub fn ghin_status(&self) -> &str {
        self.ghin_number().unwrap_or("N/A")
    }
}

/// Deterministic placeholder image for the given seed.
pub(crate) fn avatar_url(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/200/200")
}

#[cfg(test)]
impl GolferProfile {
    /// Minimal profile for tests where only the id and handicap matter.
    pub(crate) fn sample(id: &str, handicap: f64) -> Self {
        Self {
            id: id.into(),
            name: format!("Golfer {id}"),
            age: 30,
            handicap: Handicap::new(handicap),
            location: "Reno, NV".into(),
            home_course: "Public Links".into(),
            bio: "Ready to play!".into(),
            avatar_url: None,
            ghin_number: None,
            play_style: PlayStyle::default(),
        }
    }
}
