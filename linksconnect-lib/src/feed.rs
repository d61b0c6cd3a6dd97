//! The nearby-golfer feed: bracket filtering, handicap sorting and the screen state
//! that ties them to directory fetches.

use std::{
    cmp::Ordering,
    sync::atomic::{self, AtomicU64},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::debug;

use crate::profile::{GolferProfile, Handicap};

/// Handicap range filter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    EnumIter,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Bracket {
    #[default]
    All,
    Low,
    Mid,
    High,
}

impl Bracket {
    pub fn contains(self, handicap: Handicap) -> bool {
        let h = handicap.value();
        match self {
            Bracket::All => true,
            Bracket::Low => h < 10.0,
            Bracket::Mid => (10.0..20.0).contains(&h),
            Bracket::High => h >= 20.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bracket::All => "All",
            Bracket::Low => "Low (<10)",
            Bracket::Mid => "Mid (10-20)",
            Bracket::High => "High (20+)",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, ValueEnum,
)]
pub enum SortOrder {
    #[default]
    #[value(name = "asc", alias = "ascending")]
    Ascending,
    #[value(name = "desc", alias = "descending")]
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Keep the candidates inside `bracket`, ordered by handicap.
///
/// The sort is stable: golfers with equal handicaps keep their relative order.
pub fn filter_sort(
    candidates: &[GolferProfile],
    bracket: Bracket,
    order: SortOrder,
) -> Vec<GolferProfile> {
    let mut shown: Vec<GolferProfile> = candidates
        .iter()
        .filter(|p| bracket.contains(p.handicap()))
        .cloned()
        .collect();

    shown.sort_by(|a, b| {
        let ordering = compare_handicaps(a.handicap(), b.handicap());
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    shown
}

fn compare_handicaps(a: Handicap, b: Handicap) -> Ordering {
    // total_cmp orders -0.0 before 0.0, they must compare equal here
    let key = |h: Handicap| if h.value() == 0.0 { 0.0 } else { h.value() };
    key(a).total_cmp(&key(b))
}

/// Source of request tickets for every feed in the process, so a response can
/// never match a feed other than the one that asked for it.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Identifies one directory request. Responses carrying an older generation are
/// stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u64);

impl Generation {
    fn next() -> Self {
        Self(NEXT_GENERATION.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    LocationChanged(String),
    Refresh,
    Loaded {
        generation: Generation,
        profiles: Vec<GolferProfile>,
    },
    BracketSelected(Bracket),
    SortToggled,
    ClearFilters,
}

/// Side effect requested by [`Feed::update`]; the caller performs it and feeds the
/// result back as [`Message::Loaded`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Fetch {
        generation: Generation,
        location: String,
        count: usize,
    },
}

#[derive(Debug, Clone)]
pub enum State {
    Loading,
    Loaded(Vec<GolferProfile>),
}

/// What the feed screen should currently render.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Loading,
    /// Candidates arrived but none fall into the selected bracket.
    Empty,
    Golfers(Vec<GolferProfile>),
}

pub struct Feed {
    location: String,
    count: usize,
    generation: Generation,
    state: State,
    bracket: Bracket,
    order: SortOrder,
}

impl Feed {
    pub fn new(location: &str, count: usize) -> (Self, Action) {
        let mut feed = Self {
            location: location.to_string(),
            count,
            generation: Generation::default(),
            state: State::Loading,
            bracket: Bracket::default(),
            order: SortOrder::default(),
        };
        let action = feed.fetch();

        (feed, action)
    }

    /// Restore filter preferences, e.g. from a previous session.
    pub fn with_preferences(mut self, bracket: Bracket, order: SortOrder) -> Self {
        self.bracket = bracket;
        self.order = order;
        self
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::LocationChanged(location) => {
                if location == self.location {
                    return Action::None;
                }
                self.location = location;
                self.fetch()
            }
            Message::Refresh => self.fetch(),
            Message::Loaded {
                generation,
                profiles,
            } => {
                if generation != self.generation {
                    debug!(
                        "Discarding {} stale golfers from generation {:?}",
                        profiles.len(),
                        generation
                    );
                    return Action::None;
                }
                self.state = State::Loaded(profiles);
                Action::None
            }
            Message::BracketSelected(bracket) => {
                self.bracket = bracket;
                Action::None
            }
            Message::SortToggled => {
                self.order = self.order.toggle();
                Action::None
            }
            Message::ClearFilters => {
                self.bracket = Bracket::All;
                Action::None
            }
        }
    }

    pub fn shown(&self) -> Shown {
        match &self.state {
            State::Loading => Shown::Loading,
            State::Loaded(candidates) => {
                let golfers = filter_sort(candidates, self.bracket, self.order);
                if golfers.is_empty() {
                    Shown::Empty
                } else {
                    Shown::Golfers(golfers)
                }
            }
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn bracket(&self) -> Bracket {
        self.bracket
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    fn fetch(&mut self) -> Action {
        self.generation = Generation::next();
        self.state = State::Loading;

        debug!(
            "Fetching {} golfers near {} ({:?})",
            self.count, self.location, self.generation
        );

        Action::Fetch {
            generation: self.generation,
            location: self.location.clone(),
            count: self.count,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn handicaps(profiles: &[GolferProfile]) -> Vec<f64> {
        profiles.iter().map(|p| p.handicap().value()).collect()
    }

    fn ids(profiles: &[GolferProfile]) -> Vec<String> {
        profiles.iter().map(|p| p.id().to_string()).collect()
    }

    fn candidates() -> Vec<GolferProfile> {
        vec![
            GolferProfile::sample("a", 12.0),
            GolferProfile::sample("b", -2.0),
            GolferProfile::sample("c", 25.5),
            GolferProfile::sample("d", 9.9),
            GolferProfile::sample("e", 12.0),
            GolferProfile::sample("f", 20.0),
            GolferProfile::sample("g", 10.0),
        ]
    }

    #[test]
    fn test_mid_bracket_scenario() {
        let list = vec![
            GolferProfile::sample("1", 5.0),
            GolferProfile::sample("2", 15.0),
            GolferProfile::sample("3", 25.0),
        ];

        let shown = filter_sort(&list, Bracket::Mid, SortOrder::Ascending);

        assert_eq!(ids(&shown), vec!["2"]);
    }

    #[test]
    fn test_brackets_only_keep_matching_golfers() {
        let list = candidates();

        for bracket in [Bracket::Low, Bracket::Mid, Bracket::High] {
            let shown = filter_sort(&list, bracket, SortOrder::Ascending);
            assert!(shown.iter().all(|p| bracket.contains(p.handicap())));
            assert!(shown.iter().all(|p| list.contains(p)));
        }

        assert_eq!(
            ids(&filter_sort(&list, Bracket::Low, SortOrder::Ascending)),
            vec!["b", "d"]
        );
        assert_eq!(
            ids(&filter_sort(&list, Bracket::High, SortOrder::Ascending)),
            vec!["f", "c"]
        );
    }

    #[test]
    fn test_all_bracket_keeps_everything() {
        let list = candidates();
        let shown = filter_sort(&list, Bracket::All, SortOrder::Ascending);

        assert_eq!(shown.len(), list.len());
        assert!(list.iter().all(|p| shown.contains(p)));
    }

    #[test]
    fn test_sort_is_stable() {
        let list = candidates();

        let asc = filter_sort(&list, Bracket::Mid, SortOrder::Ascending);
        assert_eq!(ids(&asc), vec!["g", "a", "e"]);

        let desc = filter_sort(&list, Bracket::Mid, SortOrder::Descending);
        assert_eq!(ids(&desc), vec!["a", "e", "g"]);
    }

    #[test]
    fn test_descending_reverses_distinct_handicaps() {
        let list = vec![
            GolferProfile::sample("a", 3.0),
            GolferProfile::sample("b", -1.0),
            GolferProfile::sample("c", 30.0),
            GolferProfile::sample("d", 14.2),
        ];

        let asc = filter_sort(&list, Bracket::All, SortOrder::Ascending);
        let mut desc = filter_sort(&list, Bracket::All, SortOrder::Descending);
        desc.reverse();

        assert_eq!(handicaps(&asc), vec![-1.0, 3.0, 14.2, 30.0]);
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_zero_and_negative_zero_tie() {
        let list = vec![
            GolferProfile::sample("a", 0.0),
            GolferProfile::sample("b", -0.0),
        ];

        let shown = filter_sort(&list, Bracket::All, SortOrder::Ascending);

        assert_eq!(ids(&shown), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_sort(&[], Bracket::High, SortOrder::Descending).is_empty());
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Ascending.toggle(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggle(), SortOrder::Ascending);
    }

    #[test]
    fn test_feed_loading_then_loaded() {
        let (mut feed, action) = Feed::new("Reno, NV", 10);

        let Action::Fetch {
            generation,
            location,
            count,
        } = action
        else {
            panic!("a new feed should fetch");
        };
        assert_eq!(location, "Reno, NV");
        assert_eq!(count, 10);
        assert_eq!(feed.shown(), Shown::Loading);

        feed.update(Message::Loaded {
            generation,
            profiles: candidates(),
        });

        assert!(matches!(feed.shown(), Shown::Golfers(g) if g.len() == 7));
    }

    #[test]
    fn test_feed_empty_is_not_loading() {
        let (mut feed, action) = Feed::new("Reno, NV", 10);
        let Action::Fetch { generation, .. } = action else {
            panic!("a new feed should fetch");
        };

        feed.update(Message::Loaded {
            generation,
            profiles: vec![GolferProfile::sample("a", 4.0)],
        });
        feed.update(Message::BracketSelected(Bracket::High));

        assert_eq!(feed.shown(), Shown::Empty);

        feed.update(Message::ClearFilters);

        assert_eq!(feed.bracket(), Bracket::All);
        assert!(matches!(feed.shown(), Shown::Golfers(_)));
    }

    #[test]
    fn test_feed_discards_stale_response() {
        let (mut feed, first) = Feed::new("Reno, NV", 10);
        let Action::Fetch {
            generation: stale, ..
        } = first
        else {
            panic!("a new feed should fetch");
        };

        let second = feed.update(Message::LocationChanged("Austin, TX".into()));
        let Action::Fetch {
            generation: current,
            location,
            ..
        } = second
        else {
            panic!("changing location should refetch");
        };
        assert_eq!(location, "Austin, TX");
        assert_ne!(stale, current);

        feed.update(Message::Loaded {
            generation: stale,
            profiles: vec![GolferProfile::sample("old", 1.0)],
        });
        assert_eq!(feed.shown(), Shown::Loading);

        feed.update(Message::Loaded {
            generation: current,
            profiles: vec![GolferProfile::sample("new", 1.0)],
        });
        assert!(matches!(feed.shown(), Shown::Golfers(g) if ids(&g) == vec!["new"]));
    }

    #[test]
    fn test_new_feed_rejects_previous_feed_response() {
        let (_old, first) = Feed::new("Reno, NV", 10);
        let Action::Fetch {
            generation: old, ..
        } = first
        else {
            panic!("a new feed should fetch");
        };

        let (mut fresh, second) = Feed::new("Austin, TX", 10);
        let Action::Fetch {
            generation: current,
            ..
        } = second
        else {
            panic!("a new feed should fetch");
        };
        assert_ne!(old, current);

        fresh.update(Message::Loaded {
            generation: old,
            profiles: vec![GolferProfile::sample("from-reno", 4.0)],
        });

        assert_eq!(fresh.shown(), Shown::Loading);
    }

    #[test]
    fn test_same_location_does_not_refetch() {
        let (mut feed, _) = Feed::new("Reno, NV", 10);

        assert_eq!(
            feed.update(Message::LocationChanged("Reno, NV".into())),
            Action::None
        );
    }

    #[test]
    fn test_feed_sort_toggle_and_preferences() {
        let (feed, _) = Feed::new("Reno, NV", 10);
        let mut feed = feed.with_preferences(Bracket::Mid, SortOrder::Descending);

        assert_eq!(feed.bracket(), Bracket::Mid);
        assert_eq!(feed.order(), SortOrder::Descending);

        feed.update(Message::SortToggled);

        assert_eq!(feed.order(), SortOrder::Ascending);
    }
}
