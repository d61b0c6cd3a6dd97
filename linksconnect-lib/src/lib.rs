//! Core of LinksConnect: golfer profiles, the nearby-golfer feed, the onboarding
//! workflow and the clients that talk to the outside world.
//!
//! Front ends drive the [`Onboarding`] and [`Feed`] state machines by feeding them
//! messages and performing the [`onboarding::Action`]s and [`feed::Action`]s they
//! return. The only persistent state is the single self-profile held by a
//! [`ProfileStore`].

pub mod config;
pub mod error;
pub mod feed;
pub mod fs;
pub mod onboarding;
pub mod profile;
pub mod router;
pub mod services;
pub mod store;

pub use config::{Cfg, CoreConfig};
pub use error::{Error, Result};
pub use feed::{Bracket, Feed, SortOrder, filter_sort};
pub use onboarding::Onboarding;
pub use profile::{GolferProfile, Handicap, HandicapBand, PlayStyle, ProfileId};
pub use router::{Router, Screen, Tab};
pub use store::{FileStore, MemoryStore, ProfileStore, Store};
