use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::debug;

use crate::{Result, profile::GolferProfile, store::ProfileStore};

/// Bottom navigation tabs, available once a profile exists.
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
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Tab {
    #[default]
    Feed,
    Messages,
    Profile,
}

impl Tab {
    /// Parse a tab name, falling back to [`Tab::Feed`] for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Feed => "Feed",
            Tab::Messages => "Chat",
            Tab::Profile => "Profile",
        }
    }
}

/// What the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Feed,
    Profile,
    Messages,
}

/// Chooses the screen from whether a profile exists and which tab is selected.
#[derive(Debug, Clone, Default)]
pub struct Router {
    tab: Tab,
    has_profile: bool,
}

impl Router {
    pub fn new(has_profile: bool) -> Self {
        Self {
            tab: Tab::default(),
            has_profile,
        }
    }

    /// Build a router from the store, returning the loaded profile alongside it.
    pub fn load(store: &dyn ProfileStore) -> Result<(Self, Option<GolferProfile>)> {
        let profile = store.load()?;
        Ok((Self::new(profile.is_some()), profile))
    }

    pub fn screen(&self) -> Screen {
        if !self.has_profile {
            return Screen::Onboarding;
        }

        match self.tab {
            Tab::Feed => Screen::Feed,
            Tab::Messages => Screen::Messages,
            Tab::Profile => Screen::Profile,
        }
    }

    pub fn navigate(&mut self, tab: Tab) {
        debug!("Navigating to {tab}");
        self.tab = tab;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn has_profile(&self) -> bool {
        self.has_profile
    }

    /// Persist a freshly onboarded profile and move on to the feed.
    pub fn complete_onboarding(
        &mut self,
        store: &dyn ProfileStore,
        profile: &GolferProfile,
    ) -> Result<()> {
        store.save(profile)?;
        self.has_profile = true;
        self.tab = Tab::Feed;
        Ok(())
    }

    /// Forget the profile and go back to onboarding.
    pub fn logout(&mut self, store: &dyn ProfileStore) -> Result<()> {
        store.clear()?;
        self.has_profile = false;
        self.tab = Tab::default();
        Ok(())
    }
}
