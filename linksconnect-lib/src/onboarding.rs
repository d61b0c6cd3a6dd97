//! The three-step onboarding form that turns a new user into a [`GolferProfile`].
//!
//! ```text
//! Identity <-> Handicap <-> Persona -> (complete)
//! ```
//!
//! Identity collects who and where the golfer is, Handicap optionally imports a
//! handicap from a GHIN number, and Persona picks a play style and bio. Moving back
//! never loses anything already typed.

use tracing::{debug, warn};

use crate::{
    Error, Result,
    profile::{GolferProfile, Handicap, PlayStyle, ProfileId, avatar_url},
    services::ghin::GhinRecord,
};

pub const DEFAULT_AGE: u32 = 30;
pub const DEFAULT_HOME_COURSE: &str = "Public Links";
pub const DEFAULT_BIO: &str = "Ready to play!";
pub const IMPORT_FAILED_NOTICE: &str =
    "Could not find GHIN number. Please enter handicap manually.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Identity,
    Handicap,
    Persona,
}

/// Everything typed so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub name: String,
    pub location: String,
    pub home_course: String,
    pub ghin_number: String,
    /// `None` until a number is entered or imported.
    pub handicap: Option<Handicap>,
    pub play_style: PlayStyle,
    pub bio: String,
}

impl Form {
    /// Name and location are the only required fields.
    pub fn has_identity(&self) -> bool {
        !self.name.trim().is_empty() && !self.location.trim().is_empty()
    }

    /// Build the final profile, filling defaults for anything left blank.
    pub fn assemble(&self, id: ProfileId) -> Result<GolferProfile> {
        if !self.has_identity() {
            return Err(Error::IncompleteProfile);
        }

        let name = self.name.trim().to_string();

        Ok(GolferProfile {
            id,
            avatar_url: Some(avatar_url(&name)),
            name,
            age: DEFAULT_AGE,
            handicap: self.handicap.unwrap_or(Handicap::SCRATCH),
            location: self.location.trim().to_string(),
            home_course: non_blank(&self.home_course)
                .unwrap_or(DEFAULT_HOME_COURSE)
                .to_string(),
            bio: non_blank(&self.bio).unwrap_or(DEFAULT_BIO).to_string(),
            ghin_number: non_blank(&self.ghin_number).map(str::to_string),
            play_style: self.play_style,
        })
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parse the manual handicap field. Anything that isn't a finite number counts as
/// unset.
fn parse_handicap(input: &str) -> Option<Handicap> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .map(Handicap::new)
}

#[derive(Debug, Clone)]
pub enum Message {
    // Identity
    NameInput(String),
    LocationInput(String),
    HomeCourseInput(String),
    // Handicap
    GhinInput(String),
    HandicapInput(String),
    ImportPressed,
    Imported(GhinRecord),
    ImportFailed(String),
    NoticeDismissed,
    // Persona
    PlayStyleSelected(PlayStyle),
    BioInput(String),
    EnhancePressed,
    Enhanced(String),
    // Navigation
    NextPressed,
    BackPressed,
    FinishPressed,
}

/// Work the caller has to do on behalf of the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Look up the handicap for this GHIN number, answer with
    /// [`Message::Imported`] or [`Message::ImportFailed`].
    Lookup(String),
    /// Rewrite the bio, answer with [`Message::Enhanced`].
    Enhance { bio: String, play_style: PlayStyle },
    /// Onboarding is done, persist the profile.
    Complete(GolferProfile),
}

#[derive(Debug, Default)]
pub struct Onboarding {
    step: Step,
    form: Form,
    /// Raw contents of the manual handicap field
    handicap_input: String,
    importing: bool,
    enhancing: bool,
    notice: Option<String>,
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::NameInput(name) => {
                self.form.name = name;
                Action::None
            }
            Message::LocationInput(location) => {
                self.form.location = location;
                Action::None
            }
            Message::HomeCourseInput(course) => {
                self.form.home_course = course;
                Action::None
            }
            Message::GhinInput(ghin) => {
                self.form.ghin_number = ghin;
                Action::None
            }
            Message::HandicapInput(input) => {
                self.form.handicap = parse_handicap(&input);
                self.handicap_input = input;
                Action::None
            }
            Message::ImportPressed => {
                if !self.can_import() {
                    return Action::None;
                }
                self.importing = true;
                self.notice = None;
                Action::Lookup(self.form.ghin_number.trim().to_string())
            }
            Message::Imported(record) => {
                if !self.importing {
                    debug!("Ignoring handicap {} nobody asked for", record.handicap);
                    return Action::None;
                }
                self.importing = false;
                debug!("Imported handicap {} for {}", record.handicap, record.name);
                self.form.handicap = Some(record.handicap);
                self.handicap_input = record.handicap.value().to_string();
                Action::None
            }
            Message::ImportFailed(reason) => {
                if !self.importing {
                    debug!("Ignoring GHIN failure nobody asked for: {reason}");
                    return Action::None;
                }
                self.importing = false;
                warn!("GHIN import failed: {reason}");
                self.notice = Some(IMPORT_FAILED_NOTICE.to_string());
                Action::None
            }
            Message::NoticeDismissed => {
                self.notice = None;
                Action::None
            }
            Message::PlayStyleSelected(style) => {
                self.form.play_style = style;
                Action::None
            }
            Message::BioInput(bio) => {
                self.form.bio = bio;
                Action::None
            }
            Message::EnhancePressed => {
                if !self.can_enhance() {
                    return Action::None;
                }
                self.enhancing = true;
                Action::Enhance {
                    bio: self.form.bio.clone(),
                    play_style: self.form.play_style,
                }
            }
            Message::Enhanced(bio) => {
                if !self.enhancing {
                    debug!("Ignoring bio nobody asked for");
                    return Action::None;
                }
                self.enhancing = false;
                if !bio.trim().is_empty() {
                    self.form.bio = bio;
                }
                Action::None
            }
            Message::NextPressed => {
                match self.step {
                    Step::Identity if self.form.has_identity() => self.step = Step::Handicap,
                    Step::Identity => debug!("Name and location are required"),
                    Step::Handicap => self.step = Step::Persona,
                    Step::Persona => {}
                }
                Action::None
            }
            Message::BackPressed => {
                match self.step {
                    Step::Identity => {}
                    Step::Handicap => self.step = Step::Identity,
                    Step::Persona => self.step = Step::Handicap,
                }
                Action::None
            }
            Message::FinishPressed => {
                if self.step != Step::Persona {
                    return Action::None;
                }
                match self.form.assemble(ProfileId::generate()) {
                    Ok(profile) => Action::Complete(profile),
                    Err(e) => {
                        warn!("Cannot finish onboarding: {e}");
                        Action::None
                    }
                }
            }
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn handicap_input(&self) -> &str {
        &self.handicap_input
    }

    /// User-visible notice to show until dismissed.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Identity => self.form.has_identity(),
            Step::Handicap => true,
            Step::Persona => false,
        }
    }

    pub fn can_import(&self) -> bool {
        !self.importing && !self.form.ghin_number.trim().is_empty()
    }

    pub fn can_enhance(&self) -> bool {
        !self.enhancing && !self.form.bio.trim().is_empty()
    }

    pub fn is_importing(&self) -> bool {
        self.importing
    }

    pub fn is_enhancing(&self) -> bool {
        self.enhancing
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn identity(onboarding: &mut Onboarding, name: &str, location: &str) {
        onboarding.update(Message::NameInput(name.into()));
        onboarding.update(Message::LocationInput(location.into()));
    }

    fn to_persona(onboarding: &mut Onboarding) {
        onboarding.update(Message::NextPressed);
        onboarding.update(Message::NextPressed);
        assert_eq!(onboarding.step(), Step::Persona);
    }

    #[test]
    fn test_identity_requires_name_and_location() {
        let mut onboarding = Onboarding::new();

        onboarding.update(Message::NameInput("Ana".into()));
        assert!(!onboarding.can_advance());
        assert_eq!(onboarding.update(Message::NextPressed), Action::None);
        assert_eq!(onboarding.step(), Step::Identity);

        onboarding.update(Message::LocationInput("   ".into()));
        onboarding.update(Message::NextPressed);
        assert_eq!(onboarding.step(), Step::Identity);

        onboarding.update(Message::LocationInput("Reno, NV".into()));
        onboarding.update(Message::NextPressed);
        assert_eq!(onboarding.step(), Step::Handicap);
    }

    #[test]
    fn test_back_keeps_fields() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        onboarding.update(Message::HomeCourseInput("Wolf Run".into()));
        onboarding.update(Message::NextPressed);
        onboarding.update(Message::GhinInput("1234567".into()));
        onboarding.update(Message::HandicapInput("14.2".into()));

        onboarding.update(Message::BackPressed);
        assert_eq!(onboarding.step(), Step::Identity);
        assert_eq!(onboarding.form().home_course, "Wolf Run");

        onboarding.update(Message::NextPressed);
        assert_eq!(onboarding.step(), Step::Handicap);
        assert_eq!(onboarding.form().ghin_number, "1234567");
        assert_eq!(onboarding.form().handicap, Some(Handicap::new(14.2)));
        assert_eq!(onboarding.handicap_input(), "14.2");
    }

    #[test]
    fn test_persona_can_go_back_to_handicap() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        to_persona(&mut onboarding);
        onboarding.update(Message::BioInput("Long hitter".into()));

        onboarding.update(Message::BackPressed);
        assert_eq!(onboarding.step(), Step::Handicap);

        onboarding.update(Message::NextPressed);
        assert_eq!(onboarding.form().bio, "Long hitter");
    }

    #[test]
    fn test_import_disabled_without_ghin() {
        let mut onboarding = Onboarding::new();

        assert!(!onboarding.can_import());
        assert_eq!(onboarding.update(Message::ImportPressed), Action::None);
    }

    #[test]
    fn test_import_success_overwrites_handicap() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        onboarding.update(Message::NextPressed);
        onboarding.update(Message::HandicapInput("22".into()));
        onboarding.update(Message::GhinInput(" 12345 ".into()));

        let action = onboarding.update(Message::ImportPressed);
        assert_eq!(action, Action::Lookup("12345".into()));
        assert!(onboarding.is_importing());
        assert!(!onboarding.can_import());

        // A second press while in flight does nothing
        assert_eq!(onboarding.update(Message::ImportPressed), Action::None);

        onboarding.update(Message::Imported(GhinRecord {
            handicap: Handicap::new(10.5),
            name: "Golfer #12345".into(),
        }));

        assert!(!onboarding.is_importing());
        assert_eq!(onboarding.step(), Step::Handicap);
        assert_eq!(onboarding.form().handicap, Some(Handicap::new(10.5)));
        assert_eq!(onboarding.handicap_input(), "10.5");
    }

    #[test]
    fn test_import_failure_keeps_handicap() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        onboarding.update(Message::NextPressed);
        onboarding.update(Message::HandicapInput("8.4".into()));
        onboarding.update(Message::GhinInput("123".into()));

        onboarding.update(Message::ImportPressed);
        onboarding.update(Message::ImportFailed("Invalid GHIN number: 123".into()));

        assert_eq!(onboarding.form().handicap, Some(Handicap::new(8.4)));
        assert_eq!(onboarding.notice(), Some(IMPORT_FAILED_NOTICE));
        assert!(onboarding.can_import());
        assert_eq!(onboarding.step(), Step::Handicap);

        onboarding.update(Message::NoticeDismissed);
        assert_eq!(onboarding.notice(), None);
    }

    #[test]
    fn test_enhance_replaces_bio() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        to_persona(&mut onboarding);

        assert!(!onboarding.can_enhance());
        assert_eq!(onboarding.update(Message::EnhancePressed), Action::None);

        onboarding.update(Message::PlayStyleSelected(PlayStyle::Competitive));
        onboarding.update(Message::BioInput("I like golf".into()));

        let action = onboarding.update(Message::EnhancePressed);
        assert_eq!(
            action,
            Action::Enhance {
                bio: "I like golf".into(),
                play_style: PlayStyle::Competitive,
            }
        );
        assert!(!onboarding.can_enhance());

        onboarding.update(Message::Enhanced("Fairway finder, trash talker.".into()));

        assert!(!onboarding.is_enhancing());
        assert_eq!(onboarding.form().bio, "Fairway finder, trash talker.");
    }

    #[test]
    fn test_enhance_with_empty_result_keeps_bio() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        to_persona(&mut onboarding);
        onboarding.update(Message::BioInput("I like golf".into()));

        onboarding.update(Message::EnhancePressed);
        onboarding.update(Message::Enhanced("  ".into()));

        assert_eq!(onboarding.form().bio, "I like golf");
    }

    #[test]
    fn test_results_without_a_request_are_ignored() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        onboarding.update(Message::HandicapInput("8.4".into()));
        onboarding.update(Message::BioInput("I like golf".into()));

        onboarding.update(Message::Imported(GhinRecord {
            handicap: Handicap::new(10.5),
            name: "Golfer #12345".into(),
        }));
        onboarding.update(Message::ImportFailed("late".into()));
        onboarding.update(Message::Enhanced("Someone else's bio".into()));

        assert_eq!(onboarding.form().handicap, Some(Handicap::new(8.4)));
        assert_eq!(onboarding.handicap_input(), "8.4");
        assert_eq!(onboarding.notice(), None);
        assert_eq!(onboarding.form().bio, "I like golf");
    }

    #[test]
    fn test_finish_with_defaults() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        to_persona(&mut onboarding);

        let Action::Complete(profile) = onboarding.update(Message::FinishPressed) else {
            panic!("finishing with a name and location should complete");
        };

        assert_eq!(profile.name(), "Ana");
        assert_eq!(profile.location(), "Reno, NV");
        assert_eq!(profile.home_course(), "Public Links");
        assert_eq!(profile.bio(), "Ready to play!");
        assert_eq!(profile.handicap(), Handicap::new(0.0));
        assert_eq!(profile.age(), 30);
        assert_eq!(profile.play_style(), PlayStyle::WeekendWarrior);
        assert_eq!(profile.ghin_number(), None);
        assert_eq!(
            profile.avatar_url(),
            Some("https://picsum.photos/seed/Ana/200/200")
        );
        assert!(!profile.id().is_empty());
    }

    #[test]
    fn test_finish_generates_unique_ids() {
        let form = Form {
            name: "Ana".into(),
            location: "Reno, NV".into(),
            ..Form::default()
        };

        let a = form.assemble(ProfileId::generate()).unwrap();
        let b = form.assemble(ProfileId::generate()).unwrap();

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_assemble_rejects_missing_identity() {
        let form = Form {
            name: "Ana".into(),
            ..Form::default()
        };

        assert!(matches!(
            form.assemble(ProfileId::generate()),
            Err(Error::IncompleteProfile)
        ));
    }

    #[test]
    fn test_finish_only_from_persona() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");

        assert_eq!(onboarding.update(Message::FinishPressed), Action::None);
    }

    #[test]
    fn test_finish_blocked_if_identity_cleared() {
        let mut onboarding = Onboarding::new();
        identity(&mut onboarding, "Ana", "Reno, NV");
        to_persona(&mut onboarding);
        onboarding.update(Message::NameInput(String::new()));

        assert_eq!(onboarding.update(Message::FinishPressed), Action::None);
    }

    #[test]
    fn test_invalid_handicap_input_counts_as_unset() {
        let mut onboarding = Onboarding::new();

        onboarding.update(Message::HandicapInput("abc".into()));
        assert_eq!(onboarding.form().handicap, None);

        onboarding.update(Message::HandicapInput("NaN".into()));
        assert_eq!(onboarding.form().handicap, None);

        onboarding.update(Message::HandicapInput("-1.2".into()));
        assert_eq!(onboarding.form().handicap, Some(Handicap::new(-1.2)));
    }

    #[test]
    fn test_full_profile() {
        let form = Form {
            name: "  Ana  ".into(),
            location: "Reno, NV".into(),
            home_course: "Wolf Run".into(),
            ghin_number: "1234567".into(),
            handicap: Some(Handicap::new(-2.0)),
            play_style: PlayStyle::Pro,
            bio: "Scratch or better.".into(),
        };

        let profile = form.assemble("me".into()).unwrap();

        assert_eq!(profile.name(), "Ana");
        assert_eq!(profile.home_course(), "Wolf Run");
        assert_eq!(profile.ghin_number(), Some("1234567"));
        assert_eq!(profile.handicap().to_string(), "+2");
        assert_eq!(profile.play_style(), PlayStyle::Pro);
        assert_eq!(profile.bio(), "Scratch or better.");
    }
}
