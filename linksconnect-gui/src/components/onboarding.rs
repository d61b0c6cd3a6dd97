use iced::{
    Element,
    Length::Fill,
    Task,
    widget::{button, column, combo_box, container, row, space, text, text_input},
};
use linksconnect_lib::{
    GolferProfile, PlayStyle,
    onboarding::{self, Step},
    services::Services,
};
use strum::IntoEnumIterator;

pub use linksconnect_lib::onboarding::Message;

pub enum Action {
    None,
    Run(Task<Message>),
    Complete(GolferProfile),
}

pub struct Onboarding {
    services: Services,
    workflow: onboarding::Onboarding,

    // Widget state
    play_styles: combo_box::State<PlayStyle>,
}

impl Onboarding {
    pub fn new(services: Services) -> (Self, Task<Message>) {
        (
            Self {
                services,
                workflow: onboarding::Onboarding::new(),
                play_styles: combo_box::State::new(PlayStyle::iter().collect()),
            },
            Task::none(),
        )
    }

    /// Start over with an empty form, e.g. after logging out.
    pub fn reset(&mut self) {
        self.workflow = onboarding::Onboarding::new();
    }

    pub fn update(&mut self, message: Message) -> Action {
        match self.workflow.update(message) {
            onboarding::Action::None => Action::None,
            onboarding::Action::Lookup(ghin) => {
                let lookup = self.services.lookup.clone();
                Action::Run(Task::perform(
                    async move { lookup.lookup(&ghin).await.map_err(|e| e.to_string()) },
                    |result| match result {
                        Ok(record) => Message::Imported(record),
                        Err(e) => Message::ImportFailed(e),
                    },
                ))
            }
            onboarding::Action::Enhance { bio, play_style } => {
                let enhancer = self.services.enhancer.clone();
                Action::Run(Task::perform(
                    async move { enhancer.enhance(&bio, play_style).await },
                    Message::Enhanced,
                ))
            }
            onboarding::Action::Complete(profile) => Action::Complete(profile),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let (title, body) = match self.workflow.step() {
            Step::Identity => ("Welcome to LinksConnect", self.identity()),
            Step::Handicap => ("Your Game", self.handicap()),
            Step::Persona => ("Your Vibe", self.persona()),
        };

        container(
            column![
                text(title).size(28),
                text(format!("Step {} of 3", step_number(self.workflow.step()))).size(14),
                body,
                space::vertical(),
                self.navigation(),
            ]
            .spacing(16)
            .max_width(480),
        )
        .padding(24)
        .center_x(Fill)
        .height(Fill)
        .into()
    }

    fn identity(&self) -> Element<'_, Message> {
        let form = self.workflow.form();

        column![
            text("Let's get you set up to find your next foursome."),
            text_input("Full Name", &form.name).on_input(Message::NameInput),
            text_input("City, State", &form.location).on_input(Message::LocationInput),
            text_input("Home Course (optional)", &form.home_course)
                .on_input(Message::HomeCourseInput),
        ]
        .spacing(10)
        .into()
    }

    fn handicap(&self) -> Element<'_, Message> {
        let form = self.workflow.form();

        let import = button(if self.workflow.is_importing() {
            "Verifying..."
        } else {
            "Import"
        })
        .on_press_maybe(self.workflow.can_import().then_some(Message::ImportPressed));

        let mut content = column![
            text("Import from GHIN"),
            row![
                text_input("GHIN Number", &form.ghin_number).on_input(Message::GhinInput),
                import,
            ]
            .spacing(8),
            text("Or enter your handicap index"),
            text_input("e.g. 12.4, or -2 for a plus handicap", self.workflow.handicap_input())
                .on_input(Message::HandicapInput),
        ]
        .spacing(10);

        if let Some(notice) = self.workflow.notice() {
            content = content.push(
                container(
                    row![
                        text(notice),
                        space::horizontal(),
                        button("Dismiss").on_press(Message::NoticeDismissed)
                    ]
                    .spacing(8),
                )
                .padding(8)
                .style(container::bordered_box),
            );
        }

        content.into()
    }

    fn persona(&self) -> Element<'_, Message> {
        let form = self.workflow.form();

        let enhance = button(if self.workflow.is_enhancing() {
            "Enhancing..."
        } else {
            "Enhance with AI"
        })
        .on_press_maybe(self.workflow.can_enhance().then_some(Message::EnhancePressed));

        column![
            text("Play style"),
            combo_box(
                &self.play_styles,
                "Select a play style",
                Some(&form.play_style),
                Message::PlayStyleSelected
            ),
            text(form.play_style.tagline()).size(14),
            text("Bio"),
            text_input("Tell other golfers about your game", &form.bio)
                .on_input(Message::BioInput),
            row![space::horizontal(), enhance],
        ]
        .spacing(10)
        .into()
    }

    fn navigation(&self) -> Element<'_, Message> {
        let back = match self.workflow.step() {
            Step::Identity => None,
            Step::Handicap | Step::Persona => Some(Message::BackPressed),
        };
        let forward = match self.workflow.step() {
            Step::Persona => button("Finish")
                .on_press_maybe(self.workflow.form().has_identity().then_some(Message::FinishPressed)),
            Step::Identity | Step::Handicap => button("Next")
                .on_press_maybe(self.workflow.can_advance().then_some(Message::NextPressed)),
        };

        row![
            button("Back").on_press_maybe(back),
            space::horizontal(),
            forward
        ]
        .into()
    }
}

fn step_number(step: Step) -> u8 {
    match step {
        Step::Identity => 1,
        Step::Handicap => 2,
        Step::Persona => 3,
    }
}
