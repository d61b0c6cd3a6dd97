use std::sync::Arc;

use iced::{
    Element,
    Length::Fill,
    Task, Theme, application,
    widget::{button, center, column, container, row, text},
};
use linksconnect_lib::{
    CoreConfig, FileStore, GolferProfile, Router, Screen, Store, Tab, services::Services,
};
use strum::IntoEnumIterator;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::{
        feed::{self, Feed},
        messages,
        onboarding::{self, Onboarding},
        profile::{self, Profile},
    },
    config::{Cfg, GuiConfig},
};

pub mod components;
pub mod config;

fn main() -> iced::Result {
    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    TabSelected(Tab),
    // Components
    Onboarding(onboarding::Message),
    Feed(feed::Message),
    Profile(profile::Message),
}

enum State {
    Error(String),
    Ready(Box<Session>),
}

struct App {
    title: String,
    cfg: Cfg,
    state: State,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        // Human friendly panicking in release mode
        human_panic::setup_panic!();

        // Logging
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("setting default subscriber failed: {e}");
        }

        let cfg = GuiConfig::load().into_handle();

        let (state, task) = match Session::new(cfg.clone()) {
            Ok((session, task)) => (State::Ready(Box::new(session)), task),
            Err(e) => {
                error!("Failed to start: {e}");
                (State::Error(e.to_string()), Task::none())
            }
        };

        (
            Self {
                title: "LinksConnect".into(),
                cfg,
                state,
            },
            task,
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match &mut self.state {
            State::Error(_) => Task::none(),
            State::Ready(session) => session.update(message),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.state {
            State::Error(e) => center(
                column![text("LinksConnect could not start").size(24), text(e)].spacing(8),
            )
            .into(),
            State::Ready(session) => session.view(),
        }
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        self.cfg.read().theme()
    }
}

/// Everything that only exists once the backend is up.
struct Session {
    cfg: Cfg,
    core: linksconnect_lib::Cfg,
    store: Store,
    services: Services,
    router: Router,
    me: Option<GolferProfile>,
    // Components
    onboarding: Onboarding,
    feed: Option<Feed>,
    profile: Profile,
}

impl Session {
    fn new(cfg: Cfg) -> linksconnect_lib::Result<(Self, Task<Message>)> {
        let core = CoreConfig::load()?.into_handle();
        let store: Store = Arc::new(FileStore::new()?);
        let services = Services::from_config(&core.read())?;
        let (router, me) = Router::load(store.as_ref())?;

        let (onboarding, onboarding_task) = Onboarding::new(services.clone());

        let mut session = Self {
            cfg,
            core,
            store,
            services,
            router,
            me,
            onboarding,
            feed: None,
            profile: Profile::new(),
        };
        let feed_task = session.start_feed();

        Ok((
            session,
            Task::batch([onboarding_task.map(Message::Onboarding), feed_task]),
        ))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.router.navigate(tab);
                Task::none()
            }
            Message::Onboarding(message) => match self.onboarding.update(message) {
                onboarding::Action::None => Task::none(),
                onboarding::Action::Run(task) => task.map(Message::Onboarding),
                onboarding::Action::Complete(profile) => {
                    if let Err(e) = self
                        .router
                        .complete_onboarding(self.store.as_ref(), &profile)
                    {
                        error!("Failed to save profile: {e}");
                        return Task::none();
                    }
                    info!("Welcome, {}", profile.name());
                    self.me = Some(profile);
                    self.start_feed()
                }
            },
            Message::Feed(message) => match &mut self.feed {
                Some(feed) => feed.update(message).map(Message::Feed),
                None => Task::none(),
            },
            Message::Profile(profile::Message::ThemeSelected(theme)) => {
                let mut cfg = self.cfg.write();
                cfg.theme = theme;
                cfg.save();
                Task::none()
            }
            Message::Profile(profile::Message::LogoutPressed) => {
                if let Err(e) = self.router.logout(self.store.as_ref()) {
                    error!("Failed to log out: {e}");
                    return Task::none();
                }
                self.me = None;
                self.feed = None;
                self.onboarding.reset();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let content = match (self.router.screen(), &self.me) {
            (Screen::Onboarding, _) | (_, None) => {
                return self.onboarding.view().map(Message::Onboarding);
            }
            (Screen::Feed, Some(_)) => match &self.feed {
                Some(feed) => feed.view().map(Message::Feed),
                None => center(text("Scouting the course for players...")).into(),
            },
            (Screen::Profile, Some(me)) => self
                .profile
                .view(me, self.cfg.read().theme)
                .map(Message::Profile),
            (Screen::Messages, Some(_)) => messages::view(),
        };

        column![container(content).height(Fill), self.tab_bar()].into()
    }

    fn tab_bar(&self) -> Element<'_, Message> {
        let tabs = Tab::iter().map(|tab| -> Element<'_, Message> {
            let style: fn(&Theme, button::Status) -> button::Style = if tab == self.router.tab() {
                button::primary
            } else {
                button::text
            };
            button(text(tab.label()).width(Fill).center())
                .style(style)
                .width(Fill)
                .on_press(Message::TabSelected(tab))
                .into()
        });

        container(row(tabs).spacing(4))
            .padding(8)
            .style(container::bordered_box)
            .into()
    }

    /// Begin scouting around the signed-in golfer, if there is one.
    fn start_feed(&mut self) -> Task<Message> {
        let Some(me) = &self.me else {
            return Task::none();
        };

        let (feed, task) = Feed::new(
            self.services.directory.clone(),
            self.cfg.clone(),
            me.location(),
            self.core.read().feed.count,
        );
        self.feed = Some(feed);

        task.map(Message::Feed)
    }
}
