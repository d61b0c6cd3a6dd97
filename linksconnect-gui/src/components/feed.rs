use std::sync::Arc;

use iced::{
    Color, Element,
    Length::Fill,
    Task,
    widget::{Column, button, column, container, row, scrollable, space, text, text_input},
};
use linksconnect_lib::{
    Bracket, GolferProfile, HandicapBand, SortOrder,
    feed::{self, Shown},
    services::directory::GolferDirectory,
};
use strum::IntoEnumIterator;

use crate::config::Cfg;

#[derive(Debug, Clone)]
pub enum Message {
    LocationInput(String),
    LocationSubmitted,
    Feed(feed::Message),
}

pub struct Feed {
    directory: Arc<dyn GolferDirectory>,
    cfg: Cfg,
    feed: feed::Feed,
    location_input: String,
}

impl Feed {
    pub fn new(
        directory: Arc<dyn GolferDirectory>,
        cfg: Cfg,
        location: &str,
        count: usize,
    ) -> (Self, Task<Message>) {
        let (feed, action) = feed::Feed::new(location, count);
        let (bracket, order) = {
            let cfg = cfg.read();
            (cfg.feed.bracket, cfg.feed.order)
        };
        let feed = feed.with_preferences(bracket, order);

        let this = Self {
            directory,
            cfg,
            feed,
            location_input: location.to_string(),
        };
        let task = this.perform(action);

        (this, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LocationInput(location) => {
                self.location_input = location;
                Task::none()
            }
            Message::LocationSubmitted => {
                let location = self.location_input.trim().to_string();
                if location.is_empty() {
                    return Task::none();
                }
                let action = self.feed.update(feed::Message::LocationChanged(location));
                self.perform(action)
            }
            Message::Feed(message) => {
                let remember = matches!(
                    message,
                    feed::Message::BracketSelected(_)
                        | feed::Message::SortToggled
                        | feed::Message::ClearFilters
                );
                let action = self.feed.update(message);
                if remember {
                    self.remember_filters();
                }
                self.perform(action)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = row![
            column![
                text("Nearby Golfers").size(24),
                text(self.feed.location()).size(14),
            ],
            space::horizontal(),
            button("Refresh").on_press(Message::Feed(feed::Message::Refresh)),
        ];

        let location = row![
            text_input("City, State", &self.location_input)
                .on_input(Message::LocationInput)
                .on_submit(Message::LocationSubmitted),
            button("Search").on_press(Message::LocationSubmitted),
        ]
        .spacing(8);

        let brackets = Bracket::iter().map(|bracket| -> Element<'_, Message> {
            let style: fn(&iced::Theme, button::Status) -> button::Style =
                if bracket == self.feed.bracket() {
                    button::primary
                } else {
                    button::secondary
                };
            button(text(bracket.label()))
                .style(style)
                .on_press(Message::Feed(feed::Message::BracketSelected(bracket)))
                .into()
        });

        let sort = button(match self.feed.order() {
            SortOrder::Ascending => "HCP ↑",
            SortOrder::Descending => "HCP ↓",
        })
        .on_press(Message::Feed(feed::Message::SortToggled));

        let filters = row![
            row(brackets).spacing(4),
            space::horizontal(),
            sort
        ];

        let body: Element<'_, Message> = match self.feed.shown() {
            Shown::Loading => text("Scouting the course for players...").into(),
            Shown::Empty => column![
                text("No golfers found in this range."),
                button("Clear filters").on_press(Message::Feed(feed::Message::ClearFilters)),
            ]
            .spacing(8)
            .into(),
            Shown::Golfers(golfers) => scrollable(
                Column::with_children(golfers.into_iter().map(card)).spacing(8),
            )
            .height(Fill)
            .into(),
        };

        column![header, location, filters, body]
            .spacing(12)
            .padding(16)
            .into()
    }

    fn perform(&self, action: feed::Action) -> Task<Message> {
        match action {
            feed::Action::None => Task::none(),
            feed::Action::Fetch {
                generation,
                location,
                count,
            } => {
                let directory = self.directory.clone();
                Task::perform(
                    async move { directory.fetch(&location, count).await },
                    move |profiles| {
                        Message::Feed(feed::Message::Loaded {
                            generation,
                            profiles,
                        })
                    },
                )
            }
        }
    }

    fn remember_filters(&self) {
        let mut cfg = self.cfg.write();
        cfg.feed.bracket = self.feed.bracket();
        cfg.feed.order = self.feed.order();
        cfg.save();
    }
}

fn card<'a>(golfer: GolferProfile) -> Element<'a, Message> {
    let handicap = text(format!("{} HCP", golfer.handicap()))
        .size(18)
        .color(band_color(golfer.handicap().band()));

    container(
        column![
            row![
                text(golfer.name().clone()).size(18),
                text(format!(", {}", golfer.age())),
                space::horizontal(),
                handicap,
            ],
            text(format!(
                "{} · {}",
                golfer.home_course(),
                golfer.play_style()
            ))
            .size(14),
            text(golfer.bio().clone()),
        ]
        .spacing(4),
    )
    .padding(12)
    .width(Fill)
    .style(container::bordered_box)
    .into()
}

fn band_color(band: HandicapBand) -> Color {
    match band {
        HandicapBand::Low => Color::from_rgb8(0x16, 0xa3, 0x4a),
        HandicapBand::Mid => Color::from_rgb8(0x25, 0x63, 0xeb),
        HandicapBand::High => Color::from_rgb8(0xf9, 0x73, 0x16),
    }
}

