use iced::{
    Element,
    Length::Fill,
    widget::{button, column, combo_box, container, row, scrollable, space, text},
};
use linksconnect_lib::GolferProfile;
use strum::IntoEnumIterator;

use crate::config::Theme;

#[derive(Debug, Clone)]
pub enum Message {
    ThemeSelected(Theme),
    LogoutPressed,
}

pub struct Profile {
    themes: combo_box::State<Theme>,
}

impl Profile {
    pub fn new() -> Self {
        Self {
            themes: combo_box::State::new(Theme::iter().collect()),
        }
    }

    pub fn view<'a>(&'a self, profile: &'a GolferProfile, theme: Theme) -> Element<'a, Message> {
        let stat = |label: &'a str, value: String| {
            column![text(label).size(12), text(value).size(18)].spacing(2)
        };

        scrollable(
            column![
                text(profile.name()).size(28),
                text(profile.location()),
                row![
                    stat("Handicap", profile.handicap().to_string()),
                    stat("Play Style", profile.play_style().to_string()),
                    stat("Home Course", profile.home_course().clone()),
                ]
                .spacing(24),
                section("About Me", text(format!("\"{}\"", profile.bio())).into()),
                section(
                    "GHIN Status",
                    text(format!("Connected: {}", profile.ghin_status())).into()
                ),
                section("Recent Rounds", text("Last played 3 days ago").into()),
                section(
                    "Theme",
                    combo_box(
                        &self.themes,
                        "Select a theme",
                        Some(&theme),
                        Message::ThemeSelected
                    )
                    .into()
                ),
                row![
                    space::horizontal(),
                    button("Log out")
                        .style(button::danger)
                        .on_press(Message::LogoutPressed)
                ],
            ]
            .spacing(16)
            .padding(16),
        )
        .height(Fill)
        .into()
    }
}

fn section<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(16), body].spacing(6))
        .padding(12)
        .width(Fill)
        .style(container::bordered_box)
        .into()
}
