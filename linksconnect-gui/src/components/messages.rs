use iced::{
    Element,
    Length::Fill,
    widget::{column, container, text},
};

/// Placeholder until golfers can message each other.
pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    container(
        column![
            text("No messages yet").size(20),
            text("Connect with golfers in the Feed to start a conversation!"),
        ]
        .spacing(8),
    )
    .center(Fill)
    .into()
}
