//! Path text input with a paste button.

use iced::widget::{button, container, row, text, text_input};
use iced::{Alignment, Background, Border, Color, Element, Length, Theme};

use crate::app::Message;

/// Create a path input with a paste button.
///
/// Both controls are inert while `enabled` is false.
pub fn path_input_with_paste<'a>(
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
    paste_message: Message,
    enabled: bool,
) -> Element<'a, Message> {
    let input = text_input(placeholder, value)
        .on_input_maybe(enabled.then_some(on_input))
        .width(Length::Fill);

    let paste_btn = button(
        container(text("📋").size(14))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .on_press_maybe(enabled.then_some(paste_message))
    .width(28)
    .height(28)
    .style(|theme: &Theme, status| {
        let palette = theme.palette();
        button::Style {
            background: match status {
                button::Status::Hovered => Some(Background::Color(Color::from_rgb(0.25, 0.30, 0.35))),
                button::Status::Pressed => Some(Background::Color(Color::from_rgb(0.20, 0.25, 0.30))),
                _ => Some(Background::Color(Color::from_rgb(0.20, 0.20, 0.20))),
            },
            text_color: palette.text,
            border: Border {
                color: Color::from_rgb(0.3, 0.3, 0.3),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        }
    });

    row![input, paste_btn]
        .spacing(4)
        .align_y(Alignment::Center)
        .into()
}
