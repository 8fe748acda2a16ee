//! Main window view.
//!
//! Source file, output folder, compiler options, compile button with
//! status line, and the log panel.

use iced::alignment::Vertical;
use iced::widget::{
    button, checkbox, column, container, horizontal_space, row, scrollable, text, vertical_space,
};
use iced::{Background, Border, Element, Font, Length, Theme};

use crate::app::{App, CompileOption, Message};
use crate::theme::{colors, font, spacing, status};
use crate::widgets::path_input_with_paste;

/// Build the main window view.
pub fn view(app: &App) -> Element<'_, Message> {
    let content = column![
        source_section(app),
        output_section(app),
        options_section(app),
        compile_section(app),
        log_section(app),
    ]
    .spacing(spacing::SM)
    .padding(spacing::LG);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Titled panel around a section.
fn card<'a>(title: &'a str, body: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(column![text(title).size(font::LG), body.into()].spacing(spacing::SM))
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(colors::CARD)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        })
        .into()
}

/// Source file row: hint, path field with paste, browse button.
fn source_section(app: &App) -> Element<'_, Message> {
    let idle = !app.session.is_running();

    let (label, color) = match app.session.source() {
        Some(path) => (path.display().to_string(), colors::PATH_SET),
        None => ("Not selected".to_string(), colors::PATH_UNSET),
    };

    let body = column![
        text("Choose or drop a .bas file onto the window")
            .size(font::SM)
            .color(colors::TEXT_SECONDARY),
        row![
            path_input_with_paste(
                "Path to .bas file...",
                &app.source_text,
                Message::SourcePathChanged,
                Message::PasteSource,
                idle,
            ),
            button(text("Choose file").size(font::NORMAL))
                .on_press_maybe(idle.then_some(Message::BrowseSource))
                .padding([spacing::XS, spacing::SM]),
        ]
        .spacing(spacing::SM)
        .align_y(Vertical::Center),
        text(label).size(font::SM).color(color),
    ]
    .spacing(spacing::XS);

    card("Source file (.bas)", body)
}

/// Output folder label with choose/reset buttons.
fn output_section(app: &App) -> Element<'_, Message> {
    let idle = !app.session.is_running();

    let (label, color) = match app.session.output_dir() {
        Some(dir) => (dir.display().to_string(), colors::PATH_SET),
        None => ("Same as source file".to_string(), colors::TEXT_SECONDARY),
    };

    let body = row![
        text(label).size(font::NORMAL).color(color).width(Length::Fill),
        button(text("Choose output folder").size(font::NORMAL))
            .on_press_maybe(idle.then_some(Message::BrowseOutput))
            .padding([spacing::XS, spacing::SM]),
        button(text("Reset").size(font::NORMAL))
            .on_press_maybe(
                (idle && app.session.output_dir().is_some()).then_some(Message::ResetOutput),
            )
            .padding([spacing::XS, spacing::SM]),
    ]
    .spacing(spacing::SM)
    .align_y(Vertical::Center);

    card("Output folder", body)
}

/// The four compiler toggles.
fn options_section(app: &App) -> Element<'_, Message> {
    let options = app.session.options();

    let toggle = |label: &'static str, checked: bool, option: CompileOption| {
        checkbox(label, checked)
            .on_toggle(move |value| Message::OptionToggled(option, value))
            .text_size(font::NORMAL)
    };

    let body = column![
        toggle("Debug info (-g)", options.debug, CompileOption::Debug),
        toggle("Console application (-s console)", options.console, CompileOption::Console),
        toggle("Optimization (-O 2)", options.optimize, CompileOption::Optimize),
        toggle("Static linking (-static)", options.static_link, CompileOption::StaticLink),
    ]
    .spacing(spacing::XS);

    card("Compiler options", body)
}

/// Compile button and status line.
fn compile_section(app: &App) -> Element<'_, Message> {
    let running = app.session.is_running();
    let line = app.session.status();

    let compile_button = button(
        text(if running { "Compiling..." } else { "▶ Compile" }).size(font::LG),
    )
    .on_press_maybe((!running).then_some(Message::Compile))
    .padding([spacing::SM, spacing::XL]);

    column![
        compile_button,
        text(&line.text)
            .size(font::NORMAL)
            .color(status::for_tone(line.tone)),
    ]
    .spacing(spacing::SM)
    .align_x(iced::Alignment::Center)
    .width(Length::Fill)
    .into()
}

/// Log section with scrollable read-only text.
fn log_section(app: &App) -> Element<'_, Message> {
    let header = row![
        text("Log").size(font::LG),
        horizontal_space(),
        button(text("Clear log").size(font::SM))
            .on_press_maybe((!app.session.log().is_empty()).then_some(Message::ClearLog))
            .padding([spacing::XS, spacing::SM]),
    ]
    .align_y(Vertical::Center);

    let log_content = text(app.session.log().text())
        .size(font::SM)
        .font(Font::MONOSPACE);

    let scroll = scrollable(
        container(log_content)
            .padding(spacing::SM)
            .width(Length::Fill),
    )
    .height(Length::Fill);
    let scroll = if app.autoscroll {
        scroll.anchor_bottom()
    } else {
        scroll
    };

    column![
        header,
        vertical_space().height(spacing::XS),
        container(scroll)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(Background::Color(colors::LOG_BG)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }),
    ]
    .height(Length::Fill)
    .into()
}
