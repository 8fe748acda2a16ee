//! Modal message dialogs.

use iced::Task;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use fbg_core::session::{Notification, NotificationLevel};

use crate::app::Message;

/// Show `note` in a native message box.
pub fn show(note: Notification) -> Task<Message> {
    let level = match note.level {
        NotificationLevel::Info => MessageLevel::Info,
        NotificationLevel::Warning => MessageLevel::Warning,
        NotificationLevel::Error => MessageLevel::Error,
    };

    Task::perform(
        async move {
            AsyncMessageDialog::new()
                .set_level(level)
                .set_title(note.title)
                .set_description(note.message)
                .set_buttons(MessageButtons::Ok)
                .show()
                .await;
        },
        |_| Message::Noop,
    )
}

/// Show `note` if there is one.
pub fn show_maybe(note: Option<Notification>) -> Task<Message> {
    note.map(show).unwrap_or_else(Task::none)
}
