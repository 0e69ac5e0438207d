//! Canned user-facing response text.

/// Category of response the bot sends back to the channel.
///
/// Domain outcomes get a specific category; infrastructure failures all
/// collapse into [`ResponseKind::Fail`] so no internal detail leaks to chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Success,
    Fail,
    NotACommand,
    NoParams,
    TooManyParams,
    InsufficientPerms,
    IdNotFound,
}

impl ResponseKind {
    /// The text sent to the channel for this category.
    pub fn text(self) -> &'static str {
        match self {
            ResponseKind::Success => "Done!",
            ResponseKind::Fail => "Something went wrong. Give it another try in a bit",
            ResponseKind::NotACommand => "Hmm, that's not a command I know",
            ResponseKind::NoParams => "You haven't given me enough parameters to work with",
            ResponseKind::TooManyParams => "You have given me too many parameters to work with",
            ResponseKind::InsufficientPerms => "You don't have the permission to do that",
            ResponseKind::IdNotFound => "I can't find that id in this server",
        }
    }
}
