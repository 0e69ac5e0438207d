//! Shared domain types for the BGS guild bot

pub mod embed;
pub mod guild;
pub mod help;
pub mod responses;
pub mod time;

pub use embed::{paginate, EmbedField, EmbedPage, FieldRecord, EMBED_COLOR, PAGE_FIELD_LIMIT};
pub use guild::{GuildConfig, SortField};
pub use help::HelpEntry;
pub use responses::ResponseKind;
