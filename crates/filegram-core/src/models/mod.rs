pub mod event;
pub mod telegram;

pub use event::{AttachmentKind, IngestionEvent};
pub use telegram::{ApiEnvelope, ResolvedFile, TelegramMessage, WebhookUpdate};
