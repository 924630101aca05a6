pub mod pipeline;
pub mod telegram;
