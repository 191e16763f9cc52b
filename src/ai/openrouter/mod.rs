pub mod chat;
pub mod client;
pub mod types;

pub use chat::OpenRouterChatClient;
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageDetail, ImageUrl,
};
