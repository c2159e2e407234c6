pub mod copilot;
pub mod credentials;
pub mod gemini;
pub mod http;
pub mod reporter;
pub mod types;
