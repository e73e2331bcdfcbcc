mod client;
mod http;
mod memory;
mod traits;

pub use client::{build_webhook_client, build_webhook_client_with_timeouts};
pub use http::HttpWebhook;
pub use memory::{Delivery, MemorySink};
pub use traits::WebhookSink;
