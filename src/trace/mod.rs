mod inbound;
mod interaction;

pub use inbound::{TraceConfig, TraceEvent, TranscriptTurn};
pub use interaction::{InteractionData, InteractionEvent, InteractionName};
