use crate::error::WidgetError;
use crate::lifecycle::{Mounted, RenderContext};
use crate::trace::TraceEvent;
use serde_json::Value;
use tracing::debug;

/// A widget triggered by a named trace.
pub trait Widget: Send + Sync {
    /// Trace tag this widget answers to.
    fn tag(&self) -> &str;

    /// Cooldown and stale-eviction scope. Defaults to the tag.
    fn family(&self) -> &str {
        self.tag()
    }

    fn matches(&self, event: &TraceEvent) -> bool {
        trace_matches(event, self.tag())
    }

    fn render(&self, ctx: &RenderContext) -> Result<Mounted, WidgetError>;
}

/// A trace matches a tag through its type, or through `payload.name` for
/// hosts that wrap custom traces in a generic type.
pub fn trace_matches(event: &TraceEvent, tag: &str) -> bool {
    if event.kind == tag {
        return true;
    }
    matches!(&event.payload, Value::Object(map)
        if map.get("name").and_then(Value::as_str) == Some(tag))
}

/// Ordered set of widgets; the first match wins.
#[derive(Default)]
pub struct WidgetRegistry {
    widgets: Vec<Box<dyn Widget>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in feedback, lead wizard and handoff widgets.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::feedback::FeedbackWidget));
        registry.register(Box::new(super::wizard::LeadWizardWidget));
        registry.register(Box::new(super::handoff::HandoffWidget));
        registry
    }

    /// Add a widget, replacing any earlier one with the same tag.
    pub fn register(&mut self, widget: Box<dyn Widget>) {
        if let Some(existing) = self.widgets.iter_mut().find(|w| w.tag() == widget.tag()) {
            debug!(tag = widget.tag(), "replacing registered widget");
            *existing = widget;
        } else {
            self.widgets.push(widget);
        }
    }

    pub fn find(&self, event: &TraceEvent) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|w| w.matches(event))
            .map(AsRef::as_ref)
    }

    pub fn tags(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.tag()).collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
