//! Host-facing widgets.
//!
//! Each widget is a plain value exposing `render(element, props)`. Wiring
//! widgets into a host's plugin list is left to the host.

mod alarm;
mod big_number;

pub use alarm::{AlarmData, AlarmProps, AlarmWidget};
pub use big_number::{BigNumberProps, BigNumberWidget};

use crate::error::Result;

/// Container a widget draws into
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub id: String,
    pub class_name: String,
    content: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.class_name.clear();
    }

    pub fn append(&mut self, markup: &str) {
        if !self.content.is_empty() {
            self.content.push('\n');
        }
        self.content.push_str(markup);
    }
}

/// A visualization the host can render with JSON props
pub trait Widget {
    /// Name the host registers the widget under
    fn name(&self) -> &'static str;

    fn render(&mut self, element: &mut Element, props: &serde_json::Value) -> Result<()>;
}
