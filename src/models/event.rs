//! Events emitted by the runtime while a task executes.
//!
//! A [`RuntimeEvent`] carries one [`Content`] message plus the set of tool
//! call ids the runtime has marked long-running. The outbound codec consults
//! that set to flag the corresponding function-call parts on the wire so
//! clients can tell which calls may pause the task for approval.

use crate::models::content::Content;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single runtime emission: content parts plus long-running bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeEvent {
    content: Content,
    long_running_tool_ids: HashSet<String>,
}

impl RuntimeEvent {
    /// Creates an event with an empty long-running id set.
    pub fn new(content: Content) -> Self {
        Self {
            content,
            long_running_tool_ids: HashSet::new(),
        }
    }

    /// Replaces the long-running id set.
    pub fn with_long_running_tool_ids(
        mut self,
        ids: impl IntoIterator<Item = String>,
    ) -> Self {
        self.long_running_tool_ids = ids.into_iter().collect();
        self
    }

    /// Marks a single tool call id as long-running.
    pub fn mark_long_running(&mut self, id: impl Into<String>) {
        self.long_running_tool_ids.insert(id.into());
    }

    /// Returns a reference to the content of this event.
    pub const fn content(&self) -> &Content {
        &self.content
    }

    /// The set of tool call ids marked long-running on this event.
    pub const fn long_running_tool_ids(&self) -> &HashSet<String> {
        &self.long_running_tool_ids
    }

    /// Consumes the event and returns the content.
    pub fn into_content(self) -> Content {
        self.content
    }
}
