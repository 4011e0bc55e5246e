//! Boundary to the external action-resolution pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::state::PlayerId;

/// Action request this engine forwards without resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Kill {
        #[serde(rename = "sourceId")]
        source_id: PlayerId,
        #[serde(rename = "targetId")]
        target_id: PlayerId,
    },
}

/// Opaque sink that receives intents.
pub trait IntentSink {
    fn submit(&mut self, intent: Intent);
}

/// Collects intents in submission order.
impl IntentSink for Vec<Intent> {
    fn submit(&mut self, intent: Intent) {
        self.push(intent);
    }
}
