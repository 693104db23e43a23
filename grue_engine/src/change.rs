//! The declarative change model.
//!
//! Handlers and daemons never mutate the world directly: they return
//! [`ActionResult`]s whose [`StateChange`] lists the engine applies
//! transactionally. The change vocabulary is closed; anything the world can
//! do is expressible in it, and the change history is a replayable stream.

use serde::{Deserialize, Serialize};

use crate::ids::{DaemonId, GlobalId, ItemId, LocationId, StateValue};
use crate::item::{ItemProp, ParentEntity};
use crate::location::LocationProp;
use crate::player::PlayerProp;

/// One atomically applicable mutation of the world store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateChange {
    MoveItem {
        item: ItemId,
        to: ParentEntity,
    },
    SetItemProperty {
        item: ItemId,
        prop: ItemProp,
        value: StateValue,
    },
    SetLocationProperty {
        location: LocationId,
        prop: LocationProp,
        value: StateValue,
    },
    SetLocationName {
        location: LocationId,
        name: String,
    },
    SetPlayerProperty {
        prop: PlayerProp,
        value: StateValue,
    },
    SetGlobal {
        global: GlobalId,
        value: StateValue,
    },
    SetGlobalCodable {
        global: GlobalId,
        blob: serde_json::Value,
    },
    RunDaemon(DaemonId),
    StopDaemon(DaemonId),
    ScheduleFuse {
        fuse: DaemonId,
        turns: u64,
    },
}

/// What the pipeline should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlFlow {
    /// Emit this result and keep running downstream hooks and the default.
    #[default]
    Continue,
    /// Take no action this round (daemons use this to skip a tick).
    Yield,
    /// Emit this result and bypass the default handler and remaining hooks.
    Override,
}

/// Aggregate outcome of a handler, default action, or daemon tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionResult {
    pub message: Option<String>,
    pub changes: Vec<StateChange>,
    pub control: ControlFlow,
}

impl ActionResult {
    /// A message-only result.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Self::default()
        }
    }

    /// Changes with no player-visible text.
    pub fn silent(changes: Vec<StateChange>) -> Self {
        Self {
            changes,
            ..Self::default()
        }
    }

    /// A message plus its changes.
    pub fn with_changes(text: impl Into<String>, changes: Vec<StateChange>) -> Self {
        Self {
            message: Some(text.into()),
            changes,
            ..Self::default()
        }
    }

    /// A daemon "nothing this tick" result.
    pub fn yielded() -> Self {
        Self {
            control: ControlFlow::Yield,
            ..Self::default()
        }
    }

    /// Mark this result as overriding the rest of the pipeline.
    pub fn overriding(mut self) -> Self {
        self.control = ControlFlow::Override;
        self
    }

    /// Append an extra change.
    pub fn then(mut self, change: StateChange) -> Self {
        self.changes.push(change);
        self
    }

    /// Append optional changes, dropping the no-ops.
    pub fn then_maybe(mut self, changes: impl IntoIterator<Item = Option<StateChange>>) -> Self {
        self.changes.extend(changes.into_iter().flatten());
        self
    }

    /// Compose with an earlier result: its changes run first, and the later
    /// non-empty message wins.
    pub fn prepended(mut self, by: ActionResult) -> Self {
        let mut changes = by.changes;
        changes.append(&mut self.changes);
        self.changes = changes;
        if self.message.is_none() {
            self.message = by.message;
        }
        self
    }

    /// Compose with a later result: its changes run last, and its non-empty
    /// message wins.
    pub fn appending(mut self, later: ActionResult) -> Self {
        self.changes.extend(later.changes);
        if later.message.is_some() {
            self.message = later.message;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(item: &str) -> StateChange {
        StateChange::MoveItem {
            item: ItemId::new(item),
            to: ParentEntity::Player,
        }
    }

    #[test]
    fn appending_concatenates_and_prefers_later_message() {
        let first = ActionResult::with_changes("first", vec![mv("a")]);
        let second = ActionResult::with_changes("second", vec![mv("b")]);
        let combined = first.appending(second);
        assert_eq!(combined.message.as_deref(), Some("second"));
        assert_eq!(combined.changes, vec![mv("a"), mv("b")]);
    }

    #[test]
    fn appending_keeps_earlier_message_when_later_is_empty() {
        let first = ActionResult::message("kept");
        let second = ActionResult::silent(vec![mv("b")]);
        let combined = first.appending(second);
        assert_eq!(combined.message.as_deref(), Some("kept"));
    }

    #[test]
    fn prepended_runs_earlier_changes_first() {
        let later = ActionResult::with_changes("later", vec![mv("b")]);
        let earlier = ActionResult::silent(vec![mv("a")]);
        let combined = later.prepended(earlier);
        assert_eq!(combined.changes, vec![mv("a"), mv("b")]);
        assert_eq!(combined.message.as_deref(), Some("later"));
    }

    #[test]
    fn prepended_falls_back_to_earlier_message() {
        let later = ActionResult::silent(vec![]);
        let earlier = ActionResult::message("fallback");
        let combined = later.prepended(earlier);
        assert_eq!(combined.message.as_deref(), Some("fallback"));
    }

    #[test]
    fn control_flow_defaults_to_continue() {
        assert_eq!(ActionResult::message("hi").control, ControlFlow::Continue);
        assert_eq!(ActionResult::message("hi").overriding().control, ControlFlow::Override);
        assert_eq!(ActionResult::yielded().control, ControlFlow::Yield);
    }

    #[test]
    fn change_serializes_as_tagged_union() {
        let change = StateChange::RunDaemon(DaemonId::new("thief"));
        let json = serde_json::to_string(&change).unwrap();
        assert_eq!(json, "{\"runDaemon\":\"thief\"}");
        let back: StateChange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, change);
    }

    #[test]
    fn then_maybe_drops_noops() {
        let result = ActionResult::message("x").then_maybe([None, Some(mv("a")), None]);
        assert_eq!(result.changes, vec![mv("a")]);
    }
}
