//! Change notifications published by the sequence model

use serde::{Deserialize, Serialize};

/// How the presentation layer should move to the new item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Forward step (tap or auto-advance); the one place to hang an animation
    Animated,
    /// Jump without animation (retreat, swipe, explicit select)
    Immediate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent<Id> {
    /// The selected item changed. Elapsed time is already back at zero.
    SelectionChanged {
        from: Option<Id>,
        to: Id,
        transition: Transition,
    },
    /// A step landed on the item that was already selected (single item,
    /// or retreat at the first item). Its clock restarted.
    Restarted { id: Id },
    /// Elapsed time was cleared without moving the selection
    ProgressReset { id: Id },
}

impl<Id> TabEvent<Id> {
    /// Identity of the item the event leaves selected
    pub fn current(&self) -> &Id {
        match self {
            TabEvent::SelectionChanged { to, .. } => to,
            TabEvent::Restarted { id } | TabEvent::ProgressReset { id } => id,
        }
    }
}
