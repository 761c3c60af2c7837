use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Timeline content is being dragged; hover changes are ignored.
    Dragging,
}

/// Hover notification shared between the timeline and spiral views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverEvent {
    Entered { day_index: usize },
    Left,
}

/// How a spiral segment should be drawn for the current hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentEmphasis {
    Normal,
    Highlighted,
    Dimmed,
}

/// Handle returned by `HoverCoordinator::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type HoverListener = Box<dyn FnMut(&HoverEvent)>;

/// Routes hover events between views through registered callbacks.
///
/// Owned by the component composing both views. Events are dropped while a
/// drag is in progress, and repeated identical events are not re-broadcast.
#[derive(Default)]
pub struct HoverCoordinator {
    mode: InteractionMode,
    hovered: Option<usize>,
    next_id: u64,
    listeners: Vec<(SubscriptionId, HoverListener)>,
}

impl fmt::Debug for HoverCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverCoordinator")
            .field("mode", &self.mode)
            .field("hovered", &self.hovered)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl HoverCoordinator {
    pub fn subscribe(&mut self, listener: impl FnMut(&HoverEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` when a listener was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn hovered_day(&self) -> Option<usize> {
        self.hovered
    }

    pub fn on_drag_start(&mut self) {
        self.mode = InteractionMode::Dragging;
    }

    pub fn on_drag_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    /// Publishes `event` unless dragging. Returns whether it was delivered.
    pub fn publish(&mut self, event: HoverEvent) -> bool {
        if self.mode == InteractionMode::Dragging {
            trace!(?event, "hover ignored while dragging");
            return false;
        }

        let hovered = match event {
            HoverEvent::Entered { day_index } => Some(day_index),
            HoverEvent::Left => None,
        };
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;

        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        true
    }

    #[must_use]
    pub fn emphasis_for(&self, day_index: usize) -> SegmentEmphasis {
        match self.hovered {
            None => SegmentEmphasis::Normal,
            Some(hovered) if hovered == day_index => SegmentEmphasis::Highlighted,
            Some(_) => SegmentEmphasis::Dimmed,
        }
    }
}
