use std::time::Duration;

use crate::direction::Direction;
use crate::stack::StackObserver;

/// Events emitted by [`GpuiCardStackView`](super::GpuiCardStackView).
#[derive(Debug, Clone, PartialEq)]
pub enum CardStackEvent {
    /// The front card's drag progressed.
    PercentChanged {
        percent: f64,
        direction: Option<Direction>,
    },
    /// Deck card `deck_index` starts settling.
    WillSettle {
        deck_index: usize,
        dismissing: bool,
        duration: Duration,
    },
    /// Deck card `deck_index` finished settling.
    Settled { deck_index: usize, dismissed: bool },
}

/// Buffers stack notifications until the view can emit them.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    pub(crate) events: Vec<CardStackEvent>,
}

impl StackObserver for EventQueue {
    fn on_percent_changed(&mut self, percent: f64, direction: Option<Direction>) {
        self.events.push(CardStackEvent::PercentChanged { percent, direction });
    }

    fn on_will_settle(&mut self, deck_index: usize, dismissing: bool, duration: Duration) {
        self.events.push(CardStackEvent::WillSettle {
            deck_index,
            dismissing,
            duration,
        });
    }

    fn on_settled(&mut self, deck_index: usize, dismissed: bool) {
        self.events.push(CardStackEvent::Settled {
            deck_index,
            dismissed,
        });
    }
}
