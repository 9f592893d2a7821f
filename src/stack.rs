//! The stack of mounted cards over a larger virtual deck.
//!
//! [`CardStack`] keeps a bounded window of cards (three by default) pulled from
//! a [`CardProvider`]. The front card (visible index 0) receives pointer input;
//! the ones behind it are drawn smaller and grow while the front card is
//! dragged away. When the front card leaves, the next deck card is mounted at
//! the back and every card moves one slot forward.

use std::time::Duration;

use crate::animation::{AnimationTicket, Animator};
use crate::card::{CardDelegate, CardId, CardState, SwipeCard};
use crate::config::StackConfig;
use crate::direction::Direction;
use crate::geom::{Point, Rect, Size};

/// Supplies the cards of the deck.
///
/// Must answer consistently between two [`CardStack::reload`] calls.
pub trait CardProvider {
    /// Handle to a card's content.
    type Card;
    /// Handle to the view shown once the deck runs out.
    type Placeholder;

    /// Number of cards in the deck.
    fn count(&self) -> usize;

    /// The card at `index`, with `index < count()`.
    fn card_at(&mut self, index: usize) -> Self::Card;

    /// View shown behind an empty stack, if any.
    fn empty_placeholder(&mut self) -> Option<Self::Placeholder>;
}

/// Receives stack-level notifications on behalf of the hosting application.
pub trait StackObserver {
    /// The front card's drag progressed.
    fn on_percent_changed(&mut self, percent: f64, direction: Option<Direction>);

    /// The front card (deck card `deck_index`) starts settling.
    fn on_will_settle(&mut self, deck_index: usize, dismissing: bool, duration: Duration);

    /// Deck card `deck_index` finished settling.
    fn on_settled(&mut self, deck_index: usize, dismissed: bool);
}

/// Position of the next card to pull from the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeckCursor {
    total_count: usize,
    next_index: usize,
}

impl DeckCursor {
    /// A cursor at the start of a deck of `total_count` cards.
    pub fn new(total_count: usize) -> Self {
        Self {
            total_count,
            next_index: 0,
        }
    }

    /// Deck size at the last reload.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Index of the next card to mount.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Cards not yet mounted.
    pub fn remaining(&self) -> usize {
        self.total_count - self.next_index
    }

    /// Whether every card has been mounted.
    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.total_count
    }

    /// Take the next deck index.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(index)
    }
}

/// A mounted card.
#[derive(Debug, Clone)]
pub struct StackEntry<C> {
    card: C,
    machine: SwipeCard,
    visible_index: usize,
    deck_index: usize,
    frame: Rect,
}

impl<C> StackEntry<C> {
    /// The card content.
    pub fn card(&self) -> &C {
        &self.card
    }

    /// The card content, mutably.
    pub fn card_mut(&mut self) -> &mut C {
        &mut self.card
    }

    /// Identity used with the animator.
    pub fn id(&self) -> CardId {
        self.machine.id()
    }

    /// Lifecycle state of the card.
    pub fn state(&self) -> CardState {
        self.machine.state()
    }

    /// The card's gesture state machine.
    pub fn machine(&self) -> &SwipeCard {
        &self.machine
    }

    /// Draw slot, 0 being the front card.
    pub fn visible_index(&self) -> usize {
        self.visible_index
    }

    /// Position of the card in the deck.
    pub fn deck_index(&self) -> usize {
        self.deck_index
    }

    /// Target frame, relative to the stack bounds.
    pub fn frame(&self) -> Rect {
        self.frame
    }
}

/// The view shown once the stack is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder<V> {
    /// Provider-supplied view.
    pub view: V,
    /// Fade-in duration, `None` when shown immediately.
    pub fade_in: Option<Duration>,
}

/// Frame of the card in slot `index` while the front card is at `percent`.
///
/// The front card fills `bounds`. Each card behind it is inset by one more
/// `inset` step, shrinking its width and shifting it down, except that the
/// first step shrinks away as `percent` approaches one. Widths never go
/// negative, so cards laid out before the bounds are known collapse to zero.
pub fn stacked_frame(bounds: Size, index: usize, percent: f64, inset: f64) -> Rect {
    if index == 0 {
        return Rect::from_size(bounds);
    }
    let inset = (index as f64 - 1.0) * inset + (1.0 - percent) * inset;
    Rect::new(
        Point::new(inset, inset),
        Size::new((bounds.width - 2.0 * inset).max(0.0), bounds.height),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CardSignal {
    Percent {
        card: CardId,
        percent: f64,
        direction: Option<Direction>,
    },
    WillSettle {
        card: CardId,
        dismissing: bool,
        duration: Duration,
    },
    Settled {
        card: CardId,
        dismissed: bool,
    },
}

/// Buffers card notifications so the stack can react once the card returns.
#[derive(Debug, Default)]
struct SignalQueue {
    signals: Vec<CardSignal>,
}

impl CardDelegate for SignalQueue {
    fn on_percent_changed(&mut self, card: CardId, percent: f64, direction: Option<Direction>) {
        self.signals.push(CardSignal::Percent {
            card,
            percent,
            direction,
        });
    }

    fn on_will_settle(&mut self, card: CardId, dismissing: bool, duration: Duration) {
        self.signals.push(CardSignal::WillSettle {
            card,
            dismissing,
            duration,
        });
    }

    fn on_settled(&mut self, card: CardId, dismissed: bool) {
        self.signals.push(CardSignal::Settled { card, dismissed });
    }
}

/// A bounded window of swipeable cards over a provider's deck.
///
/// All methods run on the UI thread. The stack is its cards' delegate; the
/// hosting application observes it through a [`StackObserver`] passed to each
/// input method, so observers cannot re-enter the stack while it is updating.
pub struct CardStack<P: CardProvider> {
    provider: P,
    config: StackConfig,
    bounds: Size,
    window: Vec<StackEntry<P::Card>>,
    cursor: DeckCursor,
    placeholder: Option<Placeholder<P::Placeholder>>,
    next_id: u64,
}

impl<P: CardProvider> CardStack<P> {
    /// Create an empty stack. Call [`CardStack::reload`] to mount cards.
    pub fn new(provider: P, config: StackConfig) -> Self {
        debug_assert!(config.max_visible_cards > 0, "stack must show a card");
        Self {
            provider,
            config,
            bounds: Size::default(),
            window: Vec::new(),
            cursor: DeckCursor::default(),
            placeholder: None,
            next_id: 0,
        }
    }

    /// The card provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The card provider, mutably. Call [`CardStack::reload`] after changing
    /// the deck.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Active configuration.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Size of the area the front card fills.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Mounted cards, front first.
    pub fn visible(&self) -> &[StackEntry<P::Card>] {
        &self.window
    }

    /// The front card.
    pub fn top(&self) -> Option<&StackEntry<P::Card>> {
        self.window.first()
    }

    /// Deck progress.
    pub fn cursor(&self) -> DeckCursor {
        self.cursor
    }

    /// The empty-state view, once shown.
    pub fn placeholder(&self) -> Option<&Placeholder<P::Placeholder>> {
        self.placeholder.as_ref()
    }

    /// Whether no card is mounted.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Resize the stack, re-laying out every card at once.
    pub fn set_bounds(&mut self, bounds: Size, animator: &mut dyn Animator) {
        if bounds == self.bounds {
            return;
        }
        log::debug!("stack bounds {:?} -> {bounds:?}", self.bounds);
        self.bounds = bounds;
        self.reindex(Duration::ZERO, animator);
    }

    /// Drop every card and mount the deck from its start.
    pub fn reload(&mut self, animator: &mut dyn Animator) {
        for entry in self.window.drain(..) {
            animator.release(entry.machine.id());
        }
        self.placeholder = None;

        let total = self.provider.count();
        self.cursor = DeckCursor::new(total);
        for _ in 0..total.min(self.config.max_visible_cards) {
            self.mount_next(animator);
        }
        log::debug!("reloaded deck of {total}, {} mounted", self.window.len());

        if total == 0 {
            self.show_placeholder(None);
        }
    }

    /// Start a drag at `local`, a point inside the front card.
    pub fn pointer_down(&mut self, local: Point, animator: &mut dyn Animator) -> bool {
        let bounds = self.bounds;
        match self.window.first_mut() {
            Some(entry) => entry.machine.pointer_down(local, bounds, animator),
            None => false,
        }
    }

    /// Drag the front card to a cumulative `translation`.
    pub fn pointer_move(
        &mut self,
        translation: Point,
        animator: &mut dyn Animator,
        observer: &mut dyn StackObserver,
    ) {
        let bounds = self.bounds;
        let mut queue = SignalQueue::default();
        if let Some(entry) = self.window.first_mut() {
            entry
                .machine
                .pointer_move(translation, bounds, animator, &mut queue);
        }
        self.dispatch(queue, animator, observer);
    }

    /// Release the front card at a cumulative `translation`.
    pub fn pointer_up(
        &mut self,
        translation: Point,
        screen: Size,
        animator: &mut dyn Animator,
        observer: &mut dyn StackObserver,
    ) {
        let bounds = self.bounds;
        let mut queue = SignalQueue::default();
        if let Some(entry) = self.window.first_mut() {
            entry
                .machine
                .pointer_up(translation, bounds, screen, animator, &mut queue);
        }
        self.dispatch(queue, animator, observer);
    }

    /// Abort the drag in progress.
    pub fn pointer_cancel(&mut self, animator: &mut dyn Animator, observer: &mut dyn StackObserver) {
        let mut queue = SignalQueue::default();
        if let Some(entry) = self.window.first_mut() {
            entry.machine.pointer_cancel(animator, &mut queue);
        }
        self.dispatch(queue, animator, observer);
    }

    /// Dismiss the front card towards `direction` regardless of any drag.
    pub fn dismiss(
        &mut self,
        direction: Direction,
        screen: Size,
        animator: &mut dyn Animator,
        observer: &mut dyn StackObserver,
    ) -> bool {
        let bounds = self.bounds;
        let mut queue = SignalQueue::default();
        let started = match self.window.first_mut() {
            Some(entry) => entry
                .machine
                .dismiss(direction, bounds, screen, animator, &mut queue),
            None => false,
        };
        self.dispatch(queue, animator, observer);
        started
    }

    /// Deliver an animation completion for `card`.
    pub fn animation_finished(
        &mut self,
        card: CardId,
        ticket: AnimationTicket,
        animator: &mut dyn Animator,
        observer: &mut dyn StackObserver,
    ) -> bool {
        let mut queue = SignalQueue::default();
        let handled = match self.window.iter_mut().find(|entry| entry.id() == card) {
            Some(entry) => entry.machine.animation_finished(ticket, animator, &mut queue),
            None => {
                log::debug!("completion for unmounted card {card:?}");
                false
            }
        };
        self.dispatch(queue, animator, observer);
        handled
    }

    fn dispatch(
        &mut self,
        queue: SignalQueue,
        animator: &mut dyn Animator,
        observer: &mut dyn StackObserver,
    ) {
        for signal in queue.signals {
            match signal {
                CardSignal::Percent {
                    card,
                    percent,
                    direction,
                } => {
                    if self.top().is_some_and(|top| top.id() == card) {
                        self.layout_followers(percent, Duration::ZERO, animator);
                    }
                    observer.on_percent_changed(percent, direction);
                }
                CardSignal::WillSettle {
                    card,
                    dismissing,
                    duration,
                } => {
                    if dismissing {
                        self.layout_promoted(duration, animator);
                    } else {
                        self.layout_followers(0.0, duration, animator);
                    }
                    if let Some(deck_index) = self.deck_index_of(card) {
                        observer.on_will_settle(deck_index, dismissing, duration);
                    }
                }
                CardSignal::Settled { card, dismissed } => {
                    let deck_index = self.deck_index_of(card);
                    if dismissed {
                        self.on_card_dismissed(card, animator);
                    }
                    if let Some(deck_index) = deck_index {
                        observer.on_settled(deck_index, dismissed);
                    }
                }
            }
        }
    }

    fn on_card_dismissed(&mut self, card: CardId, animator: &mut dyn Animator) {
        let Some(position) = self.window.iter().position(|entry| entry.id() == card) else {
            log::warn!("dismissed card {card:?} is not mounted");
            return;
        };
        let entry = self.window.remove(position);
        animator.release(entry.id());
        log::debug!("deck card {} left the stack", entry.deck_index);

        if self.window.len() < self.config.max_visible_cards {
            self.mount_next(animator);
        }
        self.reindex(self.config.relayout_duration, animator);

        if self.window.is_empty() {
            self.show_placeholder(Some(self.config.placeholder_fade));
        }
    }

    fn mount_next(&mut self, animator: &mut dyn Animator) {
        let Some(deck_index) = self.cursor.advance() else {
            return;
        };
        debug_assert!(deck_index < self.provider.count(), "deck shrank without reload");

        let id = CardId(self.next_id);
        self.next_id += 1;
        let visible_index = self.window.len();
        debug_assert!(visible_index < self.config.max_visible_cards);
        let frame = stacked_frame(self.bounds, visible_index, 0.0, self.config.inset);
        animator.set_frame(id, frame, Duration::ZERO);

        log::debug!("mounting deck card {deck_index} as {id:?} in slot {visible_index}");
        self.window.push(StackEntry {
            card: self.provider.card_at(deck_index),
            machine: SwipeCard::new(id, self.config.swipe.clone()),
            visible_index,
            deck_index,
            frame,
        });
    }

    fn reindex(&mut self, duration: Duration, animator: &mut dyn Animator) {
        for (index, entry) in self.window.iter_mut().enumerate() {
            entry.visible_index = index;
            entry.frame = stacked_frame(self.bounds, index, 0.0, self.config.inset);
            animator.set_frame(entry.id(), entry.frame, duration);
        }
    }

    fn layout_followers(&mut self, percent: f64, duration: Duration, animator: &mut dyn Animator) {
        for entry in self.window.iter_mut().skip(1) {
            entry.frame = stacked_frame(self.bounds, entry.visible_index, percent, self.config.inset);
            animator.set_frame(entry.id(), entry.frame, duration);
        }
    }

    fn layout_promoted(&mut self, duration: Duration, animator: &mut dyn Animator) {
        for entry in self.window.iter_mut().skip(1) {
            entry.frame =
                stacked_frame(self.bounds, entry.visible_index - 1, 0.0, self.config.inset);
            animator.set_frame(entry.id(), entry.frame, duration);
        }
    }

    fn show_placeholder(&mut self, fade_in: Option<Duration>) {
        if self.placeholder.is_some() {
            return;
        }
        self.placeholder = self
            .provider
            .empty_placeholder()
            .map(|view| Placeholder { view, fade_in });
        log::debug!("stack empty, placeholder shown: {}", self.placeholder.is_some());
    }

    fn deck_index_of(&self, card: CardId) -> Option<usize> {
        self.window
            .iter()
            .find(|entry| entry.id() == card)
            .map(|entry| entry.deck_index)
    }
}
