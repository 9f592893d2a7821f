use std::sync::{Arc, RwLock};
use std::time::Instant;

use gpui::prelude::*;
use gpui::{
    AnyView, EventEmitter, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Window,
    canvas, div, px,
};

use crate::direction::Direction;
use crate::stack::{CardProvider, CardStack};

use super::config::CardStackViewConfig;
use super::event::{CardStackEvent, EventQueue};
use super::geometry::{rect_contains, to_point, to_size};
use super::state::{DragState, StackUiState};

/// A GPUI view that renders a swipeable [`CardStack`].
///
/// Left-button drags on the front card swipe it; releasing past the
/// dismissal threshold flies it off screen and brings the next deck card in.
/// Stack notifications are emitted as [`CardStackEvent`]s.
pub struct GpuiCardStackView<P: CardProvider> {
    stack: Arc<RwLock<CardStack<P>>>,
    state: Arc<RwLock<StackUiState>>,
    config: CardStackViewConfig,
}

impl<P> GpuiCardStackView<P>
where
    P: CardProvider<Card = AnyView, Placeholder = AnyView> + 'static,
{
    /// Create a new card stack view over `provider`.
    ///
    /// Uses the default [`CardStackViewConfig`].
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, CardStackViewConfig::default())
    }

    /// Create a new card stack view with a custom configuration.
    pub fn with_config(provider: P, config: CardStackViewConfig) -> Self {
        let mut stack = CardStack::new(provider, config.stack.clone());
        let mut state = StackUiState::new(Instant::now());
        stack.reload(&mut state.animator);
        Self {
            stack: Arc::new(RwLock::new(stack)),
            state: Arc::new(RwLock::new(state)),
            config,
        }
    }

    /// Get a handle on the underlying stack.
    ///
    /// Changes to the provider's deck take effect on the next [`reload`](Self::reload).
    pub fn stack_handle(&self) -> StackHandle<P> {
        StackHandle {
            stack: Arc::clone(&self.stack),
        }
    }

    /// Remount the deck from its first card.
    pub fn reload(&mut self, cx: &mut Context<Self>) {
        let mut stack = self.stack.write().expect("card stack lock");
        let mut state = self.state.write().expect("card stack state lock");
        let state = &mut *state;
        state.drag = None;
        state.placeholder_since = None;
        stack.reload(&mut state.animator);
        cx.notify();
    }

    /// Fly the front card off towards `direction`.
    ///
    /// Returns `false` when there is no front card or it is already settling.
    pub fn dismiss(&mut self, direction: Direction, window: &Window, cx: &mut Context<Self>) -> bool {
        let screen = to_size(window.viewport_size());
        let mut events = EventQueue::default();
        let started = {
            let mut stack = self.stack.write().expect("card stack lock");
            let mut state = self.state.write().expect("card stack state lock");
            let state = &mut *state;
            let started = stack.dismiss(direction, screen, &mut state.animator, &mut events);
            if started {
                state.drag = None;
            }
            started
        };
        log::debug!("dismiss {direction:?} started: {started}");
        Self::emit_events(events, cx);
        cx.notify();
        started
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = to_point(ev.position);
        let stack = self.stack.read().expect("card stack lock");
        let mut state = self.state.write().expect("card stack state lock");

        let Some(local) = state.local(pos) else {
            return;
        };
        let Some(front) = stack.top().map(|entry| entry.frame()) else {
            return;
        };
        if !rect_contains(front, local) {
            return;
        }
        // The card is only grabbed once the press turns into a drag, so a
        // plain click neither interrupts nor settles it.
        state.drag = Some(DragState::new(pos, local));
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = to_point(ev.position);
        let mut events = EventQueue::default();
        {
            let mut stack = self.stack.write().expect("card stack lock");
            let mut state = self.state.write().expect("card stack state lock");
            let state = &mut *state;
            let Some(mut drag) = state.drag else {
                return;
            };

            if ev.pressed_button != Some(MouseButton::Left) {
                // The release happened where we could not see it.
                state.drag = None;
                if drag.active {
                    stack.pointer_cancel(&mut state.animator, &mut events);
                }
            } else {
                let threshold = self.config.drag_threshold_px as f64;
                if drag.moved_to(pos, threshold)
                    && !stack.pointer_down(drag.local, &mut state.animator)
                {
                    state.drag = None;
                    return;
                }
                if drag.active {
                    stack.pointer_move(drag.translation(), &mut state.animator, &mut events);
                }
                state.drag = Some(drag);
            }
        }
        Self::emit_events(events, cx);
        cx.notify();
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, window: &Window, cx: &mut Context<Self>) {
        let pos = to_point(ev.position);
        let screen = to_size(window.viewport_size());
        let mut events = EventQueue::default();
        {
            let mut stack = self.stack.write().expect("card stack lock");
            let mut state = self.state.write().expect("card stack state lock");
            let state = &mut *state;
            let Some(mut drag) = state.drag.take() else {
                return;
            };

            if !drag.active {
                return;
            }
            drag.last = pos;
            stack.pointer_up(drag.translation(), screen, &mut state.animator, &mut events);
        }
        Self::emit_events(events, cx);
        cx.notify();
    }

    /// Advance animations to `now` and deliver their completions.
    fn advance(&mut self, now: Instant, cx: &mut Context<Self>) {
        let mut events = EventQueue::default();
        {
            let mut stack = self.stack.write().expect("card stack lock");
            let mut state = self.state.write().expect("card stack state lock");
            let state = &mut *state;

            if let Some(bounds) = state.bounds {
                stack.set_bounds(to_size(bounds.size), &mut state.animator);
            }
            for (card, ticket) in state.animator.tick(now) {
                stack.animation_finished(card, ticket, &mut state.animator, &mut events);
            }
            if stack.placeholder().is_some() {
                state.placeholder_since.get_or_insert(now);
            } else {
                state.placeholder_since = None;
            }
        }
        Self::emit_events(events, cx);
    }

    fn emit_events(events: EventQueue, cx: &mut Context<Self>) {
        for event in events.events {
            log::trace!("card stack event {event:?}");
            cx.emit(event);
        }
    }
}

impl<P> EventEmitter<CardStackEvent> for GpuiCardStackView<P> where P: CardProvider + 'static {}

impl<P> Render for GpuiCardStackView<P>
where
    P: CardProvider<Card = AnyView, Placeholder = AnyView> + 'static,
{
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let now = Instant::now();
        self.advance(now, cx);

        let ui_state = Arc::clone(&self.state);
        let mut root = div().relative().size_full().child(
            canvas(
                move |bounds, window, _| {
                    let mut state = ui_state.write().expect("card stack state lock");
                    if state.bounds != Some(bounds) {
                        state.bounds = Some(bounds);
                        window.refresh();
                    }
                },
                |_, _, _, _| {},
            )
            .absolute()
            .size_full(),
        );

        {
            let stack = self.stack.read().expect("card stack lock");
            let state = self.state.read().expect("card stack state lock");

            let mut fading = false;
            if let Some(placeholder) = stack.placeholder() {
                let alpha = match (placeholder.fade_in, state.placeholder_since) {
                    (Some(fade), Some(since)) if !fade.is_zero() => {
                        (now.saturating_duration_since(since).as_secs_f32() / fade.as_secs_f32())
                            .clamp(0.0, 1.0)
                    }
                    _ => 1.0,
                };
                fading = alpha < 1.0;
                root = root.child(
                    div()
                        .absolute()
                        .size_full()
                        .opacity(alpha)
                        .child(placeholder.view.clone()),
                );
            }

            // Back to front, so the front card paints last.
            for entry in stack.visible().iter().rev() {
                let frame = state
                    .animator
                    .frame(entry.id())
                    .unwrap_or_else(|| entry.frame());
                let offset = state.animator.transform(entry.id()).translation;
                root = root.child(
                    div()
                        .absolute()
                        .left(px((frame.origin.x + offset.x) as f32))
                        .top(px((frame.origin.y + offset.y) as f32))
                        .w(px(frame.size.width as f32))
                        .h(px(frame.size.height as f32))
                        .child(entry.card().clone()),
                );
            }

            if fading || state.animator.is_animating() {
                window.request_animation_frame();
            }
        }

        root.on_mouse_down(
            MouseButton::Left,
            cx.listener(|this, ev, _, cx| {
                this.on_mouse_down(ev, cx);
            }),
        )
        .on_mouse_move(cx.listener(|this, ev, _, cx| {
            this.on_mouse_move(ev, cx);
        }))
        .on_mouse_up(
            MouseButton::Left,
            cx.listener(|this, ev, window, cx| {
                this.on_mouse_up(ev, window, cx);
            }),
        )
        .on_mouse_up_out(
            MouseButton::Left,
            cx.listener(|this, ev, window, cx| {
                this.on_mouse_up(ev, window, cx);
            }),
        )
    }
}

/// A handle on the [`CardStack`] held inside a `GpuiCardStackView`.
///
/// The handle clones cheaply and can be moved into async tasks.
pub struct StackHandle<P: CardProvider> {
    stack: Arc<RwLock<CardStack<P>>>,
}

impl<P: CardProvider> Clone for StackHandle<P> {
    fn clone(&self) -> Self {
        Self {
            stack: Arc::clone(&self.stack),
        }
    }
}

impl<P: CardProvider> StackHandle<P> {
    /// Read the stack state.
    ///
    /// The stack is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&CardStack<P>) -> R) -> R {
        let stack = self.stack.read().expect("card stack lock");
        f(&stack)
    }

    /// Mutate the card provider.
    ///
    /// The stack is locked for the duration of the callback.
    pub fn with_provider<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let mut stack = self.stack.write().expect("card stack lock");
        f(stack.provider_mut())
    }
}
