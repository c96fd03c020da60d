//! Pointer-gesture handling.
//!
//! Gesture recognition is a plain state machine over host-supplied pointer
//! events: each step folds one event into [`GestureState`] and yields an
//! optional [`GestureAction`]. The controller then applies actions to the
//! viewport, which keeps recognition unit-testable without any platform
//! event loop. Events carry their own timestamps; nothing here reads a
//! clock.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{LinearScale, SeriesStore, Viewport, windowing};
use crate::error::GraphResult;

/// Two taps of the primary pointer within this window reset the viewport.
const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// A remapped window must keep at least this many points of the first
/// series visible, or the gesture is rejected.
const MIN_VISIBLE_POINTS: usize = 8;

/// One platform-agnostic pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// First pointer touched down.
    Down { id: u32, x: f64, y: f64 },
    /// An additional pointer touched down while one is already tracked.
    ExtraDown { id: u32, x: f64, y: f64 },
    /// A tracked pointer moved.
    Move { id: u32, x: f64, y: f64 },
    /// A non-final pointer lifted.
    ExtraUp { time_ms: f64 },
    /// The last pointer lifted.
    Up { time_ms: f64 },
}

/// Screen position of one tracked pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedPointer {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

/// Recognition state folded over the event stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureState {
    pointers: SmallVec<[TrackedPointer; 2]>,
    last_tap_ms: Option<f64>,
}

impl GestureState {
    #[must_use]
    pub fn tracked_pointers(&self) -> &[TrackedPointer] {
        &self.pointers
    }

    fn track(&mut self, id: u32, x: f64, y: f64) {
        if self.pointers.len() < 2 {
            self.pointers.push(TrackedPointer { id, x, y });
        }
    }
}

/// Viewport-relevant action recognized from one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    /// A second pointer landed; the host should stop parent views from
    /// intercepting further events.
    Capture,
    /// Two pointers lifted: reinterpret their screen X positions as the new
    /// window bounds.
    Remap { left_px: f64, right_px: f64 },
    /// Double-tap of the primary pointer.
    DoubleTap,
}

/// Folds one event into the state. Pure recognition; nothing is applied.
pub fn step(state: &mut GestureState, event: PointerEvent) -> Option<GestureAction> {
    match event {
        PointerEvent::Down { id, x, y } => {
            state.track(id, x, y);
            None
        }
        PointerEvent::ExtraDown { id, x, y } => {
            state.track(id, x, y);
            Some(GestureAction::Capture)
        }
        PointerEvent::Move { id, x, y } => {
            for pointer in &mut state.pointers {
                if pointer.id == id {
                    pointer.x = x;
                    pointer.y = y;
                }
            }
            None
        }
        PointerEvent::ExtraUp { .. } => {
            let action = if state.pointers.len() == 2 {
                let (a, b) = (state.pointers[0].x, state.pointers[1].x);
                Some(GestureAction::Remap {
                    left_px: a.min(b),
                    right_px: a.max(b),
                })
            } else {
                None
            };
            state.pointers.clear();
            action
        }
        PointerEvent::Up { time_ms } => {
            state.pointers.clear();
            let double = state
                .last_tap_ms
                .is_some_and(|last| time_ms - last <= DOUBLE_TAP_WINDOW_MS);
            if double {
                state.last_tap_ms = None;
                Some(GestureAction::DoubleTap)
            } else {
                state.last_tap_ms = Some(time_ms);
                None
            }
        }
    }
}

/// Host-visible result of feeding one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    /// The host should disable parent event interception.
    CaptureInput,
    /// A two-finger remap changed the window.
    WindowChanged,
    /// The remap would leave fewer than the minimum visible points and was
    /// reverted.
    WindowRejected,
    /// Double-tap reset the window to the pinned initial bounds.
    ResetApplied,
}

/// Applies recognized gestures to a viewport.
#[derive(Debug, Default)]
pub struct GestureController {
    state: GestureState,
    view_width: f64,
}

impl GestureController {
    #[must_use]
    pub fn new(view_width: f64) -> Self {
        Self {
            state: GestureState::default(),
            view_width,
        }
    }

    /// Pixel width of the chart content area; updated on host resize.
    pub fn set_view_width(&mut self, view_width: f64) {
        self.view_width = view_width;
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Feeds one pointer event; returns the effect applied, if any.
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        viewport: &mut Viewport,
        store: &SeriesStore,
    ) -> GraphResult<Option<GestureEffect>> {
        let Some(action) = step(&mut self.state, event) else {
            return Ok(None);
        };

        match action {
            GestureAction::Capture => Ok(Some(GestureEffect::CaptureInput)),
            GestureAction::Remap { left_px, right_px } => {
                self.apply_remap(left_px, right_px, viewport, store)
            }
            GestureAction::DoubleTap => Self::apply_reset(viewport),
        }
    }

    /// Reinterprets two screen X positions as the new window bounds, scaled
    /// against the pre-gesture span. Rejects (and reverts exactly) when the
    /// first series would have fewer than eight visible points.
    fn apply_remap(
        &self,
        left_px: f64,
        right_px: f64,
        viewport: &mut Viewport,
        store: &SeriesStore,
    ) -> GraphResult<Option<GestureEffect>> {
        if viewport.is_unset() || self.view_width <= 0.0 {
            return Ok(None);
        }

        let (old_start, old_size) = viewport.window();

        // Pre-gesture window as a pixel scale: each pointer X re-reads as a
        // domain position, and the pair becomes the new window bounds.
        let scale = LinearScale::new(old_start, old_start + old_size)?;
        let new_start = scale.to_domain(left_px, self.view_width);
        let new_end = scale.to_domain(right_px, self.view_width);
        viewport.set_window(new_start, new_end - new_start)?;

        if let Some(first) = store.get_index(0) {
            if windowing::visible_slice(first, *viewport).len() < MIN_VISIBLE_POINTS {
                viewport.set_window(old_start, old_size)?;
                debug!(new_start, new_end, "remap rejected: too few visible points");
                return Ok(Some(GestureEffect::WindowRejected));
            }
        }

        debug!(new_start, new_end, "window remapped from two-finger gesture");
        Ok(Some(GestureEffect::WindowChanged))
    }

    fn apply_reset(viewport: &mut Viewport) -> GraphResult<Option<GestureEffect>> {
        if viewport.is_unset() {
            return Ok(None);
        }
        let Some((start, end)) = viewport.initial_bounds() else {
            return Ok(None);
        };
        viewport.set_window(start, end - start)?;
        debug!(start, end, "double-tap reset to initial bounds");
        Ok(Some(GestureEffect::ResetApplied))
    }

    /// Pinch scale around the window center, clamped to the full data
    /// domain.
    pub fn apply_scale(
        &self,
        factor: f64,
        viewport: &mut Viewport,
        store: &SeriesStore,
    ) -> GraphResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(crate::error::GraphError::InvalidArgument(
                "scale factor must be finite and > 0".to_owned(),
            ));
        }

        let (start, size) = viewport.window();
        let center = start + size / 2.0;
        let new_size = size / factor;
        viewport.set_window(center - new_size / 2.0, new_size)?;

        let (min_x, max_x) = viewport.full_domain(store);
        viewport.clamp_to_domain(min_x, max_x);
        Ok(())
    }
}
