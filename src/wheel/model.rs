use super::paint::{Color, Palette};
use super::{ANGLE, ItemLabel, normalize_angle};
use crate::config::{Behavior, StartedNotification, WheelConfig, WheelStyle};
use crate::error::WheelError;
use crate::events::{Callback, WheelEvent, WheelListener};
use crate::geometry::{Circle, PixelPoint, Point};
use crate::rotation::{RotationEvent, SessionId, WheelRotation};
use crate::scheduler::{Clock, MonotonicClock};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Gesture {
    pub(super) live: bool,
    pub(super) rotated: bool,
    pub(super) previous: Option<Point>,
}

/// A spinnable wheel: angle state, items and the active spin, minus any drawing.
///
/// Angle changes from dragging and from animation both go through [`Wheel::rotate_by`]. Dragging
/// is refused while a spin runs, so the two never interleave.
pub struct Wheel<C: Clock = MonotonicClock> {
    clock: C,
    circle: Option<Circle>,
    angle: f64,
    items: Vec<ItemLabel>,
    palette: Palette,
    style: WheelStyle,
    behavior: Behavior,
    enabled: bool,
    rotation: Option<WheelRotation>,
    next_session: u64,
    started_ticket: bool,
    pub(super) gesture: Gesture,
    listeners: Vec<Box<dyn WheelListener>>,
    dirty: bool,
}

impl Wheel<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::default())
    }
}

impl Default for Wheel<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Wheel<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            circle: None,
            angle: 0.0,
            items: Vec::new(),
            palette: Palette::default(),
            style: WheelStyle::default(),
            behavior: Behavior::default(),
            enabled: true,
            rotation: None,
            next_session: 1,
            started_ticket: false,
            gesture: Gesture::default(),
            listeners: Vec::new(),
            dirty: true,
        }
    }

    pub fn from_config(config: &WheelConfig, clock: C) -> Self {
        let mut wheel = Self::with_clock(clock);
        wheel.items = config.items.clone();
        wheel.palette = config.palette();
        wheel.style = config.style();
        wheel.behavior = config.behavior;
        wheel
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn circle(&self) -> Option<Circle> {
        self.circle
    }

    /// Fits the wheel into a `width` x `height` box.
    pub fn set_bounds(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.circle = Some(Circle::from_bounds(width, height));
        } else {
            log::warn!("Ignoring wheel bounds {}x{}", width, height);
            self.circle = None;
        }
        self.dirty = true;
    }

    pub fn items(&self) -> &[ItemLabel] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<ItemLabel>) {
        self.items = items;
        self.dirty = true;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, colors: Vec<Color>) {
        self.palette = Palette::or_default(colors);
        self.dirty = true;
    }

    pub fn style(&self) -> &WheelStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: WheelStyle) {
        self.style = style;
        self.dirty = true;
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: Behavior) {
        self.behavior = behavior;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_animating(&self) -> bool {
        self.rotation.as_ref().is_some_and(WheelRotation::is_running)
    }

    pub fn session(&self) -> Option<&WheelRotation> {
        self.rotation.as_ref()
    }

    /// Whether anything visible changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn subscribe(&mut self, listener: impl WheelListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn subscribe_fn(&mut self, f: impl FnMut(&WheelEvent) + 'static) {
        self.subscribe(Callback(f));
    }

    fn emit(&mut self, event: WheelEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    pub fn angle_per_item(&self) -> Option<f64> {
        (!self.items.is_empty()).then(|| ANGLE / self.items.len() as f64)
    }

    /// Turns the wheel without animation.
    pub fn rotate_by(&mut self, delta: f64) {
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite rotation {}", delta);
            return;
        }

        self.angle = normalize_angle(self.angle + delta);
        self.dirty = true;

        if delta != 0.0 {
            let notify = match self.behavior.started {
                StartedNotification::OncePerGesture => std::mem::take(&mut self.started_ticket),
                StartedNotification::EveryChange => true,
            };
            if notify {
                self.emit(WheelEvent::RotationStarted);
            }
        }
    }

    /// Starts an animated spin, replacing any spin already running.
    ///
    /// `max_angle` is the peak per-tick travel in degrees; a negative value spins the other way.
    /// The first tick is applied before this returns.
    pub fn spin(
        &mut self,
        max_angle: f64,
        duration: Duration,
        interval: Duration,
    ) -> Result<SessionId, WheelError> {
        if max_angle == 0.0 || !max_angle.is_finite() {
            log::debug!("Ignoring spin request with max angle {}", max_angle);
            return Err(WheelError::NoOpRequest);
        }

        self.cancel_spin();

        let id = SessionId::from(self.next_session);
        self.next_session += 1;

        let mut rotation = WheelRotation::new(id, max_angle, duration, interval);
        rotation.start(self.clock.now());
        log::debug!(
            "Starting spin {}: max_angle={} duration={:?} interval={:?}",
            id,
            max_angle,
            duration,
            interval
        );

        self.rotation = Some(rotation);
        self.gesture = Gesture::default();
        self.started_ticket = true;
        self.poll();

        Ok(id)
    }

    /// Stops the running spin where it is, without a stop notification.
    pub fn cancel_spin(&mut self) -> bool {
        match self.rotation.take() {
            Some(mut rotation) if rotation.is_running() => {
                rotation.cancel();
                log::debug!("Cancelled spin {}", rotation.id());
                self.started_ticket = false;
                true
            }
            _ => false,
        }
    }

    /// Applies every tick that has come due. Returns whether a spin is still running.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let events = match self.rotation.as_mut() {
            Some(rotation) => rotation.poll(now),
            None => return false,
        };

        for event in events {
            match event {
                RotationEvent::Rotate(delta) => self.rotate_by(delta),
                RotationEvent::Stop => self.finish_spin(),
            }
        }

        self.is_animating()
    }

    fn finish_spin(&mut self) {
        if let Some(rotation) = self.rotation.take() {
            log::info!(
                "Spin {} settled at {:.1} degrees after {:.1} degrees of travel",
                rotation.id(),
                self.angle,
                rotation.elapsed_angle()
            );
        }
        self.started_ticket = false;
        let selected = self.selected().cloned();
        self.emit(WheelEvent::RotationStopped(selected));
    }

    pub(super) fn begin_gesture(&mut self) {
        self.gesture.live = true;
        self.gesture.rotated = false;
        self.started_ticket = true;
    }

    pub(super) fn end_gesture(&mut self) {
        let rotated = self.gesture.live && self.gesture.rotated;
        self.gesture.live = false;
        self.gesture.rotated = false;
        self.started_ticket = false;

        if rotated && self.behavior.notify_on_release {
            let selected = self.selected().cloned();
            self.emit(WheelEvent::RotationStopped(selected));
        }
    }

    /// Screen position of each segment's leading edge at the current angle.
    pub fn anchors(&self) -> Result<Vec<PixelPoint>, WheelError> {
        let circle = self.circle.ok_or(WheelError::UninitializedGeometry)?;
        let per_item = self.angle_per_item().ok_or(WheelError::NoItems)?;
        let center = circle.center();
        let (edge_x, edge_y) = (center.x + circle.radius(), center.y);

        Ok((0..self.items.len())
            .map(|i| circle.rotate_point(i as f64 * per_item + self.angle, edge_x, edge_y))
            .collect())
    }

    /// Index of the segment under the pointer at the top of the wheel.
    pub fn try_selected_index(&self) -> Result<usize, WheelError> {
        let anchors = self.anchors()?;
        if anchors.len() == 1 {
            return Ok(0);
        }

        let cx = self
            .circle
            .map(|c| c.center().x)
            .ok_or(WheelError::UninitializedGeometry)?;
        let n = anchors.len();

        (0..n)
            .find(|&i| f64::from(anchors[i].x) <= cx && cx <= f64::from(anchors[(i + 1) % n].x))
            .ok_or(WheelError::NoSelection)
    }

    pub fn try_selected(&self) -> Result<&ItemLabel, WheelError> {
        self.try_selected_index().map(|i| &self.items[i])
    }

    pub fn selected(&self) -> Option<&ItemLabel> {
        self.try_selected().ok()
    }
}
