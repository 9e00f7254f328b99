use crate::scheduler::{Countdown, CountdownEvent};
use derive_more::{Display, From, Into};
use std::time::Duration;

const INITIAL_ANGLE: f64 = 1.0;
const ROTATE_SCALE_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("#{_0}")]
pub struct SessionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    Idle,
    Running,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationEvent {
    /// Degrees to add to the wheel's angle. Deltas, never absolute positions.
    Rotate(f64),
    Stop,
}

/// One animated spin: doubles its per-tick angle up to `max_angle`, holds it, then decays
/// linearly to zero over the last third of the duration.
#[derive(Debug, Clone)]
pub struct WheelRotation {
    id: SessionId,
    max_angle: f64,
    direction: f64,
    duration: Duration,
    threshold_slow: Duration,
    angle: f64,
    elapsed_angle: f64,
    countdown: Countdown,
    phase: RotationPhase,
}

impl WheelRotation {
    pub fn new(id: SessionId, max_angle: f64, duration: Duration, interval: Duration) -> Self {
        let magnitude = max_angle.abs();
        Self {
            id,
            max_angle: magnitude,
            direction: if max_angle < 0.0 { -1.0 } else { 1.0 },
            duration,
            threshold_slow: duration * 2 / 3,
            angle: INITIAL_ANGLE.min(magnitude),
            elapsed_angle: 0.0,
            countdown: Countdown::new(duration, interval),
            phase: RotationPhase::Idle,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Signed sum of every delta emitted so far.
    pub fn elapsed_angle(&self) -> f64 {
        self.elapsed_angle
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RotationPhase::Running
    }

    pub fn start(&mut self, now: Duration) {
        if self.phase != RotationPhase::Idle {
            return;
        }
        self.countdown.start(now);
        self.phase = RotationPhase::Running;
    }

    pub fn cancel(&mut self) {
        if self.phase == RotationPhase::Running {
            self.countdown.cancel();
            self.phase = RotationPhase::Cancelled;
        }
    }

    pub fn poll(&mut self, now: Duration) -> Vec<RotationEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        self.countdown
            .poll(now)
            .into_iter()
            .map(|event| match event {
                CountdownEvent::Tick { remaining } => RotationEvent::Rotate(self.on_tick(remaining)),
                CountdownEvent::Finish => {
                    self.phase = RotationPhase::Finished;
                    RotationEvent::Stop
                }
            })
            .collect()
    }

    fn on_tick(&mut self, remaining: Duration) -> f64 {
        let elapsed = self.duration.saturating_sub(remaining);

        let delta = if elapsed >= self.threshold_slow {
            self.max_angle * (remaining.as_secs_f64() / self.duration.as_secs_f64())
        } else {
            let delta = self.angle;
            self.angle = (self.angle * ROTATE_SCALE_FACTOR).min(self.max_angle);
            delta
        };

        let delta = delta * self.direction;
        self.elapsed_angle += delta;
        log::trace!(
            "session {} tick: remaining={:?} delta={:.3}",
            self.id,
            remaining,
            delta
        );
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run_to_end(rotation: &mut WheelRotation, step: Duration) -> Vec<RotationEvent> {
        let mut now = Duration::ZERO;
        rotation.start(now);
        let mut events = Vec::new();
        while rotation.is_running() {
            events.extend(rotation.poll(now));
            now += step;
        }
        events
    }

    fn deltas(events: &[RotationEvent]) -> Vec<f64> {
        events
            .iter()
            .filter_map(|e| match e {
                RotationEvent::Rotate(d) => Some(*d),
                RotationEvent::Stop => None,
            })
            .collect()
    }

    #[test]
    fn test_tick_profile() {
        let mut rotation = WheelRotation::new(SessionId::from(1), 50.0, ms(3000), ms(50));
        let events = run_to_end(&mut rotation, ms(50));
        let deltas = deltas(&events);

        assert_eq!(deltas.len(), 60);
        assert_eq!(&deltas[..8], &[1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 50.0, 50.0]);

        // tick k has remaining = 3000 - 50k; the slow phase starts at remaining == 1000
        let (fast, slow) = deltas.split_at(40);
        assert!(fast[6..].iter().all(|&d| d == 50.0));
        assert!((slow[0] - 50.0 / 3.0).abs() < 1e-9);
        assert!(slow.windows(2).all(|w| w[1] < w[0]));
        assert!(slow[slow.len() - 1] < 1.0);

        let stops = events
            .iter()
            .filter(|e| **e == RotationEvent::Stop)
            .count();
        assert_eq!(stops, 1);
        assert_eq!(events.last(), Some(&RotationEvent::Stop));
        assert_eq!(rotation.phase(), RotationPhase::Finished);
        assert!((rotation.elapsed_angle() - deltas.iter().sum::<f64>()).abs() < 1e-9);
    }

    #[test]
    fn test_late_poll_matches_stepped_poll() {
        let mut stepped = WheelRotation::new(SessionId::from(1), 50.0, ms(3000), ms(50));
        let expected = run_to_end(&mut stepped, ms(50));

        let mut burst = WheelRotation::new(SessionId::from(2), 50.0, ms(3000), ms(50));
        burst.start(Duration::ZERO);
        assert_eq!(burst.poll(ms(5000)), expected);
    }

    #[test]
    fn test_negative_max_angle_spins_backwards() {
        let mut rotation = WheelRotation::new(SessionId::from(1), -50.0, ms(300), ms(50));
        let events = run_to_end(&mut rotation, ms(50));
        let deltas = deltas(&events);

        assert_eq!(&deltas[..4], &[-1.0, -2.0, -4.0, -8.0]);
        assert!(deltas.iter().all(|&d| d < 0.0));
    }

    #[test]
    fn test_small_max_angle_clamps_first_delta() {
        let mut rotation = WheelRotation::new(SessionId::from(1), 0.5, ms(3000), ms(50));
        rotation.start(Duration::ZERO);
        assert_eq!(rotation.poll(Duration::ZERO), vec![RotationEvent::Rotate(0.5)]);
        assert_eq!(rotation.poll(ms(50)), vec![RotationEvent::Rotate(0.5)]);
    }

    #[test]
    fn test_cancel_suppresses_stop() {
        let mut rotation = WheelRotation::new(SessionId::from(1), 50.0, ms(3000), ms(50));
        rotation.start(Duration::ZERO);
        rotation.poll(ms(100));
        rotation.cancel();

        assert_eq!(rotation.phase(), RotationPhase::Cancelled);
        assert!(rotation.poll(ms(10_000)).is_empty());
    }

    #[test]
    fn test_idle_rotation_emits_nothing() {
        let mut rotation = WheelRotation::new(SessionId::from(7), 50.0, ms(3000), ms(50));
        assert!(rotation.poll(ms(10_000)).is_empty());
        assert_eq!(rotation.phase(), RotationPhase::Idle);
        assert_eq!(rotation.id().to_string(), "#7");
    }
}
