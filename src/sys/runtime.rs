use crate::events::WheelEvent;
use crate::scheduler::Clock;
use crate::wheel::{ItemLabel, Wheel};
use async_channel::Receiver;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Pumps `wheel` once per `frame` until its spin settles.
pub async fn drive<C: Clock>(wheel: &mut Wheel<C>, frame: Duration) {
    let mut ticker = time::interval(frame.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while wheel.poll() {
        ticker.tick().await;
    }
}

/// Logs wheel events until the channel closes, yielding the last settled item.
pub fn spawn_event_logger(rx: Receiver<WheelEvent>) -> JoinHandle<Option<ItemLabel>> {
    tokio::spawn(async move {
        let mut winner = None;
        while let Ok(event) = rx.recv().await {
            match event {
                WheelEvent::RotationStarted => log::info!("Wheel started turning"),
                WheelEvent::RotationStopped(item) => {
                    match &item {
                        Some(item) => log::info!("Wheel stopped on '{}'", item),
                        None => log::warn!("Wheel stopped with nothing selected"),
                    }
                    winner = item;
                }
            }
        }
        winner
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::MonotonicClock;

    #[tokio::test]
    async fn test_drive_settles_and_reports() {
        let (tx, rx) = async_channel::unbounded();
        let logger = spawn_event_logger(rx);

        let mut wheel = Wheel::with_clock(MonotonicClock::default());
        wheel.set_bounds(200.0, 200.0);
        wheel.set_items(["a", "b", "c"].map(ItemLabel::from).to_vec());
        wheel.subscribe(tx);

        wheel
            .spin(30.0, Duration::from_millis(60), Duration::from_millis(5))
            .unwrap();
        drive(&mut wheel, Duration::from_millis(5)).await;

        assert!(!wheel.is_animating());
        let expected = wheel.selected().cloned();
        assert!(expected.is_some());

        drop(wheel);
        assert_eq!(logger.await.unwrap(), expected);
    }
}
