use crate::wheel::ItemLabel;
use async_channel::Sender;

#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    RotationStarted,
    RotationStopped(Option<ItemLabel>),
}

pub trait WheelListener {
    fn on_event(&mut self, event: &WheelEvent);
}

impl WheelListener for Sender<WheelEvent> {
    fn on_event(&mut self, event: &WheelEvent) {
        if let Err(e) = self.try_send(event.clone()) {
            log::warn!("Dropped wheel event: {}", e);
        }
    }
}

/// Adapts a closure into a [`WheelListener`].
pub struct Callback<F>(pub F);

impl<F> WheelListener for Callback<F>
where
    F: FnMut(&WheelEvent),
{
    fn on_event(&mut self, event: &WheelEvent) {
        (self.0)(event)
    }
}
