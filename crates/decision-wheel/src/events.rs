use crate::wheel::model::WheelOption;
use crate::wheel::spin::SpinResult;

#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    SpinStarted(SpinResult),
    WinnerShown(WheelOption),
    WinnerDismissed,
}

/// Side effects hanging off the spin lifecycle (celebrations, sounds, analytics).
pub trait SpinObserver {
    fn notify(&self, event: &WheelEvent);
}

impl<F> SpinObserver for F
where
    F: Fn(&WheelEvent),
{
    fn notify(&self, event: &WheelEvent) {
        self(event)
    }
}
