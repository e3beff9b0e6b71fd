//! Observable state cells.
//!
//! A [`Signal`] owns a value; writes notify every subscriber. A
//! [`ReadSignal`] is the read-only view handed out to consumers.

use tokio::sync::watch;

#[derive(Debug)]
pub struct Signal<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        let (tx, _) = watch::channel(value);
        Self { tx }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Subscribers are only woken when the value actually changes.
    pub fn set(&self, value: T) {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl<T: Clone + PartialEq + Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[derive(Debug, Clone)]
pub struct ReadSignal<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.rx.borrow())
    }

    /// Wait for the next change and return the new value. `None` once the
    /// owning [`Signal`] is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let signal = Signal::new(1);
        signal.set(2);
        signal.update(|v| *v += 1);
        assert_eq!(signal.get(), 3);
        assert_eq!(signal.read_only().get(), 3);
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let signal = Signal::new(String::new());
        let mut view = signal.read_only();

        signal.set("hello".to_string());

        assert_eq!(view.changed().await.as_deref(), Some("hello"));
    }

    #[test]
    fn equal_writes_do_not_notify() {
        let signal = Signal::new(false);
        let rx = signal.subscribe();

        signal.set(false);
        assert!(!rx.has_changed().unwrap());

        signal.set(true);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn view_ends_with_its_signal() {
        let signal = Signal::new(0);
        let mut view = signal.read_only();
        drop(signal);
        assert_eq!(view.changed().await, None);
    }
}
