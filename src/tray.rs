//! Tray mirror: a background thread that shows the latest published frame.
//!
//! The main loop and the mirror share one slot. Publishing overwrites it,
//! the mirror takes whatever is there when it wakes up. Frames the mirror
//! never saw are simply lost; the next publish supersedes them anyway.

use crate::sink::FrameUpdate;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Condvar, Mutex, MutexGuard,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

pub(crate) const INITIAL_GLYPH: &str = "(O . O)";

const WAIT_SLICE: Duration = Duration::from_millis(250);

struct Slot {
    latest: Mutex<Option<FrameUpdate>>,
    ready: Condvar,
    stop: AtomicBool,
}

impl Slot {
    fn lock(&self) -> MutexGuard<'_, Option<FrameUpdate>> {
        // a panicked mirror must not take the publisher down with it
        self.latest.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[derive(Clone)]
pub(crate) struct TrayPublisher {
    slot: Arc<Slot>,
}

pub(crate) struct TrayReceiver {
    slot: Arc<Slot>,
}

pub(crate) fn frame_slot() -> (TrayPublisher, TrayReceiver) {
    let slot = Arc::new(Slot {
        latest: Mutex::new(None),
        ready: Condvar::new(),
        stop: AtomicBool::new(false),
    });
    (
        TrayPublisher { slot: slot.clone() },
        TrayReceiver { slot },
    )
}

impl TrayPublisher {
    pub(crate) fn publish(&self, update: FrameUpdate) {
        *self.slot.lock() = Some(update);
        self.slot.ready.notify_one();
    }

    pub(crate) fn request_stop(&self) {
        self.slot.stop.store(true, Ordering::SeqCst);
        self.slot.ready.notify_all();
    }
}

impl TrayReceiver {
    pub(crate) fn wait_latest(&self, timeout: Duration) -> Option<FrameUpdate> {
        let mut guard = self.slot.lock();
        if guard.is_none() && !self.is_stopped() {
            guard = match self.slot.ready.wait_timeout_while(guard, timeout, |latest| {
                latest.is_none() && !self.slot.stop.load(Ordering::SeqCst)
            }) {
                Ok((g, _)) => g,
                Err(p) => p.into_inner().0,
            };
        }
        guard.take()
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.slot.stop.load(Ordering::SeqCst)
    }
}

/// The last pending frame is still shown before the thread exits.
pub(crate) fn spawn_mirror<F>(receiver: TrayReceiver, mut show: F) -> std::io::Result<JoinHandle<()>>
where
    F: FnMut(&str) + Send + 'static,
{
    thread::Builder::new()
        .name("tray-mirror".to_string())
        .spawn(move || {
            show(INITIAL_GLYPH);
            loop {
                if let Some(update) = receiver.wait_latest(WAIT_SLICE) {
                    show(update.glyph());
                }
                if receiver.is_stopped() {
                    break;
                }
            }
            tracing::debug!("tray mirror stopped");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnimationId;

    fn frame(animation: AnimationId, frame: usize) -> FrameUpdate {
        FrameUpdate { animation, frame }
    }

    #[test]
    fn test_publish_overwrites_pending_frame() {
        let (tx, rx) = frame_slot();
        tx.publish(frame(AnimationId::Idle, 1));
        tx.publish(frame(AnimationId::Sad, 3));
        assert_eq!(
            rx.wait_latest(Duration::ZERO),
            Some(frame(AnimationId::Sad, 3))
        );
        assert_eq!(rx.wait_latest(Duration::from_millis(5)), None);
    }

    #[test]
    fn test_stop_wakes_waiting_reader() {
        let (tx, rx) = frame_slot();
        let waiter = thread::spawn(move || {
            let got = rx.wait_latest(Duration::from_secs(30));
            (got, rx.is_stopped())
        });
        thread::sleep(Duration::from_millis(20));
        tx.request_stop();
        let (got, stopped) = waiter.join().unwrap();
        assert_eq!(got, None);
        assert!(stopped);
    }

    #[test]
    fn test_publish_without_reader_is_harmless() {
        let (tx, rx) = frame_slot();
        drop(rx);
        tx.publish(frame(AnimationId::Dead, 0));
        tx.request_stop();
    }

    #[test]
    fn test_mirror_shows_last_frame_before_exit() {
        let (tx, rx) = frame_slot();
        let shown = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = shown.clone();
        let handle = spawn_mirror(rx, move |glyph| {
            sink.lock().unwrap().push(glyph.to_string());
        })
        .unwrap();

        tx.publish(frame(AnimationId::Hearts, 1));
        tx.request_stop();
        handle.join().unwrap();

        let shown = shown.lock().unwrap();
        assert_eq!(shown.first().map(String::as_str), Some(INITIAL_GLYPH));
        assert_eq!(shown.last().map(String::as_str), Some("(❤ v ❤)"));
    }
}
