//! Trailing-edge coalescing of change notifications

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use tracing::debug;

/// Default quiet period before a burst of events triggers a resync
pub const DEBOUNCE_MS: u64 = 200;

/// Drain `events`, calling `on_change` once per burst
///
/// A burst ends when no event arrives for `window`. Returns when the
/// channel closes, after flushing a pending burst. The result is the number
/// of times `on_change` ran.
pub async fn coalesce<F, Fut>(
    mut events: UnboundedReceiver<()>,
    window: Duration,
    mut on_change: F,
) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut triggered = 0;

    while events.recv().await.is_some() {
        let mut coalesced = 1usize;
        let closed = loop {
            match timeout(window, events.recv()).await {
                Ok(Some(())) => coalesced += 1,
                Ok(None) => break true,
                Err(_) => break false,
            }
        };

        debug!("Coalesced {} change event(s)", coalesced);
        on_change().await;
        triggered += 1;

        if closed {
            break;
        }
    }

    triggered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc::unbounded_channel;

    const WINDOW: Duration = Duration::from_millis(50);

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() -> std::future::Ready<()>) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        })
    }

    #[tokio::test]
    async fn burst_triggers_once() {
        let (tx, rx) = unbounded_channel();
        let (count, on_change) = counter();
        for _ in 0..5 {
            tx.send(()).unwrap();
        }
        drop(tx);

        let triggered = coalesce(rx, WINDOW, on_change).await;

        assert_eq!(triggered, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn separated_bursts_trigger_separately() {
        let (tx, rx) = unbounded_channel();
        let (count, on_change) = counter();
        let consumer = tokio::spawn(coalesce(rx, WINDOW, on_change));

        tx.send(()).unwrap();
        tx.send(()).unwrap();
        tokio::time::sleep(WINDOW * 4).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tx.send(()).unwrap();
        tokio::time::sleep(WINDOW * 4).await;
        drop(tx);

        assert_eq!(consumer.await.unwrap(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn nothing_happens_without_events() {
        let (tx, rx) = unbounded_channel::<()>();
        let (count, on_change) = counter();
        drop(tx);

        assert_eq!(coalesce(rx, WINDOW, on_change).await, 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn trigger_waits_for_quiet_period() {
        let (tx, rx) = unbounded_channel();
        let (count, on_change) = counter();
        let consumer = tokio::spawn(coalesce(rx, WINDOW * 4, on_change));

        tx.send(()).unwrap();
        tokio::time::sleep(WINDOW).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(WINDOW * 8).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        drop(tx);
        consumer.await.unwrap();
    }
}
