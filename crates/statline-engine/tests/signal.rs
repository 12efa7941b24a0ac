#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use statline_engine::CompletionSignal;

#[tokio::test(start_paused = true)]
async fn delivers_buffered_value() {
    let sig = CompletionSignal::new(1);
    assert!(sig.signal(7u32, Duration::ZERO).await);
    assert_eq!(sig.wait().await, Some(7));
}

#[tokio::test(start_paused = true)]
async fn drops_after_timeout_when_full() {
    let sig = CompletionSignal::new(1);
    assert!(sig.signal(1u32, Duration::ZERO).await);
    assert!(!sig.signal(2u32, Duration::from_millis(5)).await);
    assert!(!sig.signal(3u32, Duration::ZERO).await);

    assert_eq!(sig.wait().await, Some(1));
    assert!(sig.signal(4u32, Duration::ZERO).await);
    assert_eq!(sig.wait().await, Some(4));
}

#[tokio::test(start_paused = true)]
async fn waiting_signal_is_handed_off() {
    let sig = Arc::new(CompletionSignal::new(1));
    assert!(sig.signal(1u32, Duration::ZERO).await);

    let s = Arc::clone(&sig);
    let sender = tokio::spawn(async move { s.signal(2u32, Duration::from_secs(1)).await });

    assert_eq!(sig.wait().await, Some(1));
    assert!(sender.await.unwrap());
    assert_eq!(sig.wait().await, Some(2));
}

#[tokio::test(start_paused = true)]
async fn close_wakes_waiters() {
    let sig = Arc::new(CompletionSignal::<u32>::new(4));
    let s = Arc::clone(&sig);
    let waiter = tokio::spawn(async move { s.wait().await });

    tokio::task::yield_now().await;
    sig.close();

    assert_eq!(waiter.await.unwrap(), None);
    assert!(sig.is_closed());
    assert!(!sig.signal(1, Duration::ZERO).await);
    assert_eq!(sig.wait().await, None);
}

#[tokio::test(start_paused = true)]
async fn wait_timeout_gives_up_when_nothing_arrives() {
    let sig = CompletionSignal::<u32>::new(1);
    assert_eq!(sig.wait_timeout(Duration::from_millis(50)).await, None);

    assert!(sig.signal(9, Duration::ZERO).await);
    assert_eq!(sig.wait_timeout(Duration::from_millis(50)).await, Some(9));

    sig.close();
    assert_eq!(sig.wait_timeout(Duration::from_secs(5)).await, None);
}
