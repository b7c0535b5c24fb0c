use std::{sync::Arc, time::Duration};

use prioq_core_rs::AvailabilitySignal;
use tokio::time::timeout;

use super::TokioAvailabilitySignal;

#[tokio::test]
async fn pulse_before_wait_is_kept_for_the_next_waiter() {
  let signal = TokioAvailabilitySignal::new();
  signal.pulse();

  assert!(timeout(Duration::from_millis(50), signal.notified()).await.is_ok());
}

#[tokio::test]
async fn pulses_without_waiters_coalesce_into_one_permit() {
  let signal = TokioAvailabilitySignal::new();
  signal.pulse();
  signal.pulse();

  assert!(timeout(Duration::from_millis(50), signal.notified()).await.is_ok());
  assert!(timeout(Duration::from_millis(50), signal.notified()).await.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn pulse_wakes_a_single_waiter() {
  let signal = Arc::new(TokioAvailabilitySignal::new());

  let waiters: Vec<_> = (0..2)
    .map(|_| {
      let signal = signal.clone();
      tokio::spawn(async move { timeout(Duration::from_millis(200), signal.notified()).await.is_ok() })
    })
    .collect();

  tokio::time::sleep(Duration::from_millis(50)).await;
  signal.pulse();

  let mut woken = 0;
  for waiter in waiters {
    if waiter.await.unwrap() {
      woken += 1;
    }
  }
  assert_eq!(woken, 1);
}
