//! Concurrent resolution of one category

use crate::fixtures::{
    CountingMetrics, METRICS_CONSTRUCTIONS, SLOW_CONSTRUCTIONS, SleepyAdapter, app_config,
    settings_dir,
};
use std::time::Duration;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use switchboard_infrastructure::resolver::AdapterSession;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution_constructs_once() {
    let settings = settings_dir(None);
    let session = Arc::new(AdapterSession::new(app_config(settings.path())));

    let mut handles = Vec::new();
    for _ in 0..32 {
        let session = Arc::clone(&session);
        handles.push(tokio::spawn(async move {
            session.resolve_as::<CountingMetrics>("metrics").await
        }));
    }

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await.expect("task").expect("resolved"));
    }

    let first = &instances[0];
    assert!(instances.iter().all(|i| Arc::ptr_eq(i, first)));
    assert_eq!(METRICS_CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    assert_eq!(first.inits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancelled_init_is_retried_on_next_resolve() {
    let settings = settings_dir(None);
    let session = AdapterSession::new(app_config(settings.path()));

    let first = tokio::time::timeout(Duration::from_millis(20), session.resolve("slow")).await;
    assert!(first.is_err(), "init should still be sleeping");

    let adapter = tokio::time::timeout(
        Duration::from_secs(5),
        session.resolve_as::<SleepyAdapter>("slow"),
    )
    .await
    .expect("second resolve finishes")
    .expect("resolved");

    assert_eq!(SLOW_CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.started.load(Ordering::SeqCst), 2);
    assert_eq!(adapter.completed.load(Ordering::SeqCst), 1);

    let again = session.resolve_as::<SleepyAdapter>("slow").await.expect("cached");
    assert!(Arc::ptr_eq(&adapter, &again));
    assert_eq!(again.completed.load(Ordering::SeqCst), 1);
}
