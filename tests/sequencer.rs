use parking_lot::Mutex;
use rose_router::{Handler, HandlerError, HandlerKind, MemoryHistory, Router, State};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn router() -> Router {
    Router::new(Arc::new(MemoryHistory::default()), None).expect("router should build")
}

fn record(log: &Arc<Mutex<Vec<&'static str>>>, entry: &'static str) -> Handler {
    let log = log.clone();
    Handler::sync(move |_| {
        log.lock().push(entry);
        Ok(())
    })
}

#[tokio::test]
async fn emit_when_no_handlers_then_resolves_ok() {
    let router = router();

    router
        .root()
        .emit("nothing")
        .await
        .expect("emit without handlers should succeed");
}

#[tokio::test]
async fn emit_when_handler_registered_then_receives_owning_state() {
    let router = router();
    let state = router.root().child("a").expect("pattern should compile");
    let seen: Arc<Mutex<Option<State>>> = Arc::new(Mutex::new(None));

    let sink = seen.clone();
    state.on(
        "test",
        Handler::sync(move |this| {
            *sink.lock() = Some(this.clone());
            Ok(())
        }),
    );

    state.emit("test").await.expect("emit should succeed");

    assert_eq!(seen.lock().as_ref(), Some(&state));
}

#[tokio::test]
async fn emit_when_async_handler_precedes_sync_then_sync_sees_its_effect() {
    let router = router();
    let root = router.root();
    let counter = Arc::new(AtomicUsize::new(0));
    let observed = Arc::new(AtomicUsize::new(usize::MAX));

    let c = counter.clone();
    root.on(
        "test",
        Handler::future(move |_| {
            let c = c.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                c.store(1, Ordering::SeqCst);
                Ok(())
            }
        }),
    );
    let (c, o) = (counter.clone(), observed.clone());
    root.on(
        "test",
        Handler::sync(move |_| {
            o.store(c.load(Ordering::SeqCst), Ordering::SeqCst);
            Ok(())
        }),
    );

    root.emit("test").await.expect("emit should succeed");

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(observed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn emit_when_callback_handler_then_waits_for_completion() {
    let router = router();
    let root = router.root();
    let counter = Arc::new(AtomicUsize::new(0));

    let c = counter.clone();
    root.on(
        "test",
        Handler::callback(move |_, done| {
            let c = c.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                c.store(1, Ordering::SeqCst);
                done.done();
            });
        }),
    );

    root.emit("test").await.expect("emit should succeed");

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn emit_when_handlers_registered_then_run_in_registration_order() {
    let router = router();
    let root = router.root();
    let log = Arc::new(Mutex::new(Vec::new()));

    root.on("test", record(&log, "first"));
    root.on("test", record(&log, "second"));
    root.on("other", record(&log, "other"));
    root.on("test", record(&log, "third"));

    root.emit("test").await.expect("emit should succeed");

    assert_eq!(*log.lock(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn emit_when_sync_handler_fails_then_later_handlers_are_skipped() {
    let router = router();
    let root = router.root();
    let log = Arc::new(Mutex::new(Vec::new()));

    root.on("test", record(&log, "first"));
    root.on("test", Handler::sync(|_| Err(HandlerError::new("boom"))));
    root.on("test", record(&log, "never"));

    let err = root.emit("test").await.expect_err("emit should fail");

    assert_eq!(err.to_string(), "boom");
    assert_eq!(*log.lock(), vec!["first"]);
}

#[tokio::test]
async fn emit_when_callback_signals_failure_then_emit_rejects() {
    let router = router();
    let root = router.root();
    let log = Arc::new(Mutex::new(Vec::new()));

    root.on(
        "test",
        Handler::callback(|_, done| done.fail(HandlerError::new("callback failed"))),
    );
    root.on("test", record(&log, "never"));

    let err = root.emit("test").await.expect_err("emit should fail");

    assert!(matches!(err, HandlerError::Failed { ref message, .. } if message == "callback failed"));
    assert!(log.lock().is_empty());
}

#[tokio::test]
async fn emit_when_completion_dropped_then_handler_is_abandoned() {
    let router = router();
    let root = router.root();

    root.on("test", Handler::callback(|_, done| drop(done)));

    let err = root.emit("test").await.expect_err("emit should fail");

    match err {
        HandlerError::Abandoned { event } => assert_eq!(event, "test"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn handler_kind_when_constructed_then_is_tagged_explicitly() {
    assert_eq!(Handler::sync(|_| Ok(())).kind(), HandlerKind::Sync);
    assert_eq!(Handler::callback(|_, done| done.done()).kind(), HandlerKind::Callback);
    assert_eq!(Handler::future(|_| async { Ok(()) }).kind(), HandlerKind::Future);
}

#[tokio::test]
async fn emit_when_callback_finishes_with_result_then_result_is_propagated() {
    let router = router();
    let root = router.root();
    let log = Arc::new(Mutex::new(Vec::new()));

    root.on("ok", Handler::callback(|_, done| done.finish(Ok(()))));
    root.on("ok", record(&log, "after ok"));
    root.emit("ok").await.expect("finished callback should succeed");

    root.on(
        "err",
        Handler::callback(|_, done| done.finish(Err(HandlerError::new("finished badly")))),
    );
    root.on("err", record(&log, "never"));
    let err = root.emit("err").await.expect_err("emit should fail");

    assert_eq!(err.to_string(), "finished badly");
    assert_eq!(*log.lock(), vec!["after ok"]);
}
