use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

fn counting(container: &SessionContainer) -> (Arc<AtomicUsize>, SubscriptionId) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let id = container.subscribe(move |_, _| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (calls, id)
}

#[test]
fn new_container_is_anonymous_and_pending() {
    let container = SessionContainer::new();
    assert!(!container.is_authenticated());
    assert_eq!(container.hydration(), Hydration::Pending);
}

#[test]
fn adopt_token_authenticates_and_notifies_once() {
    let container = SessionContainer::new();
    let (calls, _) = counting(&container);

    assert!(container.adopt_token("abc"));
    assert!(container.is_authenticated());
    assert_eq!(container.snapshot().token(), Some("abc"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(!container.adopt_token("abc"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn adopt_empty_token_changes_nothing() {
    let container = SessionContainer::new();
    assert!(!container.adopt_token(""));
    assert!(!container.is_authenticated());
}

#[test]
fn replace_skips_notification_when_unchanged() {
    let container = SessionContainer::new();
    let (calls, _) = counting(&container);
    container.replace(Session::anonymous());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    container.replace(Session::new(None, Some("t".to_owned()), None));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn clear_resets_session() {
    let container = SessionContainer::new();
    container.replace(Session::new(None, Some("t".to_owned()), Some("r".to_owned())));
    container.clear();
    assert_eq!(container.snapshot(), Session::anonymous());
}

#[test]
fn unsubscribe_stops_notifications() {
    let container = SessionContainer::new();
    let (calls, id) = counting(&container);
    container.unsubscribe(id);
    container.adopt_token("abc");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn listener_may_read_container_reentrantly() {
    let container = SessionContainer::new();
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let handle = container.clone();
    container.subscribe(move |_, _| {
        *sink.lock().unwrap() = Some(handle.snapshot());
    });
    container.adopt_token("abc");
    let seen = observed.lock().unwrap().clone().unwrap();
    assert_eq!(seen.token(), Some("abc"));
}

#[test]
fn mark_hydrated_notifies_once() {
    let container = SessionContainer::new();
    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&phases);
    container.subscribe(move |_, hydration| sink.lock().unwrap().push(hydration));

    container.mark_hydrated();
    container.mark_hydrated();
    assert_eq!(container.hydration(), Hydration::Ready);
    assert_eq!(*phases.lock().unwrap(), vec![Hydration::Ready]);
}

#[test]
fn set_user_replaces_profile_only() {
    let container = SessionContainer::new();
    container.adopt_token("abc");
    let profile = Profile {
        id: Some("u1".to_owned()),
        first_name: "Alice".to_owned(),
        last_name: "L".to_owned(),
        email: "a@example.com".to_owned(),
        avatar: None,
        verified: true,
        created_at: None,
        updated_at: None,
    };
    container.set_user(Some(profile.clone()));
    let session = container.snapshot();
    assert_eq!(session.user(), Some(&profile));
    assert_eq!(session.token(), Some("abc"));
}

#[tokio::test]
async fn hydrated_resolves_immediately_when_ready() {
    let container = SessionContainer::new();
    container.mark_hydrated();
    container.hydrated().await;
}

#[tokio::test]
async fn hydrated_waits_for_mark() {
    let container = SessionContainer::new();
    let wait = container.hydrated();
    let mark = async {
        assert_eq!(container.hydration(), Hydration::Pending);
        container.mark_hydrated();
    };
    futures::join!(wait, mark);
    assert_eq!(container.hydration(), Hydration::Ready);
}
