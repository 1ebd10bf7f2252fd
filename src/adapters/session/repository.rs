//! Reconciling session repository.
//!
//! Implements the `SessionRepository` port over an `AuthClient` and a
//! `SessionStore`. The local store is the cache; the remote backend is the
//! source of truth. `current_user` merges the two sources into one stream:
//!
//! - Every local store emission surfaces as `Ready`.
//! - A remote user that differs from the last observed local value is
//!   written to the store; the store's own re-emission then surfaces it.
//! - A remote sign-out, or a remote value matching local, clears the store.
//!   Clearing on match mirrors the always-trust-remote policy even when no
//!   real state change occurred.
//!
//! Each source runs in its own forwarding task feeding a single channel, so
//! cancellation is structural: dropping the stream aborts both forwarders
//! and the merge loop.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::foundation::{AuthError, StoreError, User};
use crate::domain::session::SessionState;
use crate::ports::{AuthClient, SessionRepository, SessionStore, SessionStream};

/// Channel capacity for the per-subscription merge pipeline. Small by
/// intent: backpressure from a slow consumer should reach the sources.
const MERGE_BUFFER: usize = 16;

/// One event from either reconciliation source.
#[derive(Debug)]
enum SourceEvent {
    Local(Result<Option<User>, StoreError>),
    Remote(Result<Option<User>, AuthError>),
}

/// Session repository reconciling a local store with a remote auth client.
pub struct ReconcilingSessionRepository {
    remote: Arc<dyn AuthClient>,
    store: Arc<dyn SessionStore>,
}

impl ReconcilingSessionRepository {
    /// Creates a repository over the given remote client and local store.
    pub fn new(remote: Arc<dyn AuthClient>, store: Arc<dyn SessionStore>) -> Self {
        Self { remote, store }
    }
}

#[async_trait]
impl SessionRepository for ReconcilingSessionRepository {
    fn current_user(&self) -> SessionStream {
        let (source_tx, source_rx) = mpsc::channel(MERGE_BUFFER);
        let (out_tx, out_rx) = mpsc::channel(MERGE_BUFFER);

        let local_tx = source_tx.clone();
        let mut local_source = self.store.watch();
        let local = tokio::spawn(async move {
            while let Some(item) = local_source.next().await {
                if local_tx.send(SourceEvent::Local(item)).await.is_err() {
                    break;
                }
            }
        });

        let remote_tx = source_tx;
        let mut remote_source = self.remote.auth_state();
        let remote = tokio::spawn(async move {
            while let Some(item) = remote_source.next().await {
                if remote_tx.send(SourceEvent::Remote(item)).await.is_err() {
                    break;
                }
            }
        });

        let store = Arc::clone(&self.store);
        let merge = tokio::spawn(reconcile(source_rx, store, out_tx));

        Box::pin(ReconciledStream {
            receiver: out_rx,
            tasks: [local, remote, merge],
        })
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let user = self.remote.sign_in_with_password(email, password).await?;
        self.store.save(&user).await?;
        tracing::debug!(user_id = %user.id, "signed in with password");
        Ok(())
    }

    async fn sign_in_anonymously(&self) -> Result<(), AuthError> {
        let user = self.remote.sign_in_anonymously().await?;
        self.store.save(&user).await?;
        tracing::debug!(user_id = %user.id, "signed in anonymously");
        Ok(())
    }

    async fn register_with_password(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let user = self.remote.register(email, password).await?;
        self.store.save(&user).await?;
        tracing::debug!(user_id = %user.id, "registered new account");
        Ok(())
    }

    async fn convert_to_permanent_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let user = self.remote.link_with_password(email, password).await?;
        self.store.save(&user).await?;
        tracing::debug!(user_id = %user.id, "linked anonymous account");
        Ok(())
    }

    async fn update_display_name(&self, name: &str) -> Result<(), AuthError> {
        let user = self.remote.update_display_name(name).await?;
        self.store.save(&user).await?;
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.remote.reset_password(email).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.remote.sign_out().await?;
        self.store.clear().await?;
        tracing::debug!("signed out");
        Ok(())
    }

    async fn delete_user(&self) -> Result<(), AuthError> {
        self.remote.delete_current_user().await?;
        self.store.clear().await?;
        tracing::debug!("deleted account");
        Ok(())
    }
}

/// Merge loop for one `current_user` subscription.
///
/// Emits `Loading` first, then applies the reconciliation rules until a
/// source fails or every side of the pipeline is gone. Any failure produces
/// exactly one terminal `Failed` emission.
async fn reconcile(
    mut sources: mpsc::Receiver<SourceEvent>,
    store: Arc<dyn SessionStore>,
    out: mpsc::Sender<SessionState<Option<User>>>,
) {
    if out.send(SessionState::Loading).await.is_err() {
        return;
    }

    let mut last_local: Option<User> = None;

    while let Some(event) = sources.recv().await {
        match event {
            SourceEvent::Local(Ok(user)) => {
                last_local = user.clone();
                if out.send(SessionState::Ready(user)).await.is_err() {
                    return;
                }
            }
            SourceEvent::Local(Err(err)) => {
                let _ = out.send(SessionState::Failed(err.into())).await;
                return;
            }
            SourceEvent::Remote(Ok(Some(user))) if last_local.as_ref() != Some(&user) => {
                // The store watch re-emits the written value; no direct
                // emission here.
                if let Err(err) = store.save(&user).await {
                    let _ = out.send(SessionState::Failed(err.into())).await;
                    return;
                }
            }
            SourceEvent::Remote(Ok(_)) => {
                // Remote signed out, or remote matches local. Clearing on
                // match is deliberate: remote is always trusted, and the
                // store fires an observable write event either way.
                if let Err(err) = store.clear().await {
                    let _ = out.send(SessionState::Failed(err.into())).await;
                    return;
                }
            }
            SourceEvent::Remote(Err(err)) => {
                let _ = out.send(SessionState::Failed(err)).await;
                return;
            }
        }
    }
}

/// Stream handed to `current_user` subscribers.
///
/// Owns the forwarding and merge tasks; dropping the stream aborts all
/// three, releasing both upstream subscriptions.
struct ReconciledStream {
    receiver: mpsc::Receiver<SessionState<Option<User>>>,
    tasks: [JoinHandle<()>; 3],
}

impl Stream for ReconciledStream {
    type Item = SessionState<Option<User>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl Drop for ReconciledStream {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream::BoxStream;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::watch;

    /// Watch-backed store that counts saves and clears.
    struct TestStore {
        state: watch::Sender<Option<User>>,
        saves: AtomicUsize,
        clears: AtomicUsize,
        fail_save: bool,
    }

    impl TestStore {
        fn new(initial: Option<User>) -> Self {
            let (state, _) = watch::channel(initial);
            Self {
                state,
                saves: AtomicUsize::new(0),
                clears: AtomicUsize::new(0),
                fail_save: false,
            }
        }

        fn failing_save(initial: Option<User>) -> Self {
            Self {
                fail_save: true,
                ..Self::new(initial)
            }
        }

        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        fn clear_count(&self) -> usize {
            self.clears.load(Ordering::SeqCst)
        }

        fn current(&self) -> Option<User> {
            self.state.borrow().clone()
        }
    }

    #[async_trait]
    impl SessionStore for TestStore {
        fn watch(&self) -> BoxStream<'static, Result<Option<User>, StoreError>> {
            // Capture the current value at subscription time so the first
            // emission is fixed before any reconciliation write lands.
            let mut rx = self.state.subscribe();
            let initial = rx.borrow_and_update().clone();
            Box::pin(futures::stream::unfold(
                (rx, Some(initial)),
                |(mut rx, pending)| async move {
                    if let Some(value) = pending {
                        return Some((Ok(value), (rx, None)));
                    }
                    match rx.changed().await {
                        Ok(()) => {
                            let value = rx.borrow_and_update().clone();
                            Some((Ok(value), (rx, None)))
                        }
                        Err(_) => None,
                    }
                },
            ))
        }

        async fn save(&self, user: &User) -> Result<(), StoreError> {
            if self.fail_save {
                return Err(StoreError::Closed);
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.state.send_replace(Some(user.clone()));
            Ok(())
        }

        async fn clear(&self) -> Result<(), StoreError> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            self.state.send_replace(None);
            Ok(())
        }
    }

    /// Scriptable remote client driven through a watch channel.
    struct TestRemote {
        state: watch::Sender<Result<Option<User>, AuthError>>,
        sign_in_result: Mutex<Option<Result<User, AuthError>>>,
        delete_result: Mutex<Option<Result<(), AuthError>>>,
    }

    impl TestRemote {
        fn new() -> Self {
            let (state, _) = watch::channel(Ok(None));
            Self {
                state,
                sign_in_result: Mutex::new(None),
                delete_result: Mutex::new(None),
            }
        }

        fn push_state(&self, user: Option<User>) {
            self.state.send_replace(Ok(user));
        }

        fn fail_state(&self, error: AuthError) {
            self.state.send_replace(Err(error));
        }

        fn script_sign_in(&self, result: Result<User, AuthError>) {
            *self.sign_in_result.lock().unwrap() = Some(result);
        }

        fn script_delete(&self, result: Result<(), AuthError>) {
            *self.delete_result.lock().unwrap() = Some(result);
        }
    }

    #[async_trait]
    impl AuthClient for TestRemote {
        fn auth_state(&self) -> BoxStream<'static, Result<Option<User>, AuthError>> {
            // Scripted double: emits only pushed states, so tests control
            // exactly when a remote event reaches the reconciler.
            let rx = self.state.subscribe();
            Box::pin(futures::stream::unfold(rx, |mut rx| async move {
                match rx.changed().await {
                    Ok(()) => {
                        let value = rx.borrow_and_update().clone();
                        Some((value, rx))
                    }
                    Err(_) => None,
                }
            }))
        }

        async fn sign_in_with_password(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<User, AuthError> {
            self.sign_in_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(AuthError::Generic))
        }

        async fn sign_in_anonymously(&self) -> Result<User, AuthError> {
            Ok(User::new("anon", "Anonymous", "", true))
        }

        async fn register(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
            Err(AuthError::Generic)
        }

        async fn link_with_password(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<User, AuthError> {
            Err(AuthError::UserNotFound)
        }

        async fn update_display_name(&self, _name: &str) -> Result<User, AuthError> {
            Err(AuthError::UserNotFound)
        }

        async fn reset_password(&self, _email: &str) -> Result<(), AuthError> {
            Ok(())
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }

        async fn delete_current_user(&self) -> Result<(), AuthError> {
            self.delete_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(()))
        }
    }

    fn jane() -> User {
        User::new("123", "Jane", "j@x.com", false)
    }

    fn repository(
        remote: &Arc<TestRemote>,
        store: &Arc<TestStore>,
    ) -> ReconcilingSessionRepository {
        ReconcilingSessionRepository::new(
            Arc::clone(remote) as Arc<dyn AuthClient>,
            Arc::clone(store) as Arc<dyn SessionStore>,
        )
    }

    /// Reads items until one matches the predicate, returning everything
    /// seen on the way (bounded, so a broken stream fails fast).
    async fn collect_until<F>(
        stream: &mut SessionStream,
        mut predicate: F,
    ) -> Vec<SessionState<Option<User>>>
    where
        F: FnMut(&SessionState<Option<User>>) -> bool,
    {
        let mut seen = Vec::new();
        for _ in 0..32 {
            let item = tokio::time::timeout(std::time::Duration::from_secs(1), stream.next())
                .await
                .expect("stream stalled")
                .expect("stream ended early");
            let done = predicate(&item);
            seen.push(item);
            if done {
                return seen;
            }
        }
        panic!("predicate never matched; saw {seen:?}");
    }

    #[tokio::test]
    async fn current_user_emits_loading_then_local_user() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(Some(jane())));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();

        assert_eq!(stream.next().await, Some(SessionState::Loading));
        let seen =
            collect_until(&mut stream, |s| *s == SessionState::Ready(Some(jane()))).await;
        assert!(seen.contains(&SessionState::Ready(Some(jane()))));
    }

    #[tokio::test]
    async fn current_user_starts_with_none_for_empty_store() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();

        assert_eq!(stream.next().await, Some(SessionState::Loading));
        assert_eq!(stream.next().await, Some(SessionState::Ready(None)));
    }

    #[tokio::test]
    async fn remote_user_is_saved_then_surfaces_through_the_store() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();
        // Drain the initial Loading/Ready(None) prefix first so the remote
        // push is observed against a settled local value.
        collect_until(&mut stream, |s| *s == SessionState::Ready(None)).await;

        remote.push_state(Some(jane()));

        let seen =
            collect_until(&mut stream, |s| *s == SessionState::Ready(Some(jane()))).await;
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.current(), Some(jane()));
        // The user emission appears only after the store write.
        assert_eq!(seen.last(), Some(&SessionState::Ready(Some(jane()))));
    }

    #[tokio::test]
    async fn remote_sign_out_clears_the_store() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(Some(jane())));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();
        collect_until(&mut stream, |s| *s == SessionState::Ready(Some(jane()))).await;

        remote.push_state(None);

        collect_until(&mut stream, |s| *s == SessionState::Ready(None)).await;
        assert!(store.clear_count() >= 1);
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn remote_matching_local_still_clears_the_store() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(Some(jane())));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();
        collect_until(&mut stream, |s| *s == SessionState::Ready(Some(jane()))).await;
        let clears_before = store.clear_count();

        remote.push_state(Some(jane()));

        collect_until(&mut stream, |s| *s == SessionState::Ready(None)).await;
        assert_eq!(store.clear_count(), clears_before + 1);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn remote_failure_terminates_the_stream() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();
        collect_until(&mut stream, |s| *s == SessionState::Ready(None)).await;

        remote.fail_state(AuthError::NoInternetConnection);

        let seen = collect_until(&mut stream, |s| s.failure().is_some()).await;
        assert_eq!(
            seen.last(),
            Some(&SessionState::Failed(AuthError::NoInternetConnection))
        );
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn store_save_failure_terminates_the_stream() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::failing_save(None));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();
        collect_until(&mut stream, |s| *s == SessionState::Ready(None)).await;

        remote.push_state(Some(jane()));

        let seen = collect_until(&mut stream, |s| s.failure().is_some()).await;
        assert_eq!(seen.last(), Some(&SessionState::Failed(AuthError::Generic)));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn dropping_the_stream_releases_the_sources() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);

        let mut stream = repo.current_user();
        collect_until(&mut stream, |s| *s == SessionState::Ready(None)).await;
        drop(stream);

        // Remote events after cancellation must not touch the store.
        remote.push_state(Some(jane()));
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn sign_in_persists_the_user_once() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);
        remote.script_sign_in(Ok(jane()));

        let result = repo.sign_in_with_password("j@x.com", "pw").await;

        assert!(result.is_ok());
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.current(), Some(jane()));
    }

    #[tokio::test]
    async fn sign_in_failure_never_touches_the_store() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);
        remote.script_sign_in(Err(AuthError::InvalidCredentials));

        let result = repo.sign_in_with_password("j@x.com", "bad").await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn delete_without_session_fails_and_never_clears() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);
        remote.script_delete(Err(AuthError::UserNotFound));

        let result = repo.delete_user().await;

        assert_eq!(result, Err(AuthError::UserNotFound));
        assert_eq!(store.clear_count(), 0);
    }

    #[tokio::test]
    async fn delete_clears_the_store_on_success() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(Some(jane())));
        let repo = repository(&remote, &store);
        remote.script_delete(Ok(()));

        let result = repo.delete_user().await;

        assert!(result.is_ok());
        assert_eq!(store.clear_count(), 1);
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn sign_out_clears_the_store() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(Some(jane())));
        let repo = repository(&remote, &store);

        let result = repo.sign_out().await;

        assert!(result.is_ok());
        assert_eq!(store.clear_count(), 1);
    }

    #[tokio::test]
    async fn anonymous_sign_in_persists_the_anonymous_user() {
        let remote = Arc::new(TestRemote::new());
        let store = Arc::new(TestStore::new(None));
        let repo = repository(&remote, &store);

        let result = repo.sign_in_anonymously().await;

        assert!(result.is_ok());
        let saved = store.current().expect("user saved");
        assert!(saved.is_anonymous);
    }
}
