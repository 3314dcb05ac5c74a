#[cfg(test)]
mod tests {
    use crate::shell::{GateOutcome, NavigationShell, ShellCollaborators};
    use fiscal_core::config::ShellConfig;
    use fiscal_core::error::{Result, ShellError};
    use fiscal_core::navigation::{EntryKind, NAVIGATION_ENTRIES, Router};
    use fiscal_core::notification::{Notification, Notifier};
    use fiscal_core::preference::PreferenceStore;
    use fiscal_core::session::{
        Session, SessionChangeEvent, SessionChangeHandler, SessionOracle, Subscription,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::oneshot;

    // Every observable side effect, in the order it happened
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Navigate(String),
        Notify(Notification),
        SetPreference(String, String),
    }

    type CallLog = Arc<Mutex<Vec<Call>>>;

    // Mock SessionOracle for testing
    //
    // Keeps handlers even after unsubscribe so tests can prove the shell
    // itself ignores events once unmounted.
    struct MockOracle {
        session: Mutex<Option<Session>>,
        query_fails: bool,
        sign_out_error: Option<ShellError>,
        echo_sign_out: bool,
        hold_query: Mutex<Option<oneshot::Receiver<()>>>,
        hold_sign_out: Mutex<Option<oneshot::Receiver<()>>>,
        handlers: Mutex<Vec<SessionChangeHandler>>,
        subscribes: AtomicUsize,
        unsubscribes: Arc<AtomicUsize>,
        queries: AtomicUsize,
    }

    impl MockOracle {
        fn new(session: Option<Session>) -> Self {
            Self {
                session: Mutex::new(session),
                query_fails: false,
                sign_out_error: None,
                echo_sign_out: false,
                hold_query: Mutex::new(None),
                hold_sign_out: Mutex::new(None),
                handlers: Mutex::new(Vec::new()),
                subscribes: AtomicUsize::new(0),
                unsubscribes: Arc::new(AtomicUsize::new(0)),
                queries: AtomicUsize::new(0),
            }
        }

        fn signed_in() -> Self {
            Self::new(Some(Session::new("user-1")))
        }

        fn signed_out() -> Self {
            Self::new(None)
        }

        fn failing_query(mut self) -> Self {
            self.query_fails = true;
            self
        }

        fn rejecting_sign_out(mut self) -> Self {
            self.sign_out_error = Some(ShellError::sign_out_failed("network down"));
            self
        }

        /// Fires `SignedOut` from inside `sign_out`, whether or not it succeeds.
        fn echoing_sign_out(mut self) -> Self {
            self.echo_sign_out = true;
            self
        }

        /// Blocks `sign_out` until the returned sender fires.
        fn holding_sign_out(self) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            *self.hold_sign_out.lock().unwrap() = Some(rx);
            (self, tx)
        }

        /// Blocks `get_session` until the returned sender fires.
        fn holding_query(self) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            *self.hold_query.lock().unwrap() = Some(rx);
            (self, tx)
        }

        fn emit(&self, event: SessionChangeEvent) {
            let session = self.session.lock().unwrap().clone();
            let handlers = self.handlers.lock().unwrap().clone();
            for handler in handlers {
                handler(event, session.as_ref());
            }
        }

        fn clear_session(&self) {
            *self.session.lock().unwrap() = None;
        }

        fn unsubscribe_count(&self) -> usize {
            self.unsubscribes.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SessionOracle for MockOracle {
        async fn get_session(&self) -> Result<Option<Session>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            let hold = self.hold_query.lock().unwrap().take();
            if let Some(hold) = hold {
                let _ = hold.await;
            }
            if self.query_fails {
                return Err(ShellError::session_unavailable("timeout"));
            }
            Ok(self.session.lock().unwrap().clone())
        }

        fn on_session_change(&self, handler: SessionChangeHandler) -> Subscription {
            self.subscribes.fetch_add(1, Ordering::SeqCst);
            self.handlers.lock().unwrap().push(handler);
            let unsubscribes = self.unsubscribes.clone();
            Subscription::new(move || {
                unsubscribes.fetch_add(1, Ordering::SeqCst);
            })
        }

        async fn sign_out(&self) -> Result<()> {
            let hold = self.hold_sign_out.lock().unwrap().take();
            if let Some(hold) = hold {
                let _ = hold.await;
            }
            let result = match &self.sign_out_error {
                Some(e) => Err(e.clone()),
                None => {
                    self.clear_session();
                    Ok(())
                }
            };
            if self.echo_sign_out {
                self.emit(SessionChangeEvent::SignedOut);
            }
            result
        }
    }

    struct MockRouter {
        path: Mutex<String>,
        log: CallLog,
    }

    impl Router for MockRouter {
        fn current_path(&self) -> String {
            self.path.lock().unwrap().clone()
        }

        fn navigate(&self, path: &str) {
            *self.path.lock().unwrap() = path.to_string();
            self.log.lock().unwrap().push(Call::Navigate(path.to_string()));
        }
    }

    struct MockNotifier {
        log: CallLog,
    }

    impl Notifier for MockNotifier {
        fn notify(&self, notification: Notification) {
            self.log.lock().unwrap().push(Call::Notify(notification));
        }
    }

    struct MockPreferences {
        values: Mutex<HashMap<String, String>>,
        log: CallLog,
    }

    impl PreferenceStore for MockPreferences {
        fn get(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            self.log
                .lock()
                .unwrap()
                .push(Call::SetPreference(key.to_string(), value.to_string()));
            Ok(())
        }
    }

    struct Harness {
        oracle: Arc<MockOracle>,
        preferences: Arc<MockPreferences>,
        router: Arc<MockRouter>,
        log: CallLog,
    }

    impl Harness {
        fn new(oracle: MockOracle, path: &str) -> Self {
            let log: CallLog = Arc::new(Mutex::new(Vec::new()));
            Self {
                oracle: Arc::new(oracle),
                preferences: Arc::new(MockPreferences {
                    values: Mutex::new(HashMap::new()),
                    log: log.clone(),
                }),
                router: Arc::new(MockRouter {
                    path: Mutex::new(path.to_string()),
                    log: log.clone(),
                }),
                log,
            }
        }

        fn with_preference(self, key: &str, value: &str) -> Self {
            self.preferences
                .values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            self
        }

        fn mount(&self) -> NavigationShell {
            self.try_mount().unwrap()
        }

        fn try_mount(&self) -> Result<NavigationShell> {
            let collaborators = ShellCollaborators {
                oracle: self.oracle.clone(),
                preferences: self.preferences.clone(),
                router: self.router.clone(),
                notifier: Arc::new(MockNotifier {
                    log: self.log.clone(),
                }),
            };
            NavigationShell::mount(collaborators, ShellConfig::default())
        }

        fn calls(&self) -> Vec<Call> {
            self.log.lock().unwrap().clone()
        }

        fn navigations(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Navigate(path) => Some(path),
                    _ => None,
                })
                .collect()
        }
    }

    // ============================================================================
    // Session gate
    // ============================================================================

    #[tokio::test]
    async fn test_session_present_stays_put() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");
        let mut shell = harness.mount();

        assert_eq!(shell.session_checked().await.unwrap(), GateOutcome::Authenticated);
        assert!(harness.calls().is_empty());
        assert_eq!(shell.current_path(), "/dashboard");
    }

    #[tokio::test]
    async fn test_session_absent_redirects_exactly_once() {
        let harness = Harness::new(MockOracle::signed_out(), "/reports");
        let mut shell = harness.mount();

        assert_eq!(shell.session_checked().await.unwrap(), GateOutcome::Redirected);
        assert_eq!(harness.calls(), vec![Call::Navigate("/".to_string())]);
    }

    #[tokio::test]
    async fn test_session_query_failure_fails_closed() {
        let harness = Harness::new(MockOracle::signed_in().failing_query(), "/reports");
        let mut shell = harness.mount();

        assert_eq!(shell.session_checked().await.unwrap(), GateOutcome::Redirected);
        assert_eq!(harness.calls(), vec![Call::Navigate("/".to_string())]);
    }

    #[tokio::test]
    async fn test_session_query_runs_once_per_mount() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");
        let mut shell = harness.mount();

        shell.session_checked().await.unwrap();
        shell.session_checked().await.unwrap();
        assert_eq!(harness.oracle.queries.load(Ordering::SeqCst), 1);
        assert_eq!(harness.oracle.subscribes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signed_out_event_redirects_once() {
        let harness = Harness::new(MockOracle::signed_in(), "/customers");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        harness.oracle.emit(SessionChangeEvent::SignedOut);

        assert_eq!(harness.navigations(), vec!["/".to_string()]);
        assert!(shell.is_mounted());
    }

    #[tokio::test]
    async fn test_benign_events_do_not_redirect() {
        let harness = Harness::new(MockOracle::signed_in(), "/customers");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        harness.oracle.emit(SessionChangeEvent::TokenRefreshed);
        harness.oracle.emit(SessionChangeEvent::UserUpdated);
        harness.oracle.emit(SessionChangeEvent::SignedIn);

        assert!(harness.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_event_without_session_redirects() {
        let harness = Harness::new(MockOracle::signed_in(), "/print");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        harness.oracle.clear_session();
        harness.oracle.emit(SessionChangeEvent::TokenRefreshed);

        assert_eq!(harness.navigations(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn test_sign_out_event_racing_initial_query_converges() {
        let (oracle, release) = MockOracle::signed_in().holding_query();
        let harness = Harness::new(oracle, "/dashboard");
        let mut shell = harness.mount();

        // Event lands while the query is still pending
        harness.oracle.clear_session();
        harness.oracle.emit(SessionChangeEvent::SignedOut);
        assert_eq!(harness.navigations(), vec!["/".to_string()]);

        release.send(()).unwrap();
        assert_eq!(shell.session_checked().await.unwrap(), GateOutcome::Redirected);

        let navigations = harness.navigations();
        assert!(navigations.iter().all(|path| path == "/"));
        assert_eq!(shell.current_path(), "/");
    }

    #[tokio::test]
    async fn test_shell_is_usable_while_query_pending() {
        let (oracle, release) = MockOracle::signed_in().holding_query();
        let harness = Harness::new(oracle, "/dashboard");
        let mut shell = harness.mount();

        assert!(shell.toggle_sidebar());
        assert_eq!(shell.active_entry().map(|e| e.path), Some("/dashboard"));

        release.send(()).unwrap();
        assert_eq!(shell.session_checked().await.unwrap(), GateOutcome::Authenticated);
    }

    #[test]
    fn test_mount_outside_runtime_is_an_error() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");

        let err = harness.try_mount().unwrap_err();

        assert!(matches!(err, ShellError::Internal(_)));
        assert_eq!(harness.oracle.subscribes.load(Ordering::SeqCst), 0);
        assert!(harness.calls().is_empty());
    }

    // ============================================================================
    // Unmount
    // ============================================================================

    #[tokio::test]
    async fn test_unmount_unsubscribes_once_and_ignores_later_events() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();
        harness.oracle.emit(SessionChangeEvent::TokenRefreshed);

        shell.unmount();
        assert_eq!(harness.oracle.unsubscribe_count(), 1);

        harness.oracle.emit(SessionChangeEvent::SignedOut);
        assert!(harness.navigations().is_empty());
        assert_eq!(harness.oracle.unsubscribe_count(), 1);
    }

    #[tokio::test]
    async fn test_drop_unsubscribes_once() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");
        {
            let mut shell = harness.mount();
            shell.session_checked().await.unwrap();
            for _ in 0..3 {
                harness.oracle.emit(SessionChangeEvent::SignedOut);
            }
        }
        assert_eq!(harness.oracle.unsubscribe_count(), 1);

        let redirects = harness.navigations().len();
        harness.oracle.emit(SessionChangeEvent::SignedOut);
        assert_eq!(harness.navigations().len(), redirects);
    }

    #[tokio::test]
    async fn test_each_mount_cycle_unsubscribes_once() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");
        for cycle in 1..=3 {
            let mut shell = harness.mount();
            shell.session_checked().await.unwrap();
            shell.unmount();
            assert_eq!(harness.oracle.unsubscribe_count(), cycle);
        }
    }

    // ============================================================================
    // Collapse preference
    // ============================================================================

    #[tokio::test]
    async fn test_collapse_loaded_from_preference() {
        let harness =
            Harness::new(MockOracle::signed_in(), "/dashboard").with_preference("sidebarCollapsed", "true");
        let shell = harness.mount();
        assert!(shell.is_collapsed());

        let harness = Harness::new(MockOracle::signed_in(), "/dashboard")
            .with_preference("sidebarCollapsed", "garbage");
        assert!(!harness.mount().is_collapsed());
    }

    #[tokio::test]
    async fn test_toggle_round_trips_across_remounts() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");

        let mut shell = harness.mount();
        assert!(!shell.is_collapsed());
        assert!(shell.toggle_sidebar());
        shell.unmount();

        let shell = harness.mount();
        assert!(shell.is_collapsed());
        shell.unmount();

        let mut shell = harness.mount();
        assert!(shell.is_collapsed());
        assert!(!shell.toggle_sidebar());
        shell.unmount();

        assert!(!harness.mount().is_collapsed());
        assert_eq!(
            harness.calls(),
            vec![
                Call::SetPreference("sidebarCollapsed".to_string(), "true".to_string()),
                Call::SetPreference("sidebarCollapsed".to_string(), "false".to_string()),
            ]
        );
    }

    // ============================================================================
    // Active route
    // ============================================================================

    #[tokio::test]
    async fn test_active_entry_is_exact_match() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");
        let shell = harness.mount();
        assert_eq!(shell.active_entry().map(|e| e.label), Some("Início"));
        assert!(shell.is_active("/dashboard"));
        assert!(!shell.is_active("/reports"));

        harness.router.navigate("/dashboard/edit");
        assert!(shell.active_entry().is_none());
        assert!(!shell.is_active("/dashboard"));

        harness.router.navigate("/notes/new");
        assert_eq!(shell.active_entry().map(|e| e.label), Some("Nova Nota"));
        assert_eq!(shell.sidebar_view().active().map(|i| i.entry.path), Some("/notes/new"));
    }

    #[tokio::test]
    async fn test_select_link_navigates() {
        let harness = Harness::new(MockOracle::signed_in(), "/dashboard");
        let shell = harness.mount();
        let reports = NAVIGATION_ENTRIES
            .iter()
            .find(|e| e.path == "/reports")
            .unwrap();

        shell.select(reports).await.unwrap();

        assert_eq!(harness.navigations(), vec!["/reports".to_string()]);
        assert!(shell.is_active("/reports"));
    }

    // ============================================================================
    // Logout
    // ============================================================================

    #[tokio::test]
    async fn test_logout_success_notifies_then_redirects() {
        let harness = Harness::new(MockOracle::signed_in(), "/settings");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        shell.logout().await.unwrap();

        let messages = ShellConfig::default().logout_messages;
        assert_eq!(
            harness.calls(),
            vec![
                Call::Notify(messages.success()),
                Call::Navigate("/".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_logout_failure_notifies_without_redirect() {
        let harness = Harness::new(MockOracle::signed_in().rejecting_sign_out(), "/settings");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();
        let collapsed_before = shell.is_collapsed();

        let err = shell.logout().await.unwrap_err();

        assert!(err.is_sign_out_failed());
        let calls = harness.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(&calls[0], Call::Notify(n) if n.is_destructive()));
        assert_eq!(shell.current_path(), "/settings");
        assert_eq!(shell.is_collapsed(), collapsed_before);
        assert!(shell.is_mounted());
    }

    #[tokio::test]
    async fn test_logout_can_be_retried_after_failure() {
        let harness = Harness::new(MockOracle::signed_in().rejecting_sign_out(), "/settings");
        let shell = harness.mount();

        assert!(shell.logout().await.is_err());
        assert!(shell.logout().await.is_err());

        let destructive = harness
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Notify(n) if n.is_destructive()))
            .count();
        assert_eq!(destructive, 2);
        assert!(harness.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_select_logout_entry_runs_logout() {
        let harness = Harness::new(MockOracle::signed_in(), "/settings");
        let shell = harness.mount();
        let logout = NAVIGATION_ENTRIES
            .iter()
            .find(|e| e.kind == EntryKind::Logout)
            .unwrap();

        shell.select(logout).await.unwrap();

        assert_eq!(harness.navigations(), vec!["/".to_string()]);
        assert!(harness.oracle.session.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_with_echoed_sign_out_redirects_once_after_notice() {
        let harness = Harness::new(MockOracle::signed_in().echoing_sign_out(), "/reports");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        shell.logout().await.unwrap();

        let messages = ShellConfig::default().logout_messages;
        assert_eq!(
            harness.calls(),
            vec![
                Call::Notify(messages.success()),
                Call::Navigate("/".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_session_ending_during_rejected_logout_redirects_after_notice() {
        let harness = Harness::new(
            MockOracle::signed_in().rejecting_sign_out().echoing_sign_out(),
            "/reports",
        );
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        let err = shell.logout().await.unwrap_err();

        assert!(err.is_sign_out_failed());
        let messages = ShellConfig::default().logout_messages;
        assert_eq!(
            harness.calls(),
            vec![
                Call::Notify(messages.failure()),
                Call::Navigate("/".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_abandoned_logout_keeps_gate_redirecting() {
        let (oracle, _release) = MockOracle::signed_in().holding_sign_out();
        let harness = Harness::new(oracle, "/reports");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        let timed_out = tokio::time::timeout(Duration::from_millis(10), shell.logout()).await;
        assert!(timed_out.is_err());
        assert!(harness.calls().is_empty());

        harness.oracle.emit(SessionChangeEvent::SignedOut);

        assert_eq!(harness.navigations(), vec!["/".to_string()]);
        assert_eq!(shell.current_path(), "/");
    }

    #[tokio::test]
    async fn test_abandoned_logout_performs_deferred_redirect() {
        let (oracle, _release) = MockOracle::signed_in().holding_sign_out();
        let harness = Harness::new(oracle, "/reports");
        let mut shell = harness.mount();
        shell.session_checked().await.unwrap();

        let mut logout = Box::pin(shell.logout());
        assert!(
            tokio::time::timeout(Duration::from_millis(10), &mut logout)
                .await
                .is_err()
        );

        // Held back while the logout is still pending
        harness.oracle.emit(SessionChangeEvent::SignedOut);
        assert!(harness.calls().is_empty());

        drop(logout);

        assert_eq!(harness.calls(), vec![Call::Navigate("/".to_string())]);
    }
}
