use std::sync::Arc;

use anyhow::Result;
use fiscal_application::{GateOutcome, NavigationShell, ShellCollaborators};
use fiscal_core::config::ShellConfig;
use fiscal_core::navigation::Router;
use fiscal_core::session::Session;
use fiscal_infrastructure::{ChannelNotifier, InMemoryPreferenceStore, LocalSessionOracle, WatchRouter};

use super::nav::print_view;

/// Walks one mount / logout / unmount cycle and reports every step.
pub async fn run(config: ShellConfig, signed_in: bool, fail_logout: bool, path: &str) -> Result<()> {
    let oracle = if signed_in {
        LocalSessionOracle::with_session(Session::new("demo"))
    } else {
        LocalSessionOracle::new()
    };
    oracle.set_reject_sign_out(fail_logout);

    let router = Arc::new(WatchRouter::new(path));
    let (notifier, mut notifications) = ChannelNotifier::channel();
    let collaborators = ShellCollaborators {
        oracle: Arc::new(oracle.clone()),
        preferences: Arc::new(InMemoryPreferenceStore::new()),
        router: router.clone(),
        notifier: Arc::new(notifier),
    };

    let mut shell = NavigationShell::mount(collaborators, config)?;
    let outcome = shell.session_checked().await?;
    println!("1. mounted at {} -> {:?}", path, outcome);

    if outcome == GateOutcome::Authenticated {
        print_view(&shell.sidebar_view());

        match shell.logout().await {
            Ok(()) => println!("2. logout succeeded"),
            Err(e) => println!("2. logout failed: {}", e),
        }
        while let Ok(notification) = notifications.try_recv() {
            println!(
                "   toast [{:?}] {}: {}",
                notification.variant, notification.title, notification.description
            );
        }
    }

    println!("3. final route: {}", router.current_path());
    shell.unmount();
    println!("4. unmounted, provider subscribers left: {}", oracle.subscriber_count());
    Ok(())
}
