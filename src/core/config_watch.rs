//! Keeps a logger's level in sync with a host setting

use super::{config::WatchTarget, error::LoggerError, severity::Severity};
use crate::host::{ConfigListener, ConfigurationChange, Host, Subscription};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};

/// Read `target` from the host, falling back to its fallback text when the
/// setting is missing or the host call fails or panics.
pub(crate) fn read_level(host: &dyn Host, target: &WatchTarget) -> Severity {
    let read = catch_unwind(AssertUnwindSafe(|| {
        host.get_configuration(&target.section, &target.key)
    }));

    let text = match read {
        Ok(Ok(Some(value))) => value,
        Ok(Ok(None)) => target.fallback.clone(),
        Ok(Err(LoggerError::Unsupported { .. })) => target.fallback.clone(),
        Ok(Err(e)) => {
            eprintln!(
                "[LOGGER WARNING] Could not read {}.{}: {}. Using '{}'.",
                target.section, target.key, e, target.fallback
            );
            target.fallback.clone()
        }
        Err(payload) => {
            let e = LoggerError::host_panic("reading configuration", payload.as_ref());
            eprintln!("[LOGGER ERROR] {}. Using '{}'.", e, target.fallback);
            target.fallback.clone()
        }
    };

    Severity::parse(&text)
}

/// An active watch. Owns at most one host subscription and releases it
/// exactly once, either through [`ConfigWatch::dispose`] or on drop.
pub(crate) struct ConfigWatch {
    target: WatchTarget,
    subscription: Option<Box<dyn Subscription>>,
}

impl ConfigWatch {
    /// Subscribe to host configuration changes for `target`.
    ///
    /// The listener holds the level weakly so a host that forgets to drop it
    /// does not keep the logger state alive. Hosts without change events
    /// still yield a watch that remembers its target.
    pub(crate) fn start(
        host: &Arc<dyn Host>,
        level: &Arc<RwLock<Severity>>,
        target: WatchTarget,
    ) -> Self {
        let listener_host = Arc::clone(host);
        let listener_level: Weak<RwLock<Severity>> = Arc::downgrade(level);
        let listener_target = target.clone();

        let listener: ConfigListener = Arc::new(move |event: &dyn ConfigurationChange| {
            if !event.affects_configuration(&listener_target.section) {
                return;
            }
            if let Some(level) = listener_level.upgrade() {
                let severity = read_level(listener_host.as_ref(), &listener_target);
                *level.write() = severity;
            }
        });

        let subscribed = catch_unwind(AssertUnwindSafe(|| {
            host.on_did_change_configuration(listener)
        }));

        let subscription = match subscribed {
            Ok(Ok(subscription)) => Some(subscription),
            Ok(Err(LoggerError::Unsupported { .. })) => None,
            Ok(Err(e)) => {
                eprintln!("[LOGGER WARNING] Configuration watch unavailable: {}", e);
                None
            }
            Err(payload) => {
                let e = LoggerError::host_panic("subscribing to configuration", payload.as_ref());
                eprintln!("[LOGGER ERROR] {}", e);
                None
            }
        };

        Self {
            target,
            subscription,
        }
    }

    pub(crate) fn target(&self) -> &WatchTarget {
        &self.target
    }

    pub(crate) fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub(crate) fn dispose(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| subscription.dispose())) {
                let e = LoggerError::host_panic("disposing configuration watch", payload.as_ref());
                eprintln!("[LOGGER ERROR] {}", e);
            }
        }
    }
}

impl Drop for ConfigWatch {
    fn drop(&mut self) {
        self.dispose();
    }
}
