//! Status-coded and category event notifications.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::Response;

/// Event key for responses in the 2xx range.
pub const SUCCESS_EVENT: &str = "success";
/// Event key for responses outside the 2xx range.
pub const ERROR_EVENT: &str = "error";

type Listener = Arc<dyn Fn(&Response) + Send + Sync>;

/// Registry of response listeners keyed by a status-code string (`"404"`),
/// [`SUCCESS_EVENT`], or [`ERROR_EVENT`]. Listeners run synchronously in
/// registration order; an absent key is skipped silently.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
}

impl ListenerRegistry {
    /// Register a listener for an event key. Append-only.
    pub(crate) fn on<F>(&self, event: impl Into<String>, listener: F)
    where
        F: Fn(&Response) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .entry(event.into())
            .or_default()
            .push(Arc::new(listener));
    }

    /// Invoke every listener registered under `event`.
    fn emit(&self, event: &str, response: &Response) {
        let listeners = match self.listeners.read().get(event) {
            Some(listeners) => listeners.clone(),
            None => return,
        };
        for listener in listeners {
            listener(response);
        }
    }

    /// Full notification for one response: the status-code key first, then
    /// the success/error category by 2xx membership. Never alters the
    /// response and never fails.
    pub(crate) fn notify(&self, response: &Response) {
        self.emit(&response.status_u16().to_string(), response);
        if response.ok() {
            self.emit(SUCCESS_EVENT, response);
        } else {
            self.emit(ERROR_EVENT, response);
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .get(event)
            .map(|l| l.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn response(status: StatusCode) -> Response {
        Response::new(status, HashMap::new(), "", "https://api.example.com/")
    }

    fn counter() -> (Arc<AtomicU32>, impl Fn(&Response) + Send + Sync + 'static) {
        let count = Arc::new(AtomicU32::new(0));
        let handle = count.clone();
        (count, move |_: &Response| {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_status_and_success_both_fire() {
        let registry = ListenerRegistry::default();
        let (status_count, status_listener) = counter();
        let (success_count, success_listener) = counter();
        let (error_count, error_listener) = counter();

        registry.on("200", status_listener);
        registry.on(SUCCESS_EVENT, success_listener);
        registry.on(ERROR_EVENT, error_listener);

        registry.notify(&response(StatusCode::OK));

        assert_eq!(status_count.load(Ordering::SeqCst), 1);
        assert_eq!(success_count.load(Ordering::SeqCst), 1);
        assert_eq!(error_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_2xx_goes_to_error() {
        let registry = ListenerRegistry::default();
        let (error_count, error_listener) = counter();
        registry.on(ERROR_EVENT, error_listener);

        registry.notify(&response(StatusCode::NOT_FOUND));
        registry.notify(&response(StatusCode::INTERNAL_SERVER_ERROR));

        assert_eq!(error_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_absent_listeners_skipped_silently() {
        let registry = ListenerRegistry::default();
        registry.notify(&response(StatusCode::OK));
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let registry = ListenerRegistry::default();
        let order = Arc::new(RwLock::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            registry.on(SUCCESS_EVENT, move |_| order.write().push(tag));
        }

        registry.notify(&response(StatusCode::OK));
        assert_eq!(*order.read(), vec!["first", "second", "third"]);
        assert_eq!(registry.listener_count(SUCCESS_EVENT), 3);
    }
}
