use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    dashboard_requests: AtomicU64,
    fetch_failures: AtomicU64,
    empty_scopes: AtomicU64,
    dropped_rows: AtomicU64,
    logins: AtomicU64,
    login_failures: AtomicU64,
    device_changes: AtomicU64,
    purges: AtomicU64,
}

impl Metrics {
    pub fn record_dashboard_request(&self) {
        self.dashboard_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_scope(&self) {
        self.empty_scopes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_rows(&self, count: usize) {
        self.dropped_rows.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_login(&self, success: bool) {
        if success {
            self.logins.fetch_add(1, Ordering::Relaxed);
        } else {
            self.login_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_device_change(&self) {
        self.device_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_purge(&self) {
        self.purges.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.dashboard_requests.load(Ordering::Relaxed);
        let failures = self.fetch_failures.load(Ordering::Relaxed);
        let empty = self.empty_scopes.load(Ordering::Relaxed);
        let dropped = self.dropped_rows.load(Ordering::Relaxed);
        let logins = self.logins.load(Ordering::Relaxed);
        let login_failures = self.login_failures.load(Ordering::Relaxed);
        let device_changes = self.device_changes.load(Ordering::Relaxed);
        let purges = self.purges.load(Ordering::Relaxed);

        format!(
            "# TYPE insight_dashboard_requests_total counter\n\
insight_dashboard_requests_total {}\n\
# TYPE insight_fetch_failures_total counter\n\
insight_fetch_failures_total {}\n\
# TYPE insight_empty_scopes_total counter\n\
insight_empty_scopes_total {}\n\
# TYPE insight_dropped_rows_total counter\n\
insight_dropped_rows_total {}\n\
# TYPE insight_logins_total counter\n\
insight_logins_total {}\n\
# TYPE insight_login_failures_total counter\n\
insight_login_failures_total {}\n\
# TYPE insight_device_changes_total counter\n\
insight_device_changes_total {}\n\
# TYPE insight_purges_total counter\n\
insight_purges_total {}\n",
            requests, failures, empty, dropped, logins, login_failures, device_changes, purges
        )
    }
}
