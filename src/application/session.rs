// Dashboard session - single owner of all shared mutable state

use crate::application::admin_service::AdminViewModel;
use crate::application::dataset::DatasetStore;
use crate::application::monitoring_service::MonitoringViewModel;
use crate::domain::telemetry::TelemetryRecord;

/// Everything the UI thread mutates, kept behind one lock so every handler
/// works on a consistent snapshot. Refreshes replace the store wholesale and
/// recompute the derived views; they never merge incrementally.
pub struct DashboardSession {
    pub store: DatasetStore,
    pub monitoring: MonitoringViewModel,
    pub admin: AdminViewModel,
    admin_visible: bool,
}

impl DashboardSession {
    pub fn new(monitoring: MonitoringViewModel, admin: AdminViewModel) -> Self {
        Self {
            store: DatasetStore::new(),
            monitoring,
            admin,
            admin_visible: false,
        }
    }

    /// 5s tick: apply the snapshot and refresh the live panel. The admin view
    /// is re-anchored (same criteria, page and selection preserved) so its
    /// indices stay valid against the replaced store.
    pub fn monitoring_refresh(&mut self, records: Vec<TelemetryRecord>) {
        self.store.replace(records);
        self.monitoring.refresh(&self.store);
        self.admin.background_sync(&self.store);
    }

    /// 30s tick: metadata-only refresh. Must not disturb an actively
    /// displayed table, page or selection; the summary strip is only logged
    /// while the admin panel is hidden.
    pub fn background_refresh(&mut self, records: Vec<TelemetryRecord>) {
        self.store.replace(records);
        self.admin.background_sync(&self.store);

        if !self.admin_visible {
            let meta = self.admin.meta(&self.store);
            tracing::debug!(
                records = meta.total_records,
                entities = meta.entity_count,
                critical = meta.critical_count,
                latest = %meta.latest,
                "metadata refresh"
            );
        }
    }

    /// Refresh button: apply the snapshot and re-run the current filters,
    /// resetting the page.
    pub fn manual_refresh(&mut self, records: Vec<TelemetryRecord>) {
        self.store.replace(records);
        self.monitoring.refresh(&self.store);
        self.admin.refresh_view(&self.store);
    }

    pub fn set_admin_visible(&mut self, visible: bool) {
        self.admin_visible = visible;
    }

    pub fn admin_visible(&self) -> bool {
        self.admin_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surfaces::test_support::{RecordingChart, RecordingMap};
    use chrono::{TimeZone, Utc};

    fn session() -> DashboardSession {
        DashboardSession::new(
            MonitoringViewModel::new(
                Box::new(RecordingChart::default()),
                Box::new(RecordingChart::default()),
                Box::new(RecordingMap::default()),
            ),
            AdminViewModel::new(
                Box::new(RecordingChart::default()),
                Box::new(RecordingChart::default()),
                Box::new(RecordingMap::default()),
            ),
        )
    }

    fn herd(count: u32) -> Vec<TelemetryRecord> {
        (0..count)
            .map(|i| TelemetryRecord {
                id: Some(i.to_string()),
                entity_id: Some(format!("cow-{}", i % 3)),
                object_temp: Some(38.0),
                heart_rate: Some(60.0),
                timestamp: Some(Utc.with_ymd_and_hms(2025, 6, 1, 7, i % 60, 0).unwrap()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_monitoring_refresh_updates_both_views() {
        let mut session = session();
        session.monitoring_refresh(herd(30));

        assert_eq!(session.store.len(), 30);
        assert_eq!(session.monitoring.series_len(), 1);
        assert_eq!(session.admin.view().filtered.len(), 30);
    }

    #[test]
    fn test_background_refresh_preserves_admin_page() {
        let mut session = session();
        session.manual_refresh(herd(40));
        session.admin.select_page(2);

        session.background_refresh(herd(40));
        assert_eq!(session.admin.view().current_page, 2);
    }

    #[test]
    fn test_manual_refresh_resets_admin_page() {
        let mut session = session();
        session.manual_refresh(herd(40));
        session.admin.select_page(3);

        session.manual_refresh(herd(40));
        assert_eq!(session.admin.view().current_page, 1);
    }

    #[test]
    fn test_admin_visibility_flag() {
        let mut session = session();
        assert!(!session.admin_visible());
        session.set_admin_visible(true);
        assert!(session.admin_visible());
    }
}
