// Admin view model - filterable table, per-entity history charts, map detail

use crate::application::dataset::DatasetStore;
use crate::application::exporter::{self, CsvExport, ExportError};
use crate::application::filter_engine::{self, FilterCriteria, PageControl};
use crate::application::surfaces::{ChartSurface, MapSurface};
use crate::domain::telemetry::{format_metric, TelemetryRecord};

const ADMIN_FOCUS_ZOOM: u8 = 13;
const EMPTY_HISTORY_TITLE: &str = "History (select a cow)";

/// Derived table state: indices into the dataset store plus selection.
#[derive(Debug, Default)]
pub struct ViewState {
    pub current_page: usize,
    pub filtered: Vec<usize>,
    pub selected_entity: Option<String>,
    pub selected_record: Option<usize>,
}

/// Header-strip summary recomputed from the full dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaSummary {
    pub total_records: usize,
    pub entity_count: usize,
    pub latest: String,
    pub critical_count: usize,
    pub entity_options: Vec<String>,
}

pub struct AdminViewModel {
    criteria: FilterCriteria,
    view: ViewState,
    /// Anchor for re-finding the selected row after a snapshot replacement.
    selected_record_id: Option<String>,
    temp_chart: Box<dyn ChartSurface>,
    heart_chart: Box<dyn ChartSurface>,
    map: Box<dyn MapSurface>,
}

impl AdminViewModel {
    pub fn new(
        temp_chart: Box<dyn ChartSurface>,
        heart_chart: Box<dyn ChartSurface>,
        map: Box<dyn MapSurface>,
    ) -> Self {
        let mut vm = Self {
            criteria: FilterCriteria::default(),
            view: ViewState {
                current_page: 1,
                ..Default::default()
            },
            selected_record_id: None,
            temp_chart,
            heart_chart,
            map,
        };
        vm.reset_history_charts();
        vm
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Replace the filter criteria and recompute the table. The page resets
    /// to 1 on every filter change; an entity filter pulls that entity's
    /// history up automatically, anything else clears the detail panes.
    pub fn set_criteria(&mut self, store: &DatasetStore, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.view.filtered = filter_engine::apply(store, &self.criteria);
        self.view.current_page = 1;

        match self.criteria.entity_id.clone() {
            Some(entity) => {
                self.view.selected_entity = Some(entity);
                self.redraw_history(store);
            }
            None => self.clear_selection(),
        }
    }

    pub fn clear_filters(&mut self, store: &DatasetStore) {
        self.set_criteria(store, FilterCriteria::default());
    }

    /// Manual refresh: re-apply the current criteria against the new
    /// snapshot, resetting the page.
    pub fn refresh_view(&mut self, store: &DatasetStore) {
        self.set_criteria(store, self.criteria.clone());
    }

    /// Background refresh: recompute the view without disturbing what the
    /// user is looking at — page preserved (clamped), selection re-anchored
    /// by record id, history charts left alone.
    pub fn background_sync(&mut self, store: &DatasetStore) {
        self.view.filtered = filter_engine::apply(store, &self.criteria);
        let pages = filter_engine::page_count(self.view.filtered.len());
        self.view.current_page = self.view.current_page.clamp(1, pages);

        self.view.selected_record = self
            .selected_record_id
            .as_deref()
            .and_then(|id| store.find_by_id(id));
        if self.view.selected_record.is_none() {
            self.selected_record_id = None;
        }

        if let Some(entity) = self.view.selected_entity.clone() {
            if !store.contains_entity(&entity) {
                self.view.selected_entity = None;
            }
        }
    }

    pub fn select_page(&mut self, page: usize) {
        let pages = filter_engine::page_count(self.view.filtered.len());
        self.view.current_page = page.clamp(1, pages);
    }

    /// Store indices of the rows on the current page.
    pub fn page_rows(&self) -> &[usize] {
        filter_engine::page_slice(&self.view.filtered, self.view.current_page)
    }

    pub fn page_controls(&self) -> Vec<PageControl> {
        filter_engine::page_controls(self.view.current_page, self.view.filtered.len())
    }

    /// Row click: record the selection, redraw the history charts only when
    /// the entity actually changed (so chart zoom state survives reselecting
    /// the same cow), and focus the map on the row's position.
    pub fn select_row(&mut self, store: &DatasetStore, store_index: usize) {
        let Some(record) = store.get(store_index) else {
            return;
        };
        let record = record.clone();

        self.view.selected_record = Some(store_index);
        self.selected_record_id = record.id.clone();

        if record.entity_id != self.view.selected_entity {
            self.view.selected_entity = record.entity_id.clone();
            self.redraw_history(store);
        }

        match record.position() {
            Some((lat, lon)) => {
                let label = format!(
                    "Cow {} ({})",
                    record.entity_label(),
                    record.display_timestamp()
                );
                self.map.place_marker(lat, lon, &label);
                self.map.set_view(lat, lon, ADMIN_FOCUS_ZOOM);
                self.map.open_popup();
            }
            None => self.map.remove_marker(),
        }
    }

    pub fn selected_record<'a>(&self, store: &'a DatasetStore) -> Option<&'a TelemetryRecord> {
        self.view.selected_record.and_then(|i| store.get(i))
    }

    /// Detail pane text for the selected row.
    pub fn selected_detail(&self, store: &DatasetStore) -> Option<String> {
        let record = self.selected_record(store)?;
        Some(format!(
            "Record: {}\nCow: {}\nObject temp: {}\nAmbient temp: {}\nHeart rate: {}\nOxygen: {}\nDate: {}\nLat/Lon: {} / {}",
            record.id.as_deref().unwrap_or("--"),
            record.entity_label(),
            format_metric(record.object_temp, "°C"),
            format_metric(record.ambient_temp, "°C"),
            format_metric(record.heart_rate, "BPM"),
            format_metric(record.oxygen, "%"),
            record.display_timestamp(),
            record.latitude.map(|v| format!("{v:.4}")).unwrap_or_else(|| "--".to_string()),
            record.longitude.map(|v| format!("{v:.4}")).unwrap_or_else(|| "--".to_string()),
        ))
    }

    pub fn meta(&self, store: &DatasetStore) -> MetaSummary {
        MetaSummary {
            total_records: store.len(),
            entity_count: store.entity_ids().len(),
            latest: store
                .latest()
                .map(|r| r.display_timestamp())
                .unwrap_or_else(|| "--".to_string()),
            critical_count: store
                .records()
                .iter()
                .filter(|r| r.object_temp.is_some_and(|t| t > 40.5))
                .count(),
            entity_options: store.entity_ids(),
        }
    }

    /// Export the filtered rows, falling back to the full dataset when no
    /// filter matches.
    pub fn export(&self, store: &DatasetStore) -> Result<CsvExport, ExportError> {
        let filtered: Vec<&TelemetryRecord> = self
            .view
            .filtered
            .iter()
            .filter_map(|&i| store.get(i))
            .collect();
        if filtered.is_empty() {
            exporter::export(store.records().iter())
        } else {
            exporter::export(filtered.into_iter())
        }
    }

    /// Recompute the map widget size after a layout change (entering the
    /// admin panel un-hides its container).
    pub fn invalidate_map(&mut self) {
        self.map.invalidate_size();
    }

    fn clear_selection(&mut self) {
        self.view.selected_entity = None;
        self.view.selected_record = None;
        self.selected_record_id = None;
        self.reset_history_charts();
        self.map.remove_marker();
    }

    fn reset_history_charts(&mut self) {
        self.temp_chart
            .reset(EMPTY_HISTORY_TITLE, Vec::new(), Vec::new());
        self.heart_chart
            .reset(EMPTY_HISTORY_TITLE, Vec::new(), Vec::new());
    }

    fn redraw_history(&mut self, store: &DatasetStore) {
        let Some(entity) = self.view.selected_entity.clone() else {
            self.reset_history_charts();
            return;
        };

        let indices = store.history_for(&entity);
        let labels: Vec<String> = indices
            .iter()
            .filter_map(|&i| store.get(i))
            .map(|r| r.display_timestamp())
            .collect();
        let temps: Vec<Option<f64>> = indices
            .iter()
            .filter_map(|&i| store.get(i))
            .map(|r| r.object_temp)
            .collect();
        let hearts: Vec<Option<f64>> = indices
            .iter()
            .filter_map(|&i| store.get(i))
            .map(|r| r.heart_rate)
            .collect();

        let title = format!("History - Cow #{entity}");
        self.temp_chart.reset(&title, labels.clone(), temps);
        self.heart_chart.reset(&title, labels, hearts);
    }
}
