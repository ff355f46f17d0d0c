use std::sync::Arc;

use fl_device_selector::data::filter::{select_by_model_name, FilterOutcome};
use fl_device_selector::data::model::{
    DeviceCollection, FilterCriteria, ProcessorFilter, ScoredDevice, DEFAULT_MIN_BATTERY_MAH,
    DEFAULT_MIN_RAM_GB,
};
use fl_device_selector::source::DeviceSource;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the device table is loaded from.
    source: Box<dyn DeviceSource>,

    /// Loaded snapshot (None until a load succeeds). Replaced whole on
    /// reload, never edited.
    pub snapshot: Option<Arc<DeviceCollection>>,

    /// Threshold inputs as the user sees them.
    pub min_ram_gb: i64,
    pub min_battery_mah: i64,
    pub processor: ProcessorFilter,

    /// Result of the last filter run (cached).
    pub outcome: FilterOutcome,

    /// Model name picked in the device selector.
    pub selected_model: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: Box<dyn DeviceSource>) -> Self {
        Self {
            source,
            snapshot: None,
            min_ram_gb: DEFAULT_MIN_RAM_GB,
            min_battery_mah: DEFAULT_MIN_BATTERY_MAH,
            processor: ProcessorFilter::Any,
            outcome: FilterOutcome::NoMatches,
            selected_model: None,
            status_message: None,
        }
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Load a fresh snapshot from the current source.
    ///
    /// On failure the previous snapshot is dropped and the UI goes idle with
    /// the error as its status.
    pub fn reload(&mut self) {
        match self.source.load() {
            Ok(collection) => {
                log::info!(
                    "Loaded {} devices from {}",
                    collection.len(),
                    self.source.describe()
                );
                self.set_snapshot(collection);
            }
            Err(e) => {
                log::error!("Failed to load devices: {e}");
                self.snapshot = None;
                self.outcome = FilterOutcome::NoMatches;
                self.selected_model = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Switch to another source and load from it.
    pub fn set_source(&mut self, source: Box<dyn DeviceSource>) {
        self.source = source;
        self.reload();
    }

    /// Install a newly loaded snapshot and refilter.
    pub fn set_snapshot(&mut self, collection: DeviceCollection) {
        // A processor that no longer exists would silently hide everything.
        if let ProcessorFilter::Exact(p) = &self.processor {
            if !collection.processors().contains(p) {
                self.processor = ProcessorFilter::Any;
            }
        }
        self.snapshot = Some(Arc::new(collection));
        self.status_message = None;
        self.refilter();
    }

    /// Criteria built fresh from the current inputs.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_query(self.min_ram_gb, self.min_battery_mah, self.processor.clone())
    }

    /// Recompute `outcome` after an input or snapshot change.
    pub fn refilter(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        self.outcome = FilterOutcome::run(snapshot, &self.criteria());

        // Keep the selection if its model is still listed, else pick the first.
        let still_listed = self
            .selected_model
            .as_deref()
            .is_some_and(|name| select_by_model_name(self.outcome.devices(), name).is_some());
        if !still_listed {
            self.selected_model = self
                .outcome
                .devices()
                .first()
                .map(|d| d.record().model_name.clone());
        }
    }

    pub fn set_min_ram(&mut self, value: i64) {
        self.min_ram_gb = value;
        self.refilter();
    }

    pub fn set_min_battery(&mut self, value: i64) {
        self.min_battery_mah = value;
        self.refilter();
    }

    pub fn set_processor(&mut self, processor: ProcessorFilter) {
        self.processor = processor;
        self.refilter();
    }

    /// The device shown in the detail card.
    pub fn selected_device(&self) -> Option<&ScoredDevice> {
        let name = self.selected_model.as_deref()?;
        select_by_model_name(self.outcome.devices(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use fl_device_selector::data::model::DeviceRecord;
    use fl_device_selector::source::SourceError;

    /// In-memory source that can be switched to failing.
    struct StubSource {
        records: Vec<DeviceRecord>,
        fail: Rc<Cell<bool>>,
    }

    impl DeviceSource for StubSource {
        fn describe(&self) -> String {
            "stub".into()
        }

        fn load(&self) -> Result<DeviceCollection, SourceError> {
            if self.fail.get() {
                Err(SourceError::NotFound(PathBuf::from("devices_dataset.csv")))
            } else {
                Ok(DeviceCollection::from_records(self.records.clone()))
            }
        }
    }

    fn device(name: &str, processor: &str, ram: &str, battery: &str) -> DeviceRecord {
        DeviceRecord {
            model_name: name.into(),
            company_name: "Acme".into(),
            processor: processor.into(),
            ram: ram.into(),
            battery_capacity: battery.into(),
            ..DeviceRecord::default()
        }
    }

    fn state() -> (AppState, Rc<Cell<bool>>) {
        let fail = Rc::new(Cell::new(false));
        let source = StubSource {
            records: vec![
                device("Lite", "Helio G85", "4 GB", "3000 mAh"),
                device("Mid", "Snapdragon 778G", "8 GB", "4500 mAh"),
                device("Pro", "Snapdragon 8 Gen 2", "16 GB", "5000 mAh"),
            ],
            fail: Rc::clone(&fail),
        };
        let mut state = AppState::new(Box::new(source));
        state.reload();
        (state, fail)
    }

    #[test]
    fn defaults_filter_on_load() {
        let (state, _) = state();
        assert_eq!(state.outcome.devices().len(), 2);
        assert_eq!(state.selected_model.as_deref(), Some("Mid"));
        assert_eq!(state.selected_device().unwrap().record().model_name, "Mid");
    }

    #[test]
    fn selected_device_points_into_cached_outcome() {
        let (state, _) = state();
        let selected = state.selected_device().unwrap();
        assert!(std::ptr::eq(selected, &state.outcome.devices()[0]));
    }

    #[test]
    fn tightening_inputs_can_empty_results() {
        let (mut state, _) = state();
        state.set_min_ram(64);
        assert_eq!(state.outcome, FilterOutcome::NoMatches);
        assert!(state.selected_device().is_none());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selection_survives_refilter_when_still_listed() {
        let (mut state, _) = state();
        state.selected_model = Some("Pro".into());
        state.set_processor(ProcessorFilter::Exact("Snapdragon 8 Gen 2".into()));
        assert_eq!(state.selected_model.as_deref(), Some("Pro"));
        state.set_min_battery(1000);
        assert_eq!(state.selected_model.as_deref(), Some("Pro"));
    }

    #[test]
    fn failed_reload_goes_idle_with_message() {
        let (mut state, fail) = state();
        let before = Arc::clone(state.snapshot.as_ref().unwrap());
        fail.set(true);
        state.reload();
        assert!(state.snapshot.is_none());
        assert!(state.outcome.devices().is_empty());
        assert!(state.status_message.as_deref().unwrap().contains("not found"));
        // The old snapshot itself was never touched.
        assert_eq!(before.len(), 3);
    }

    #[test]
    fn reload_replaces_snapshot_and_drops_vanished_processor() {
        let (mut state, _) = state();
        state.set_processor(ProcessorFilter::Exact("Helio G85".into()));
        let first = Arc::clone(state.snapshot.as_ref().unwrap());

        state.set_snapshot(DeviceCollection::from_records(vec![device(
            "New",
            "Tensor G3",
            "12 GB",
            "5000 mAh",
        )]));
        assert!(!Arc::ptr_eq(&first, state.snapshot.as_ref().unwrap()));
        assert_eq!(state.processor, ProcessorFilter::Any);
        assert_eq!(state.selected_model.as_deref(), Some("New"));
    }
}
