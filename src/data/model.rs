use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::RangeInclusive;

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// Column names at the input boundary
// ---------------------------------------------------------------------------

pub const MODEL_NAME: &str = "Model Name";
pub const COMPANY_NAME: &str = "Company Name";
pub const PROCESSOR: &str = "Processor";
pub const RAM: &str = "RAM";
pub const BATTERY_CAPACITY: &str = "Battery Capacity";
pub const MOBILE_WEIGHT: &str = "Mobile Weight";
pub const INTERNAL_STORAGE: &str = "Internal Storage";

/// Columns every device table must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [MODEL_NAME, COMPANY_NAME, PROCESSOR, RAM, BATTERY_CAPACITY];

/// Text the passthrough emits for a missing cell.
pub const MISSING_CELL: &str = "nan";

/// Text shown in the spec table for a missing optional field.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// DeviceRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single device as it appears in the source table. Every value is text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceRecord {
    pub model_name: String,
    pub company_name: String,
    pub processor: String,
    /// e.g. `"8 GB"`
    pub ram: String,
    /// e.g. `"5000 mAh"`
    pub battery_capacity: String,
    pub mobile_weight: Option<String>,
    pub internal_storage: Option<String>,
    /// Any further columns, republished untouched by the passthrough.
    pub extra: BTreeMap<String, String>,
}

impl DeviceRecord {
    /// (Feature, Value) rows for the technical-spec table.
    pub fn display_specs(&self) -> [(&'static str, &str); 4] {
        [
            ("RAM", self.ram.as_str()),
            ("Battery", self.battery_capacity.as_str()),
            ("Weight", self.mobile_weight.as_deref().unwrap_or(NOT_AVAILABLE)),
            (
                "Internal Storage",
                self.internal_storage.as_deref().unwrap_or(NOT_AVAILABLE),
            ),
        ]
    }
}

/// Serializes as a flat text row keyed by the boundary column names, in
/// table order, with extra columns after the known ones.
impl Serialize for DeviceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7 + self.extra.len()))?;
        map.serialize_entry(MODEL_NAME, &self.model_name)?;
        map.serialize_entry(COMPANY_NAME, &self.company_name)?;
        map.serialize_entry(PROCESSOR, &self.processor)?;
        map.serialize_entry(RAM, &self.ram)?;
        map.serialize_entry(BATTERY_CAPACITY, &self.battery_capacity)?;
        map.serialize_entry(
            MOBILE_WEIGHT,
            self.mobile_weight.as_deref().unwrap_or(MISSING_CELL),
        )?;
        map.serialize_entry(
            INTERNAL_STORAGE,
            self.internal_storage.as_deref().unwrap_or(MISSING_CELL),
        )?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Derived per-operation values
// ---------------------------------------------------------------------------

/// A record plus its numeric RAM and battery magnitudes.
///
/// `None` means the raw text had no digit run; such a device never passes a
/// threshold on that field.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDevice {
    pub record: DeviceRecord,
    pub ram_gb: Option<f64>,
    pub battery_mah: Option<f64>,
}

/// A device that passed the filter, with its suitability score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDevice {
    pub device: NormalizedDevice,
    /// Always within `[SCORE_FLOOR, SCORE_CEILING]`.
    pub accuracy_score: f64,
}

impl ScoredDevice {
    pub fn record(&self) -> &DeviceRecord {
        &self.device.record
    }

    /// Score rendered as a percentage with two decimals, e.g. `"87.86%"`.
    pub fn accuracy_label(&self) -> String {
        format!("{:.2}%", self.accuracy_score)
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Allowed `minRamGB` values at the query boundary.
pub const RAM_RANGE: RangeInclusive<i64> = 1..=64;
/// Allowed `minBatteryMAh` values at the query boundary.
pub const BATTERY_RANGE: RangeInclusive<i64> = 1000..=10000;

pub const DEFAULT_MIN_RAM_GB: i64 = 8;
pub const DEFAULT_MIN_BATTERY_MAH: i64 = 4500;

/// Processor constraint: no constraint, or exact case-sensitive equality.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProcessorFilter {
    #[default]
    Any,
    Exact(String),
}

impl ProcessorFilter {
    /// Label of the "no constraint" entry in processor selectors.
    pub const ANY_LABEL: &'static str = "All";

    pub fn accepts(&self, processor: &str) -> bool {
        match self {
            ProcessorFilter::Any => true,
            ProcessorFilter::Exact(wanted) => wanted == processor,
        }
    }
}

impl fmt::Display for ProcessorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorFilter::Any => f.write_str(Self::ANY_LABEL),
            ProcessorFilter::Exact(p) => f.write_str(p),
        }
    }
}

/// Thresholds for one query. Constructed fresh per query, never stored.
///
/// Values are taken as given; bounds are enforced by [`FilterCriteria::from_query`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub min_ram_gb: f64,
    pub min_battery_mah: f64,
    pub processor: ProcessorFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::from_query(DEFAULT_MIN_RAM_GB, DEFAULT_MIN_BATTERY_MAH, ProcessorFilter::Any)
    }
}

impl FilterCriteria {
    /// Build criteria from boundary integers, clamping them into the
    /// allowed ranges.
    pub fn from_query(min_ram_gb: i64, min_battery_mah: i64, processor: ProcessorFilter) -> Self {
        Self {
            min_ram_gb: min_ram_gb.clamp(*RAM_RANGE.start(), *RAM_RANGE.end()) as f64,
            min_battery_mah: min_battery_mah
                .clamp(*BATTERY_RANGE.start(), *BATTERY_RANGE.end()) as f64,
            processor,
        }
    }
}

// ---------------------------------------------------------------------------
// DeviceCollection – the loaded snapshot
// ---------------------------------------------------------------------------

/// The full loaded table. Immutable once built; a reload builds a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceCollection {
    records: Vec<DeviceRecord>,
    /// Sorted distinct `Processor` values.
    processors: Vec<String>,
}

impl DeviceCollection {
    pub fn from_records(records: Vec<DeviceRecord>) -> Self {
        let processors: BTreeSet<&str> = records.iter().map(|r| r.processor.as_str()).collect();
        let processors = processors.into_iter().map(str::to_owned).collect();
        Self { records, processors }
    }

    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn processors(&self) -> &[String] {
        &self.processors
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
