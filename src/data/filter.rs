use super::model::{
    DeviceCollection, DeviceRecord, FilterCriteria, NormalizedDevice, ScoredDevice,
};
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Suitability score
// ---------------------------------------------------------------------------

pub const SCORE_FLOOR: f64 = 70.0;
pub const SCORE_CEILING: f64 = 99.2;

/// Heuristic federated-learning suitability of a device, in percent.
///
/// `ram_gb * 1.8 + battery_mah / 130 + 35`, clamped to
/// `[SCORE_FLOOR, SCORE_CEILING]`. Fixed constants; must stay reproducible.
pub fn accuracy_score(ram_gb: f64, battery_mah: f64) -> f64 {
    (ram_gb * 1.8 + battery_mah / 130.0 + 35.0).clamp(SCORE_FLOOR, SCORE_CEILING)
}

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// Copy a record and attach its normalized RAM and battery values.
pub fn normalize_device(record: &DeviceRecord) -> NormalizedDevice {
    NormalizedDevice {
        ram_gb: normalize(&record.ram),
        battery_mah: normalize(&record.battery_capacity),
        record: record.clone(),
    }
}

/// A device passes when all of these hold:
/// * its RAM is known and `>= min_ram_gb`
/// * its battery is known and `>= min_battery_mah`
/// * its processor is accepted by the processor filter
pub fn matches(device: &NormalizedDevice, criteria: &FilterCriteria) -> bool {
    device.ram_gb.is_some_and(|ram| ram >= criteria.min_ram_gb)
        && device
            .battery_mah
            .is_some_and(|battery| battery >= criteria.min_battery_mah)
        && criteria.processor.accepts(&device.record.processor)
}

/// Normalize, filter and score `records` against `criteria`.
///
/// Pure: the output keeps the input order and nothing else is touched. An
/// empty result is a normal outcome.
pub fn filter_and_score(records: &[DeviceRecord], criteria: &FilterCriteria) -> Vec<ScoredDevice> {
    records
        .iter()
        .map(normalize_device)
        .filter(|device| matches(device, criteria))
        .filter_map(|device| {
            // Both are Some for any device that passed `matches`.
            let score = accuracy_score(device.ram_gb?, device.battery_mah?);
            Some(ScoredDevice {
                device,
                accuracy_score: score,
            })
        })
        .collect()
}

/// First result whose model name equals `name`. Model names are not unique;
/// the earliest occurrence wins.
pub fn select_by_model_name<'a>(results: &'a [ScoredDevice], name: &str) -> Option<&'a ScoredDevice> {
    results.iter().find(|d| d.record().model_name == name)
}

// ---------------------------------------------------------------------------
// Outcome for the presentation layer
// ---------------------------------------------------------------------------

/// Result of one filter run, keeping "nothing matched" distinct from a list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterOutcome {
    #[default]
    NoMatches,
    Matches(Vec<ScoredDevice>),
}

impl FilterOutcome {
    pub fn run(collection: &DeviceCollection, criteria: &FilterCriteria) -> Self {
        let results = filter_and_score(collection.records(), criteria);
        log::debug!(
            "filter: {} of {} devices match {:?}",
            results.len(),
            collection.len(),
            criteria
        );
        if results.is_empty() {
            FilterOutcome::NoMatches
        } else {
            FilterOutcome::Matches(results)
        }
    }

    pub fn devices(&self) -> &[ScoredDevice] {
        match self {
            FilterOutcome::NoMatches => &[],
            FilterOutcome::Matches(devices) => devices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ProcessorFilter;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

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

    fn three_devices() -> Vec<DeviceRecord> {
        vec![
            device("Lite", "Helio G85", "4 GB", "3000 mAh"),
            device("Mid", "Snapdragon 778G", "8 GB", "4500 mAh"),
            device("Pro", "Snapdragon 8 Gen 2", "16 GB", "5000 mAh"),
        ]
    }

    fn names(results: &[ScoredDevice]) -> Vec<&str> {
        results.iter().map(|d| d.record().model_name.as_str()).collect()
    }

    fn criteria(ram: f64, battery: f64, processor: ProcessorFilter) -> FilterCriteria {
        FilterCriteria {
            min_ram_gb: ram,
            min_battery_mah: battery,
            processor,
        }
    }

    #[test]
    fn score_formula_unclamped() {
        let score = accuracy_score(8.0, 5000.0);
        assert!((score - 87.861_538).abs() < 1e-4, "score was {score}");
    }

    #[test]
    fn score_clamps_at_both_ends() {
        assert_eq!(accuracy_score(0.0, 0.0), SCORE_FLOOR);
        assert_eq!(accuracy_score(64.0, 10_000.0), SCORE_CEILING);
        assert_eq!(accuracy_score(f64::INFINITY, 0.0), SCORE_CEILING);
    }

    #[test]
    fn thresholds_keep_input_order() {
        let results = filter_and_score(&three_devices(), &criteria(8.0, 4500.0, ProcessorFilter::Any));
        assert_eq!(names(&results), ["Mid", "Pro"]);
        for d in &results {
            let expected = accuracy_score(d.device.ram_gb.unwrap(), d.device.battery_mah.unwrap());
            assert_eq!(d.accuracy_score, expected);
        }
    }

    #[test]
    fn unknown_processor_matches_nothing() {
        let filter = ProcessorFilter::Exact("Exynos 2400".into());
        let results = filter_and_score(&three_devices(), &criteria(1.0, 1000.0, filter));
        assert!(results.is_empty());
    }

    #[test]
    fn exact_processor_narrows() {
        let filter = ProcessorFilter::Exact("Snapdragon 8 Gen 2".into());
        let results = filter_and_score(&three_devices(), &criteria(1.0, 1000.0, filter));
        assert_eq!(names(&results), ["Pro"]);
    }

    #[test]
    fn absent_values_never_pass() {
        let records = vec![
            device("NoRam", "X", "unknown", "5000 mAh"),
            device("NoBattery", "X", "8 GB", "n/a"),
            device("Fine", "X", "8 GB", "5000 mAh"),
        ];
        let results = filter_and_score(&records, &criteria(0.0, 0.0, ProcessorFilter::Any));
        assert_eq!(names(&results), ["Fine"]);

        let results = filter_and_score(&records, &criteria(f64::NEG_INFINITY, f64::NEG_INFINITY, ProcessorFilter::Any));
        assert_eq!(names(&results), ["Fine"]);
    }

    #[test]
    fn empty_and_unparseable_inputs_give_empty_results() {
        assert!(filter_and_score(&[], &FilterCriteria::default()).is_empty());
        let junk = vec![device("a", "b", "c", "d"), device("e", "f", "g", "h")];
        assert!(filter_and_score(&junk, &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn input_records_are_not_touched() {
        let records = three_devices();
        let before = records.clone();
        let first = filter_and_score(&records, &FilterCriteria::default());
        let second = filter_and_score(&records, &FilterCriteria::default());
        assert_eq!(records, before);
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_model_names_select_first() {
        let records = vec![
            device("Twin", "A", "8 GB", "5000 mAh"),
            device("Twin", "B", "12 GB", "6000 mAh"),
        ];
        let results = filter_and_score(&records, &criteria(1.0, 1000.0, ProcessorFilter::Any));
        let selected = select_by_model_name(&results, "Twin").unwrap();
        assert_eq!(selected.record().processor, "A");
        assert!(select_by_model_name(&results, "Nope").is_none());
    }

    #[test]
    fn outcome_distinguishes_no_matches() {
        let collection = DeviceCollection::from_records(three_devices());
        let strict = criteria(64.0, 10_000.0, ProcessorFilter::Any);
        assert_eq!(FilterOutcome::run(&collection, &strict), FilterOutcome::NoMatches);
        assert!(FilterOutcome::NoMatches.devices().is_empty());

        let outcome = FilterOutcome::run(&collection, &FilterCriteria::default());
        assert_eq!(names(outcome.devices()), ["Mid", "Pro"]);
    }

    #[test]
    fn accuracy_label_has_two_decimals() {
        let results = filter_and_score(&three_devices(), &criteria(8.0, 4500.0, ProcessorFilter::Any));
        // 8 * 1.8 + 4500 / 130 + 35 = 84.0153...
        assert_eq!(results[0].accuracy_label(), "84.02%");
    }

    fn arb_record() -> impl Strategy<Value = DeviceRecord> {
        (
            prop::option::of(0u32..80),
            prop::option::of(0u32..12_000),
            prop::sample::select(vec!["A", "B", "C"]),
        )
            .prop_map(|(ram, battery, processor)| {
                device(
                    "m",
                    processor,
                    &ram.map_or_else(|| "unknown".to_string(), |r| format!("{r} GB")),
                    &battery.map_or_else(|| "n/a".to_string(), |b| format!("{b} mAh")),
                )
            })
    }

    proptest! {
        /// Property: every score lies within the clamp bounds.
        #[test]
        fn score_is_bounded(ram in 0.0f64..1e6, battery in 0.0f64..1e9) {
            let score = accuracy_score(ram, battery);
            prop_assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&score));
        }

        /// Property: tightening any threshold only removes devices.
        #[test]
        fn tighter_criteria_narrow_results(
            records in prop::collection::vec(arb_record(), 0..30),
            ram in 1u32..64,
            battery in 1000u32..10_000,
            extra_ram in 0u32..16,
            extra_battery in 0u32..3000,
            pin_processor in any::<bool>(),
        ) {
            let loose = criteria(f64::from(ram), f64::from(battery), ProcessorFilter::Any);
            let tight = criteria(
                f64::from(ram + extra_ram),
                f64::from(battery + extra_battery),
                if pin_processor { ProcessorFilter::Exact("B".into()) } else { ProcessorFilter::Any },
            );

            let wide = filter_and_score(&records, &loose);
            let narrow = filter_and_score(&records, &tight);
            prop_assert!(narrow.len() <= wide.len());
            for d in &narrow {
                prop_assert!(wide.contains(d));
            }
        }

        /// Property: every result passes the predicate it was filtered by.
        #[test]
        fn results_satisfy_criteria(
            records in prop::collection::vec(arb_record(), 0..30),
            ram in 1u32..64,
            battery in 1000u32..10_000,
        ) {
            let c = criteria(f64::from(ram), f64::from(battery), ProcessorFilter::Any);
            for d in filter_and_score(&records, &c) {
                prop_assert!(matches(&d.device, &c));
                prop_assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&d.accuracy_score));
            }
        }
    }
}
