//! End-to-end dashboard workflow tests.

use chrono::NaiveDate;

use sample_tracker_core::dashboard::{Clock, Dashboard, DashboardConfig, DashboardError, SaveOutcome};
use sample_tracker_core::models::{DraftChange, SampleStatus};
use sample_tracker_core::query::{SortKey, StatusFilter};
use sample_tracker_core::seed;
use sample_tracker_core::store::{SampleStore, StoreError};

struct FixedClock(NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

fn empty_dashboard() -> Dashboard {
    Dashboard::with_clock(
        SampleStore::new(),
        DashboardConfig::default(),
        Box::new(FixedClock(today())),
    )
}

fn visible_names(dashboard: &Dashboard) -> Vec<String> {
    dashboard
        .view()
        .rows
        .iter()
        .map(|s| s.sample_name.clone())
        .collect()
}

fn add(dashboard: &mut Dashboard, name: &str, sample_type: &str, status: &str) -> String {
    dashboard.open_add().unwrap();
    dashboard.edit_draft(DraftChange::SampleName(name.into())).unwrap();
    dashboard.edit_draft(DraftChange::SampleType(Some(sample_type.into()))).unwrap();
    dashboard.edit_draft(DraftChange::Status(Some(status.into()))).unwrap();
    match dashboard.save().unwrap() {
        SaveOutcome::Created(sample) => sample.id,
        other => panic!("expected Created, got {:?}", other),
    }
}

#[test]
fn test_add_filter_edit_round_trip() {
    let mut dashboard = empty_dashboard();
    let id = add(&mut dashboard, "Alpha", "Blood", "Pending");

    assert_eq!(visible_names(&dashboard), vec!["Alpha"]);

    dashboard.set_status_filter(StatusFilter::Only(SampleStatus::Completed));
    assert!(visible_names(&dashboard).is_empty());

    dashboard.open_edit(&id).unwrap();
    dashboard.edit_draft(DraftChange::Status(Some("Completed".into()))).unwrap();
    assert!(matches!(dashboard.save().unwrap(), SaveOutcome::Updated(_)));
    assert_eq!(visible_names(&dashboard), vec!["Alpha"]);

    dashboard.set_status_filter(StatusFilter::Only(SampleStatus::Pending));
    assert!(visible_names(&dashboard).is_empty());
}

#[test]
fn test_created_ids_are_unique() {
    let mut dashboard = empty_dashboard();
    let mut ids: Vec<String> = (0..20)
        .map(|i| add(&mut dashboard, &format!("S{}", i), "Urine", "Pending"))
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_future_date_blocks_save() {
    let mut dashboard = empty_dashboard();
    dashboard.open_add().unwrap();
    dashboard.edit_draft(DraftChange::SampleName("Late".into())).unwrap();
    dashboard.edit_draft(DraftChange::SampleType(Some("Saliva".into()))).unwrap();
    dashboard
        .edit_draft(DraftChange::CollectedOn(Some("2025-01-16".into())))
        .unwrap();

    match dashboard.save().unwrap() {
        SaveOutcome::Rejected(errors) => assert_eq!(errors.len(), 1),
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert!(dashboard.samples().is_empty());

    dashboard
        .edit_draft(DraftChange::CollectedOn(Some("2025-01-15".into())))
        .unwrap();
    assert!(matches!(dashboard.save().unwrap(), SaveOutcome::Created(_)));
}

#[test]
fn test_mock_data_search_and_sort() {
    let store = SampleStore::from_seed(seed::mock_samples().unwrap()).unwrap();
    let mut dashboard = Dashboard::with_clock(
        store,
        DashboardConfig::default(),
        Box::new(FixedClock(today())),
    );

    dashboard.set_search("biopsy");
    assert_eq!(visible_names(&dashboard), vec!["Liver Biopsy", "Kidney Biopsy"]);

    dashboard.toggle_sort(SortKey::CollectedOn);
    assert_eq!(visible_names(&dashboard), vec!["Kidney Biopsy", "Liver Biopsy"]);

    dashboard.toggle_sort(SortKey::CollectedOn);
    assert_eq!(visible_names(&dashboard), vec!["Liver Biopsy", "Kidney Biopsy"]);
}

#[test]
fn test_status_update_on_unknown_id_leaves_store_unchanged() {
    let store = SampleStore::from_seed(seed::mock_samples().unwrap()).unwrap();
    let mut dashboard = Dashboard::new(store, DashboardConfig::default());
    let before = dashboard.samples().to_vec();

    let result = dashboard.change_status("SMP-999", SampleStatus::Completed);
    assert_eq!(
        result,
        Err(DashboardError::Store(StoreError::NotFound("SMP-999".into())))
    );
    assert_eq!(dashboard.samples(), before.as_slice());
}
