//! Unit tests for the DetailViewController and random sampling.

mod common;

use std::sync::Arc;

use brewbrowser::managers::detail_view::{
    random_sample, render, DetailViewController, ADDRESS_LABEL, COUNTRY_LABEL, KIND_LABEL,
    MAP_LABEL, PHONE_LABEL,
};
use brewbrowser::types::beverage::BeverageRecord;

use common::FakeCatalog;

fn detailed_catalog() -> FakeCatalog {
    let mut record = BeverageRecord::new("b-1", "Anchor Point");
    record.phone = Some("9075550100".to_string());
    record.country = Some("United States".to_string());
    record.street = Some("3 Harbor Rd".to_string());
    record.city = Some("Homer".to_string());
    record.state_province = Some("Alaska".to_string());
    record.postal_code = Some("99603".to_string());
    record.longitude = Some("-151.5".to_string());
    record.latitude = Some("59.6".to_string());
    record.brewery_type = Some("brewpub".to_string());
    record.website_url = Some("https://anchor.example".to_string());
    FakeCatalog::new(vec![record, BeverageRecord::new("b-2", "Second Run")])
}

#[tokio::test]
async fn test_open_loads_and_renders_labelled_lines() {
    let catalog = Arc::new(detailed_catalog());
    let mut detail = DetailViewController::new(catalog);

    let record = detail.open("b-1").await.cloned();
    assert_eq!(record.map(|r| r.name), Some("Anchor Point".to_string()));

    let view = detail.view();
    assert_eq!(view.heading, "Anchor Point");
    assert_eq!(view.website_url, "https://anchor.example");
    assert_eq!(view.line(PHONE_LABEL), Some("9075550100"));
    assert_eq!(view.line(COUNTRY_LABEL), Some("United States"));
    assert_eq!(view.line(ADDRESS_LABEL), Some("3 Harbor Rd, Homer, Alaska 99603"));
    assert_eq!(view.line(MAP_LABEL), Some("-151.5, 59.6"));
    assert_eq!(view.line(KIND_LABEL), Some("brewpub"));

    let text = view.to_string();
    assert!(text.starts_with("Anchor Point\n"));
    assert!(text.contains("Our kind of beer is: brewpub"));
}

#[tokio::test]
async fn test_unknown_id_leaves_view_empty() {
    let catalog = Arc::new(detailed_catalog());
    let mut detail = DetailViewController::new(catalog);

    assert!(detail.open("nope").await.is_none());
    assert_eq!(detail.current_id(), Some("nope"));
    assert!(detail.record().is_none());

    let view = detail.view();
    assert_eq!(view.heading, "");
    assert!(view.lines.iter().all(|l| l.content.is_empty()));
    assert_eq!(view.lines.len(), 5);
}

#[tokio::test]
async fn test_same_id_does_not_refetch() {
    let catalog = Arc::new(detailed_catalog());
    let mut detail = DetailViewController::new(catalog.clone());

    detail.open("b-1").await;
    detail.open("b-1").await;

    assert_eq!(catalog.item_calls(), vec!["b-1"]);
}

#[tokio::test]
async fn test_changed_id_refetches() {
    let catalog = Arc::new(detailed_catalog());
    let mut detail = DetailViewController::new(catalog.clone());

    detail.open("b-1").await;
    let second = detail.open("b-2").await.cloned();

    assert_eq!(second.map(|r| r.id), Some("b-2".to_string()));
    assert_eq!(catalog.item_calls(), vec!["b-1", "b-2"]);
    // Fields the second record lacks must not leak from the first.
    assert_eq!(detail.view().line(PHONE_LABEL), Some(""));
}

#[tokio::test]
async fn test_failed_fetch_is_retried_on_next_open() {
    let catalog = Arc::new(detailed_catalog());
    let mut detail = DetailViewController::new(catalog.clone());

    catalog.set_failing(true);
    assert!(detail.open("b-1").await.is_none());

    catalog.set_failing(false);
    assert!(detail.open("b-1").await.is_some());
    assert_eq!(catalog.item_calls().len(), 2);
}

#[test]
fn test_render_without_coordinates_pair() {
    let mut record = BeverageRecord::new("b-3", "Half Mapped");
    record.latitude = Some("40.0".to_string());
    assert_eq!(render(&record).line(MAP_LABEL), Some(""));
}

#[tokio::test]
async fn test_random_sample_returns_requested_count() {
    let catalog = FakeCatalog::with_breweries(20);
    let sample = random_sample(&catalog, 10).await;
    assert_eq!(sample.len(), 10);
}

#[tokio::test]
async fn test_random_sample_failure_yields_empty() {
    let catalog = FakeCatalog::with_breweries(20);
    catalog.set_failing(true);
    assert!(random_sample(&catalog, 10).await.is_empty());
}
