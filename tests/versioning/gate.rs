//! Pre-flight gate behavior on the catalog surface

use partmint::{
    Catalog, Error, InMemoryResourceStore, TagRequirement, VersionTag,
};
use std::sync::Arc;

use crate::{package, Package};

fn setup() -> Catalog<Package> {
    Catalog::new(Arc::new(InMemoryResourceStore::new()))
}

#[test]
fn fresh_tag_passes_required_check() {
    let catalog = setup();
    let (id, tag) = catalog.create(&package()).unwrap();

    let new_tag = catalog
        .update(&id, Some(&tag), TagRequirement::Required, |pkg| {
            pkg.quantity = 5;
        })
        .unwrap();
    assert_ne!(new_tag, tag);
}

#[test]
fn stale_tag_fails_before_any_write() {
    let catalog = setup();
    let (id, tag) = catalog.create(&package()).unwrap();
    catalog
        .update(&id, Some(&tag), TagRequirement::Required, |pkg| {
            pkg.quantity = 5;
        })
        .unwrap();

    let result = catalog.update(&id, Some(&tag), TagRequirement::Required, |pkg| {
        pkg.quantity = 99;
    });
    assert!(matches!(result, Err(Error::PreconditionFailed { .. })));

    // The rejected write left no trace
    let (snapshot, _) = catalog.fetch(&id).unwrap();
    assert_eq!(snapshot.payload.quantity, 5);
}

#[test]
fn absent_tag_passes_when_optional() {
    let catalog = setup();
    let (id, _tag) = catalog.create(&package()).unwrap();

    catalog
        .update(&id, None, TagRequirement::Optional, |pkg| {
            pkg.quantity = 5;
        })
        .unwrap();
    assert_eq!(catalog.fetch(&id).unwrap().0.payload.quantity, 5);
}

#[test]
fn absent_tag_fails_when_required() {
    let catalog = setup();
    let (id, _tag) = catalog.create(&package()).unwrap();

    let result = catalog.update(&id, None, TagRequirement::Required, |pkg| {
        pkg.quantity = 5;
    });
    assert!(matches!(result, Err(Error::MissingRequiredVersion)));
    assert_eq!(result.unwrap_err().reason_code(), "missing_required_version");
}

#[test]
fn tag_from_request_header_round_trips() {
    // Tags travel as strings; a parsed header tag must pass the gate
    let catalog = setup();
    let (id, tag) = catalog.create(&package()).unwrap();

    let header_value = tag.to_string();
    let parsed = VersionTag::parse(&header_value).unwrap();
    catalog
        .update(&id, Some(&parsed), TagRequirement::Required, |pkg| {
            pkg.quantity = 4;
        })
        .unwrap();
}

#[test]
fn malformed_header_tag_is_rejected_at_parse() {
    assert!(VersionTag::parse("").is_err());
    assert!(VersionTag::parse("not-a-tag").is_err());
    assert!(VersionTag::parse("r@@").is_err());
}

#[test]
fn every_read_emits_the_current_tag() {
    let catalog = setup();
    let (id, created) = catalog.create(&package()).unwrap();

    let (_, tag_after_create) = catalog.fetch(&id).unwrap();
    assert_eq!(tag_after_create, created);

    let updated = catalog
        .update(&id, Some(&created), TagRequirement::Required, |pkg| {
            pkg.quantity = 9;
        })
        .unwrap();
    let (_, tag_after_update) = catalog.fetch(&id).unwrap();
    assert_eq!(tag_after_update, updated);
}

#[test]
fn scrap_and_restore_advance_the_marker() {
    let catalog = setup();
    let (id, tag) = catalog.create(&package()).unwrap();

    let scrapped = catalog
        .scrap(&id, Some(&tag), TagRequirement::Required)
        .unwrap();
    let (snapshot, _) = catalog.fetch(&id).unwrap();
    assert!(snapshot.scrapped);
    assert_eq!(snapshot.marker.revision, 2);

    let restored = catalog
        .restore(&id, Some(&scrapped), TagRequirement::Required)
        .unwrap();
    let (snapshot, _) = catalog.fetch(&id).unwrap();
    assert!(!snapshot.scrapped);
    assert_eq!(snapshot.marker.revision, 3);
    assert_ne!(restored, scrapped);
}

#[test]
fn scrap_with_stale_tag_is_rejected() {
    let catalog = setup();
    let (id, tag) = catalog.create(&package()).unwrap();
    catalog
        .update(&id, Some(&tag), TagRequirement::Required, |pkg| {
            pkg.quantity = 5;
        })
        .unwrap();

    let result = catalog.scrap(&id, Some(&tag), TagRequirement::Required);
    assert!(matches!(result, Err(Error::PreconditionFailed { .. })));
    assert!(!catalog.fetch(&id).unwrap().0.scrapped);
}
