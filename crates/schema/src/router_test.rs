//! Tests for the table router

use umalink_parsers::Feed;

use crate::{Path, TableRouter};

#[test]
fn test_catalogue_compiles() {
    let router = TableRouter::new().expect("catalogue must build");
    // 38 central NL + 20 central RT + 41 regional NL + 20 regional RT
    assert_eq!(router.table_count(), 38 + 20 + 41 + 20);
}

#[test]
fn test_central_accumulated_routing() {
    let router = TableRouter::new().unwrap();
    let table = router.route(Feed::Central, Path::Accumulated, "RA").unwrap();
    assert_eq!(table.name(), "NL_RA");
    assert_eq!(table.kind(), "RA");
}

#[test]
fn test_realtime_prefix() {
    let router = TableRouter::new().unwrap();
    let table = router.route(Feed::Central, Path::RealTime, "SE").unwrap();
    assert_eq!(table.name(), "RT_SE");
}

#[test]
fn test_regional_suffix() {
    let router = TableRouter::new().unwrap();
    let nl = router.route(Feed::Regional, Path::Accumulated, "RA").unwrap();
    assert_eq!(nl.name(), "NL_RA_REG");
    let rt = router.route(Feed::Regional, Path::RealTime, "O1").unwrap();
    assert_eq!(rt.name(), "RT_O1_REG");
}

#[test]
fn test_regional_only_kinds_route_regionally() {
    let router = TableRouter::new().unwrap();
    let ha = router.route(Feed::Regional, Path::Accumulated, "HA").unwrap();
    assert_eq!(ha.name(), "NL_HA_REG");
    assert!(router.route(Feed::Central, Path::Accumulated, "HA").is_err());
}

#[test]
fn test_masters_have_no_realtime_destination() {
    let router = TableRouter::new().unwrap();
    assert!(router.route(Feed::Central, Path::RealTime, "UM").is_err());
    assert!(router.route(Feed::Central, Path::RealTime, "KS").is_err());
}

#[test]
fn test_unknown_kind_is_an_error() {
    let router = TableRouter::new().unwrap();
    assert!(router.route(Feed::Central, Path::Accumulated, "QQ").is_err());
}

#[test]
fn test_schema_lookup_by_name() {
    let router = TableRouter::new().unwrap();
    let table = router.schema("NL_SE").expect("NL_SE exists");
    assert_eq!(table.kind(), "SE");
    assert!(router.schema("NL_NOPE").is_none());
}

#[test]
fn test_realtime_shares_accumulated_columns() {
    let router = TableRouter::new().unwrap();
    let nl = router.schema("NL_RA").unwrap();
    let rt = router.schema("RT_RA").unwrap();
    assert_eq!(nl.column_names(), rt.column_names());
}
