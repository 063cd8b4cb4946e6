//! Tests for catalogue compilation

use crate::{ColumnType, TableRouter};

#[test]
fn test_every_table_has_a_primary_key() {
    let router = TableRouter::new().unwrap();
    for table in router.tables() {
        assert!(
            !table.primary_key().is_empty(),
            "{} shipped without a key",
            table.name()
        );
        for key in table.primary_key() {
            assert!(
                table.column(key).is_some(),
                "{} key column {} missing from columns",
                table.name(),
                key
            );
        }
    }
}

#[test]
fn test_odds_table_carries_combination_columns() {
    let router = TableRouter::new().unwrap();
    let o1 = router.schema("NL_O1").unwrap();
    assert!(o1.column("Umaban").is_some());
    assert_eq!(o1.column("TanOdds").unwrap().ty, ColumnType::Real);
    assert!(o1.is_key_column("Umaban"));
    assert!(!o1.is_key_column("TanOdds"));

    let o6 = router.schema("NL_O6").unwrap();
    assert!(o6.is_key_column("Kumi"));
    assert_eq!(o6.column("Odds").unwrap().ty, ColumnType::Real);
}

#[test]
fn test_wide_integer_columns_are_bigint() {
    let router = TableRouter::new().unwrap();
    let h1 = router.schema("NL_H1").unwrap();
    // Eleven-digit vote totals need 64-bit storage
    assert_eq!(h1.column("TanHyosuTotal").unwrap().ty, ColumnType::BigInt);
    assert_eq!(h1.column("TanHyosu").unwrap().ty, ColumnType::BigInt);
    // Two-digit counters stay plain integers
    assert_eq!(h1.column("TorokuTosu").unwrap().ty, ColumnType::Int);
}

#[test]
fn test_flattened_payout_columns_exist() {
    let router = TableRouter::new().unwrap();
    let hr = router.schema("NL_HR").unwrap();
    for name in ["TansyoUmaban1", "TansyoPay3", "SanrentanKumi6", "WidePay7"] {
        assert!(hr.column(name).is_some(), "NL_HR missing {}", name);
    }
}

#[test]
fn test_create_sql_quotes_identifiers() {
    let router = TableRouter::new().unwrap();
    let o1 = router.schema("NL_O1").unwrap();
    let sql = o1.create_sql(|name| format!("\"{}\"", name));
    assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"NL_O1\""));
    assert!(sql.contains("\"TanOdds\" REAL"));
    assert!(sql.contains("PRIMARY KEY (\"Year\""));
}

#[test]
fn test_table_counts_roughly_sixty_logical_shapes() {
    let router = TableRouter::new().unwrap();
    // 38 central + 3 regional-only + 20 real-time counterparts
    let logical: std::collections::HashSet<(&'static str, bool)> = router
        .tables()
        .map(|t| (t.kind(), t.name().starts_with("RT_")))
        .collect();
    assert_eq!(logical.len(), 41 + 20);
}
