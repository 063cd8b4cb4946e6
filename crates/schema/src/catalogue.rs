//! Catalogue compilation - layouts → table definitions

use umalink_parsers::{BlockMode, Codec, RecordLayout};

use crate::keys::primary_key;
use crate::table::{Column, ColumnType, TableDef};
use crate::{Result, SchemaError};

/// Kinds that also flow on the real-time path
///
/// The live monitor only ever receives race-day data; master and training
/// kinds arrive exclusively through the accumulated path.
const REALTIME: &[&str] = &[
    "RA", "SE", "HR", "O1", "O2", "O3", "O4", "O5", "O6", "H1", "H6", "WE", "WH", "JC", "CC",
    "TC", "AV", "DM", "TM", "RC",
];

/// True if `kind` has a real-time destination
pub fn realtime_kinds(kind: &str) -> bool {
    REALTIME.contains(&kind)
}

/// Derive the ordered column list one row of this layout produces
///
/// Mirrors the parse engine exactly: base fields, then flattened block
/// columns with numeric suffixes, then row-block element columns.
fn derive_columns(layout: &RecordLayout) -> Vec<Column> {
    let mut columns = Vec::with_capacity(layout.column_count());

    for field in layout.fields {
        columns.push(Column {
            name: field.name.to_string(),
            ty: column_type(field.codec, field.length),
        });
    }

    for block in layout.blocks {
        match block.mode {
            BlockMode::Flatten => {
                for index in 0..block.count {
                    for field in block.fields {
                        columns.push(Column {
                            name: format!("{}{}{}", block.prefix, field.name, index + 1),
                            ty: column_type(field.codec, field.length),
                        });
                    }
                }
            }
            BlockMode::Rows => {
                for field in block.fields {
                    columns.push(Column {
                        name: format!("{}{}", block.prefix, field.name),
                        ty: column_type(field.codec, field.length),
                    });
                }
            }
        }
    }

    columns
}

/// Map a codec to the stored column type
///
/// Vote totals and prices run to ten or more digits, so wide integer fields
/// get the 64-bit column type.
fn column_type(codec: Codec, length: usize) -> ColumnType {
    match codec {
        Codec::Int if length >= 10 => ColumnType::BigInt,
        Codec::Int => ColumnType::Int,
        Codec::Scaled(_) => ColumnType::Real,
        Codec::Text => ColumnType::Text,
    }
}

/// Build the table definition for one (table name, layout) pair
pub(crate) fn build_table(name: String, layout: &RecordLayout) -> Result<TableDef> {
    let columns = derive_columns(layout);

    let key = primary_key(layout.kind).ok_or_else(|| SchemaError::MissingPrimaryKey {
        table: name.clone(),
        kind: layout.kind,
    })?;
    if key.is_empty() {
        return Err(SchemaError::MissingPrimaryKey {
            table: name,
            kind: layout.kind,
        });
    }

    for column in key {
        if !columns.iter().any(|c| c.name == *column) {
            return Err(SchemaError::UnknownKeyColumn {
                table: name,
                kind: layout.kind,
                column,
            });
        }
    }

    let primary_key = key.iter().map(|k| k.to_string()).collect();
    Ok(TableDef::new(name, layout.kind, columns, primary_key))
}
