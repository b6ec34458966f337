use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::engine::adjust::{FieldAdjustment, describe_fields};
use crate::engine::store::{Store, StoreReader};
use crate::engine::types::{DocValuesKind, NumericSubtype};

#[derive(Debug, Serialize)]
struct FieldSummary<'a> {
    name: &'a str,
    doc_values: DocValuesKind,
    numeric_type: Option<NumericSubtype>,
    indexed: bool,
    stored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_value: Option<&'a str>,
}

impl<'a> From<&'a FieldAdjustment> for FieldSummary<'a> {
    fn from(field: &'a FieldAdjustment) -> Self {
        let original = field.original();
        Self {
            name: field.name(),
            doc_values: field.kind().doc_values(),
            numeric_type: field.kind().numeric_subtype(),
            indexed: original.is_some_and(|m| m.indexed),
            stored: original.is_some_and(|m| m.stored),
            first_value: field.sample_value(),
        }
    }
}

pub fn handle<W: Write>(index: &Path, verbose: bool, json: bool, writer: &mut W) -> anyhow::Result<()> {
    let store = Store::open(index)
        .with_context(|| format!("Unable to access store folder '{}'", index.display()))?;
    let fields = describe_fields(&store, verbose)
        .with_context(|| format!("Unable to list fields of '{}'", index.display()))?;
    store.close()?;

    if json {
        let summaries: Vec<FieldSummary<'_>> = fields.iter().map(FieldSummary::from).collect();
        serde_json::to_writer_pretty(&mut *writer, &summaries)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Store at {} contains {} fields",
        index.display(),
        fields.len()
    )?;
    for field in &fields {
        writeln!(writer, "{}", field.display(verbose))?;
    }
    Ok(())
}
