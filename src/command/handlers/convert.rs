use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::command::parser::{parse_field_specs, resolve_adjustments};
use crate::engine::adjust::{SynthesisOptions, describe_fields};
use crate::engine::convert::{ConversionReport, convert};
use crate::engine::store::{Store, StoreReader};

pub fn handle<W: Write>(
    index: &Path,
    output: &Path,
    fields: &[String],
    options: SynthesisOptions,
    writer: &mut W,
) -> anyhow::Result<ConversionReport> {
    // Field specs are checked before either store is touched.
    let specs = parse_field_specs(fields)?;

    let store = Store::open(index)
        .with_context(|| format!("Unable to access store folder '{}'", index.display()))?;
    let known = describe_fields(&store, false)?;
    store.close()?;

    let adjustments = resolve_adjustments(specs, &known)?;
    info!(
        target: "dv_enabler::command",
        adjustments = adjustments.len(),
        "Resolved field adjustments"
    );
    for adjustment in adjustments.iter() {
        writeln!(writer, "Adjusting {}", adjustment)?;
    }

    let report = convert(index, output, adjustments, options).inspect_err(|e| e.log_error())?;
    writeln!(writer, "{}", report)?;
    Ok(report)
}
