use std::collections::HashMap;

use tracing::warn;

use crate::engine::adjust::{AdjustmentSet, ColumnKind, FieldAdjustment};
use crate::engine::errors::ConfigError;
use crate::engine::types::{DocValuesKind, NumericSubtype};

/// Argument value meaning "copy the store without adjustments".
pub const NO_ADJUSTMENTS: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSpec<'a> {
    name: &'a str,
    kind: &'a str,
    subtype: Option<&'a str>,
}

peg::parser! {
    grammar field_specs() for str {
        rule _() = quiet!{ [' ' | '\t']* }

        rule name() -> &'input str
            = quiet!{ $( (!['(' | ')' | ',' | ' ' | '\t'] [_])+ ) }
            / expected!("field name")

        rule word() -> &'input str
            = quiet!{ $( ['a'..='z' | 'A'..='Z' | '_']+ ) }
            / expected!("column kind")

        rule subtype() -> &'input str
            = "(" _ subtype:word() _ ")" { subtype }

        rule spec() -> RawSpec<'input>
            = _ name:name() _ "(" _ kind:word() _ subtype:subtype()? _ ")" _ {
                RawSpec { name, kind, subtype }
            }

        pub rule specs() -> Vec<RawSpec<'input>>
            = specs:(spec() ++ ",") { specs }
    }
}

/// A parsed `name(KIND)` or `name(NUMERIC(SUBTYPE))` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl FieldSpec {
    fn from_raw(raw: &RawSpec<'_>) -> Result<Self, ConfigError> {
        let kind = DocValuesKind::parse(raw.kind)
            .ok_or_else(|| ConfigError::UnknownKind(raw.kind.to_string()))?;
        let subtype = raw
            .subtype
            .map(|s| NumericSubtype::parse(s).ok_or_else(|| ConfigError::UnknownSubtype(s.to_string())))
            .transpose()?;
        // A bare NUMERIC on the command line means LONG.
        let subtype = match (kind, subtype) {
            (DocValuesKind::Numeric, None) => Some(NumericSubtype::Long),
            (_, subtype) => subtype,
        };
        Ok(Self {
            name: raw.name.to_string(),
            kind: ColumnKind::from_parts(raw.name, kind, subtype)?,
        })
    }
}

/// Parses one argument holding one or more comma separated specs.
pub fn parse_field_spec(input: &str) -> Result<Vec<FieldSpec>, ConfigError> {
    let raw = field_specs::specs(input).map_err(|e| ConfigError::InvalidFieldSpec {
        spec: input.to_string(),
        reason: e.to_string(),
    })?;
    raw.iter().map(FieldSpec::from_raw).collect()
}

/// Parses every `--fields` argument. `.` arguments contribute nothing.
pub fn parse_field_specs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<FieldSpec>, ConfigError> {
    let mut specs = Vec::new();
    for input in inputs.iter().map(|s| s.as_ref().trim()) {
        if input == NO_ADJUSTMENTS {
            continue;
        }
        specs.extend(parse_field_spec(input)?);
    }
    Ok(specs)
}

/// Turns specs into adjustments of the fields listed for a store. Specs naming
/// a field the store does not have are logged and skipped.
pub fn resolve_adjustments(
    specs: Vec<FieldSpec>,
    fields: &[FieldAdjustment],
) -> Result<AdjustmentSet, ConfigError> {
    let known: HashMap<&str, &FieldAdjustment> = fields.iter().map(|f| (f.name(), f)).collect();
    let mut set = AdjustmentSet::new();
    for spec in specs {
        match known.get(spec.name.as_str()) {
            Some(field) => set.insert(field.with_kind(spec.kind))?,
            None => warn!(
                target: "dv_enabler::command",
                field = %spec.name,
                "Unknown field, ignoring its adjustment"
            ),
        }
    }
    Ok(set)
}
