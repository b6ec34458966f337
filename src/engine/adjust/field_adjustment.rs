use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::engine::errors::ConfigError;
use crate::engine::types::{DocValuesKind, FieldMeta, NumericSubtype};

/// The column representation requested for a field. A numeric subtype exists
/// exactly when the kind is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    None,
    Numeric(NumericSubtype),
    Binary,
    Sorted,
    SortedSet,
}

impl ColumnKind {
    /// Combines a flat kind tag with an optional subtype, rejecting
    /// combinations that break the subtype invariant.
    pub fn from_parts(
        field: &str,
        kind: DocValuesKind,
        subtype: Option<NumericSubtype>,
    ) -> Result<Self, ConfigError> {
        match (kind, subtype) {
            (DocValuesKind::Numeric, Some(subtype)) => Ok(ColumnKind::Numeric(subtype)),
            (DocValuesKind::Numeric, None) => Err(ConfigError::NumericWithoutSubtype {
                field: field.to_string(),
            }),
            (other, Some(_)) => Err(ConfigError::SubtypeWithoutNumeric {
                field: field.to_string(),
                kind: other.to_string(),
            }),
            (DocValuesKind::None, None) => Ok(ColumnKind::None),
            (DocValuesKind::Binary, None) => Ok(ColumnKind::Binary),
            (DocValuesKind::Sorted, None) => Ok(ColumnKind::Sorted),
            (DocValuesKind::SortedSet, None) => Ok(ColumnKind::SortedSet),
        }
    }

    pub fn doc_values(&self) -> DocValuesKind {
        match self {
            ColumnKind::None => DocValuesKind::None,
            ColumnKind::Numeric(_) => DocValuesKind::Numeric,
            ColumnKind::Binary => DocValuesKind::Binary,
            ColumnKind::Sorted => DocValuesKind::Sorted,
            ColumnKind::SortedSet => DocValuesKind::SortedSet,
        }
    }

    pub fn numeric_subtype(&self) -> Option<NumericSubtype> {
        match self {
            ColumnKind::Numeric(subtype) => Some(*subtype),
            _ => None,
        }
    }

    pub fn has_column(&self) -> bool {
        !matches!(self, ColumnKind::None)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric(subtype) => write!(f, "NUMERIC({})", subtype),
            other => f.write_str(other.doc_values().as_str()),
        }
    }
}

/// Requested column representation for one field.
///
/// Values are immutable; reconfiguring yields a new adjustment. Equality,
/// hashing and ordering go by field name only.
#[derive(Debug, Clone)]
pub struct FieldAdjustment {
    name: String,
    kind: ColumnKind,
    original: Option<FieldMeta>,
    sample_value: Option<String>,
}

impl FieldAdjustment {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            original: None,
            sample_value: None,
        }
    }

    /// Describes a field as the store currently holds it. Numeric fields are
    /// reported as LONG since the store does not record a subtype.
    pub fn from_meta(meta: &FieldMeta) -> Self {
        let kind = match meta.doc_values {
            DocValuesKind::None => ColumnKind::None,
            DocValuesKind::Numeric => ColumnKind::Numeric(NumericSubtype::Long),
            DocValuesKind::Binary => ColumnKind::Binary,
            DocValuesKind::Sorted => ColumnKind::Sorted,
            DocValuesKind::SortedSet => ColumnKind::SortedSet,
        };
        Self {
            name: meta.name.clone(),
            kind,
            original: Some(meta.clone()),
            sample_value: None,
        }
    }

    pub fn with_kind(&self, kind: ColumnKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Like [`FieldAdjustment::with_kind`] but from a flat kind and optional subtype.
    pub fn reconfigure(
        &self,
        kind: DocValuesKind,
        subtype: Option<NumericSubtype>,
    ) -> Result<Self, ConfigError> {
        Ok(self.with_kind(ColumnKind::from_parts(&self.name, kind, subtype)?))
    }

    pub fn with_original(mut self, meta: FieldMeta) -> Self {
        self.original = Some(meta);
        self
    }

    pub fn with_sample_value(mut self, value: impl Into<String>) -> Self {
        self.sample_value = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn original(&self) -> Option<&FieldMeta> {
        self.original.as_ref()
    }

    pub fn sample_value(&self) -> Option<&str> {
        self.sample_value.as_deref()
    }

    /// `meta` with its column kind replaced; every other flag is kept.
    pub fn adjusted_meta(&self, meta: &FieldMeta) -> FieldMeta {
        meta.with_doc_values(self.kind.doc_values())
    }

    pub fn display(&self, verbose: bool) -> AdjustmentDisplay<'_> {
        AdjustmentDisplay {
            adjustment: self,
            verbose,
        }
    }
}

impl PartialEq for FieldAdjustment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FieldAdjustment {}

impl Hash for FieldAdjustment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for FieldAdjustment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldAdjustment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for FieldAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(false).fmt(f)
    }
}

pub struct AdjustmentDisplay<'a> {
    adjustment: &'a FieldAdjustment,
    verbose: bool,
}

impl fmt::Display for AdjustmentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let adj = self.adjustment;
        let dv = if adj.kind.has_column() {
            adj.kind.doc_values().as_str()
        } else {
            "No"
        };
        let numeric = adj
            .kind
            .numeric_subtype()
            .map(|s| s.as_str())
            .unwrap_or("N/A");
        write!(f, "DVConfig(field={}, DV={}, NumericType={}", adj.name, dv, numeric)?;
        if self.verbose {
            write!(f, ", firstIndexed='{}'", adj.sample_value.as_deref().unwrap_or("null"))?;
        }
        f.write_str(")")
    }
}

/// Adjustments keyed by field name; at most one per field.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentSet {
    by_name: BTreeMap<String, FieldAdjustment>,
}

impl AdjustmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_adjustments<I>(adjustments: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = FieldAdjustment>,
    {
        let mut set = Self::new();
        for adjustment in adjustments {
            set.insert(adjustment)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, adjustment: FieldAdjustment) -> Result<(), ConfigError> {
        if self.by_name.contains_key(adjustment.name()) {
            return Err(ConfigError::DuplicateField(adjustment.name.clone()));
        }
        self.by_name.insert(adjustment.name.clone(), adjustment);
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&FieldAdjustment> {
        self.by_name.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.by_name.contains_key(field)
    }

    /// Adjustments in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldAdjustment> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
