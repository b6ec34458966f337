pub mod field_spec;

pub use field_spec::{FieldSpec, parse_field_spec, parse_field_specs, resolve_adjustments};
