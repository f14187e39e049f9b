//! Value conversion from sea-query to may_postgres.
//!
//! Converts the `Values` produced by rendering a statement into `&dyn ToSql`
//! parameters. Two-pass pattern: first collect owned values into typed
//! vectors, then build a slice of references into them — the references stay
//! valid for the duration of the closure that runs the query.

use crate::session::RosterError;
use may_postgres::types::ToSql;
use sea_query::Value;

/// Convert sea-query values to `ToSql` parameters and run `f` with them.
///
/// # Errors
///
/// Returns `RosterError::Other` for a value type this crate never binds
/// (the roster schema is text and integers only).
pub fn with_converted_params<F, R>(values: &sea_query::Values, f: F) -> Result<R, RosterError>
where
    F: FnOnce(&[&dyn ToSql]) -> Result<R, RosterError>,
{
    let mut bools: Vec<bool> = Vec::new();
    let mut ints: Vec<i32> = Vec::new();
    let mut big_ints: Vec<i64> = Vec::new();
    let mut strings: Vec<String> = Vec::new();
    let mut floats: Vec<f32> = Vec::new();
    let mut doubles: Vec<f64> = Vec::new();
    let mut nulls: Vec<Option<i32>> = Vec::new();

    // First pass: collect owned values into typed vectors.
    for value in values.iter() {
        match value {
            Value::Bool(Some(b)) => bools.push(*b),
            Value::TinyInt(Some(i)) => ints.push(*i as i32),
            Value::SmallInt(Some(i)) => ints.push(*i as i32),
            Value::Int(Some(i)) => ints.push(*i),
            Value::BigInt(Some(i)) => big_ints.push(*i),
            Value::TinyUnsigned(Some(u)) => ints.push(*u as i32),
            Value::SmallUnsigned(Some(u)) => ints.push(*u as i32),
            Value::Unsigned(Some(u)) => big_ints.push(*u as i64),
            Value::BigUnsigned(Some(u)) => {
                if *u > i64::MAX as u64 {
                    return Err(RosterError::Other(format!(
                        "BigUnsigned value {} exceeds i64::MAX, cannot be bound",
                        u
                    )));
                }
                big_ints.push(*u as i64);
            }
            Value::Float(Some(v)) => floats.push(*v),
            Value::Double(Some(v)) => doubles.push(*v),
            Value::String(Some(s)) => strings.push(s.clone()),
            Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None) => nulls.push(None),
            _ => {
                return Err(RosterError::Other(format!(
                    "Unsupported value type in query: {value:?}"
                )));
            }
        }
    }

    // Second pass: build references into the stored values.
    let mut bool_idx = 0;
    let mut int_idx = 0;
    let mut big_int_idx = 0;
    let mut string_idx = 0;
    let mut float_idx = 0;
    let mut double_idx = 0;
    let mut null_idx = 0;

    let mut params: Vec<&dyn ToSql> = Vec::new();

    for value in values.iter() {
        match value {
            Value::Bool(Some(_)) => {
                params.push(&bools[bool_idx] as &dyn ToSql);
                bool_idx += 1;
            }
            Value::TinyInt(Some(_))
            | Value::SmallInt(Some(_))
            | Value::Int(Some(_))
            | Value::TinyUnsigned(Some(_))
            | Value::SmallUnsigned(Some(_)) => {
                params.push(&ints[int_idx] as &dyn ToSql);
                int_idx += 1;
            }
            Value::BigInt(Some(_)) | Value::Unsigned(Some(_)) | Value::BigUnsigned(Some(_)) => {
                params.push(&big_ints[big_int_idx] as &dyn ToSql);
                big_int_idx += 1;
            }
            Value::Float(Some(_)) => {
                params.push(&floats[float_idx] as &dyn ToSql);
                float_idx += 1;
            }
            Value::Double(Some(_)) => {
                params.push(&doubles[double_idx] as &dyn ToSql);
                double_idx += 1;
            }
            Value::String(Some(_)) => {
                params.push(&strings[string_idx] as &dyn ToSql);
                string_idx += 1;
            }
            Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None) => {
                params.push(&nulls[null_idx] as &dyn ToSql);
                null_idx += 1;
            }
            _ => {
                return Err(RosterError::Other(format!(
                    "Unsupported value type in query: {value:?}"
                )));
            }
        }
    }

    f(&params)
}
