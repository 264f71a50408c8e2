//! Values crossing the boundary between Rust and the script runtime.

use std::fmt;

use boa_engine::JsObject;

use crate::error::{WrapperError, WrapperResult};

/// Opaque reference to an object owned by the script runtime.
///
/// Cloning copies the reference. Equality is reference identity: two
/// handles are equal only when they point at the very same script object,
/// no matter what the objects contain.
#[derive(Clone)]
pub struct ForeignHandle {
    object: JsObject,
}

impl ForeignHandle {
    pub(crate) fn new(object: JsObject) -> Self {
        Self { object }
    }

    pub(crate) fn as_js_object(&self) -> &JsObject {
        &self.object
    }

    /// Reference-identity comparison.
    pub fn same_object(&self, other: &ForeignHandle) -> bool {
        JsObject::equals(&self.object, &other.object)
    }
}

impl PartialEq for ForeignHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl Eq for ForeignHandle {}

impl fmt::Debug for ForeignHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ForeignHandle(..)")
    }
}

/// Tagged representation of every value handed out by the host.
///
/// Conversion happens once at ingress, so wrappers only ever check tags.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(ForeignHandle),
    /// Symbols, bigints and anything else without a dedicated tag, rendered
    /// for diagnostics.
    Other(String),
}

impl ForeignValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ForeignValue::Undefined => "undefined",
            ForeignValue::Null => "null",
            ForeignValue::Bool(_) => "boolean",
            ForeignValue::Number(_) => "number",
            ForeignValue::String(_) => "string",
            ForeignValue::Object(_) => "object",
            ForeignValue::Other(_) => "other",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, ForeignValue::Undefined | ForeignValue::Null)
    }

    /// Accepts only host objects; everything else is an invalid reference.
    pub fn into_handle(self) -> WrapperResult<ForeignHandle> {
        match self {
            ForeignValue::Object(handle) => Ok(handle),
            other => Err(WrapperError::InvalidForeignReference {
                found: other.kind(),
            }),
        }
    }

    /// Like [`ForeignValue::into_handle`] but maps `null` and `undefined` to `None`.
    pub fn into_optional_handle(self) -> WrapperResult<Option<ForeignHandle>> {
        if self.is_nullish() {
            return Ok(None);
        }
        self.into_handle().map(Some)
    }

    pub fn as_f64(&self) -> WrapperResult<f64> {
        match self {
            ForeignValue::Number(value) => Ok(*value),
            other => Err(WrapperError::TypeMismatch {
                expected: "number",
                found: other.kind(),
            }),
        }
    }

    pub fn as_bool(&self) -> WrapperResult<bool> {
        match self {
            ForeignValue::Bool(value) => Ok(*value),
            other => Err(WrapperError::TypeMismatch {
                expected: "boolean",
                found: other.kind(),
            }),
        }
    }

    pub fn into_string(self) -> WrapperResult<String> {
        match self {
            ForeignValue::String(value) => Ok(value),
            other => Err(WrapperError::TypeMismatch {
                expected: "string",
                found: other.kind(),
            }),
        }
    }
}

impl From<f64> for ForeignValue {
    fn from(value: f64) -> Self {
        ForeignValue::Number(value)
    }
}

impl From<bool> for ForeignValue {
    fn from(value: bool) -> Self {
        ForeignValue::Bool(value)
    }
}

impl From<&str> for ForeignValue {
    fn from(value: &str) -> Self {
        ForeignValue::String(value.to_owned())
    }
}

impl From<String> for ForeignValue {
    fn from(value: String) -> Self {
        ForeignValue::String(value)
    }
}

impl From<ForeignHandle> for ForeignValue {
    fn from(handle: ForeignHandle) -> Self {
        ForeignValue::Object(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_rejected_as_handles() {
        for value in [
            ForeignValue::from(42.0),
            ForeignValue::from("point"),
            ForeignValue::from(true),
            ForeignValue::Null,
            ForeignValue::Undefined,
        ] {
            let kind = value.kind();
            let err = value.into_handle().unwrap_err();
            assert!(
                matches!(err, WrapperError::InvalidForeignReference { found } if found == kind)
            );
        }
    }

    #[test]
    fn nullish_maps_to_none() {
        assert!(ForeignValue::Null.into_optional_handle().unwrap().is_none());
        assert!(ForeignValue::Undefined.into_optional_handle().unwrap().is_none());
        assert!(ForeignValue::from(1.0).into_optional_handle().is_err());
    }

    #[test]
    fn numeric_accessor_reports_mismatch() {
        assert_eq!(ForeignValue::from(2.5).as_f64().unwrap(), 2.5);
        let err = ForeignValue::from("2.5").as_f64().unwrap_err();
        assert!(matches!(
            err,
            WrapperError::TypeMismatch {
                expected: "number",
                found: "string"
            }
        ));
        assert!(err.is_contract_violation());
    }
}
