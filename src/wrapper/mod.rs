//! Typed wrappers over script objects.
//!
//! A wrapper owns exactly one [`ForeignHandle`] for its whole lifetime and
//! exposes a statically typed method surface over it. Wrappers are shared
//! through [`Rc`] so that adapting a handle the wrapper already owns can hand
//! back the very same instance.

pub mod array;
pub mod line;
pub mod point;

pub use array::JsObjectWrapperArray;
pub use line::{JsLine, JsLineImpl};
pub use point::{JsPoint, JsPointImpl};

use std::rc::Rc;

use crate::error::WrapperResult;
use crate::host::{ForeignHandle, ForeignValue};

/// Base trait of every typed wrapper.
pub trait JsObjectWrapper {
    /// The script object this wrapper stands for.
    fn source(&self) -> &ForeignHandle;

    /// Build a wrapper around an already validated handle.
    fn from_source(source: ForeignHandle) -> Self
    where
        Self: Sized;

    /// Hand the wrapped object back to the script side.
    fn to_foreign(&self) -> ForeignValue {
        ForeignValue::Object(self.source().clone())
    }
}

/// Adapt `candidate` into a wrapper of the same type as `current`.
///
/// Fails with [`crate::WrapperError::InvalidForeignReference`] when the
/// candidate is not a script object. Returns `current` itself when the
/// candidate is the object it already wraps, a new wrapper otherwise.
pub fn adapt<W>(current: &Rc<W>, candidate: ForeignValue) -> WrapperResult<Rc<W>>
where
    W: JsObjectWrapper,
{
    let handle = candidate.into_handle()?;
    if handle.same_object(current.source()) {
        log::trace!("adapt: candidate is the wrapped object, reusing wrapper");
        return Ok(Rc::clone(current));
    }
    log::trace!("adapt: wrapping a new object");
    Ok(Rc::new(W::from_source(handle)))
}

/// Wrap `candidate` into a brand new wrapper, with the same validation as [`adapt`].
pub fn wrap<W>(candidate: ForeignValue) -> WrapperResult<Rc<W>>
where
    W: JsObjectWrapper,
{
    Ok(Rc::new(W::from_source(candidate.into_handle()?)))
}
