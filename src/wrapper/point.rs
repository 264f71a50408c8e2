//! Point capability over the script-side `Point` class.

use std::rc::Rc;

use super::{JsObjectWrapper, adapt};
use crate::error::WrapperResult;
use crate::host::{ForeignHandle, ForeignValue, ObjectHost};

/// Typed view of a script `Point`.
///
/// Every accessor is provided on top of [`JsObjectWrapper::source`];
/// implementors only decide how results coming back from the script are
/// mapped into points via [`JsPoint::as_js_point`].
pub trait JsPoint: JsObjectWrapper {
    /// Map a value returned by the script into a point wrapper.
    fn as_js_point(self: &Rc<Self>, candidate: ForeignValue) -> WrapperResult<Rc<Self>>;

    fn x(&self, host: &mut dyn ObjectHost) -> WrapperResult<f64> {
        host.get_property(self.source(), "x")?.as_f64()
    }

    fn set_x(&self, host: &mut dyn ObjectHost, value: f64) -> WrapperResult<()> {
        host.set_property(self.source(), "x", value.into())
    }

    fn y(&self, host: &mut dyn ObjectHost) -> WrapperResult<f64> {
        host.get_property(self.source(), "y")?.as_f64()
    }

    fn set_y(&self, host: &mut dyn ObjectHost, value: f64) -> WrapperResult<()> {
        host.set_property(self.source(), "y", value.into())
    }

    fn is_origin(&self, host: &mut dyn ObjectHost) -> WrapperResult<bool> {
        host.invoke(self.source(), "isOrigin", &[])?.as_bool()
    }

    /// Component-wise sum; the script allocates a new point.
    fn plus(
        self: &Rc<Self>,
        host: &mut dyn ObjectHost,
        other: &dyn JsObjectWrapper,
    ) -> WrapperResult<Rc<Self>> {
        let result = host.invoke(self.source(), "plus", &[other.to_foreign()])?;
        self.as_js_point(result)
    }

    /// Translate in place. The script returns `this`, so the wrapper is reused.
    fn move_by(
        self: &Rc<Self>,
        host: &mut dyn ObjectHost,
        dx: f64,
        dy: f64,
    ) -> WrapperResult<Rc<Self>> {
        let result = host.invoke(self.source(), "move", &[dx.into(), dy.into()])?;
        self.as_js_point(result)
    }

    fn describe(&self, host: &mut dyn ObjectHost) -> WrapperResult<String> {
        host.invoke(self.source(), "toString", &[])?.into_string()
    }
}

/// Default point wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsPointImpl {
    source: ForeignHandle,
}

impl JsPointImpl {
    pub fn new(source: ForeignHandle) -> Self {
        Self { source }
    }
}

impl JsObjectWrapper for JsPointImpl {
    fn source(&self) -> &ForeignHandle {
        &self.source
    }

    fn from_source(source: ForeignHandle) -> Self {
        Self::new(source)
    }
}

impl JsPoint for JsPointImpl {
    fn as_js_point(self: &Rc<Self>, candidate: ForeignValue) -> WrapperResult<Rc<Self>> {
        adapt(self, candidate)
    }
}
