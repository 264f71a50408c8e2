//! Line capability over the script-side `Line` class.

use std::rc::Rc;

use super::{JsObjectWrapper, JsPoint, JsPointImpl, wrap};
use crate::error::WrapperResult;
use crate::host::{ForeignHandle, ForeignValue, ObjectHost};

/// Typed view of a script `Line` between two points.
pub trait JsLine: JsObjectWrapper {
    type Point: JsPoint;

    /// Map a value returned by the script into a point wrapper.
    fn as_js_point(&self, candidate: ForeignValue) -> WrapperResult<Rc<Self::Point>>;

    fn start(&self, host: &mut dyn ObjectHost) -> WrapperResult<Rc<Self::Point>> {
        let value = host.get_property(self.source(), "start")?;
        self.as_js_point(value)
    }

    fn end(&self, host: &mut dyn ObjectHost) -> WrapperResult<Rc<Self::Point>> {
        let value = host.get_property(self.source(), "end")?;
        self.as_js_point(value)
    }

    fn length(&self, host: &mut dyn ObjectHost) -> WrapperResult<f64> {
        host.invoke(self.source(), "length", &[])?.as_f64()
    }

    /// Whether `point` lies on the segment, endpoints included.
    fn contains(
        &self,
        host: &mut dyn ObjectHost,
        point: &dyn JsObjectWrapper,
    ) -> WrapperResult<bool> {
        host.invoke(self.source(), "contains", &[point.to_foreign()])?
            .as_bool()
    }

    fn describe(&self, host: &mut dyn ObjectHost) -> WrapperResult<String> {
        host.invoke(self.source(), "toString", &[])?.into_string()
    }
}

/// Default line wrapper. Endpoints are handed out as fresh point wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsLineImpl {
    source: ForeignHandle,
}

impl JsLineImpl {
    pub fn new(source: ForeignHandle) -> Self {
        Self { source }
    }
}

impl JsObjectWrapper for JsLineImpl {
    fn source(&self) -> &ForeignHandle {
        &self.source
    }

    fn from_source(source: ForeignHandle) -> Self {
        Self::new(source)
    }
}

impl JsLine for JsLineImpl {
    type Point = JsPointImpl;

    fn as_js_point(&self, candidate: ForeignValue) -> WrapperResult<Rc<JsPointImpl>> {
        wrap(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WrapperError;
    use crate::host::BoaObjectHost;

    fn setup() -> (BoaObjectHost, Rc<JsLineImpl>) {
        let mut host = BoaObjectHost::new().unwrap();
        let line: Rc<JsLineImpl> = wrap(
            host.eval(
                "var p1 = new Point(0, 0); var p2 = new Point(3, 4); var line = new Line(p1, p2); line",
            )
            .unwrap(),
        )
        .unwrap();
        (host, line)
    }

    #[test]
    fn endpoints_wrap_the_script_points() {
        let (mut host, line) = setup();

        let start = line.start(&mut host).unwrap();
        let end = line.end(&mut host).unwrap();
        assert_eq!(start.to_foreign(), host.eval("p1").unwrap());
        assert_eq!(end.to_foreign(), host.eval("p2").unwrap());
        assert!(start.is_origin(&mut host).unwrap());

        // each read allocates a new wrapper over the same object
        let again = line.start(&mut host).unwrap();
        assert!(!Rc::ptr_eq(&start, &again));
        assert_eq!(start, again);
    }

    #[test]
    fn length_and_description() {
        let (mut host, line) = setup();
        assert_eq!(line.length(&mut host).unwrap(), 5.0);
        assert_eq!(line.describe(&mut host).unwrap(), "Line@{(0,0),(3,4)}");
    }

    #[test]
    fn contains_follows_point_mutation() {
        let (mut host, line) = setup();
        let start = line.start(&mut host).unwrap();
        let end = line.end(&mut host).unwrap();

        assert!(line.contains(&mut host, &*start).unwrap());
        assert!(line.contains(&mut host, &*end).unwrap());

        let doubled = end.plus(&mut host, &*end).unwrap();
        assert!(!line.contains(&mut host, &*doubled).unwrap());

        let midway: Rc<JsPointImpl> = wrap(host.eval("new Point(1.5, 2)").unwrap()).unwrap();
        assert!(line.contains(&mut host, &*midway).unwrap());

        // moving an endpoint moves the line with it
        end.move_by(&mut host, 3.0, 4.0).unwrap();
        assert!(line.contains(&mut host, &*doubled).unwrap());
    }

    #[test]
    fn non_object_endpoint_is_rejected() {
        let (mut host, line) = setup();
        host.eval("line.start = 7").unwrap();

        let err = line.start(&mut host).unwrap_err();
        assert!(matches!(
            err,
            WrapperError::InvalidForeignReference { found: "number" }
        ));
    }
}
