use std::fs;
use std::path::Path;

use boa_engine::{Context, JsString, JsValue, Source};
use once_cell::sync::Lazy;

use super::{ForeignHandle, ForeignValue, ObjectHost};
use crate::config::{ConfigError, HostConfig};
use crate::error::{WrapperError, WrapperResult};

static SAMPLE_CLASSES: Lazy<String> = Lazy::new(|| {
    [
        include_str!("../scripts/point.js"),
        include_str!("../scripts/line.js"),
    ]
    .join("\n")
});

/// Object host backed by the Boa JavaScript engine.
pub struct BoaObjectHost {
    context: Context,
    config: HostConfig,
}

impl BoaObjectHost {
    /// Host with the default configuration (sample classes preloaded).
    pub fn new() -> WrapperResult<Self> {
        Self::with_config(HostConfig::default())
    }

    pub fn with_config(config: HostConfig) -> WrapperResult<Self> {
        let mut context = Context::default();
        if let Some(limit) = config.loop_iteration_limit {
            context.runtime_limits_mut().set_loop_iteration_limit(limit);
        }
        if let Some(limit) = config.recursion_limit {
            context.runtime_limits_mut().set_recursion_limit(limit);
        }

        let mut host = Self { context, config };

        if host.config.preload_sample_classes {
            log::debug!("preloading sample script classes");
            host.eval(&SAMPLE_CLASSES)?;
        }
        for path in host.config.scripts.clone() {
            host.load_script(&path)?;
        }

        Ok(host)
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Evaluate a script and convert its completion value.
    pub fn eval(&mut self, script: &str) -> WrapperResult<ForeignValue> {
        log::trace!("evaluating {} bytes of script", script.len());
        let value = self
            .context
            .eval(Source::from_bytes(script))
            .map_err(|err| WrapperError::Execution(err.to_string()))?;
        Ok(ingress(&value))
    }

    /// Evaluate a script file from disk.
    pub fn load_script(&mut self, path: &Path) -> WrapperResult<ForeignValue> {
        log::debug!("loading script {}", path.display());
        let script = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.eval(&script)
    }
}

impl ObjectHost for BoaObjectHost {
    fn get_property(&mut self, target: &ForeignHandle, name: &str) -> WrapperResult<ForeignValue> {
        log::trace!("get property `{name}`");
        let value = target
            .as_js_object()
            .get(JsString::from(name), &mut self.context)
            .map_err(|err| WrapperError::Execution(err.to_string()))?;
        Ok(ingress(&value))
    }

    fn set_property(
        &mut self,
        target: &ForeignHandle,
        name: &str,
        value: ForeignValue,
    ) -> WrapperResult<()> {
        log::trace!("set property `{name}` to {}", value.kind());
        let value = egress(value)?;
        target
            .as_js_object()
            .set(JsString::from(name), value, true, &mut self.context)
            .map_err(|err| WrapperError::Execution(err.to_string()))?;
        Ok(())
    }

    fn invoke(
        &mut self,
        target: &ForeignHandle,
        method: &str,
        args: &[ForeignValue],
    ) -> WrapperResult<ForeignValue> {
        log::trace!("invoke `{method}` with {} argument(s)", args.len());
        let function = target
            .as_js_object()
            .get(JsString::from(method), &mut self.context)
            .map_err(|err| WrapperError::Execution(err.to_string()))?;

        let Some(function) = function.as_object().filter(|object| object.is_callable()) else {
            return Err(WrapperError::NotCallable {
                name: method.to_owned(),
            });
        };

        let this = JsValue::new(target.as_js_object().clone());
        let args = args
            .iter()
            .cloned()
            .map(egress)
            .collect::<WrapperResult<Vec<JsValue>>>()?;
        let result = function
            .call(&this, &args, &mut self.context)
            .map_err(|err| WrapperError::Execution(err.to_string()))?;

        Ok(ingress(&result))
    }
}

fn ingress(value: &JsValue) -> ForeignValue {
    if value.is_undefined() {
        ForeignValue::Undefined
    } else if value.is_null() {
        ForeignValue::Null
    } else if let Some(flag) = value.as_boolean() {
        ForeignValue::Bool(flag)
    } else if let Some(number) = value.as_number() {
        ForeignValue::Number(number)
    } else if let Some(text) = value.as_string() {
        ForeignValue::String(text.to_std_string_escaped())
    } else if let Some(object) = value.as_object() {
        ForeignValue::Object(ForeignHandle::new(object.clone()))
    } else {
        ForeignValue::Other(value.display().to_string())
    }
}

/// `Other` values only carry a rendering and cannot be rebuilt on the script side.
fn egress(value: ForeignValue) -> WrapperResult<JsValue> {
    let value = match value {
        ForeignValue::Undefined => JsValue::undefined(),
        ForeignValue::Null => JsValue::null(),
        ForeignValue::Bool(flag) => JsValue::new(flag),
        ForeignValue::Number(number) => JsValue::new(number),
        ForeignValue::String(text) => JsValue::new(JsString::from(text.as_str())),
        ForeignValue::Object(handle) => JsValue::new(handle.as_js_object().clone()),
        ForeignValue::Other(_) => {
            return Err(WrapperError::TypeMismatch {
                expected: "value transferable to the script",
                found: "other",
            });
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_tagged_at_ingress() {
        let mut host = BoaObjectHost::with_config(HostConfig::default().with_sample_classes(false))
            .unwrap();
        assert_eq!(host.eval("1 + 2").unwrap(), ForeignValue::Number(3.0));
        assert_eq!(host.eval("'a' + 'b'").unwrap(), ForeignValue::from("ab"));
        assert_eq!(host.eval("1 < 2").unwrap(), ForeignValue::Bool(true));
        assert_eq!(host.eval("null").unwrap(), ForeignValue::Null);
        assert_eq!(host.eval("undefined").unwrap(), ForeignValue::Undefined);
        assert!(matches!(host.eval("({})").unwrap(), ForeignValue::Object(_)));
    }

    #[test]
    fn same_script_object_yields_identical_handles() {
        let mut host = BoaObjectHost::new().unwrap();
        host.eval("var shared = new Point(1, 2); var twin = new Point(1, 2);")
            .unwrap();

        let first = host.eval("shared").unwrap().into_handle().unwrap();
        let second = host.eval("shared").unwrap().into_handle().unwrap();
        let twin = host.eval("twin").unwrap().into_handle().unwrap();

        assert!(first.same_object(&second));
        assert!(!first.same_object(&twin));
    }

    #[test]
    fn property_roundtrip_and_invoke() {
        let mut host = BoaObjectHost::new().unwrap();
        let point = host.eval("new Point(3, 4)").unwrap().into_handle().unwrap();

        host.set_property(&point, "x", ForeignValue::from(-1.0)).unwrap();
        assert_eq!(host.get_property(&point, "x").unwrap(), ForeignValue::Number(-1.0));

        let text = host.invoke(&point, "toString", &[]).unwrap();
        assert_eq!(text, ForeignValue::from("Point@(-1,4)"));
    }

    #[test]
    fn invoking_a_plain_property_is_not_callable() {
        let mut host = BoaObjectHost::new().unwrap();
        let point = host.eval("new Point(3, 4)").unwrap().into_handle().unwrap();

        let err = host.invoke(&point, "x", &[]).unwrap_err();
        assert!(matches!(err, WrapperError::NotCallable { name } if name == "x"));
    }

    #[test]
    fn script_exceptions_surface_as_execution_errors() {
        let mut host = BoaObjectHost::new().unwrap();
        let err = host.eval("throw new Error('boom')").unwrap_err();
        assert!(matches!(err, WrapperError::Execution(message) if message.contains("boom")));
    }

    #[test]
    fn loop_limit_is_enforced() {
        let config = HostConfig::default()
            .with_sample_classes(false)
            .with_loop_iteration_limit(10);
        let mut host = BoaObjectHost::with_config(config).unwrap();
        assert!(host.eval("for (;;) {}").is_err());
    }

    #[test]
    fn extra_scripts_are_loaded_after_preload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("origin.js");
        fs::write(&path, "var origin = new Point(0, 0);").unwrap();

        let mut host = BoaObjectHost::with_config(HostConfig::default().with_script(&path)).unwrap();
        assert!(matches!(host.eval("origin").unwrap(), ForeignValue::Object(_)));
    }

    #[test]
    fn missing_script_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.js");

        let mut host = BoaObjectHost::new().unwrap();
        let err = host.load_script(&path).unwrap_err();
        assert!(matches!(
            err,
            WrapperError::Config(ConfigError::Io { path: ref missing, .. }) if *missing == path
        ));

        let result = BoaObjectHost::with_config(HostConfig::default().with_script(&path));
        assert!(matches!(
            result,
            Err(WrapperError::Config(ConfigError::Io { .. }))
        ));
    }

    #[test]
    fn untransferable_values_are_refused_on_the_way_back() {
        let mut host = BoaObjectHost::new().unwrap();
        let target = host.eval("var o = { s: 1 }; o").unwrap().into_handle().unwrap();
        let symbol = host.eval("Symbol('k')").unwrap();
        assert_eq!(symbol.kind(), "other");

        let err = host.set_property(&target, "s", symbol.clone()).unwrap_err();
        assert!(matches!(err, WrapperError::TypeMismatch { found: "other", .. }));
        assert_eq!(host.eval("o.s").unwrap(), ForeignValue::Number(1.0));

        let point = host.eval("new Point(1, 1)").unwrap().into_handle().unwrap();
        let err = host.invoke(&point, "plus", &[symbol]).unwrap_err();
        assert!(matches!(err, WrapperError::TypeMismatch { .. }));
    }
}
