//! Typed view over a script array whose elements are wrapped objects.

use std::fmt;
use std::rc::Rc;

use super::JsObjectWrapper;
use crate::error::{WrapperError, WrapperResult};
use crate::host::{ForeignHandle, ForeignValue, ObjectHost};

/// Largest length a script array can report.
const MAX_ARRAY_LENGTH: f64 = u32::MAX as f64;

/// Array of script objects exposed as wrappers of type `T`.
///
/// Slots that do not hold a script object (holes, `null`, `undefined`,
/// primitives) read as `None`.
///
/// With the cache enabled, reading the same script object twice yields the
/// same `Rc<T>`. The cache keeps one entry per object ever read through this
/// array, including objects since overwritten in the script; call
/// [`JsObjectWrapperArray::clear_cache`] or disable caching to drop them.
pub struct JsObjectWrapperArray<T> {
    source: ForeignHandle,
    use_cache: bool,
    cache: Vec<(ForeignHandle, Rc<T>)>,
}

impl<T: JsObjectWrapper> JsObjectWrapperArray<T> {
    pub fn new(source: ForeignHandle, use_cache: bool) -> Self {
        Self {
            source,
            use_cache,
            cache: Vec::new(),
        }
    }

    /// Wrap a script value that must be an array object.
    pub fn from_foreign(candidate: ForeignValue, use_cache: bool) -> WrapperResult<Self> {
        Ok(Self::new(candidate.into_handle()?, use_cache))
    }

    pub fn source(&self) -> &ForeignHandle {
        &self.source
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn set_use_cache(&mut self, use_cache: bool) {
        self.use_cache = use_cache;
        if !use_cache {
            self.clear_cache();
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn length(&self, host: &mut dyn ObjectHost) -> WrapperResult<usize> {
        let length = host.get_property(&self.source, "length")?;
        to_length(&length)
    }

    /// Element at `index`; anything but a script object reads as `None`.
    pub fn get(
        &mut self,
        host: &mut dyn ObjectHost,
        index: usize,
    ) -> WrapperResult<Option<Rc<T>>> {
        let value = host.get_property(&self.source, &index.to_string())?;
        Ok(self.wrap_slot(value))
    }

    /// Store `value` at `index`, or `null` when `value` is `None`.
    pub fn set(
        &self,
        host: &mut dyn ObjectHost,
        index: usize,
        value: Option<&T>,
    ) -> WrapperResult<()> {
        host.set_property(&self.source, &index.to_string(), Self::to_foreign(value))
    }

    /// Append `value` and return the new length.
    pub fn push(&self, host: &mut dyn ObjectHost, value: &T) -> WrapperResult<usize> {
        let length = host.invoke(&self.source, "push", &[value.to_foreign()])?;
        to_length(&length)
    }

    /// Remove and return the last element.
    pub fn pop(&mut self, host: &mut dyn ObjectHost) -> WrapperResult<Option<Rc<T>>> {
        let value = host.invoke(&self.source, "pop", &[])?;
        Ok(self.wrap_slot(value))
    }

    /// First index holding the very object `value` wraps.
    pub fn index_of(&self, host: &mut dyn ObjectHost, value: &T) -> WrapperResult<Option<usize>> {
        let index = host.invoke(&self.source, "indexOf", &[value.to_foreign()])?;
        to_index(&index)
    }

    /// Last index holding the very object `value` wraps.
    pub fn last_index_of(
        &self,
        host: &mut dyn ObjectHost,
        value: &T,
    ) -> WrapperResult<Option<usize>> {
        let index = host.invoke(&self.source, "lastIndexOf", &[value.to_foreign()])?;
        to_index(&index)
    }

    pub fn includes(&self, host: &mut dyn ObjectHost, value: &T) -> WrapperResult<bool> {
        host.invoke(&self.source, "includes", &[value.to_foreign()])?
            .as_bool()
    }

    /// New array holding this array's elements followed by `other`'s.
    ///
    /// The result starts with both caches merged, so wrappers already handed
    /// out by either side are handed out again for the same objects.
    pub fn concat(
        &self,
        host: &mut dyn ObjectHost,
        other: &JsObjectWrapperArray<T>,
    ) -> WrapperResult<Self> {
        let joined = host.invoke(
            &self.source,
            "concat",
            &[ForeignValue::Object(other.source.clone())],
        )?;
        let mut array = Self::from_foreign(joined, self.use_cache)?;
        if array.use_cache {
            array.cache = self.cache.clone();
            for (handle, wrapper) in &other.cache {
                if array.cached(handle).is_none() {
                    array.cache.push((handle.clone(), Rc::clone(wrapper)));
                }
            }
        }
        Ok(array)
    }

    pub fn join(&self, host: &mut dyn ObjectHost, separator: &str) -> WrapperResult<String> {
        host.invoke(&self.source, "join", &[separator.into()])?
            .into_string()
    }

    /// Overwrite every slot with `value`, or `null` when `value` is `None`.
    pub fn fill(&self, host: &mut dyn ObjectHost, value: Option<&T>) -> WrapperResult<()> {
        host.invoke(&self.source, "fill", &[Self::to_foreign(value)])?;
        Ok(())
    }

    /// Every element in order.
    pub fn to_vec(&mut self, host: &mut dyn ObjectHost) -> WrapperResult<Vec<Option<Rc<T>>>> {
        let length = self.length(host)?;
        (0..length).map(|index| self.get(host, index)).collect()
    }

    pub fn to_foreign(value: Option<&T>) -> ForeignValue {
        value.map_or(ForeignValue::Null, |wrapper| wrapper.to_foreign())
    }

    fn wrap_slot(&mut self, value: ForeignValue) -> Option<Rc<T>> {
        let handle = match value {
            ForeignValue::Object(handle) => handle,
            other => {
                log::trace!("array slot holds {}, reading as none", other.kind());
                return None;
            }
        };
        if !self.use_cache {
            return Some(Rc::new(T::from_source(handle)));
        }
        Some(self.get_or_create(handle))
    }

    fn cached(&self, handle: &ForeignHandle) -> Option<&Rc<T>> {
        self.cache
            .iter()
            .find(|(cached, _)| cached.same_object(handle))
            .map(|(_, wrapper)| wrapper)
    }

    fn get_or_create(&mut self, handle: ForeignHandle) -> Rc<T> {
        if let Some(wrapper) = self.cached(&handle) {
            return Rc::clone(wrapper);
        }
        let wrapper = Rc::new(T::from_source(handle.clone()));
        self.cache.push((handle, Rc::clone(&wrapper)));
        wrapper
    }
}

fn to_length(value: &ForeignValue) -> WrapperResult<usize> {
    let length = value.as_f64()?;
    if !(0.0..=MAX_ARRAY_LENGTH).contains(&length) || length.fract() != 0.0 {
        return Err(WrapperError::TypeMismatch {
            expected: "array length",
            found: "number out of range",
        });
    }
    Ok(length as usize)
}

/// `-1` is the script's "not found".
fn to_index(value: &ForeignValue) -> WrapperResult<Option<usize>> {
    if value.as_f64()? == -1.0 {
        return Ok(None);
    }
    to_length(value).map(Some)
}

impl<T> fmt::Debug for JsObjectWrapperArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsObjectWrapperArray")
            .field("source", &self.source)
            .field("use_cache", &self.use_cache)
            .field("cached", &self.cache.len())
            .finish()
    }
}
