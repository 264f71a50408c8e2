//! Script runtime host.
//!
//! Provides the narrow trait wrappers use to reach into the runtime, the
//! tagged value type every result is converted into, and a concrete host
//! backed by the Boa JavaScript engine.

mod boa;
mod value;

pub use boa::BoaObjectHost;
pub use value::{ForeignHandle, ForeignValue};

use crate::error::WrapperResult;

/// Abstraction over script runtimes able to expose their objects to Rust.
pub trait ObjectHost {
    /// Read a named property of a host object.
    fn get_property(&mut self, target: &ForeignHandle, name: &str) -> WrapperResult<ForeignValue>;

    /// Write a named property of a host object.
    fn set_property(
        &mut self,
        target: &ForeignHandle,
        name: &str,
        value: ForeignValue,
    ) -> WrapperResult<()>;

    /// Call a method of a host object with `target` bound as `this`.
    fn invoke(
        &mut self,
        target: &ForeignHandle,
        method: &str,
        args: &[ForeignValue],
    ) -> WrapperResult<ForeignValue>;
}
