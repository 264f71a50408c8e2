//! # js-object-wrapper
//!
//! Typed Rust wrappers over objects that live inside an embedded JavaScript
//! engine.
//!
//! Script values are tagged once when they cross into Rust
//! ([`ForeignValue`]); wrappers only accept script objects and keep a single
//! [`ForeignHandle`] for their whole lifetime. Adapting a handle a wrapper
//! already owns hands back that same wrapper instance.
//!
//! ## Features
//!
//! - Boa-backed object host with configurable runtime limits
//! - Identity-preserving adaptation of script objects into typed wrappers
//! - `Point` and `Line` sample capabilities
//! - Wrapper arrays with an optional identity cache
//!
//! ## Example
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use js_object_wrapper::{BoaObjectHost, JsPoint, JsPointImpl, wrap};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut host = BoaObjectHost::new()?;
//!     let point: Rc<JsPointImpl> = wrap(host.eval("new Point(1, 2)")?)?;
//!     let moved = point.move_by(&mut host, 1.0, 1.0)?;
//!     assert!(Rc::ptr_eq(&point, &moved));
//!     println!("{}", point.describe(&mut host)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod wrapper;

pub use crate::config::{ConfigError, HostConfig};

pub use crate::error::{WrapperError, WrapperResult};

pub use crate::host::{BoaObjectHost, ForeignHandle, ForeignValue, ObjectHost};

pub use crate::wrapper::{
    JsLine,
    JsLineImpl,
    JsObjectWrapper,
    JsObjectWrapperArray,
    JsPoint,
    JsPointImpl,
    adapt,
    wrap,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
