//! Spin manifest loading and decoding.
//!
//! - Typed model in [`schema`]
//! - "String or table" field decoding in [`decode`]
//! - Trigger classification in [`triggers`]
//! - File discovery and model building in [`loader`]
//!
//! # Example
//!
//! ```
//! use blueprint::manifest::{parse_manifest, Route};
//!
//! let manifest = parse_manifest(r#"
//! [[trigger.http]]
//! route = { private = true }
//! component = "internal"
//!
//! [component.internal]
//! source = "internal.wasm"
//! "#).unwrap();
//!
//! assert_eq!(manifest.triggers.http[0].route, Route::Config { private: true });
//! ```

pub mod decode;
pub mod loader;
pub mod schema;
pub mod triggers;

pub use decode::{decode_route, decode_source};
pub use loader::{
    build_manifest, find_manifest, load_manifest, parse_manifest, parse_manifest_value,
    DEFAULT_MANIFEST,
};
pub use schema::{
    Application, ApplicationTrigger, Component, Executor, HttpTrigger, Manifest, OtherTrigger,
    RedisTrigger, Route, Source, Triggers, Variable, DEFAULT_EXECUTOR,
};
pub use triggers::{classify_triggers, ComponentTriggers, HTTP_TRIGGER, REDIS_TRIGGER};
