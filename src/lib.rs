pub mod ast;
pub mod catalog;
pub mod config;
pub mod context;
pub mod decoder;
pub mod errors;
pub mod native;
pub mod registry;
pub mod resolvable;
pub mod stylesheet;

pub use ast::{AstReader, CallNode};
pub use config::Config;
pub use context::{Element, Environment, ResolutionContext};
pub use decoder::Decoder;
pub use errors::{DecodeError, MultipleFailures, ResolveError, WireError};
pub use native::Native;
pub use registry::Registry;
pub use resolvable::Resolvable;
pub use stylesheet::Stylesheet;
