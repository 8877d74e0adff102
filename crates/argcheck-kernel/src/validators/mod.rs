//! Validator functions: the trait, a registry, and the built-ins.

mod builtin;
mod registry;
mod traits;

pub use builtin::{Kind, NonEmpty, TypeOf};
pub use registry::ValidatorRegistry;
pub use traits::{validator_fn, ArgValidator, FnValidator};

/// Register all built-in validators with the registry.
pub fn register_builtins(registry: &mut ValidatorRegistry) {
    registry.register(TypeOf(Kind::String));
    registry.register(TypeOf(Kind::Integer));
    registry.register(TypeOf(Kind::Number));
    registry.register(TypeOf(Kind::Boolean));
    registry.register(TypeOf(Kind::Array));
    registry.register(TypeOf(Kind::Object));
    registry.register(NonEmpty);
}
