//! Load engine
//!
//! Walks a target's binding records in declaration order. For each field:
//!
//! 1. find the field's optional record, if any
//! 2. ask its presence predicate whether to load (fields that are not
//!    optional always load)
//! 3. if not loading and a default exists, use the default
//! 4. if loading, run the loader and then each transform in turn
//! 5. if not loading and there is no default, leave the field alone
//! 6. assign whatever value was resolved
//!
//! Fields are processed one after another; each field's chain, including
//! any nested load, completes before the next field starts. The first error
//! aborts the whole load.

use std::any::type_name;

use serde_json::Value;

use crate::binding::BindingRecord;
use crate::error::Result;
use crate::optional::PresenceContext;
use crate::registry::Registry;
use crate::source::ConfigSource;
use crate::target::Loadable;
use crate::transforms::FieldContext;

/// Fill `target` from `source` according to the bindings declared in
/// `registry`.
///
/// Fails before touching any field if `T` has no bindings. On any later
/// failure the target may be partially assigned and should be discarded.
pub async fn load_configuration<T: Loadable>(
    registry: &Registry,
    target: &mut T,
    source: &dyn ConfigSource,
) -> Result<()> {
    let target_type = type_name::<T>();
    let bindings = registry.bindings::<T>()?;
    let optionals = registry.optionals::<T>();

    tracing::debug!(
        target_type,
        fields = bindings.len(),
        "loading configuration"
    );

    for binding in &bindings {
        let field = binding.field();
        let optional = optionals.get(field);

        let should_load = optional.is_none_or(|record| {
            record.should_load(&PresenceContext {
                target: &*target,
                source,
                field,
                source_key: binding.source_key(),
            })
        });

        let value = if should_load {
            let value = load_field(registry, &*target, source, binding).await?;
            tracing::trace!(target_type, field, "loaded field");
            Some(value)
        } else if let Some(default) = optional.and_then(|record| record.default_value()) {
            tracing::trace!(target_type, field, "using default for field");
            Some(default.clone())
        } else {
            tracing::trace!(target_type, field, "skipped optional field");
            None
        };

        if let Some(value) = value {
            target.assign(field, value)?;
        }
    }

    tracing::debug!(target_type, "configuration loaded");
    Ok(())
}

async fn load_field<T: Loadable>(
    registry: &Registry,
    target: &T,
    source: &dyn ConfigSource,
    binding: &BindingRecord,
) -> Result<Value> {
    let mut value = binding.loader().load(registry, source).await?;

    let cx = FieldContext::new(target, binding.field());
    for transform in binding.transforms() {
        value = transform.apply(value, &cx).await?;
    }
    Ok(value)
}
