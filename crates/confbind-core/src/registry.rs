//! Binding metadata store
//!
//! The [`Registry`] holds, per target type, the ordered binding records and
//! the optional-field records declared for it. It is filled once during
//! program initialization through `&mut` access and is read-only afterwards,
//! so it can be shared freely (`&Registry`, `Arc<Registry>`) while loading.
//!
//! Types may name a parent with [`Declaration::extends`]. Lookups then merge
//! the ancestors' records first, root-most first, followed by the type's own.
//! A type that re-binds an inherited field replaces the inherited record.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use serde_json::Value;

use crate::binding::BindingRecord;
use crate::declare::{Configurable, Declaration};
use crate::engine::load_configuration;
use crate::error::{Error, Result};
use crate::optional::OptionalRecord;
use crate::source::ConfigSource;
use crate::target::Loadable;

struct TypeEntry {
    type_name: &'static str,
    parent: Option<TypeId>,
    bindings: Vec<BindingRecord>,
    optionals: HashMap<String, OptionalRecord>,
}

impl TypeEntry {
    fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            parent: None,
            bindings: Vec::new(),
            optionals: HashMap::new(),
        }
    }
}

/// Per-type binding metadata
#[derive(Default)]
pub struct Registry {
    types: HashMap<TypeId, TypeEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring bindings for `T`
    pub fn declare<T: Loadable>(&mut self) -> Declaration<'_, T> {
        Declaration::new(self)
    }

    /// Run `T`'s own declarations.
    ///
    /// Registering the same type twice fails, since every binding would be
    /// declared a second time.
    pub fn register<T: Configurable>(&mut self) -> Result<&mut Self> {
        let mut declaration = self.declare::<T>();
        T::declare(&mut declaration)?;
        Ok(self)
    }

    /// Append a binding record for `T`.
    ///
    /// Fails if `T` already has a binding for the same field. Fields inherited
    /// from an ancestor may be re-bound.
    pub fn record_binding<T: 'static>(&mut self, record: BindingRecord) -> Result<()> {
        let entry = self.entry::<T>();
        if entry.bindings.iter().any(|b| b.field() == record.field()) {
            return Err(Error::DuplicateBinding {
                type_name: entry.type_name,
                field: record.field().to_string(),
            });
        }

        tracing::debug!(
            target_type = entry.type_name,
            field = record.field(),
            loader = %record.loader().describe(),
            transforms = record.transforms().len(),
            "recorded binding"
        );
        entry.bindings.push(record);
        Ok(())
    }

    /// Set the optional record for a field of `T`; the last one recorded wins
    pub fn record_optional<T: 'static>(&mut self, record: OptionalRecord) {
        let entry = self.entry::<T>();
        tracing::debug!(
            target_type = entry.type_name,
            field = record.field(),
            "recorded optional"
        );
        entry.optionals.insert(record.field().to_string(), record);
    }

    /// Make `T` inherit the bindings and optional records of `P`
    pub fn set_parent<T: 'static, P: 'static>(&mut self) -> Result<()> {
        let child = TypeId::of::<T>();
        let parent = TypeId::of::<P>();

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(Error::AncestryCycle {
                    type_name: type_name::<T>(),
                });
            }
            cursor = self.types.get(&id).and_then(|e| e.parent);
        }

        self.types
            .entry(parent)
            .or_insert_with(|| TypeEntry::new(type_name::<P>()));
        self.entry::<T>().parent = Some(parent);
        Ok(())
    }

    /// Binding records for `T`, ancestors first, in declaration order
    pub fn bindings<T: 'static>(&self) -> Result<Vec<BindingRecord>> {
        let mut merged: Vec<BindingRecord> = Vec::new();
        for entry in self.lineage(TypeId::of::<T>()) {
            for record in &entry.bindings {
                match merged.iter_mut().find(|b| b.field() == record.field()) {
                    Some(inherited) => *inherited = record.clone(),
                    None => merged.push(record.clone()),
                }
            }
        }

        if merged.is_empty() {
            return Err(Error::NotLoadable {
                type_name: type_name::<T>(),
            });
        }
        Ok(merged)
    }

    /// Optional records for `T` keyed by field, including inherited ones
    pub fn optionals<T: 'static>(&self) -> HashMap<String, OptionalRecord> {
        let mut merged = HashMap::new();
        for entry in self.lineage(TypeId::of::<T>()) {
            for (field, record) in &entry.optionals {
                merged.insert(field.clone(), record.clone());
            }
        }
        merged
    }

    /// Whether `T` (or an ancestor) has any bindings
    pub fn is_loadable<T: 'static>(&self) -> bool {
        self.lineage(TypeId::of::<T>())
            .iter()
            .any(|entry| !entry.bindings.is_empty())
    }

    /// Names of every type with recorded metadata, sorted
    pub fn declared_types(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.types.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Load `target` from `source` using this registry's bindings
    pub async fn load<T: Loadable>(&self, target: &mut T, source: &dyn ConfigSource) -> Result<()> {
        load_configuration(self, target, source).await
    }

    /// Build a default `T` and load it from `source`
    pub async fn load_new<T: Loadable + Default>(&self, source: &dyn ConfigSource) -> Result<T> {
        let mut target = T::default();
        load_configuration(self, &mut target, source).await?;
        Ok(target)
    }

    /// Load a fresh `T` and return it as a [`Value`], the same form nested
    /// bindings hand to their transforms
    pub async fn load_value<T>(&self, source: &dyn ConfigSource) -> Result<Value>
    where
        T: Loadable + Default + serde::Serialize,
    {
        let target: T = self.load_new(source).await?;
        serde_json::to_value(&target).map_err(|source| Error::Serialize {
            type_name: type_name::<T>(),
            source,
        })
    }

    fn entry<T: 'static>(&mut self) -> &mut TypeEntry {
        self.types
            .entry(TypeId::of::<T>())
            .or_insert_with(|| TypeEntry::new(type_name::<T>()))
    }

    /// `id` and its ancestors, root-most first
    fn lineage(&self, id: TypeId) -> Vec<&TypeEntry> {
        let mut chain = Vec::new();
        let mut cursor = self.types.get(&id);
        while let Some(entry) = cursor {
            chain.push(entry);
            cursor = entry.parent.and_then(|parent| self.types.get(&parent));
        }
        chain.reverse();
        chain
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.declared_types())
            .finish()
    }
}
