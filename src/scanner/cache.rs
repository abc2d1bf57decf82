#![forbid(unsafe_code)]

//! Process-wide, build-once storage of compiled registries
//!
//! Rust has no generic statics, so each scanner type gets a slot in one map
//! keyed by `TypeId`. Slots and the registries published in them are leaked
//! and live for the rest of the process; a published registry is never
//! mutated.
//!
//! The map lock is held only to fetch or insert a slot. Building runs under
//! the slot's own lock, so concurrent first users of one type wait for a
//! single build, while building a subtype can still build its ancestors
//! through their own slots. A failed build publishes nothing and the next
//! caller builds again.

use crate::error::RegistryError;
use crate::scanner::{Compiled, Declarations, Scanner};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError, RwLock};

type Entry = &'static (dyn Any + Send + Sync);

#[derive(Default)]
struct Slot {
    published: OnceLock<Entry>,
    building: Mutex<()>,
}

fn slots() -> &'static RwLock<HashMap<TypeId, &'static Slot>> {
    static SLOTS: OnceLock<RwLock<HashMap<TypeId, &'static Slot>>> = OnceLock::new();
    SLOTS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn slot(id: TypeId) -> &'static Slot {
    let existing = slots()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .copied();
    if let Some(slot) = existing {
        return slot;
    }

    *slots()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id)
        .or_insert_with(|| {
            let leaked: &'static Slot = Box::leak(Box::default());
            leaked
        })
}

/// Compiled registry for `S`, built on first use
pub(crate) fn compiled<S: Scanner>() -> Result<&'static Compiled<S>, RegistryError> {
    let slot = slot(TypeId::of::<S>());
    if let Some(&entry) = slot.published.get() {
        return Ok(downcast(entry));
    }

    let _building = slot.building.lock().unwrap_or_else(PoisonError::into_inner);
    // Another thread may have published while this one waited
    if let Some(&entry) = slot.published.get() {
        return Ok(downcast(entry));
    }

    let leaked: Entry = Box::leak(Box::new(build::<S>()?));
    let entry = *slot.published.get_or_init(|| leaked);
    Ok(downcast(entry))
}

/// Builds the registry for `S` without consulting or filling the cache
pub(crate) fn build<S: Scanner>() -> Result<Compiled<S>, RegistryError> {
    let mut decls = Declarations::new();
    S::declare(&mut decls);
    decls.compile(short_type_name::<S>())
}

fn downcast<S: Scanner>(entry: Entry) -> &'static Compiled<S> {
    match entry.downcast_ref::<Compiled<S>>() {
        Some(compiled) => compiled,
        // Keys are the TypeId of the stored value's scanner type
        None => unreachable!("registry cache entry has the wrong type"),
    }
}

/// `crate::module::Type<Arg>` -> `Type<Arg>`
fn short_type_name<S>() -> &'static str {
    let full = std::any::type_name::<S>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
