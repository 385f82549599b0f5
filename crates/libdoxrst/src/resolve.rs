//! Effective member sets: local members plus whatever a class inherits.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    error::{DoxRstError, Result},
    model::{CompoundDef, MemberCategory, MemberDef},
    store::DocumentStore,
};

/// Members keyed by short name, in accumulation order.
///
/// Accumulation order only decides which definition wins a name; use
/// [`MemberMap::sorted`] for presentation.
#[derive(Debug, Clone, Default)]
pub struct MemberMap {
    /// Entries in insertion order.
    entries: IndexMap<String, Rc<MemberDef>>,
}

impl MemberMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `member` under its short name, replacing an existing entry.
    pub fn insert(&mut self, member: Rc<MemberDef>) {
        self.entries.insert(member.name.clone(), member);
    }

    /// Record `member` only if its short name is not present yet. Returns
    /// whether it was added.
    pub fn insert_if_absent(&mut self, member: Rc<MemberDef>) -> bool {
        if self.entries.contains_key(&member.name) {
            return false;
        }
        self.entries.insert(member.name.clone(), member);
        true
    }

    /// Look up a member by short name.
    pub fn get(&self, name: &str) -> Option<&Rc<MemberDef>> {
        self.entries.get(name)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Short names in accumulation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Members ordered lexicographically by short name.
    pub fn sorted(&self) -> Vec<Rc<MemberDef>> {
        let mut members: Vec<_> = self.entries.values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }
}

/// Compute the effective members of `compound` in `category`.
///
/// Locally declared members always win. Inherited members are pulled from
/// each base in declaration order, and an earlier base wins over a later one.
/// Private and static categories are never inherited.
pub fn resolve(
    store: &dyn DocumentStore,
    compound: &CompoundDef,
    category: &MemberCategory,
) -> Result<MemberMap> {
    let mut chain = Vec::new();
    resolve_in(store, compound, category, &mut chain)
}

/// Recursive step of [`resolve`]. `chain` holds the ids of the compounds
/// currently being resolved, outermost first.
fn resolve_in(
    store: &dyn DocumentStore,
    compound: &CompoundDef,
    category: &MemberCategory,
    chain: &mut Vec<String>,
) -> Result<MemberMap> {
    if chain.contains(&compound.id) {
        let mut cycle = chain.clone();
        cycle.push(compound.id.clone());
        return Err(DoxRstError::CyclicInheritance(cycle));
    }

    let mut members = MemberMap::new();
    for member in compound.members_in(category) {
        members.insert(Rc::clone(member));
    }

    if !category.is_inheritable() {
        return Ok(members);
    }

    chain.push(compound.id.clone());
    for base in &compound.bases {
        let base_def = store.compound(base.required_refid()?)?;
        let inherited = resolve_in(store, &base_def, category, chain)?;
        for member in inherited.entries.into_values() {
            if members.insert_if_absent(member) {
                debug!("{}: inherits {} from {}", compound.name, category, base_def.name);
            }
        }
    }
    chain.pop();

    Ok(members)
}
