//=========================================================================
// Members View
//=========================================================================
//
// Borrowed, read-only window onto the registry's full set.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashMap};

//=== Internal Dependencies ===============================================

use super::registry::Member;
use super::{InstanceId, ScoreInstance};

//=== Members =============================================================

/// Live view over every registered instance, in registration order.
///
/// Obtained from [`super::ScoreRegistry::members`]. It is not a copy: it
/// borrows the registry's storage, so the borrow checker keeps it from
/// coexisting with a mutation.
#[derive(Debug)]
pub struct Members<'a, H> {
    members: &'a BTreeMap<u64, Member<H>>,
    by_id: &'a HashMap<InstanceId, u64>,
}

impl<'a, H: ScoreInstance> Members<'a, H> {
    pub(super) fn new(
        members: &'a BTreeMap<u64, Member<H>>,
        by_id: &'a HashMap<InstanceId, u64>,
    ) -> Self {
        Self { members, by_id }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Iterates over the instances, earliest registration first.
    pub fn iter(&self) -> impl Iterator<Item = &'a H> + 'a {
        self.members.values().map(|member| &member.instance)
    }
}

// Manual impls: deriving would require `H: Clone`/`H: Copy`.
impl<H> Clone for Members<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Members<'_, H> {}

impl<'a, H: ScoreInstance> IntoIterator for &Members<'a, H> {
    type Item = &'a H;
    type IntoIter = Box<dyn Iterator<Item = &'a H> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use crate::core::score::{InstanceId, ScoreInstance, ScoreKeeper, ScoreRegistry};
    use crate::core::spatial::position;

    fn keeper(raw: u64) -> ScoreKeeper {
        ScoreKeeper::new(InstanceId::from_raw(raw), None, position(0.0, 0.0, 0.0))
    }

    #[test]
    fn view_iterates_in_registration_order() {
        let mut registry = ScoreRegistry::new();
        for raw in [5, 2, 9] {
            registry.register(keeper(raw));
        }

        let ids: Vec<u64> = registry.members().iter().map(|k| k.id().raw()).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn view_reflects_live_state() {
        let mut registry = ScoreRegistry::new();
        let a = keeper(1);
        registry.register(a.clone());

        assert_eq!(registry.members().len(), 1);
        assert!(registry.members().contains(a.id()));

        registry.unregister(&a);
        assert!(registry.members().is_empty());

        registry.register(keeper(2));
        registry.register(keeper(3));
        let view = registry.members();
        assert_eq!(view.len(), 2);
        assert_eq!((&view).into_iter().count(), 2);
    }

    #[test]
    fn view_yields_shared_handles() {
        let mut registry = ScoreRegistry::new();
        let a = keeper(1);
        registry.register(a.clone());

        for member in &registry.members() {
            member.add_points(3);
        }

        assert_eq!(a.points(), 3);
    }
}
