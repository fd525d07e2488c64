//=========================================================================
// Lookup Engine
//=========================================================================
//
// Nearest-instance queries over the registry, global or group-scoped.
//
// Candidates are visited in registration order and compared by squared
// distance with a strict `<`, so on equal distances the earliest
// registration wins. A NaN distance ranks after every finite one.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::registry::ScoreRegistry;
use super::{non_empty, ScoreInstance};
use crate::core::spatial::{squared_distance, Position};

//=== Lookup API ==========================================================

impl<H: ScoreInstance> ScoreRegistry<H> {
    /// Returns the registered instance nearest to `origin`.
    ///
    /// Without an origin, returns the earliest registered instance.
    /// Returns `None` if the registry is empty.
    pub fn find_closest(&self, origin: Option<Position>) -> Option<&H> {
        closest(self.members().iter(), origin)
    }

    /// Returns the instance in `group` nearest to `origin`.
    ///
    /// An absent or empty `group` searches the whole registry, exactly like
    /// [`find_closest`](Self::find_closest). Returns `None` if the group has
    /// no members.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minigame_registry::prelude::*;
    ///
    /// let mut ids = InstanceIdAllocator::new();
    /// let mut registry = ScoreRegistry::new();
    /// let near = ScoreKeeper::new(ids.next_id(), Some("x"), position(0.0, 0.0, 0.0));
    /// let far = ScoreKeeper::new(ids.next_id(), Some("x"), position(10.0, 0.0, 0.0));
    /// registry.register(near.clone());
    /// registry.register(far.clone());
    ///
    /// let hit = registry.find_closest_in_group(Some("x"), Some(position(9.0, 0.0, 0.0)));
    /// assert_eq!(hit.map(|k| k.id()), Some(far.id()));
    /// assert!(registry.find_closest_in_group(Some("missing"), None).is_none());
    /// ```
    pub fn find_closest_in_group(
        &self,
        group: Option<&str>,
        origin: Option<Position>,
    ) -> Option<&H> {
        match non_empty(group) {
            None => self.find_closest(origin),
            Some(key) => closest(self.group_members(key), origin),
        }
    }

    /// Iterates over the members of `group`, earliest registration first.
    ///
    /// Yields nothing for an unknown group.
    pub fn group_members<'a>(&'a self, group: &str) -> impl Iterator<Item = &'a H> + 'a {
        self.groups
            .get(group)
            .into_iter()
            .flatten()
            .filter_map(move |seq| self.members.get(seq))
            .map(|member| &member.instance)
    }
}

//=== Internal Helpers ====================================================

/// Picks the candidate nearest to `origin`; first candidate when no origin.
fn closest<'a, H, I>(mut candidates: I, origin: Option<Position>) -> Option<&'a H>
where
    H: ScoreInstance + 'a,
    I: Iterator<Item = &'a H>,
{
    let Some(origin) = origin else {
        return candidates.next();
    };

    let mut best: Option<(&'a H, f32)> = None;
    for candidate in candidates {
        let distance = squared_distance(&candidate.position(), &origin);
        let improves = match best {
            None => true,
            Some((_, best_distance)) => {
                distance < best_distance || (best_distance.is_nan() && !distance.is_nan())
            }
        };
        if improves {
            best = Some((candidate, distance));
        }
    }

    best.map(|(instance, _)| instance)
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use crate::core::score::{InstanceId, ScoreInstance, ScoreKeeper, ScoreRegistry};
    use crate::core::spatial::{position, squared_distance, Position};

    //--- Test Helpers -----------------------------------------------------

    fn keeper(raw: u64, group: Option<&str>, at: Position) -> ScoreKeeper {
        ScoreKeeper::new(InstanceId::from_raw(raw), group, at)
    }

    fn id_of(hit: Option<&ScoreKeeper>) -> Option<u64> {
        hit.map(|k| k.id().raw())
    }

    fn origin() -> Option<Position> {
        Some(position(0.0, 0.0, 0.0))
    }

    //=====================================================================
    // Empty / Missing
    //=====================================================================

    #[test]
    fn empty_registry_returns_none() {
        let registry: ScoreRegistry<ScoreKeeper> = ScoreRegistry::new();
        assert!(registry.find_closest(None).is_none());
        assert!(registry.find_closest(origin()).is_none());
        assert!(registry.find_closest_in_group(Some("x"), origin()).is_none());
    }

    #[test]
    fn missing_group_returns_none() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(1, Some("x"), position(0.0, 0.0, 0.0)));

        assert!(registry.find_closest_in_group(Some("missingId"), origin()).is_none());
        assert!(registry.find_closest_in_group(Some("missingId"), None).is_none());
    }

    #[test]
    fn group_emptied_by_unregister_returns_none() {
        let mut registry = ScoreRegistry::new();
        let a = keeper(1, Some("x"), position(0.0, 0.0, 0.0));
        registry.register(a.clone());
        registry.register(keeper(2, Some("y"), position(0.0, 0.0, 0.0)));
        registry.unregister(&a);

        assert!(registry.find_closest_in_group(Some("x"), origin()).is_none());
    }

    //=====================================================================
    // Global Lookup
    //=====================================================================

    #[test]
    fn no_origin_returns_some_member() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(7, None, position(5.0, 5.0, 5.0)));
        registry.register(keeper(3, None, position(0.0, 0.0, 0.0)));

        assert_eq!(id_of(registry.find_closest(None)), Some(7));
    }

    #[test]
    fn closest_is_minimal_over_all_members() {
        let mut registry = ScoreRegistry::new();
        let points = [
            (4.0, 1.0, -2.0),
            (-3.0, 0.5, 0.0),
            (0.25, -0.75, 1.5),
            (9.0, 9.0, 9.0),
            (-1.0, -1.0, -1.0),
        ];
        for (i, (x, y, z)) in points.into_iter().enumerate() {
            registry.register(keeper(i as u64, None, position(x, y, z)));
        }

        let from = position(0.5, -0.5, 0.5);
        let hit = registry.find_closest(Some(from)).expect("registry is not empty");
        let best = squared_distance(&hit.position(), &from);

        for member in &registry.members() {
            assert!(best <= squared_distance(&member.position(), &from));
        }
    }

    #[test]
    fn ties_resolve_to_earliest_registration() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(9, None, position(1.0, 0.0, 0.0)));
        registry.register(keeper(2, None, position(-1.0, 0.0, 0.0)));
        registry.register(keeper(5, None, position(0.0, 1.0, 0.0)));

        assert_eq!(id_of(registry.find_closest(origin())), Some(9));
    }

    #[test]
    fn nan_position_never_beats_finite_one() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(1, None, position(1.0, 0.0, 0.0)));
        registry.register(keeper(2, None, position(f32::NAN, 0.0, 0.0)));
        registry.register(keeper(3, None, position(100.0, 0.0, 0.0)));

        assert_eq!(id_of(registry.find_closest(origin())), Some(1));
    }

    #[test]
    fn nan_position_registered_first_is_overtaken() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(1, Some("x"), position(f32::NAN, 0.0, 0.0)));
        registry.register(keeper(2, Some("x"), position(100.0, 0.0, 0.0)));
        registry.register(keeper(3, Some("x"), position(5.0, 0.0, 0.0)));

        assert_eq!(id_of(registry.find_closest_in_group(Some("x"), origin())), Some(3));
    }

    #[test]
    fn only_nan_positions_still_return_a_member() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(4, None, position(f32::NAN, 0.0, 0.0)));
        registry.register(keeper(5, None, position(0.0, f32::NAN, 0.0)));

        assert_eq!(id_of(registry.find_closest(origin())), Some(4));
    }

    #[test]
    fn positions_are_read_fresh() {
        let mut registry = ScoreRegistry::new();
        let a = keeper(1, None, position(0.0, 0.0, 0.0));
        let b = keeper(2, None, position(5.0, 0.0, 0.0));
        registry.register(a.clone());
        registry.register(b.clone());

        assert_eq!(id_of(registry.find_closest(origin())), Some(1));

        a.set_position(position(50.0, 0.0, 0.0));
        assert_eq!(id_of(registry.find_closest(origin())), Some(2));
    }

    //=====================================================================
    // Group Lookup
    //=====================================================================

    #[test]
    fn empty_group_key_searches_everything() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(1, Some("x"), position(5.0, 0.0, 0.0)));
        registry.register(keeper(2, None, position(1.0, 0.0, 0.0)));

        assert_eq!(id_of(registry.find_closest_in_group(None, origin())), Some(2));
        assert_eq!(id_of(registry.find_closest_in_group(Some(""), origin())), Some(2));
    }

    #[test]
    fn group_lookup_ignores_other_groups() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(1, Some("y"), position(0.0, 0.0, 0.0)));
        registry.register(keeper(2, Some("x"), position(100.0, 0.0, 0.0)));

        assert_eq!(id_of(registry.find_closest_in_group(Some("x"), origin())), Some(2));
        assert_eq!(id_of(registry.find_closest_in_group(Some("x"), None)), Some(2));
    }

    #[test]
    fn group_members_in_registration_order() {
        let mut registry = ScoreRegistry::new();
        registry.register(keeper(4, Some("x"), position(0.0, 0.0, 0.0)));
        registry.register(keeper(1, Some("y"), position(0.0, 0.0, 0.0)));
        registry.register(keeper(8, Some("x"), position(0.0, 0.0, 0.0)));

        let ids: Vec<u64> = registry.group_members("x").map(|k| k.id().raw()).collect();
        assert_eq!(ids, vec![4, 8]);
        assert_eq!(registry.group_members("nope").count(), 0);
    }

    //=====================================================================
    // Scenario
    //=====================================================================

    #[test]
    fn three_keeper_scenario() {
        let mut registry = ScoreRegistry::new();
        let a = keeper(1, Some("x"), position(0.0, 0.0, 0.0));
        let b = keeper(2, Some("x"), position(10.0, 0.0, 0.0));
        let c = keeper(3, Some("y"), position(1.0, 0.0, 0.0));
        registry.register(a.clone());
        registry.register(b.clone());
        registry.register(c.clone());

        assert_eq!(id_of(registry.find_closest(origin())), Some(1));
        assert_eq!(
            id_of(registry.find_closest_in_group(Some("x"), Some(position(9.0, 0.0, 0.0)))),
            Some(2)
        );
        assert_eq!(id_of(registry.find_closest_in_group(Some("y"), origin())), Some(3));

        registry.unregister(&a);
        assert_eq!(id_of(registry.find_closest(origin())), Some(3));
    }
}
