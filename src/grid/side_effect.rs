//! Side effects triggered by a mutation, distinct from the value change
//! itself.

/// One kind of secondary behavior a placement may trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SideEffect {
    /// Notify adjacent cells of the change
    Neighbors,
    /// Recompute connections to attached structures
    Connections,
    /// Recompute lighting, the most expensive side effect
    Lighting,
    /// Schedule a physics update for the cell
    Physics,
    /// Raise host-visible change events
    Events,
}

impl SideEffect {
    /// All side-effect kinds, in bit order
    pub const ALL: [SideEffect; 5] = [
        SideEffect::Neighbors,
        SideEffect::Connections,
        SideEffect::Lighting,
        SideEffect::Physics,
        SideEffect::Events,
    ];

    fn bit(self) -> u8 {
        match self {
            SideEffect::Neighbors => 1 << 0,
            SideEffect::Connections => 1 << 1,
            SideEffect::Lighting => 1 << 2,
            SideEffect::Physics => 1 << 3,
            SideEffect::Events => 1 << 4,
        }
    }
}

/// A set of side-effect kinds, packed into one byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SideEffectSet(u8);

impl SideEffectSet {
    /// The empty set
    pub const NONE: SideEffectSet = SideEffectSet(0);

    /// Every side-effect kind
    pub fn all() -> Self {
        SideEffect::ALL.iter().copied().collect()
    }

    /// A set containing a single kind
    pub fn only(effect: SideEffect) -> Self {
        SideEffectSet(effect.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, effect: SideEffect) -> bool {
        self.0 & effect.bit() != 0
    }

    /// Union with another set
    pub fn union(self, other: SideEffectSet) -> Self {
        SideEffectSet(self.0 | other.0)
    }

    /// Return a copy with the given kind removed
    pub fn without(self, effect: SideEffect) -> Self {
        SideEffectSet(self.0 & !effect.bit())
    }

    /// Return a copy with the given kind added
    pub fn with(self, effect: SideEffect) -> Self {
        SideEffectSet(self.0 | effect.bit())
    }

    /// Iterate over the kinds present in this set
    pub fn iter(self) -> impl Iterator<Item = SideEffect> {
        SideEffect::ALL
            .into_iter()
            .filter(move |e| self.contains(*e))
    }
}

impl FromIterator<SideEffect> for SideEffectSet {
    fn from_iter<T: IntoIterator<Item = SideEffect>>(iter: T) -> Self {
        iter.into_iter()
            .fold(SideEffectSet::NONE, |set, e| set.with(e))
    }
}
