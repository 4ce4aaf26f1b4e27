//! The five elements (五行) and their generating/overcoming cycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five elements in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Get all elements in cycle order
    pub fn all() -> &'static [Element] {
        &[
            Element::Wood,
            Element::Fire,
            Element::Earth,
            Element::Metal,
            Element::Water,
        ]
    }

    /// Get element from its place in the cycle (wraps around)
    pub fn from_index(index: usize) -> Self {
        match index % 5 {
            0 => Element::Wood,
            1 => Element::Fire,
            2 => Element::Earth,
            3 => Element::Metal,
            4 => Element::Water,
            _ => unreachable!(),
        }
    }

    /// Get cycle index (0 = Wood, 4 = Water)
    pub fn index(&self) -> usize {
        match self {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }

    /// The element this one produces (its successor in the cycle)
    pub fn generates(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element this one suppresses (two steps ahead in the cycle)
    pub fn overcomes(&self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Chinese display name
    pub fn name(&self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Directional relation from one element to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Generates,
    Overcomes,
    Neutral,
}

impl Relation {
    /// Single-character label used in the reading table
    pub fn label(&self) -> &'static str {
        match self {
            Relation::Generates => "生",
            Relation::Overcomes => "克",
            Relation::Neutral => "无",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify the relation of `from` towards `to`.
///
/// Evaluated in one direction only: `relation_of(a, b)` and `relation_of(b, a)`
/// generally differ.
pub fn relation_of(from: Element, to: Element) -> Relation {
    if from.generates() == to {
        Relation::Generates
    } else if from.overcomes() == to {
        Relation::Overcomes
    } else {
        Relation::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generating_cycle() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Fire.generates(), Element::Earth);
        assert_eq!(Element::Earth.generates(), Element::Metal);
        assert_eq!(Element::Metal.generates(), Element::Water);
        assert_eq!(Element::Water.generates(), Element::Wood);
    }

    #[test]
    fn test_overcoming_cycle() {
        assert_eq!(Element::Wood.overcomes(), Element::Earth);
        assert_eq!(Element::Fire.overcomes(), Element::Metal);
        assert_eq!(Element::Earth.overcomes(), Element::Water);
        assert_eq!(Element::Metal.overcomes(), Element::Wood);
        assert_eq!(Element::Water.overcomes(), Element::Fire);
    }

    #[test]
    fn test_relation_is_directional() {
        assert_eq!(relation_of(Element::Wood, Element::Fire), Relation::Generates);
        assert_eq!(relation_of(Element::Fire, Element::Wood), Relation::Neutral);
        assert_eq!(relation_of(Element::Metal, Element::Wood), Relation::Overcomes);
        assert_eq!(relation_of(Element::Wood, Element::Metal), Relation::Neutral);
    }

    #[test]
    fn test_self_relation_is_neutral() {
        for element in Element::all() {
            assert_eq!(relation_of(*element, *element), Relation::Neutral);
        }
    }

    #[test]
    fn test_relations_partition_all_pairs() {
        let mut generates = 0;
        let mut overcomes = 0;
        let mut neutral = 0;

        for a in Element::all() {
            for b in Element::all() {
                match relation_of(*a, *b) {
                    Relation::Generates => {
                        assert_eq!(a.generates(), *b);
                        generates += 1;
                    }
                    Relation::Overcomes => {
                        assert_eq!(a.overcomes(), *b);
                        overcomes += 1;
                    }
                    Relation::Neutral => neutral += 1,
                }
            }
        }

        assert_eq!((generates, overcomes, neutral), (5, 5, 15));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Relation::Generates.to_string(), "生");
        assert_eq!(Relation::Overcomes.to_string(), "克");
        assert_eq!(Relation::Neutral.to_string(), "无");
        assert_eq!(Element::Water.to_string(), "水");
    }
}
