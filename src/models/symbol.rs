use serde::{Deserialize, Serialize};
use std::fmt;

use super::Element;

/// Number of palaces on the hand
pub const SYMBOL_COUNT: usize = 9;

/// The nine palaces walked by the reading, in hand order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    DaAn,
    LiuLian,
    SuXi,
    ChiKou,
    XiaoJi,
    KongWang,
    BingFu,
    TaoHua,
    TianDe,
}

impl Symbol {
    /// Get all symbols in hand order
    pub fn all() -> &'static [Symbol] {
        &[
            Symbol::DaAn,
            Symbol::LiuLian,
            Symbol::SuXi,
            Symbol::ChiKou,
            Symbol::XiaoJi,
            Symbol::KongWang,
            Symbol::BingFu,
            Symbol::TaoHua,
            Symbol::TianDe,
        ]
    }

    /// Resolve a 0-based position to its symbol.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not in `0..=8`. Callers are expected to have
    /// normalized the position already.
    pub fn lookup(position: usize) -> Self {
        assert!(
            position < SYMBOL_COUNT,
            "symbol position {} out of range 0..{}",
            position,
            SYMBOL_COUNT
        );
        Self::all()[position]
    }

    /// Get position (0 = 大安, 8 = 天德)
    pub fn position(&self) -> usize {
        match self {
            Symbol::DaAn => 0,
            Symbol::LiuLian => 1,
            Symbol::SuXi => 2,
            Symbol::ChiKou => 3,
            Symbol::XiaoJi => 4,
            Symbol::KongWang => 5,
            Symbol::BingFu => 6,
            Symbol::TaoHua => 7,
            Symbol::TianDe => 8,
        }
    }

    /// Element the palace belongs to
    pub fn element(&self) -> Element {
        match self {
            Symbol::DaAn => Element::Wood,
            Symbol::LiuLian => Element::Water,
            Symbol::SuXi => Element::Fire,
            Symbol::ChiKou => Element::Metal,
            Symbol::XiaoJi => Element::Water,
            Symbol::KongWang => Element::Earth,
            Symbol::BingFu => Element::Earth,
            Symbol::TaoHua => Element::Wood,
            Symbol::TianDe => Element::Metal,
        }
    }

    /// Chinese display name
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::DaAn => "大安",
            Symbol::LiuLian => "留连",
            Symbol::SuXi => "速喜",
            Symbol::ChiKou => "赤口",
            Symbol::XiaoJi => "小吉",
            Symbol::KongWang => "空亡",
            Symbol::BingFu => "病符",
            Symbol::TaoHua => "桃花",
            Symbol::TianDe => "天德",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_matches_position() {
        for (position, symbol) in Symbol::all().iter().enumerate() {
            assert_eq!(Symbol::lookup(position), *symbol);
            assert_eq!(symbol.position(), position);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = Symbol::all().iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), SYMBOL_COUNT);
    }

    #[test]
    fn test_every_element_is_used() {
        let elements: HashSet<Element> = Symbol::all().iter().map(|s| s.element()).collect();
        assert_eq!(elements.len(), Element::all().len());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_lookup_out_of_range_panics() {
        Symbol::lookup(SYMBOL_COUNT);
    }
}
