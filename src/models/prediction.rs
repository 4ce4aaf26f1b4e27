use serde::Serialize;

use super::{relation_of, Element, Relation, Symbol};

/// One three-transmission draw: 初传, 中传 and 末传 plus the relation
/// between each consecutive pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub symbols: [Symbol; 3],
    pub relations: [Relation; 2],
}

impl Prediction {
    /// Build a prediction, deriving relations from the symbols' elements
    pub fn from_symbols(symbols: [Symbol; 3]) -> Self {
        let relations = [
            relation_of(symbols[0].element(), symbols[1].element()),
            relation_of(symbols[1].element(), symbols[2].element()),
        ];
        Self { symbols, relations }
    }

    pub fn initial(&self) -> Symbol {
        self.symbols[0]
    }

    pub fn middle(&self) -> Symbol {
        self.symbols[1]
    }

    pub fn last(&self) -> Symbol {
        self.symbols[2]
    }
}

/// A symbol as reported to MCP clients
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct DrawnSymbol {
    pub position: usize,
    pub name: String,
    pub element: Element,
    pub element_name: String,
}

impl From<Symbol> for DrawnSymbol {
    fn from(symbol: Symbol) -> Self {
        Self {
            position: symbol.position(),
            name: symbol.name().to_string(),
            element: symbol.element(),
            element_name: symbol.element().name().to_string(),
        }
    }
}

/// Relation between two consecutive symbols as reported to MCP clients
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct DrawnRelation {
    pub relation: Relation,
    pub label: String,
}

impl From<Relation> for DrawnRelation {
    fn from(relation: Relation) -> Self {
        Self {
            relation,
            label: relation.label().to_string(),
        }
    }
}

/// Serializable summary of a prediction
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct PredictionSummary {
    pub initial: DrawnSymbol,
    pub middle: DrawnSymbol,
    pub last: DrawnSymbol,
    pub relations: Vec<DrawnRelation>,
}

impl From<&Prediction> for PredictionSummary {
    fn from(prediction: &Prediction) -> Self {
        Self {
            initial: prediction.initial().into(),
            middle: prediction.middle().into(),
            last: prediction.last().into(),
            relations: prediction.relations.iter().map(|r| (*r).into()).collect(),
        }
    }
}
