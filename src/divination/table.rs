//! Tabular presentation of a prediction

use serde::Serialize;
use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::models::Prediction;

pub const TABLE_TITLE: &str = "小六壬三传占卜";

pub const TABLE_COLUMNS: [&str; 5] = [
    "初传（前期）",
    "关系",
    "中传（中期）",
    "关系",
    "末传（后期）",
];

/// Five columns (initial, relation, middle, relation, last) and three rows
/// (symbol names, elements, relation arrows)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct PredictionTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PredictionTable {
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let [first, second, third] = prediction.symbols;
        let [relation1, relation2] = prediction.relations;

        let rows = vec![
            vec![
                format!("【{}】", first.name()),
                String::new(),
                format!("【{}】", second.name()),
                String::new(),
                format!("【{}】", third.name()),
            ],
            vec![
                format!("（{}）", first.element().name()),
                String::new(),
                format!("（{}）", second.element().name()),
                String::new(),
                format!("（{}）", third.element().name()),
            ],
            vec![
                String::new(),
                format!("{}→", relation1.label()),
                String::new(),
                format!("{}→", relation2.label()),
                String::new(),
            ],
        ];

        Self {
            title: TABLE_TITLE.to_string(),
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| display_width(cell))
                    .chain(std::iter::once(display_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for PredictionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const GAP: &str = "  ";

        let widths = self.column_widths();
        let total = widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1);

        writeln!(f, "{}", center(&self.title, total))?;

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(cell, width)| center(cell, *width))
            .collect();
        writeln!(f, "{}", header.join(GAP).trim_end())?;
        writeln!(f, "{}", "─".repeat(total))?;

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| center(cell, *width))
                .collect();
            writeln!(f, "{}", cells.join(GAP).trim_end())?;
        }

        Ok(())
    }
}

/// Terminal column width (East Asian wide characters count as two)
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    let left = padding / 2;
    let right = padding - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
