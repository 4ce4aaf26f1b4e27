//! Xiao liu ren three-transmission divination
//!
//! One pure computation ([`generate_prediction`] + [`PredictionTable`]) shared by
//! a blocking entry point ([`predict`]) and an async one ([`predict_async`]).
//! They differ only in how the optional interpretation is obtained.

pub mod interpretation;
pub mod predictor;
pub mod table;

pub use interpretation::*;
pub use predictor::*;
pub use table::*;

use crate::error::Result;
use crate::models::Prediction;

/// Outcome of one reading
#[derive(Debug)]
pub struct Reading {
    pub prediction: Prediction,
    pub table: PredictionTable,
    /// `None` when no question was asked. A failed interpretation does not
    /// invalidate the table.
    pub interpretation: Option<Result<String>>,
}

fn question_text(question: Option<&str>) -> Option<&str> {
    question.map(str::trim).filter(|q| !q.is_empty())
}

fn compute(num1: i64, num2: i64, num3: i64) -> Result<(Prediction, PredictionTable)> {
    let prediction = generate_prediction(num1, num2, num3)?;
    let table = PredictionTable::from_prediction(&prediction);
    Ok((prediction, table))
}

/// Blocking reading. The interpreter is only called for a non-blank question.
pub fn predict(
    num1: i64,
    num2: i64,
    num3: i64,
    question: Option<&str>,
    interpreter: &dyn BlockingInterpreter,
) -> Result<Reading> {
    let (prediction, table) = compute(num1, num2, num3)?;

    let interpretation =
        question_text(question).map(|q| interpreter.interpret_blocking(&prediction, q));

    Ok(Reading {
        prediction,
        table,
        interpretation,
    })
}

/// Async reading. The interpreter is only awaited for a non-blank question.
pub async fn predict_async(
    num1: i64,
    num2: i64,
    num3: i64,
    question: Option<&str>,
    interpreter: &dyn Interpreter,
) -> Result<Reading> {
    let (prediction, table) = compute(num1, num2, num3)?;

    let interpretation = match question_text(question) {
        Some(q) => Some(interpreter.interpret(&prediction, q).await),
        None => None,
    };

    Ok(Reading {
        prediction,
        table,
        interpretation,
    })
}
