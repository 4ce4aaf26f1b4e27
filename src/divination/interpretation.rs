//! Seams for the external text-generation collaborator that explains a reading

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::Prediction;

/// Instruction given to the model before the reading itself
pub const SYSTEM_PROMPT: &str = "你是一位精通小六壬的占卜师。请根据三传（初传、中传、末传）的宫位、\
五行属性以及相邻两传之间的生克关系，结合求测者的问题，给出简明、具体的解读，\
分别说明前期、中期、后期的走势，并给出建议。";

/// Asynchronous interpreter, used by the MCP server
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Explain `prediction` in answer to `question`
    async fn interpret(&self, prediction: &Prediction, question: &str) -> Result<String>;
}

/// Blocking interpreter, used by synchronous callers
pub trait BlockingInterpreter {
    fn interpret_blocking(&self, prediction: &Prediction, question: &str) -> Result<String>;
}

/// Drive an async [`Interpreter`] to completion on a private runtime.
///
/// Must not be used from inside a Tokio runtime.
pub struct BlockOn<I>(pub I);

impl<I: Interpreter> BlockingInterpreter for BlockOn<I> {
    fn interpret_blocking(&self, prediction: &Prediction, question: &str) -> Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Interpretation(format!("Failed to start runtime: {}", e)))?;
        runtime.block_on(self.0.interpret(prediction, question))
    }
}

/// Describe the reading and the question for the model
pub fn build_user_prompt(prediction: &Prediction, question: &str) -> String {
    let [first, second, third] = prediction.symbols;
    let [relation1, relation2] = prediction.relations;

    format!(
        "求测问题：{question}\n\n\
         三传结果：\n\
         - 初传（前期）：{}（{}）\n\
         - 中传（中期）：{}（{}）\n\
         - 末传（后期）：{}（{}）\n\n\
         生克关系：\n\
         - 初传 → 中传：{}\n\
         - 中传 → 末传：{}\n\n\
         请给出解读。",
        first.name(),
        first.element().name(),
        second.name(),
        second.element().name(),
        third.name(),
        third.element().name(),
        relation1.label(),
        relation2.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divination::generate_prediction;

    struct Canned;

    #[async_trait]
    impl Interpreter for Canned {
        async fn interpret(&self, prediction: &Prediction, question: &str) -> Result<String> {
            Ok(format!("{}:{}", prediction.initial(), question))
        }
    }

    #[test]
    fn test_user_prompt_lists_reading() {
        let prediction = generate_prediction(9, 9, 9).unwrap();
        let prompt = build_user_prompt(&prediction, "事业如何？");

        assert!(prompt.contains("求测问题：事业如何？"));
        assert!(prompt.contains("初传（前期）：天德（金）"));
        assert!(prompt.contains("中传（中期）：桃花（木）"));
        assert!(prompt.contains("末传（后期）：病符（土）"));
        assert!(prompt.contains("初传 → 中传：克"));
    }

    #[test]
    fn test_block_on_runs_async_interpreter() {
        let prediction = generate_prediction(1, 1, 1).unwrap();
        let text = BlockOn(Canned)
            .interpret_blocking(&prediction, "q")
            .unwrap();
        assert_eq!(text, "大安:q");
    }
}
