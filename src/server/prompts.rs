//! MCP prompt templates

use serde::{Deserialize, Deserializer};

use crate::models::GUEST_NAME;

pub const DEFAULT_HELLO_TIMES: i64 = 3;

/// Arguments of the call_hello_multiple prompt
#[derive(Debug, Clone, Deserialize)]
pub struct CallHelloMultipleArgs {
    pub name: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub times: Option<i64>,
}

/// Prompt arguments travel as strings; accept plain numbers too. Range is
/// enforced later by clamping, not here.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("times must be a number, got '{}'", text))),
    }
}

/// Build the task text asking the client to call `hello` several times.
///
/// `times` is clamped to `1..=max_times`.
pub fn call_hello_multiple(name: &str, times: i64, max_times: u32) -> String {
    let name = match name.trim() {
        "" => GUEST_NAME,
        trimmed => trimmed,
    };
    let times = times.clamp(1, i64::from(max_times.max(1)));

    let mut prompt = format!(
        "🎯 **Hello 工具测试任务**\n\n\
         您需要使用 `hello` 工具打招呼 **{times}** 次。\n\n\
         ## 📝 任务参数\n\
         - **name**: \"{name}\"\n\
         - **调用次数**: {times}\n\n\
         ## 🔄 期望的调用序列\n"
    );

    for i in 1..=times {
        prompt.push_str(&format!("\n{}. `hello(\"{}\")`", i, name));
    }

    prompt.push_str(&format!(
        "\n\n## ✅ 完成标准\n\
         1. 成功调用 hello 工具 {times} 次\n\
         2. 每次调用都使用名字 \"{name}\"\n\
         3. 收集所有响应结果\n\
         4. 总结调用结果，包括：\n   \
            - 成功调用的次数\n   \
            - 每次调用的响应状态\n   \
            - 任何错误或异常情况\n\n\
         ## 💡 提示\n\
         这个任务用于测试 MCP 工具的多次调用功能，确保客户端能够正确处理重复的工具调用。"
    ));

    prompt
}
