//! Prompt 组装
//!
//! 固定的系统指令 + 检索上下文 + 原始问题

use super::ports::ContextChunk;

/// 医疗助手系统指令
///
/// 低温度 + 简短回答是面向医疗领域的刻意选择，降低幻觉漂移
pub const SYSTEM_PROMPT: &str = "You are a knowledgeable Medical Assistant AI.
Your role:
- Provide accurate medical information based on the context provided
- If the context doesn't contain enough information, clearly say so
- Use 2-3 sentences maximum (concise answers)
- Include relevant medical terminology but explain it simply
- Always recommend consulting a healthcare professional for serious concerns

Important safety guidelines:
- Never diagnose conditions
- Never prescribe medications
- Provide general information only
- Always encourage professional medical consultation for specific health issues

Context from medical documents:
";

/// 组装最终 prompt
///
/// 上下文块按相关度顺序以空行连接，问题原样附在末尾
pub fn assemble_prompt(chunks: &[ContextChunk], question: &str) -> String {
    let context = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}\n\nQuestion: {}", SYSTEM_PROMPT, context, question)
}
