//! 文档分块器
//!
//! 索引构建时将文档切分为带重叠的文本块。
//! 分隔符按优先级递归下降：段落 > 换行 > 句号 > 空格 > 硬切分。

/// 默认块大小（字符数）
pub const DEFAULT_CHUNK_SIZE: usize = 700;

/// 默认重叠大小（字符数）
pub const DEFAULT_OVERLAP: usize = 150;

/// 分隔符优先级（从强到弱）
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " "];

/// 分块配置
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// 目标块大小（字符数）
    pub chunk_size: usize,
    /// 相邻块之间的重叠（字符数）
    pub overlap: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// 对文档文本进行分块
///
/// 分块策略：
/// 1. 按分隔符优先级将文本递归拆分为不超过 chunk_size 的片段
/// 2. 贪心合并片段，块间携带 overlap 字符的重叠
pub fn split_text(text: &str, config: &SplitConfig) -> Vec<String> {
    let pieces = split_recursive(text, SEPARATORS, config.chunk_size);
    merge_with_overlap(pieces, config)
}

/// 按分隔符递归拆分，保证每个片段不超过 chunk_size
fn split_recursive(text: &str, separators: &[&str], chunk_size: usize) -> Vec<String> {
    if text.chars().count() <= chunk_size {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![trimmed.to_string()];
    }

    let Some((sep, rest)) = separators.split_first() else {
        // 分隔符用尽，按字符硬切分
        return hard_split(text, chunk_size);
    };

    let parts: Vec<&str> = text.split(sep).collect();
    if parts.len() == 1 {
        // 该分隔符不存在，降级到下一个
        return split_recursive(text, rest, chunk_size);
    }

    let mut pieces = Vec::new();
    for part in parts {
        if part.trim().is_empty() {
            continue;
        }
        if part.chars().count() <= chunk_size {
            pieces.push(part.trim().to_string());
        } else {
            pieces.extend(split_recursive(part, rest, chunk_size));
        }
    }
    pieces
}

/// 按字符数硬切分（UTF-8 安全）
fn hard_split(text: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|c| c.iter().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 贪心合并片段为块，块间携带重叠
fn merge_with_overlap(pieces: Vec<String>, config: &SplitConfig) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for piece in pieces {
        let current_len = current.chars().count();
        let piece_len = piece.chars().count();

        // +1 为合并时插入的空格
        if current_len > 0 && current_len + piece_len + 1 > config.chunk_size {
            let tail = overlap_tail(&current, config.overlap);
            chunks.push(std::mem::take(&mut current));
            current = tail;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&piece);
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

/// 取末尾 overlap 字符作为下一块的开头
fn overlap_tail(text: &str, overlap: usize) -> String {
    if overlap == 0 {
        return String::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let start = chars.len().saturating_sub(overlap);
    chars[start..].iter().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_size: usize, overlap: usize) -> SplitConfig {
        SplitConfig {
            chunk_size,
            overlap,
        }
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split_text("Hypertension is high blood pressure.", &SplitConfig::default());
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        let chunks = split_text("   \n\n  ", &SplitConfig::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_paragraphs_split_first() {
        let text = format!("{}\n\n{}", "a".repeat(60), "b".repeat(60));
        let chunks = split_text(&text, &config(80, 0));
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with('a'));
        assert!(chunks[1].starts_with('b'));
    }

    #[test]
    fn test_chunks_respect_size_bound() {
        let sentence = "The heart pumps blood through the body. ";
        let text = sentence.repeat(50);
        let cfg = config(200, 40);
        for chunk in split_text(&text, &cfg) {
            // 重叠前缀 + 片段，上界为 chunk_size + overlap 余量
            assert!(chunk.chars().count() <= cfg.chunk_size + cfg.overlap + 1);
        }
    }

    #[test]
    fn test_overlap_carried_between_chunks() {
        let sentence = "Blood pressure is measured in millimeters of mercury. ";
        let text = sentence.repeat(20);
        let chunks = split_text(&text, &config(200, 50));
        assert!(chunks.len() > 1);
        // 后一块的开头应出现在前一块的末尾
        let tail: String = chunks[0].chars().rev().take(80).collect::<String>();
        let head: String = chunks[1].chars().take(20).collect();
        let tail_rev: String = tail.chars().rev().collect();
        assert!(
            tail_rev.contains(head.trim()),
            "chunk[1] head {:?} not found in chunk[0] tail {:?}",
            head,
            tail_rev
        );
    }

    #[test]
    fn test_hard_split_when_no_separators() {
        let text = "x".repeat(1000);
        let chunks = split_text(&text, &config(300, 0));
        assert!(chunks.len() >= 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 300);
        }
    }
}
