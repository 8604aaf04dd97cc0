//! Query - 值对象

/// 用户查询
///
/// 保存原始输入字符串（不做任何规范化），仅校验非空。
/// 缓存 key 基于原始字符串计算，大小写和空白均敏感。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(raw: impl Into<String>) -> Result<Self, &'static str> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err("查询内容不能为空");
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_query() {
        let q = Query::new("What is hypertension?").unwrap();
        assert_eq!(q.as_str(), "What is hypertension?");
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(Query::new("").is_err());
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert!(Query::new("   \t\n").is_err());
    }

    #[test]
    fn test_raw_string_preserved() {
        // 前后空白不会被裁剪，缓存 key 依赖原始字节
        let q = Query::new("  What is BP?  ").unwrap();
        assert_eq!(q.as_str(), "  What is BP?  ");
    }
}
