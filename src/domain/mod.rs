//! Domain Layer - 领域层
//!
//! 纯领域类型（无 I/O）:
//! - Query: 用户查询值对象
//! - 文档分块器（索引构建时使用）

mod query;
mod text_splitter;

pub use query::Query;
pub use text_splitter::{split_text, SplitConfig};
