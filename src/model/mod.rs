//! 数据层：字段模型、Schema 树状态与预览序列化

pub mod field;
pub mod field_path;
pub mod field_rows;
pub mod performance;
pub mod schema_tree;
pub mod serializer;
