//! JSON Schema 构建工具库
//!
//! 提供字段树编辑、按路径寻址的增删改，以及实时JSON预览生成
//! 遵循MVVM架构模式，UI层只通过 SchemaTree 的操作修改状态

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::field::{Field, FieldId, FieldType};
pub use model::field_path::FieldPath;
pub use model::field_rows::{flatten_fields, FieldRow};
pub use model::schema_tree::{SchemaError, SchemaTree, Submission};
pub use model::serializer::{serialize, to_pretty};
