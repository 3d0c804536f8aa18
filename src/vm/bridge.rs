//! VM桥接层：连接Slint UI与SchemaTree
//!
//! 注意：回调绑定在main.rs中，因为依赖于Slint生成的类型
//! 这里提供公共常量与不依赖UI类型的辅助函数

use crate::model::field::FieldType;

// === 常量定义（消除魔法值） ===
pub const STATUS_READY: &str = "就绪";
pub const STATUS_FIELD_ADDED: &str = "已添加字段";
pub const STATUS_CHILD_ADDED: &str = "已添加子字段";
pub const STATUS_FIELD_DELETED: &str = "已删除字段";
pub const STATUS_SUBMITTED: &str = "Schema 已提交";
pub const STATUS_COPIED: &str = "预览已复制到剪贴板";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

pub const SUBMIT_DIALOG_TITLE: &str = "提交成功";
pub const SUBMIT_DIALOG_TEXT: &str = "Schema submitted!";

/// 每级嵌套的缩进（逻辑像素）
pub const INDENT_PER_LEVEL: f32 = 40.0;

/// 下拉框选项文本，顺序与 FieldType::ALL 一致
pub fn field_type_options() -> Vec<&'static str> {
    FieldType::ALL.iter().map(FieldType::as_str).collect()
}

/// 状态栏错误文本
pub fn error_status(err: &impl std::fmt::Display) -> String {
    format!("{}{}", STATUS_ERROR_PREFIX, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_options_order() {
        assert_eq!(
            field_type_options(),
            vec!["nested", "string", "number", "objectId", "float", "boolean"]
        );
    }

    #[test]
    fn test_error_status_prefix() {
        assert_eq!(error_status(&"下标越界"), "错误: 下标越界");
    }
}
