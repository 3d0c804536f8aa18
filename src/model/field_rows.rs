//! 行投影：把字段森林拍平成带深度的行列表，供列表式 UI 逐行渲染

use crate::model::field::{Field, FieldId, FieldType};
use crate::model::field_path::FieldPath;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub id: FieldId,
    /// 回调寻址用的路径
    pub path: FieldPath,
    pub name: String,
    pub kind: FieldType,
    pub required: bool,
    /// 节点深度（用于UI缩进显示，顶层为0）
    pub depth: u32,
}

impl FieldRow {
    pub fn is_nested(&self) -> bool {
        self.kind.is_nested()
    }
}

/// 深度优先前序展开；只在 nested 字段下继续展开子字段
pub fn flatten_fields(fields: &[Field]) -> Vec<FieldRow> {
    fn walk(out: &mut Vec<FieldRow>, fields: &[Field], parent: Option<&FieldPath>, depth: u32) {
        for (index, field) in fields.iter().enumerate() {
            let path = match parent {
                Some(p) => p.child(index),
                None => FieldPath::root(index),
            };
            out.push(FieldRow {
                id: field.id,
                path: path.clone(),
                name: field.name.clone(),
                kind: field.kind,
                required: field.required,
                depth,
            });
            if field.kind.is_nested() {
                walk(out, field.children(), Some(&path), depth + 1);
            }
        }
    }

    let mut out = Vec::with_capacity(fields.len());
    walk(&mut out, fields, None, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: u64, name: &str, kind: FieldType) -> Field {
        Field::new(FieldId(id)).with_name(name).with_type(kind)
    }

    #[test]
    fn test_flat_forest_rows() {
        let fields = vec![named(1, "name", FieldType::String), named(2, "age", FieldType::Number)];

        let rows = flatten_fields(&fields);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].path.to_string(), "0");
        assert_eq!(rows[1].path.to_string(), "1");
        assert!(rows.iter().all(|r| r.depth == 0), "顶层字段深度应为0");
    }

    #[test]
    fn test_nested_rows_in_pre_order() {
        let fields = vec![
            named(1, "user", FieldType::Nested).with_children(vec![
                named(2, "profile", FieldType::Nested)
                    .with_children(vec![named(3, "bio", FieldType::String)]),
                named(4, "email", FieldType::String),
            ]),
            named(5, "active", FieldType::Boolean),
        ];

        let rows = flatten_fields(&fields);

        let paths: Vec<String> = rows.iter().map(|r| r.path.to_string()).collect();
        assert_eq!(paths, vec!["0", "0.0", "0.0.0", "0.1", "1"]);
        let depths: Vec<u32> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0]);
        assert!(rows[1].is_nested());
        assert_eq!(rows[2].id, FieldId(3));
    }

    #[test]
    fn test_children_of_non_nested_are_hidden() {
        let mut field = named(1, "id", FieldType::ObjectId);
        field.children = Some(vec![named(2, "ghost", FieldType::String)]);

        let rows = flatten_fields(&[field]);

        assert_eq!(rows.len(), 1, "非nested字段的子字段不应展开");
        assert_eq!(rows[0].path.to_string(), "0");
    }

    #[test]
    fn test_unnamed_fields_still_produce_rows() {
        let rows = flatten_fields(&[Field::new(FieldId(1))]);

        assert_eq!(rows.len(), 1, "空名字段仍需可编辑");
        assert!(rows[0].name.is_empty());
    }
}
