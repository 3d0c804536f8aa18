//! 预览序列化：字段森林 → 键值文档（纯函数，无隐藏状态）

use serde_json::{Map, Value};

use crate::model::field::Field;
use crate::model::schema_tree::SchemaError;

/// 按字段顺序生成预览文档
///
/// - 空名字段跳过
/// - nested 字段递归其子字段（无子字段视为空对象）
/// - 其他类型输出大写类型名
/// - 同级重名时后者覆盖前者，键位置保持首次出现处
/// - required 不参与输出
pub fn serialize(fields: &[Field]) -> Map<String, Value> {
    let mut document = Map::new();
    for field in fields.iter().filter(|f| f.is_named()) {
        let value = if field.kind.is_nested() {
            Value::Object(serialize(field.children()))
        } else {
            Value::String(field.kind.type_name())
        };
        document.insert(field.name.clone(), value);
    }
    document
}

/// 预览文本（两空格缩进）
pub fn to_pretty(fields: &[Field]) -> Result<String, SchemaError> {
    let document = Value::Object(serialize(fields));
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldId, FieldType};
    use serde_json::json;

    fn leaf(id: u64, name: &str, kind: FieldType) -> Field {
        Field::new(FieldId(id)).with_name(name).with_type(kind)
    }

    #[test]
    fn test_empty_forest() {
        assert!(serialize(&[]).is_empty());
        assert_eq!(to_pretty(&[]).unwrap(), "{}");
    }

    #[test]
    fn test_unnamed_field_is_skipped() {
        let fields = vec![Field::new(FieldId(1))];

        assert_eq!(Value::Object(serialize(&fields)), json!({}), "空名字段不应出现在预览中");
    }

    #[test]
    fn test_leaf_types_are_uppercased() {
        let fields: Vec<Field> = FieldType::ALL
            .iter()
            .filter(|kind| !kind.is_nested())
            .enumerate()
            .map(|(i, kind)| leaf(i as u64, kind.as_str(), *kind))
            .collect();

        let document = Value::Object(serialize(&fields));
        assert_eq!(
            document,
            json!({
                "string": "STRING",
                "number": "NUMBER",
                "objectId": "OBJECTID",
                "float": "FLOAT",
                "boolean": "BOOLEAN"
            })
        );
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let fields = vec![
            leaf(1, "a", FieldType::String),
            leaf(2, "b", FieldType::Float),
            leaf(3, "a", FieldType::Number),
        ];

        let document = serialize(&fields);
        assert_eq!(Value::Object(document.clone()), json!({"a": "NUMBER", "b": "FLOAT"}));
        let keys: Vec<&str> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"], "覆盖不应改变键的首次位置");
    }

    #[test]
    fn test_nested_serialization() {
        let fields = vec![leaf(1, "addr", FieldType::Nested)
            .with_children(vec![leaf(2, "city", FieldType::String)])];

        assert_eq!(
            Value::Object(serialize(&fields)),
            json!({"addr": {"city": "STRING"}})
        );
    }

    #[test]
    fn test_deep_nesting_and_empty_nested() {
        let fields = vec![
            leaf(1, "user", FieldType::Nested).with_children(vec![
                leaf(2, "profile", FieldType::Nested).with_children(vec![
                    leaf(3, "bio", FieldType::String),
                    Field::new(FieldId(4)),
                ]),
                leaf(5, "tags", FieldType::Nested),
            ]),
        ];

        assert_eq!(
            Value::Object(serialize(&fields)),
            json!({"user": {"profile": {"bio": "STRING"}, "tags": {}}})
        );
    }

    #[test]
    fn test_nested_without_children_is_empty_object() {
        let mut field = leaf(1, "meta", FieldType::Nested);
        field.children = None;

        assert_eq!(Value::Object(serialize(&[field])), json!({"meta": {}}));
    }

    #[test]
    fn test_children_of_non_nested_field_are_ignored() {
        let mut field = leaf(1, "id", FieldType::ObjectId);
        field.children = Some(vec![leaf(2, "ghost", FieldType::String)]);

        assert_eq!(Value::Object(serialize(&[field])), json!({"id": "OBJECTID"}));
    }

    #[test]
    fn test_required_flag_has_no_effect() {
        let optional = vec![leaf(1, "x", FieldType::Boolean)];
        let required = vec![optional[0].with_required(true)];

        assert_eq!(Value::Object(serialize(&required)), json!({"x": "BOOLEAN"}));
        assert_eq!(serialize(&optional), serialize(&required), "required不应影响预览");
        assert_eq!(to_pretty(&optional).unwrap(), to_pretty(&required).unwrap());
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let fields = vec![
            leaf(1, "name", FieldType::String),
            leaf(2, "addr", FieldType::Nested).with_children(vec![leaf(3, "zip", FieldType::Number)]),
        ];

        assert_eq!(serialize(&fields), serialize(&fields));
        assert_eq!(to_pretty(&fields).unwrap(), to_pretty(&fields).unwrap());
    }

    #[test]
    fn test_pretty_text_layout() {
        let fields = vec![
            leaf(1, "name", FieldType::String),
            leaf(2, "addr", FieldType::Nested).with_children(vec![leaf(3, "city", FieldType::String)]),
        ];

        let expected = "{\n  \"name\": \"STRING\",\n  \"addr\": {\n    \"city\": \"STRING\"\n  }\n}";
        assert_eq!(to_pretty(&fields).unwrap(), expected, "预览应按字段顺序两空格缩进");
    }
}
