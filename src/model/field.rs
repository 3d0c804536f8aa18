//! 字段模型：Schema 树中的单个节点及其类型标签

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::schema_tree::SchemaError;

/// 字段类型（封闭集合，序列化拼写与编辑器下拉框一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Nested,
    #[default]
    String,
    Number,
    ObjectId,
    Float,
    Boolean,
}

impl FieldType {
    /// 下拉框选项顺序
    pub const ALL: [FieldType; 6] = [
        FieldType::Nested,
        FieldType::String,
        FieldType::Number,
        FieldType::ObjectId,
        FieldType::Float,
        FieldType::Boolean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nested => "nested",
            Self::String => "string",
            Self::Number => "number",
            Self::ObjectId => "objectId",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }

    /// 预览文档中使用的大写类型名（objectId → OBJECTID）
    pub fn type_name(&self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownFieldType(s.to_string()))
    }
}

/// 字段标识：由 SchemaTree 的单调计数器分配，生命周期内不变、不复用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 标识以字符串形式出现在提交日志中
impl Serialize for FieldId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u64>()
            .map(FieldId)
            .map_err(serde::de::Error::custom)
    }
}

/// Schema 树节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    /// 用户输入的字段名，可为空（空名不进入预览）
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    /// 仅随树保存，序列化预览不读取
    pub required: bool,
    /// 仅当类型为 nested 时存在
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Field>>,
}

impl Field {
    /// 新建默认字段：空名、string、非必填
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            name: String::new(),
            kind: FieldType::default(),
            required: false,
            children: None,
        }
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// 切换类型：离开 nested 时丢弃子字段，进入 nested 时补齐空列表
    pub fn with_type(&self, kind: FieldType) -> Self {
        let children = if kind.is_nested() {
            Some(self.children.clone().unwrap_or_default())
        } else {
            None
        };
        Self {
            kind,
            children,
            ..self.clone()
        }
    }

    pub fn with_required(&self, required: bool) -> Self {
        Self {
            required,
            ..self.clone()
        }
    }

    pub fn with_children(&self, children: Vec<Field>) -> Self {
        Self {
            children: Some(children),
            ..self.clone()
        }
    }

    pub fn children(&self) -> &[Field] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}
