//! SchemaTree：字段森林的唯一状态持有者
//!
//! 每次变更都在当前森林的副本上进行，随后同步重算预览并一次性提交；
//! 失败的操作不会改动森林、预览或修订号。

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::field::{Field, FieldId, FieldType};
use crate::model::field_path::FieldPath;
use crate::model::serializer::{serialize, to_pretty};

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("下标越界: 路径 {path} 的下标 {index} 超出长度 {len}")]
    IndexOutOfRange { path: String, index: usize, len: usize },
    #[error("节点没有子字段列表: {path}")]
    MissingChildren { path: String },
    #[error("无效路径: '{0}'")]
    InvalidPath(String),
    #[error("未知字段类型: '{0}'")]
    UnknownFieldType(String),
    #[error("JSON序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 提交时交给外部的快照：字段森林及其预览文档
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub fields: Vec<Field>,
    pub document: Map<String, Value>,
}

#[derive(Debug)]
pub struct SchemaTree {
    fields: Vec<Field>,
    preview: String,
    next_id: u64,
    revision: u64,
}

impl Default for SchemaTree {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            preview: "{}".to_string(),
            next_id: 0,
            revision: 0,
        }
    }
}

impl SchemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    // === 读取 ===

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// 当前森林的独立副本
    pub fn snapshot(&self) -> Vec<Field> {
        self.fields.clone()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 始终与最新森林一致的预览文本
    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn document(&self) -> Map<String, Value> {
        serialize(&self.fields)
    }

    /// 已提交的变更次数
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn field_at(&self, path: &FieldPath) -> Option<&Field> {
        let (trail, last) = path.split_last();
        let mut level: &[Field] = &self.fields;
        for &index in trail {
            level = level.get(index)?.children.as_deref()?;
        }
        level.get(last)
    }

    // === 顶层与两级操作（编辑器回调面） ===

    /// 追加一个默认字段，返回其标识
    pub fn add_field(&mut self) -> Result<FieldId, SchemaError> {
        let mut next = self.fields.clone();
        let id = self.allocate_id();
        next.push(Field::new(id));
        self.commit(next)?;
        tracing::info!("新增顶层字段: id={}", id);
        Ok(id)
    }

    pub fn update_field(&mut self, index: usize, field: Field) -> Result<(), SchemaError> {
        self.update_at(&FieldPath::root(index), field)
    }

    pub fn delete_field(&mut self, index: usize) -> Result<Field, SchemaError> {
        self.delete_at(&FieldPath::root(index))
    }

    pub fn add_child_field(&mut self, parent_index: usize) -> Result<FieldId, SchemaError> {
        self.add_child_at(&FieldPath::root(parent_index))
    }

    pub fn update_child_field(
        &mut self,
        parent_index: usize,
        child_index: usize,
        child: Field,
    ) -> Result<(), SchemaError> {
        self.update_at(&FieldPath::root(parent_index).child(child_index), child)
    }

    pub fn delete_child_field(
        &mut self,
        parent_index: usize,
        child_index: usize,
    ) -> Result<Field, SchemaError> {
        self.delete_at(&FieldPath::root(parent_index).child(child_index))
    }

    // === 按路径的任意深度操作 ===

    /// 整体替换路径处的字段
    pub fn update_at(&mut self, path: &FieldPath, field: Field) -> Result<(), SchemaError> {
        let mut next = self.fields.clone();
        let (trail, last) = path.split_last();
        let level = level_mut(&mut next, trail, path)?;
        let len = level.len();
        let slot = level
            .get_mut(last)
            .ok_or_else(|| out_of_range(path, last, len))?;
        *slot = field;
        self.commit(next)
    }

    /// 删除路径处的字段（连同其子树），后续兄弟前移
    pub fn delete_at(&mut self, path: &FieldPath) -> Result<Field, SchemaError> {
        let mut next = self.fields.clone();
        let (trail, last) = path.split_last();
        let level = level_mut(&mut next, trail, path)?;
        if last >= level.len() {
            return Err(out_of_range(path, last, level.len()));
        }
        let removed = level.remove(last);
        self.commit(next)?;
        tracing::info!("删除字段: 路径={} id={}", path, removed.id);
        Ok(removed)
    }

    /// 在路径处字段下追加默认子字段；子字段列表缺失时先初始化
    pub fn add_child_at(&mut self, path: &FieldPath) -> Result<FieldId, SchemaError> {
        let mut next = self.fields.clone();
        let (trail, last) = path.split_last();
        let level = level_mut(&mut next, trail, path)?;
        let len = level.len();
        let parent = level
            .get_mut(last)
            .ok_or_else(|| out_of_range(path, last, len))?;
        let id = self.allocate_id();
        parent
            .children
            .get_or_insert_with(Vec::new)
            .push(Field::new(id));
        self.commit(next)?;
        tracing::info!("新增子字段: 父路径={} id={}", path, id);
        Ok(id)
    }

    // === 编辑器行内操作 ===

    pub fn rename_at(&mut self, path: &FieldPath, name: &str) -> Result<(), SchemaError> {
        let field = self.require_field(path)?.with_name(name);
        self.update_at(path, field)
    }

    pub fn set_type_at(&mut self, path: &FieldPath, kind: FieldType) -> Result<(), SchemaError> {
        let field = self.require_field(path)?.with_type(kind);
        self.update_at(path, field)
    }

    pub fn set_required_at(&mut self, path: &FieldPath, required: bool) -> Result<(), SchemaError> {
        let field = self.require_field(path)?.with_required(required);
        self.update_at(path, field)
    }

    /// 提交当前森林：记录日志并返回快照，不做任何持久化
    pub fn submit(&self) -> Result<Submission, SchemaError> {
        let submission = Submission {
            fields: self.snapshot(),
            document: self.document(),
        };
        tracing::info!("提交的字段树: {}", serde_json::to_string(&submission.fields)?);
        tracing::info!("生成的JSON: {}", serde_json::to_string(&submission.document)?);
        Ok(submission)
    }

    fn require_field(&self, path: &FieldPath) -> Result<&Field, SchemaError> {
        let (trail, last) = path.split_last();
        let siblings = level(&self.fields, trail, path)?;
        siblings
            .get(last)
            .ok_or_else(|| out_of_range(path, last, siblings.len()))
    }

    fn allocate_id(&mut self) -> FieldId {
        self.next_id += 1;
        FieldId(self.next_id)
    }

    /// 新快照与预览同时生效
    fn commit(&mut self, next: Vec<Field>) -> Result<(), SchemaError> {
        let preview = to_pretty(&next)?;
        self.fields = next;
        self.preview = preview;
        self.revision += 1;
        tracing::debug!("提交修订 {}: {} 个顶层字段", self.revision, self.fields.len());
        Ok(())
    }
}

fn out_of_range(path: &FieldPath, index: usize, len: usize) -> SchemaError {
    tracing::warn!("路径 {} 的下标 {} 超出长度 {}", path, index, len);
    SchemaError::IndexOutOfRange {
        path: path.to_string(),
        index,
        len,
    }
}

/// 沿祖先下标逐级下降，返回目标所在的兄弟列表
fn level<'a>(
    forest: &'a [Field],
    trail: &[usize],
    path: &FieldPath,
) -> Result<&'a [Field], SchemaError> {
    let mut level = forest;
    for &index in trail {
        let node = level
            .get(index)
            .ok_or_else(|| out_of_range(path, index, level.len()))?;
        level = node
            .children
            .as_deref()
            .ok_or_else(|| SchemaError::MissingChildren { path: path.to_string() })?;
    }
    Ok(level)
}

/// 可变版本，供变更操作在新快照上使用
fn level_mut<'a>(
    forest: &'a mut Vec<Field>,
    trail: &[usize],
    path: &FieldPath,
) -> Result<&'a mut Vec<Field>, SchemaError> {
    let mut level = forest;
    for &index in trail {
        let len = level.len();
        let node = level
            .get_mut(index)
            .ok_or_else(|| out_of_range(path, index, len))?;
        level = node
            .children
            .as_mut()
            .ok_or_else(|| SchemaError::MissingChildren { path: path.to_string() })?;
    }
    Ok(level)
}
