//! 字段路径：从森林根到目标节点的下标序列（文本形式 `0.2.1`，供 UI 回调寻址）

use std::fmt;
use std::str::FromStr;

use crate::model::schema_tree::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<usize>);

impl FieldPath {
    /// 顶层字段路径
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// 在当前路径下追加一级子下标
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// 嵌套深度（顶层为 1）
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// 拆分为（祖先下标序列，末级下标）
    pub fn split_last(&self) -> (&[usize], usize) {
        match self.0.split_last() {
            Some((last, trail)) => (trail, *last),
            // 构造处保证非空
            None => (&[] as &[usize], 0),
        }
    }
}

impl TryFrom<Vec<usize>> for FieldPath {
    type Error = SchemaError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        if indices.is_empty() {
            return Err(SchemaError::InvalidPath(String::new()));
        }
        Ok(Self(indices))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", index)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SchemaError::InvalidPath(s.to_string()));
        }
        let indices = trimmed
            .split('.')
            .map(|segment| segment.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| SchemaError::InvalidPath(s.to_string()))?;
        Ok(Self(indices))
    }
}
