//! 性能基准测试模块
//!
//! 用于测试大规模字段树的构建、预览序列化与行投影性能

use std::time::Instant;

use crate::model::field::{Field, FieldType};
use crate::model::field_path::FieldPath;
use crate::model::field_rows::flatten_fields;
use crate::model::schema_tree::{SchemaError, SchemaTree};
use crate::model::serializer::to_pretty;

/// 性能测试结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

/// 通过 SchemaTree 操作生成测试森林：每层 width 个字段，每层最后一个为 nested
pub fn generate_forest(depth: usize, width: usize) -> Result<SchemaTree, SchemaError> {
    fn fill(
        tree: &mut SchemaTree,
        parent: Option<&FieldPath>,
        level: usize,
        depth: usize,
        width: usize,
    ) -> Result<(), SchemaError> {
        for i in 0..width {
            let path = match parent {
                Some(p) => {
                    tree.add_child_at(p)?;
                    p.child(i)
                }
                None => {
                    tree.add_field()?;
                    FieldPath::root(i)
                }
            };
            tree.rename_at(&path, &format!("field_{}_{}", level, i))?;

            let is_container = i + 1 == width && level + 1 < depth;
            let kind = if is_container {
                FieldType::Nested
            } else {
                // 跳过 nested，在五种叶子类型间轮换
                FieldType::ALL[1 + i % 5]
            };
            tree.set_type_at(&path, kind)?;
            if is_container {
                fill(tree, Some(&path), level + 1, depth, width)?;
            }
        }
        Ok(())
    }

    let mut tree = SchemaTree::new();
    fill(&mut tree, None, 0, depth, width)?;
    Ok(tree)
}

/// 测试预览序列化性能
pub fn benchmark_serialize(fields: &[Field]) -> PerformanceResult {
    let start = Instant::now();
    let result = to_pretty(fields);
    let duration = start.elapsed();

    match result {
        Ok(text) => PerformanceResult::new(
            "预览序列化",
            duration.as_millis(),
            true,
            &format!("生成了 {} 字符", text.len()),
        ),
        Err(e) => PerformanceResult::new(
            "预览序列化",
            duration.as_millis(),
            false,
            &format!("序列化失败: {}", e),
        ),
    }
}

/// 测试行投影性能
pub fn benchmark_flatten(fields: &[Field]) -> PerformanceResult {
    let start = Instant::now();
    let rows = flatten_fields(fields);
    let duration = start.elapsed();

    PerformanceResult::new(
        "行投影",
        duration.as_millis(),
        !rows.is_empty() || fields.is_empty(),
        &format!("展开了 {} 行", rows.len()),
    )
}

/// 测试树构建（逐个变更并重算预览）性能
pub fn benchmark_mutations(depth: usize, width: usize) -> PerformanceResult {
    let start = Instant::now();
    let result = generate_forest(depth, width);
    let duration = start.elapsed();

    match result {
        Ok(tree) => PerformanceResult::new(
            &format!("树构建({}x{})", depth, width),
            duration.as_millis(),
            true,
            &format!("提交了 {} 次修订", tree.revision()),
        ),
        Err(e) => PerformanceResult::new(
            &format!("树构建({}x{})", depth, width),
            duration.as_millis(),
            false,
            &format!("构建失败: {}", e),
        ),
    }
}

/// 运行综合性能测试
pub fn run_performance_suite() -> Vec<PerformanceResult> {
    let mut results = Vec::new();

    let test_cases = [
        (3, 10), // 小型：深度3，宽度10
        (4, 20), // 中型：深度4，宽度20
        (6, 30), // 大型：深度6，宽度30
    ];

    for (depth, width) in test_cases {
        tracing::info!("测试规模：深度{}，宽度{}", depth, width);

        results.push(benchmark_mutations(depth, width));

        match generate_forest(depth, width) {
            Ok(tree) => {
                results.push(benchmark_serialize(tree.fields()));
                results.push(benchmark_flatten(tree.fields()));
            }
            Err(e) => tracing::error!("生成测试森林失败: {}", e),
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_generate_forest_shape() {
        let tree = generate_forest(3, 4).expect("生成森林失败");

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.fields()[3].kind, FieldType::Nested);
        assert_eq!(tree.fields()[3].children().len(), 4);
        // 3层 × 4个字段
        assert_eq!(flatten_fields(tree.fields()).len(), 12);

        let document: Value = serde_json::from_str(tree.preview()).expect("预览应为合法JSON");
        assert_eq!(document["field_0_0"], "STRING");
        assert_eq!(document["field_0_3"]["field_1_3"]["field_2_1"], "NUMBER");
    }

    #[test]
    fn test_performance_benchmarks() {
        let tree = generate_forest(3, 5).expect("生成森林失败");

        let serialize_result = benchmark_serialize(tree.fields());
        assert!(serialize_result.success);
        assert!(serialize_result.duration_ms < 1000); // 应该在1秒内完成

        let flatten_result = benchmark_flatten(tree.fields());
        assert!(flatten_result.success);
        assert!(flatten_result.duration_ms < 1000); // 应该在1秒内完成

        let mutation_result = benchmark_mutations(2, 5);
        assert!(mutation_result.success, "{}", mutation_result.details);
    }

    #[test]
    fn test_run_performance_suite() {
        let results = run_performance_suite();

        // 三种规模 × （树构建、预览序列化、行投影）
        assert_eq!(results.len(), 9);
        for result in &results {
            assert!(result.success, "{} 失败: {}", result.operation, result.details);
        }
    }
}
