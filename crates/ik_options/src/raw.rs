// crates/ik_options/src/raw.rs

//! RawConfiguration - 未校验的原始选项
//!
//! 宿主配置层传入的松散键值对。字符串选项保持原样，
//! 直到 [`validate`](crate::validate) 把它们解析为封闭枚举。
//!
//! 支持三种来源：
//! - `serde_json::Value` 映射（逐字段类型检查）
//! - JSON / YAML 文本
//! - 按扩展名选择格式的配置文件

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::validated::{validate, ValidatedConfiguration};

/// 字段名
pub mod keys {
    /// 是否打印求解统计
    pub const PRINT_STATS: &str = "print_stats";
    /// Jacobian 表示
    pub const JACOBIAN: &str = "jacobian";
    /// 预条件器
    pub const PRECONDITIONER: &str = "preconditioner";
    /// 线性求解器最大迭代次数
    pub const LINSOL_MAX_ITERATIONS: &str = "linsol_max_iterations";
    /// 线性求解器
    pub const LINEAR_SOLVER: &str = "linear_solver";
    /// BBDP 半带宽
    pub const PRECON_HALF_BANDWIDTH: &str = "precon_half_bandwidth";
    /// BBDP 保留半带宽
    pub const PRECON_HALF_BANDWIDTH_KEEP: &str = "precon_half_bandwidth_keep";

    /// 全部必需字段
    pub const ALL: [&str; 7] = [
        PRINT_STATS,
        JACOBIAN,
        PRECONDITIONER,
        LINSOL_MAX_ITERATIONS,
        LINEAR_SOLVER,
        PRECON_HALF_BANDWIDTH,
        PRECON_HALF_BANDWIDTH_KEEP,
    ];
}

/// 原始求解器选项
///
/// 所有字段均为必需项；默认值与宿主求解器的默认选项一致。
///
/// # 示例
///
/// ```rust
/// use ik_options::RawConfiguration;
///
/// let raw = RawConfiguration {
///     jacobian: "matrix-free".to_string(),
///     linear_solver: "SUNLinSol_SPGMR".to_string(),
///     ..Default::default()
/// };
/// let validated = raw.validate().unwrap();
/// assert!(validated.using_iterative_solver());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfiguration {
    /// 是否打印求解统计
    pub print_stats: bool,
    /// Jacobian 表示
    pub jacobian: String,
    /// 预条件器
    pub preconditioner: String,
    /// 线性求解器最大迭代次数
    pub linsol_max_iterations: i32,
    /// 线性求解器
    pub linear_solver: String,
    /// BBDP 半带宽
    pub precon_half_bandwidth: i32,
    /// BBDP 保留半带宽
    pub precon_half_bandwidth_keep: i32,
}

impl Default for RawConfiguration {
    fn default() -> Self {
        Self {
            print_stats: false,
            jacobian: "sparse".to_string(),
            preconditioner: "BBDP".to_string(),
            linsol_max_iterations: 5,
            linear_solver: "SUNLinSol_KLU".to_string(),
            precon_half_bandwidth: 5,
            precon_half_bandwidth_keep: 5,
        }
    }
}

impl RawConfiguration {
    /// 从松散类型的映射中逐字段提取
    ///
    /// 未识别的键会被忽略（宿主选项字典中还包含与线性代数无关的选项）。
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            ConfigError::Parse(format!("选项必须是映射/对象，实际为 {}", type_name(value)))
        })?;

        for key in map.keys().filter(|key| !keys::ALL.contains(&key.as_str())) {
            tracing::trace!("忽略未识别的选项: {}", key);
        }

        Ok(Self {
            print_stats: get_bool(map, keys::PRINT_STATS)?,
            jacobian: get_string(map, keys::JACOBIAN)?,
            preconditioner: get_string(map, keys::PRECONDITIONER)?,
            linsol_max_iterations: get_int(map, keys::LINSOL_MAX_ITERATIONS)?,
            linear_solver: get_string(map, keys::LINEAR_SOLVER)?,
            precon_half_bandwidth: get_int(map, keys::PRECON_HALF_BANDWIDTH)?,
            precon_half_bandwidth_keep: get_int(map, keys::PRECON_HALF_BANDWIDTH_KEEP)?,
        })
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }

    /// 从 YAML 字符串解析
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }

    /// 从文件加载，格式由扩展名决定
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        // 先检查格式，避免读取无法解析的文件
        if !matches!(extension.as_str(), "json" | "yaml" | "yml") {
            return Err(ConfigError::UnsupportedFormat(extension));
        }

        let content = std::fs::read_to_string(path)?;
        tracing::debug!("读取选项文件: {}", path.display());

        match extension.as_str() {
            "json" => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 校验并生成不可变的 [`ValidatedConfiguration`]
    pub fn validate(&self) -> ConfigResult<ValidatedConfiguration> {
        validate(self)
    }
}

fn field<'a>(map: &'a Map<String, Value>, key: &str) -> ConfigResult<&'a Value> {
    map.get(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn get_bool(map: &Map<String, Value>, key: &str) -> ConfigResult<bool> {
    let value = field(map, key)?;
    value.as_bool().ok_or_else(|| mismatch(key, "bool", value))
}

fn get_string(map: &Map<String, Value>, key: &str) -> ConfigResult<String> {
    let value = field(map, key)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(key, "string", value))
}

fn get_int(map: &Map<String, Value>, key: &str) -> ConfigResult<i32> {
    let value = field(map, key)?;
    let number = match value {
        Value::Number(n) if !n.is_f64() => n,
        _ => return Err(mismatch(key, "integer", value)),
    };
    // 大于 i64::MAX 的无符号整数同样属于越界
    number
        .as_i64()
        .and_then(|wide| i32::try_from(wide).ok())
        .ok_or_else(|| ConfigError::OutOfRange {
            key: key.to_string(),
            value: number.to_string(),
        })
}

fn mismatch(key: &str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: type_name(value),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "print_stats": true,
            "jacobian": "dense",
            "preconditioner": "none",
            "linsol_max_iterations": 10,
            "linear_solver": "SUNLinSol_LapackDense",
            "precon_half_bandwidth": 3,
            "precon_half_bandwidth_keep": 2
        })
    }

    #[test]
    fn test_default_options() {
        let raw = RawConfiguration::default();
        assert_eq!(raw.jacobian, "sparse");
        assert_eq!(raw.linear_solver, "SUNLinSol_KLU");
        assert_eq!(raw.preconditioner, "BBDP");
        assert_eq!(raw.linsol_max_iterations, 5);
    }

    #[test]
    fn test_from_value() {
        let raw = RawConfiguration::from_value(&sample()).unwrap();
        assert!(raw.print_stats);
        assert_eq!(raw.jacobian, "dense");
        assert_eq!(raw.linear_solver, "SUNLinSol_LapackDense");
        assert_eq!(raw.precon_half_bandwidth, 3);
        assert_eq!(raw.precon_half_bandwidth_keep, 2);
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let mut value = sample();
        value["num_threads"] = json!(4);
        assert!(RawConfiguration::from_value(&value).is_ok());
    }

    #[test]
    fn test_missing_field() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("linear_solver");
        let err = RawConfiguration::from_value(&value).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref key) if key == "linear_solver"));
    }

    #[test]
    fn test_type_mismatch() {
        let mut value = sample();
        value["print_stats"] = json!("yes");
        let err = RawConfiguration::from_value(&value).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch { expected: "bool", found: "string", .. }
        ));

        let mut value = sample();
        value["linsol_max_iterations"] = json!(2.5);
        let err = RawConfiguration::from_value(&value).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch { expected: "integer", found: "float", .. }
        ));

    }

    #[test]
    fn test_root_must_be_object() {
        let err = RawConfiguration::from_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref msg) if msg.contains("array")));

        let err = RawConfiguration::from_json("\"sparse\"").unwrap_err();
        assert_eq!(err.kind(), "Parse");
    }

    #[test]
    fn test_out_of_range() {
        let mut value = sample();
        value["precon_half_bandwidth"] = json!(i64::from(i32::MAX) + 1);
        let err = RawConfiguration::from_value(&value).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { ref key, .. } if key == "precon_half_bandwidth"));
    }

    #[test]
    fn test_out_of_range_beyond_i64() {
        let text = r#"{
            "print_stats": false,
            "jacobian": "sparse",
            "preconditioner": "none",
            "linsol_max_iterations": 18446744073709551615,
            "linear_solver": "SUNLinSol_SPGMR",
            "precon_half_bandwidth": 5,
            "precon_half_bandwidth_keep": 5
        }"#;
        let err = RawConfiguration::from_json(text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange { ref key, ref value }
                if key == "linsol_max_iterations" && value == "18446744073709551615"
        ));

        let mut value = sample();
        value["precon_half_bandwidth_keep"] = json!(i64::MIN);
        let err = RawConfiguration::from_value(&value).unwrap_err();
        assert_eq!(err.kind(), "OutOfRange");
    }

    #[test]
    fn test_json_and_yaml_text() {
        let raw = RawConfiguration::from_json(&sample().to_string()).unwrap();
        assert_eq!(raw.linsol_max_iterations, 10);

        let yaml = "\
print_stats: false
jacobian: matrix-free
preconditioner: BBDP
linsol_max_iterations: 7
linear_solver: SUNLinSol_SPFGMR
precon_half_bandwidth: 4
precon_half_bandwidth_keep: 4
";
        let raw = RawConfiguration::from_yaml(yaml).unwrap();
        assert_eq!(raw.jacobian, "matrix-free");
        assert_eq!(raw.linear_solver, "SUNLinSol_SPFGMR");

        assert!(matches!(
            RawConfiguration::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_serialize_round_trip() {
        let raw = RawConfiguration::from_value(&sample()).unwrap();
        let json = raw.to_json().unwrap();
        let parsed = RawConfiguration::from_json(&json).unwrap();
        assert_eq!(parsed, raw);
    }
}
