// crates/ik_options/src/error.rs

//! 选项层错误类型
//!
//! 提供 `ConfigError` 枚举和 `ConfigResult` 类型别名。
//!
//! 前四个变体是兼容性校验错误（Jacobian / 线性求解器 / 预条件器），
//! 其余变体来自原始配置的读取与字段提取。所有消息都包含出错的字段、
//! 出错的值以及合法取值。

use std::fmt::Display;

use crate::options::{Jacobian, LinearSolver, Preconditioner};

/// 统一结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 选项错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    // ========================================================================
    // 兼容性校验错误
    // ========================================================================

    /// 未知的 Jacobian 类型
    #[error("未知的 jacobian 类型 \"{value}\"，应为 {} 之一", one_of(&Jacobian::ALL))]
    InvalidJacobianType {
        /// 原始值
        value: String,
    },

    /// 线性求解器与 Jacobian 表示不兼容
    #[error(
        "linear_solver \"{linear_solver}\" 未知或与 jacobian \"{jacobian}\" 不兼容，{}",
        compatibility_hint(.jacobian)
    )]
    IncompatibleLinearSolver {
        /// 已通过分类的 Jacobian 表示
        jacobian: Jacobian,
        /// 原始线性求解器名称
        linear_solver: String,
    },

    /// 未知的线性求解器
    #[error("未知的线性求解器 \"{value}\"，应为 {} 之一", one_of(&LinearSolver::ALL))]
    UnknownLinearSolver {
        /// 原始值
        value: String,
    },

    /// 未知的预条件器
    #[error("未知的预条件器 \"{value}\"，应为 {} 之一", one_of(&Preconditioner::ALL))]
    InvalidPreconditioner {
        /// 原始值
        value: String,
    },

    // ========================================================================
    // 读取与字段提取错误
    // ========================================================================

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 字段类型不匹配
    #[error("字段 '{key}' 类型错误: 期望 {expected}，实际为 {found}")]
    TypeMismatch {
        /// 配置键
        key: String,
        /// 期望类型
        expected: &'static str,
        /// 实际类型
        found: &'static str,
    },

    /// 整数超出范围
    #[error("字段 '{key}' 的值 {value} 超出 32 位整数范围")]
    OutOfRange {
        /// 配置键
        key: String,
        /// 原始值（按输入文本保留，可能超出 i64）
        value: String,
    },

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 不支持的文件格式
    #[error("不支持的配置文件格式: '{0}' (支持: json, yaml, yml)")]
    UnsupportedFormat(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// 错误种类名称（稳定，不随消息文本变化）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJacobianType { .. } => "InvalidJacobianType",
            Self::IncompatibleLinearSolver { .. } => "IncompatibleLinearSolver",
            Self::UnknownLinearSolver { .. } => "UnknownLinearSolver",
            Self::InvalidPreconditioner { .. } => "InvalidPreconditioner",
            Self::Missing(_) => "Missing",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::OutOfRange { .. } => "OutOfRange",
            Self::Parse(_) => "Parse",
            Self::UnsupportedFormat(_) => "UnsupportedFormat",
            Self::Io(_) => "Io",
        }
    }

    /// 是否为兼容性校验错误（而非读取/提取错误）
    pub fn is_compatibility(&self) -> bool {
        matches!(
            self,
            Self::InvalidJacobianType { .. }
                | Self::IncompatibleLinearSolver { .. }
                | Self::UnknownLinearSolver { .. }
                | Self::InvalidPreconditioner { .. }
        )
    }
}

/// 格式化为 `"a"、"b" 或 "c"`
fn one_of<T: Display>(items: &[T]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("\"{item}\"")).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} 或 {}", rest.join("、"), last),
    }
}

fn compatibility_hint(jacobian: &Jacobian) -> String {
    let jacobian = *jacobian;
    let accepted: Vec<LinearSolver> = LinearSolver::ALL
        .into_iter()
        .filter(|solver| solver.accepts(jacobian))
        .collect();
    match jacobian {
        Jacobian::Sparse => format!(
            "稀疏 jacobian 请使用 \"{}\" 线性求解器（可选: {}）",
            LinearSolver::Klu,
            one_of(&accepted)
        ),
        Jacobian::MatrixFree => format!(
            "matrix-free jacobian 请使用迭代线性求解器: {}",
            one_of(&accepted)
        ),
        Jacobian::Dense | Jacobian::None => format!("可选: {}", one_of(&accepted)),
    }
}
