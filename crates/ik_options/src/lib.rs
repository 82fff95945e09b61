// crates/ik_options/src/lib.rs

//! IdaKlu 求解器选项层
//!
//! 在任何数值计算开始之前，校验 DAE 求解器的线性代数选项：
//! Jacobian 表示、线性求解器与预条件器三者必须相互兼容。
//! 校验通过后得到不可变的 [`ValidatedConfiguration`]，否则立即返回 [`ConfigError`]。
//!
//! # 模块概览
//!
//! - [`options`]: Jacobian / LinearSolver / Preconditioner 枚举
//! - [`compat`]: Jacobian × 线性求解器兼容性表
//! - [`raw`]: RawConfiguration 原始选项及其读取
//! - [`validated`]: 校验流程与 ValidatedConfiguration
//! - [`error`]: 选项错误类型
//!
//! # 示例
//!
//! ```rust
//! use ik_options::{ConfigError, RawConfiguration};
//!
//! let raw = RawConfiguration {
//!     jacobian: "sparse".to_string(),
//!     linear_solver: "SUNLinSol_Dense".to_string(),
//!     ..Default::default()
//! };
//! assert!(matches!(
//!     raw.validate(),
//!     Err(ConfigError::IncompatibleLinearSolver { .. })
//! ));
//! ```
//!
//! 校验是纯函数，无共享状态，可在多个线程中并发调用。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compat;
pub mod error;
pub mod options;
pub mod raw;
pub mod validated;

// 重导出核心类型
pub use compat::{classify, resolve_linear_solver, Compatibility};
pub use error::{ConfigError, ConfigResult};
pub use options::{Jacobian, LinearSolver, Preconditioner, SolverFamily};
pub use raw::RawConfiguration;
pub use validated::{validate, BandwidthPair, ValidatedConfiguration};
