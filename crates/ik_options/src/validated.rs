// crates/ik_options/src/validated.rs

//! ValidatedConfiguration - 已校验的求解器选项
//!
//! 校验分三步：
//!
//! 1. Jacobian 分类：解析 `jacobian`，得到 `using_sparse_matrix`
//! 2. 线性求解器兼容性：查 [`compat`](crate::compat) 表，得到 `using_iterative_solver`
//! 3. 预条件器：迭代求解器必须是 `none` / `BBDP`；直接求解器一律强制为 `none`
//!
//! 任何一步失败都直接返回错误，不会构造出部分结果。
//! 字段私有，`validate` 是唯一的构造途径，因此派生标志与枚举始终一致。

use serde::Serialize;
use std::fmt;

use crate::compat::resolve_linear_solver;
use crate::error::ConfigResult;
use crate::options::{Jacobian, LinearSolver, Preconditioner};
use crate::raw::RawConfiguration;

/// BBDP 预条件器的带宽参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BandwidthPair {
    /// 差商 Jacobian 的半带宽
    pub half_bandwidth: i32,
    /// 保留的半带宽
    pub half_bandwidth_keep: i32,
}

/// 已校验的求解器选项（不可变）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidatedConfiguration {
    print_stats: bool,
    jacobian: Jacobian,
    linear_solver: LinearSolver,
    preconditioner: Preconditioner,
    using_sparse_matrix: bool,
    using_iterative_solver: bool,
    linsol_max_iterations: i32,
    precon_half_bandwidth: i32,
    precon_half_bandwidth_keep: i32,
}

/// 校验原始选项
///
/// # 示例
///
/// ```rust
/// use ik_options::{validate, Preconditioner, RawConfiguration};
///
/// // 直接求解器会静默丢弃预条件器请求
/// let raw = RawConfiguration::default();
/// assert_eq!(raw.preconditioner, "BBDP");
///
/// let validated = validate(&raw).unwrap();
/// assert!(validated.using_sparse_matrix());
/// assert!(!validated.using_iterative_solver());
/// assert_eq!(validated.preconditioner(), Preconditioner::None);
/// ```
pub fn validate(raw: &RawConfiguration) -> ConfigResult<ValidatedConfiguration> {
    let jacobian: Jacobian = raw.jacobian.parse()?;
    let linear_solver = resolve_linear_solver(jacobian, &raw.linear_solver)?;
    let using_iterative_solver = linear_solver.is_iterative();

    let preconditioner = if using_iterative_solver {
        raw.preconditioner.parse::<Preconditioner>()?
    } else {
        if raw.preconditioner != Preconditioner::None.name() {
            tracing::debug!(
                "直接求解器 {} 不使用预条件，忽略 preconditioner = \"{}\"",
                linear_solver,
                raw.preconditioner
            );
        }
        Preconditioner::None
    };

    let validated = ValidatedConfiguration {
        print_stats: raw.print_stats,
        jacobian,
        linear_solver,
        preconditioner,
        using_sparse_matrix: jacobian.is_sparse(),
        using_iterative_solver,
        linsol_max_iterations: raw.linsol_max_iterations,
        precon_half_bandwidth: raw.precon_half_bandwidth,
        precon_half_bandwidth_keep: raw.precon_half_bandwidth_keep,
    };

    tracing::debug!("选项校验通过: {}", validated);
    Ok(validated)
}

impl ValidatedConfiguration {
    /// 是否打印求解统计
    pub fn print_stats(&self) -> bool {
        self.print_stats
    }

    /// Jacobian 表示
    pub fn jacobian(&self) -> Jacobian {
        self.jacobian
    }

    /// 线性求解器
    pub fn linear_solver(&self) -> LinearSolver {
        self.linear_solver
    }

    /// 预条件器
    pub fn preconditioner(&self) -> Preconditioner {
        self.preconditioner
    }

    /// 是否使用稀疏矩阵存储
    pub fn using_sparse_matrix(&self) -> bool {
        self.using_sparse_matrix
    }

    /// 是否使用 Krylov 迭代求解器
    pub fn using_iterative_solver(&self) -> bool {
        self.using_iterative_solver
    }

    /// 线性求解器最大迭代次数
    pub fn linsol_max_iterations(&self) -> i32 {
        self.linsol_max_iterations
    }

    /// BBDP 半带宽（原样保留）
    pub fn precon_half_bandwidth(&self) -> i32 {
        self.precon_half_bandwidth
    }

    /// BBDP 保留半带宽（原样保留）
    pub fn precon_half_bandwidth_keep(&self) -> i32 {
        self.precon_half_bandwidth_keep
    }

    /// 预条件工作区的带宽参数，仅在启用 BBDP 时返回
    pub fn bbdp_bandwidths(&self) -> Option<BandwidthPair> {
        self.preconditioner.is_enabled().then(|| BandwidthPair {
            half_bandwidth: self.precon_half_bandwidth,
            half_bandwidth_keep: self.precon_half_bandwidth_keep,
        })
    }

    /// 还原为规范形式的原始选项
    ///
    /// 对结果再次校验得到的配置与 `self` 相等。
    pub fn to_raw(&self) -> RawConfiguration {
        RawConfiguration {
            print_stats: self.print_stats,
            jacobian: self.jacobian.name().to_string(),
            preconditioner: self.preconditioner.name().to_string(),
            linsol_max_iterations: self.linsol_max_iterations,
            linear_solver: self.linear_solver.name().to_string(),
            precon_half_bandwidth: self.precon_half_bandwidth,
            precon_half_bandwidth_keep: self.precon_half_bandwidth_keep,
        }
    }
}

impl TryFrom<&RawConfiguration> for ValidatedConfiguration {
    type Error = crate::error::ConfigError;

    fn try_from(raw: &RawConfiguration) -> Result<Self, Self::Error> {
        validate(raw)
    }
}

impl fmt::Display for ValidatedConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "jacobian={}, linear_solver={}, preconditioner={} ({}, {})",
            self.jacobian,
            self.linear_solver,
            self.preconditioner,
            if self.using_sparse_matrix { "稀疏矩阵" } else { "非稀疏" },
            if self.using_iterative_solver { "迭代求解" } else { "直接求解" },
        )?;
        if let Some(bw) = self.bbdp_bandwidths() {
            write!(f, " [mudq={}, mukeep={}]", bw.half_bandwidth, bw.half_bandwidth_keep)?;
        }
        Ok(())
    }
}
