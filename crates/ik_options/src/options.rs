// crates/ik_options/src/options.rs

//! 求解器选项枚举
//!
//! 将原始配置中的字符串选项在边界处解析为封闭枚举，
//! 之后的校验逻辑只处理枚举值，不再检查原始字符串。
//!
//! 字符串取值是与底层数值库约定的线上格式，区分大小写，必须逐字匹配。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Jacobian 表示方式
///
/// # 示例
///
/// ```rust
/// use ik_options::Jacobian;
///
/// let jacobian: Jacobian = "matrix-free".parse().unwrap();
/// assert_eq!(jacobian, Jacobian::MatrixFree);
/// assert!(!jacobian.is_sparse());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jacobian {
    /// 稀疏矩阵
    #[serde(rename = "sparse")]
    Sparse,
    /// 稠密矩阵
    #[serde(rename = "dense")]
    Dense,
    /// 不显式构造矩阵，仅提供 Jacobian-向量积
    #[serde(rename = "matrix-free")]
    MatrixFree,
    /// 无 Jacobian
    ///
    /// 分类上合法，但没有任何线性求解器接受此取值。
    #[serde(rename = "none")]
    None,
}

impl Jacobian {
    /// 全部合法取值
    pub const ALL: [Jacobian; 4] = [Self::Sparse, Self::Dense, Self::MatrixFree, Self::None];

    /// 线上名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sparse => "sparse",
            Self::Dense => "dense",
            Self::MatrixFree => "matrix-free",
            Self::None => "none",
        }
    }

    /// 是否使用稀疏矩阵存储
    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse)
    }
}

impl fmt::Display for Jacobian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Jacobian {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|jacobian| jacobian.name() == s)
            .ok_or_else(|| ConfigError::InvalidJacobianType {
                value: s.to_string(),
            })
    }
}

/// 线性求解器族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverFamily {
    /// 直接分解（稠密 LU / KLU）
    Direct,
    /// Krylov 子空间迭代法
    Krylov,
}

/// SUNDIALS 线性求解器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinearSolver {
    /// 稠密 LU
    #[serde(rename = "SUNLinSol_Dense")]
    Dense,
    /// LAPACK 稠密 LU
    #[serde(rename = "SUNLinSol_LapackDense")]
    LapackDense,
    /// KLU 稀疏直接分解
    #[serde(rename = "SUNLinSol_KLU")]
    Klu,
    /// 缩放预条件 BiCGStab
    #[serde(rename = "SUNLinSol_SPBCGS")]
    Spbcgs,
    /// 缩放预条件柔性 GMRES
    #[serde(rename = "SUNLinSol_SPFGMR")]
    Spfgmr,
    /// 缩放预条件 GMRES
    #[serde(rename = "SUNLinSol_SPGMR")]
    Spgmr,
    /// 缩放预条件 TFQMR
    #[serde(rename = "SUNLinSol_SPTFQMR")]
    Sptfqmr,
}

impl LinearSolver {
    /// 全部合法取值
    pub const ALL: [LinearSolver; 7] = [
        Self::Klu,
        Self::Dense,
        Self::LapackDense,
        Self::Spbcgs,
        Self::Spfgmr,
        Self::Spgmr,
        Self::Sptfqmr,
    ];

    /// Krylov 族
    pub const KRYLOV: [LinearSolver; 4] = [Self::Spbcgs, Self::Spfgmr, Self::Spgmr, Self::Sptfqmr];

    /// 线上名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dense => "SUNLinSol_Dense",
            Self::LapackDense => "SUNLinSol_LapackDense",
            Self::Klu => "SUNLinSol_KLU",
            Self::Spbcgs => "SUNLinSol_SPBCGS",
            Self::Spfgmr => "SUNLinSol_SPFGMR",
            Self::Spgmr => "SUNLinSol_SPGMR",
            Self::Sptfqmr => "SUNLinSol_SPTFQMR",
        }
    }

    /// 所属求解器族
    pub fn family(&self) -> SolverFamily {
        match self {
            Self::Dense | Self::LapackDense | Self::Klu => SolverFamily::Direct,
            Self::Spbcgs | Self::Spfgmr | Self::Spgmr | Self::Sptfqmr => SolverFamily::Krylov,
        }
    }

    /// 是否为 Krylov 迭代求解器
    #[inline]
    pub fn is_iterative(&self) -> bool {
        self.family() == SolverFamily::Krylov
    }
}

impl fmt::Display for LinearSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LinearSolver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|solver| solver.name() == s)
            .ok_or_else(|| ConfigError::UnknownLinearSolver {
                value: s.to_string(),
            })
    }
}

/// 预条件器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Preconditioner {
    /// 无预条件
    #[default]
    #[serde(rename = "none")]
    None,
    /// 带状块对角预条件器（band-block-diagonal）
    #[serde(rename = "BBDP")]
    Bbdp,
}

impl Preconditioner {
    /// 全部合法取值
    pub const ALL: [Preconditioner; 2] = [Self::Bbdp, Self::None];

    /// 线上名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bbdp => "BBDP",
        }
    }

    /// 是否启用预条件
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Preconditioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preconditioner {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|precon| precon.name() == s)
            .ok_or_else(|| ConfigError::InvalidPreconditioner {
                value: s.to_string(),
            })
    }
}
