// crates/ik_options/src/compat.rs

//! Jacobian × 线性求解器兼容性表
//!
//! 按顺序匹配，首个命中的行生效：
//!
//! | jacobian              | 兼容的线性求解器                      | 迭代 |
//! |-----------------------|---------------------------------------|------|
//! | dense                 | Dense, LapackDense                    | 否   |
//! | sparse                | KLU                                   | 否   |
//! | sparse / matrix-free  | SPBCGS, SPFGMR, SPGMR, SPTFQMR        | 是   |
//! | sparse（其余）        | 错误：请使用 KLU                      |      |
//! | matrix-free（其余）   | 错误：请使用迭代求解器                |      |
//! | 其余（含 none）       | 错误：未知线性求解器                  |      |
//!
//! `none` 不命中任何兼容行，因此 `jacobian = "none"` 的配置总是被拒绝。

use crate::error::{ConfigError, ConfigResult};
use crate::options::{Jacobian, LinearSolver};

/// 兼容性表的查询结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    /// 组合合法
    Accepted(LinearSolver),
    /// 稀疏 Jacobian 搭配了不支持的求解器
    SparseRequiresKlu,
    /// matrix-free Jacobian 搭配了非迭代求解器
    MatrixFreeRequiresKrylov,
    /// 求解器未知，或 Jacobian 不支持任何求解器
    Unsupported,
}

/// 查表
///
/// `solver` 为 `None` 表示原始字符串不是已知的求解器名称。
pub fn classify(jacobian: Jacobian, solver: Option<LinearSolver>) -> Compatibility {
    use LinearSolver as L;

    match (jacobian, solver) {
        (Jacobian::Dense, Some(s @ (L::Dense | L::LapackDense))) => Compatibility::Accepted(s),
        (Jacobian::Sparse, Some(L::Klu)) => Compatibility::Accepted(L::Klu),
        (
            Jacobian::Sparse | Jacobian::MatrixFree,
            Some(s @ (L::Spbcgs | L::Spfgmr | L::Spgmr | L::Sptfqmr)),
        ) => Compatibility::Accepted(s),
        (Jacobian::Sparse, _) => Compatibility::SparseRequiresKlu,
        (Jacobian::MatrixFree, _) => Compatibility::MatrixFreeRequiresKrylov,
        (Jacobian::Dense | Jacobian::None, _) => Compatibility::Unsupported,
    }
}

/// 按兼容性表解析线性求解器名称
pub fn resolve_linear_solver(jacobian: Jacobian, linear_solver: &str) -> ConfigResult<LinearSolver> {
    let parsed = linear_solver.parse::<LinearSolver>().ok();
    match classify(jacobian, parsed) {
        Compatibility::Accepted(solver) => Ok(solver),
        Compatibility::SparseRequiresKlu | Compatibility::MatrixFreeRequiresKrylov => {
            Err(ConfigError::IncompatibleLinearSolver {
                jacobian,
                linear_solver: linear_solver.to_string(),
            })
        }
        Compatibility::Unsupported => Err(ConfigError::UnknownLinearSolver {
            value: linear_solver.to_string(),
        }),
    }
}

impl LinearSolver {
    /// 该求解器能否与给定 Jacobian 搭配
    pub fn accepts(&self, jacobian: Jacobian) -> bool {
        matches!(classify(jacobian, Some(*self)), Compatibility::Accepted(_))
    }

    /// 能与该求解器搭配的全部 Jacobian
    pub fn compatible_jacobians(&self) -> Vec<Jacobian> {
        Jacobian::ALL
            .into_iter()
            .filter(|jacobian| self.accepts(*jacobian))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_rows() {
        assert_eq!(
            classify(Jacobian::Dense, Some(LinearSolver::Dense)),
            Compatibility::Accepted(LinearSolver::Dense)
        );
        assert_eq!(
            classify(Jacobian::Dense, Some(LinearSolver::LapackDense)),
            Compatibility::Accepted(LinearSolver::LapackDense)
        );
        assert_eq!(
            classify(Jacobian::Dense, Some(LinearSolver::Klu)),
            Compatibility::Unsupported
        );
        assert_eq!(
            classify(Jacobian::Dense, Some(LinearSolver::Spgmr)),
            Compatibility::Unsupported
        );
    }

    #[test]
    fn test_sparse_rows() {
        assert_eq!(
            classify(Jacobian::Sparse, Some(LinearSolver::Klu)),
            Compatibility::Accepted(LinearSolver::Klu)
        );
        for solver in LinearSolver::KRYLOV {
            assert_eq!(classify(Jacobian::Sparse, Some(solver)), Compatibility::Accepted(solver));
        }
        assert_eq!(
            classify(Jacobian::Sparse, Some(LinearSolver::Dense)),
            Compatibility::SparseRequiresKlu
        );
        assert_eq!(classify(Jacobian::Sparse, None), Compatibility::SparseRequiresKlu);
    }

    #[test]
    fn test_matrix_free_rows() {
        for solver in LinearSolver::KRYLOV {
            assert_eq!(
                classify(Jacobian::MatrixFree, Some(solver)),
                Compatibility::Accepted(solver)
            );
        }
        assert_eq!(
            classify(Jacobian::MatrixFree, Some(LinearSolver::Klu)),
            Compatibility::MatrixFreeRequiresKrylov
        );
        assert_eq!(
            classify(Jacobian::MatrixFree, None),
            Compatibility::MatrixFreeRequiresKrylov
        );
    }

    #[test]
    fn test_none_never_accepted() {
        for solver in LinearSolver::ALL {
            assert_eq!(classify(Jacobian::None, Some(solver)), Compatibility::Unsupported);
        }
        assert_eq!(classify(Jacobian::None, None), Compatibility::Unsupported);
    }

    #[test]
    fn test_resolve_errors() {
        let err = resolve_linear_solver(Jacobian::Sparse, "SUNLinSol_Dense").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IncompatibleLinearSolver { jacobian: Jacobian::Sparse, .. }
        ));

        let err = resolve_linear_solver(Jacobian::MatrixFree, "bogus").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IncompatibleLinearSolver { jacobian: Jacobian::MatrixFree, .. }
        ));

        let err = resolve_linear_solver(Jacobian::Dense, "SUNLinSol_KLU").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLinearSolver { ref value } if value == "SUNLinSol_KLU"));
    }

    #[test]
    fn test_compatible_jacobians() {
        assert_eq!(LinearSolver::Klu.compatible_jacobians(), vec![Jacobian::Sparse]);
        assert_eq!(
            LinearSolver::Spgmr.compatible_jacobians(),
            vec![Jacobian::Sparse, Jacobian::MatrixFree]
        );
        assert_eq!(LinearSolver::LapackDense.compatible_jacobians(), vec![Jacobian::Dense]);
        assert!(LinearSolver::ALL.iter().all(|s| !s.accepts(Jacobian::None)));
    }
}
