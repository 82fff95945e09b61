// apps/ik_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示默认选项与兼容性矩阵。

use anyhow::Result;
use clap::Args;
use ik_options::{classify, Compatibility, Jacobian, LinearSolver, RawConfiguration};
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 显示默认选项
    #[arg(long)]
    pub defaults: bool,

    /// 显示 Jacobian × 线性求解器兼容性矩阵
    #[arg(long)]
    pub matrix: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== IdaKlu 信息 ===");

    if args.defaults {
        print_default_options()?;
    }

    if args.matrix {
        print_compatibility_matrix();
    }

    if !args.defaults && !args.matrix {
        // 默认显示所有信息
        print_default_options()?;
        println!();
        print_compatibility_matrix();
    }

    Ok(())
}

fn print_default_options() -> Result<()> {
    println!("=== 默认选项 ===");

    let raw = RawConfiguration::default();
    println!("{}", raw.to_json()?);

    let validated = raw.validate()?;
    println!("\n校验结果: {}", validated);

    Ok(())
}

fn print_compatibility_matrix() {
    println!("=== 兼容性矩阵 ===");
    println!("{}", compatibility_table());
    println!("✓ 兼容   ✗ 不兼容（错误消息给出替代求解器）   ? 不受支持");
}

/// 逐行查表生成矩阵，行为线性求解器，列为 Jacobian
fn compatibility_table() -> String {
    let width = LinearSolver::ALL
        .iter()
        .map(|s| s.name().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{:width$}", "", width = width);
    for jacobian in Jacobian::ALL {
        out.push_str(&format!("  {:>11}", jacobian.name()));
    }
    out.push('\n');

    for solver in LinearSolver::ALL {
        out.push_str(&format!("{:width$}", solver.name(), width = width));
        for jacobian in Jacobian::ALL {
            out.push_str(&format!("  {:>11}", symbol(classify(jacobian, Some(solver)))));
        }
        out.push_str(&format!("  ({:?})\n", solver.family()));
    }
    out
}

fn symbol(compatibility: Compatibility) -> &'static str {
    match compatibility {
        Compatibility::Accepted(_) => "✓",
        Compatibility::SparseRequiresKlu | Compatibility::MatrixFreeRequiresKrylov => "✗",
        Compatibility::Unsupported => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_row_per_solver() {
        let table = compatibility_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 1 + LinearSolver::ALL.len());
        assert!(lines[0].contains("matrix-free"));
    }

    #[test]
    fn test_klu_row() {
        let table = compatibility_table();
        let klu = table
            .lines()
            .find(|line| line.starts_with("SUNLinSol_KLU"))
            .unwrap();
        assert_eq!(klu.matches('✓').count(), 1);
        assert!(klu.contains("Direct"));
    }

    #[test]
    fn test_krylov_rows() {
        let table = compatibility_table();
        for solver in LinearSolver::KRYLOV {
            let row = table
                .lines()
                .find(|line| line.starts_with(solver.name()))
                .unwrap();
            assert_eq!(row.matches('✓').count(), 2, "{row}");
        }
    }
}
