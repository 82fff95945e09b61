// apps/ik_cli/src/commands/validate.rs

//! 选项验证命令
//!
//! 读取并校验选项文件。兼容性错误直接中止；
//! 校验通过后再检查数值参数，给出警告与提示。

use anyhow::{bail, Context, Result};
use clap::Args;
use ik_options::{ConfigError, Preconditioner, RawConfiguration, ValidatedConfiguration};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 选项文件路径 (.json / .yaml / .yml)
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,

    /// 以 JSON 输出校验后的选项
    #[arg(long)]
    pub json: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    warnings: Vec<String>,
    notes: Vec<String>,
}

impl ValidationResult {
    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn add_note(&mut self, msg: impl Into<String>) {
        self.notes.push(msg.into());
    }

    fn is_ok_strict(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== IdaKlu 选项验证 ===");
    println!("\n检查选项文件: {}", args.config.display());

    let raw = RawConfiguration::from_file(&args.config)
        .with_context(|| format!("无法读取选项文件: {}", args.config.display()))?;

    let validated = match raw.validate() {
        Ok(v) => v,
        Err(e) => {
            error!("[{}] {}", e.kind(), e);
            println!("  ✗ {}", e);
            let ctx = failure_context(&e);
            return Err(e).context(ctx);
        }
    };

    println!("  ✓ {}", validated);

    let result = review(&raw, &validated);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&validated)?);
    }

    print_validation_result(&result, args.strict)
}

fn failure_context(err: &ConfigError) -> &'static str {
    if err.is_compatibility() {
        "选项组合不兼容"
    } else {
        "选项校验失败"
    }
}

/// 检查通过兼容性校验之后仍值得注意的数值设置
fn review(raw: &RawConfiguration, validated: &ValidatedConfiguration) -> ValidationResult {
    let mut result = ValidationResult::default();

    if validated.using_iterative_solver() && validated.linsol_max_iterations() <= 0 {
        result.add_warning(format!(
            "linsol_max_iterations = {}，迭代求解器需要正的最大迭代次数",
            validated.linsol_max_iterations()
        ));
    }

    if let Some(bw) = validated.bbdp_bandwidths() {
        if bw.half_bandwidth < 0 || bw.half_bandwidth_keep < 0 {
            result.add_warning(format!(
                "BBDP 半带宽不能为负: precon_half_bandwidth = {}, precon_half_bandwidth_keep = {}",
                bw.half_bandwidth, bw.half_bandwidth_keep
            ));
        }
        if bw.half_bandwidth_keep > bw.half_bandwidth {
            result.add_warning(format!(
                "precon_half_bandwidth_keep ({}) 大于 precon_half_bandwidth ({})",
                bw.half_bandwidth_keep, bw.half_bandwidth
            ));
        }
    }

    if !validated.using_iterative_solver() && raw.preconditioner != Preconditioner::None.name() {
        result.add_note(format!(
            "{} 为直接求解器，preconditioner = \"{}\" 已被忽略",
            validated.linear_solver(),
            raw.preconditioner
        ));
    }

    result
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.notes.is_empty() {
        println!("\n提示 ({}):", result.notes.len());
        for note in &result.notes {
            info!("  ℹ {}", note);
            println!("  ℹ {}", note);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    if strict && !result.is_ok_strict() {
        println!("\n✗ 验证失败");
        bail!("严格模式验证失败：发现 {} 个警告", result.warnings.len());
    }

    println!("\n✓ 验证通过");
    Ok(())
}
