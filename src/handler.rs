//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `recover` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity::EmbeddingSetup;
use crate::cli::{HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_PREFIX, RECOVERED_PREFIX};
use crate::medium::Medium;
use crate::steganography::Steganographer;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 在 `source` 所在目录下生成 `<prefix><文件名主干>` 形式的路径，并设置扩展名。
fn sibling_path(source: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut path = source.with_file_name(format!("{prefix}{stem}"));
    if !extension.is_empty() {
        path.set_extension(extension);
    }
    path
}

/// 目标文件已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 由命令行参数得到载荷布局。只给出 `--all-channels` 时视为每通道 1 位。
fn requested_setup(bits: Option<u32>, all_channels: bool) -> Option<EmbeddingSetup> {
    match (bits, all_channels) {
        (Some(bits), all) => Some(EmbeddingSetup::new(bits, all)),
        (None, true) => Some(EmbeddingSetup::new(1, true)),
        (None, false) => None,
    }
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和待隐藏文件、调用隐写核心将文件内容 (可选加密后) 写入图像，
/// 最后将结果以 PNG 格式写入目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、密钥与布局选项的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或待隐藏文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 扩展名过长、密钥长度非法，或图像没有足够的空间。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = match args.dest {
        Some(dest) if dest.extension().is_none() => dest.with_extension("png"),
        Some(dest) => dest,
        None => sibling_path(&args.image, HIDDEN_PREFIX, "png"),
    };
    ensure_writable(&dest, args.force)?;

    let mut medium = Medium::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let message = fs::read(&args.file).with_context(|| {
        format!(
            "Unable to read file to hide: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    let filetype = args
        .file
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    let setup = Steganographer::default()
        .conceal(
            &mut medium,
            &message,
            &filetype,
            args.key.as_deref().map(str::as_bytes),
            requested_setup(args.bits, args.all_channels),
        )
        .with_context(|| {
            format!(
                "Not enough space or invalid parameters for hiding '{}' in '{}'.",
                args.file.to_string_lossy().red().bold(),
                args.image.to_string_lossy().red().bold()
            )
        })?;

    medium.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully hidden ({} bit(s) per channel, all channels: {}) and saved: {}",
        setup.bits_per_pixel.to_string().green(),
        setup.use_all_channels.to_string().green(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、调用隐写核心恢复载荷 (必要时解密)，
/// 最后将内容写入目标文件。未指定输出路径时使用头部记录的扩展名。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与密钥的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有可解析的头部，或载荷被截断。
/// * 载荷已加密但未提供密钥，或密钥错误。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let medium = Medium::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let revealed = Steganographer::default()
        .reveal(&medium, args.key.as_deref().map(str::as_bytes))
        .with_context(|| {
            format!(
                "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden message, is corrupted, or the key is wrong.",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    let output = match args.output {
        Some(output) => output,
        None => {
            // 扩展名来自图像头部，不可信
            anyhow::ensure!(
                revealed.filetype.chars().all(|c| c.is_ascii_alphanumeric()),
                "The hidden filetype {} is not a plain file extension. \nPass an explicit output path with --output.",
                format!("{:?}", revealed.filetype).red().bold()
            );
            sibling_path(&args.image, RECOVERED_PREFIX, &revealed.filetype)
        }
    };
    ensure_writable(&output, args.force)?;

    fs::write(&output, &revealed.payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The hidden file has been successfully recovered and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}
