//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏在无损格式图像 (如 PNG, BMP) 中，并可选用 AES-GCM 加密。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏在无损格式图像 (如 PNG, BMP) 中，并可选用 AES-GCM 加密。"
)]
pub struct Cli {
    /// 输出调试日志。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 recover (恢复)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将文件隐藏到无损格式图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    Recover(RecoverArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 用于隐写的载体图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径，其扩展名 (最多 3 个字符) 会记录在头部中。
    #[arg(short, long)]
    pub file: PathBuf,

    /// 结果图像的保存路径，始终以 PNG 格式写出。
    /// 省略时保存为载体图像所在目录下的 `hidden_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// AES 密钥 (16 或 32 个字节)。提供后载荷会先加密再隐藏。
    #[arg(short, long)]
    pub key: Option<String>,

    /// 每个通道使用的低位数。容量不足时会自动改选布局。
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// 每个通道各存一个符号，而不是每个像素只存一个符号。
    #[arg(short, long)]
    pub all_channels: bool,

    /// 目标文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 隐藏了数据的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复内容的保存路径。
    /// 省略时保存为图像所在目录下的 `recovered_<名称>.<扩展名>`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 隐藏时使用的 AES 密钥。
    #[arg(short, long)]
    pub key: Option<String>,

    /// 目标文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}
