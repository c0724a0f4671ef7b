use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use lsb_vault::{
    cli::{Cli, Commands},
    handler::{handle_hide, handle_recover},
};

/// 初始化日志。默认只输出警告，`--verbose` 提升到调试级别，`RUST_LOG` 优先。
fn init_logger(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令（`hide` 或 `recover`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Recover(args) => handle_recover(args),
    }
}
