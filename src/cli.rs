//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于将一张图像隐藏进另一张无损格式图像 (如 PNG, BMP)，或将隐藏的图像提取出来。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于将一张图像隐藏进另一张无损格式图像 (如 PNG, BMP)，或将隐藏的图像提取出来。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 extract (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将一张图像隐藏进另一张图像，结果保存为无损格式 (如 PNG, BMP)。
    Hide(HideArgs),

    /// 从经过隐写的图像中提取隐藏的图像。
    Extract(ExtractArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 作为载体的可见图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的图像文件路径。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 使用隐藏图像每个通道的多少个最高有效位 (1-8)。8 位时编码无损。
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: u8,

    /// 将每个隐藏像素扩散到多少个载体像素上 (1-8，须能整除 bits)。
    /// 扩散得越开，对载体的改动越不易察觉。
    #[arg(short = 'a', long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub spread: u8,

    /// 隐写完成后保存结果图像的输出路径，必须为无损格式。
    /// 缺省时在载体同目录下生成带参数后缀的文件名。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 打印额外的过程日志。
    #[arg(short, long)]
    pub verbose: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已隐藏图像数据的载体图像路径，必须为无损格式。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 提取后保存隐藏图像的输出路径，必须为无损格式。
    /// 缺省时在载体同目录下生成 extracted_ 前缀的文件名。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 打印额外的过程日志。
    #[arg(short, long)]
    pub verbose: bool,
}
