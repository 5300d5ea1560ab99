//! # img_hide 库
//!
//! 本库包含图像隐写工具的核心逻辑。
//! 编解码器 (`grid`、`header`、`payload`、`steganography`) 只操作内存中的
//! 像素网格；文件读写与命令行交互由 `cli` 和 `handler` 模块负责。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod header;
pub mod logger;
pub mod payload;
pub mod steganography;
