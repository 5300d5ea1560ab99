//! # 错误类型模块
//!
//! 定义编解码边界上的所有失败情况。
//! 每种错误都在处理任何像素之前报告，编解码器不会产生写了一半的网格。

use core::fmt;

use crate::constants::MAX_SECRET_DIMENSION;

/// 隐写编码或解码过程中可能出现的错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StegoError {
    /// 编码参数超出 `1..=8`，或扩散因子不能整除位数。
    InvalidParameters { bits: u8, spread: u8 },
    /// 隐藏图像的宽或高超过头部 18 位字段所能表示的上限。
    SecretTooLarge { width: u32, height: u32 },
    /// 载体像素数不足以容纳头部与隐藏图像数据。
    InsufficientCapacity { required: usize, available: usize },
    /// 头部未通过合理性检查，载体中很可能没有隐藏图像。
    HeaderInvalid,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { bits, spread } => write!(
                f,
                "invalid encoding parameters: bits = {bits}, spread = {spread} \
                 (both must be within 1..=8 and spread must evenly divide bits)"
            ),
            Self::SecretTooLarge { width, height } => write!(
                f,
                "secret image is {width}x{height} px, the header supports at most \
                 {MAX_SECRET_DIMENSION} px per dimension"
            ),
            Self::InsufficientCapacity {
                required,
                available,
            } => write!(
                f,
                "carrier holds {available} px but {required} px are required for this \
                 secret image and spread factor"
            ),
            Self::HeaderInvalid => write!(
                f,
                "no hidden image found (the header failed its plausibility checks)"
            ),
        }
    }
}

impl std::error::Error for StegoError {}
