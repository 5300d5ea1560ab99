//! # 隐写核心模块
//!
//! 对外的编解码边界：所有参数与容量检查都在这里完成，
//! 之后才组合头部写入与隐藏数据的嵌入或提取。
//! 全部函数只操作内存中的像素网格，不做任何 I/O。

use crate::constants::{HEADER_SIZE, MAX_SECRET_DIMENSION};
use crate::error::StegoError;
use crate::grid::{EncodingParameters, PixelGrid};
use crate::header::{self, SecretHeader};
use crate::payload;

/// 以给定扩散因子隐藏一张 `width x height` 的图像所需的载体像素总数。
pub fn required_pixels(width: u32, height: u32, spread: u8) -> usize {
    HEADER_SIZE + width as usize * height as usize * usize::from(spread)
}

/// 将 `secret` 隐写进 `carrier`，返回与载体同尺寸的新网格。
///
/// # Errors
///
/// * [`StegoError::SecretTooLarge`] - 隐藏图像的宽或高超过 18 位字段上限。
/// * [`StegoError::InsufficientCapacity`] - 载体像素数不足。
///
/// 两种错误都在任何像素被写入之前返回。
pub fn hide(
    carrier: &PixelGrid,
    secret: &PixelGrid,
    params: EncodingParameters,
) -> Result<PixelGrid, StegoError> {
    hide_observed(carrier, secret, params, |_, _| ())
}

/// 与 [`hide`] 相同，但每完成一个像素组就调用一次 `observer`，
/// 参数为 (已完成组数, 总组数)。
pub fn hide_observed(
    carrier: &PixelGrid,
    secret: &PixelGrid,
    params: EncodingParameters,
    observer: impl FnMut(usize, usize),
) -> Result<PixelGrid, StegoError> {
    if secret.width() > MAX_SECRET_DIMENSION || secret.height() > MAX_SECRET_DIMENSION {
        return Err(StegoError::SecretTooLarge {
            width: secret.width(),
            height: secret.height(),
        });
    }

    let required = required_pixels(secret.width(), secret.height(), params.spread());
    let available = carrier.pixel_count();
    if available < required {
        return Err(StegoError::InsufficientCapacity {
            required,
            available,
        });
    }

    let mut out = carrier.clone();
    header::write_header(
        &mut out,
        &SecretHeader {
            width: secret.width(),
            height: secret.height(),
            params,
        },
    );
    payload::embed_secret_observed(&mut out, secret, params, observer);

    Ok(out)
}

/// 从载体中提取隐藏图像。
///
/// # Errors
///
/// 头部未通过合理性检查时返回 [`StegoError::HeaderInvalid`]，
/// 调用方应将其理解为"没有找到隐藏图像"。
pub fn extract(carrier: &PixelGrid) -> Result<PixelGrid, StegoError> {
    extract_observed(carrier, |_, _| ())
}

/// 与 [`extract`] 相同，但每完成一个像素组就调用一次 `observer`。
pub fn extract_observed(
    carrier: &PixelGrid,
    observer: impl FnMut(usize, usize),
) -> Result<PixelGrid, StegoError> {
    let header = header::read_header(carrier)?;
    Ok(payload::extract_secret_observed(carrier, &header, observer))
}
