//! # 头部编解码模块
//!
//! 载体按光栅顺序的前 8 个像素构成一个固定头部：
//! 像素 0-2 存隐藏图像宽度、像素 3-5 存高度 (各 18 位，低位在前)，
//! 像素 6 存位数、像素 7 存扩散因子 (各 4 位，只用前两个通道)。
//! 每个通道只覆盖最低 2 位，其余位一律保持载体原值，
//! 因此头部是对载体的最小侵入覆盖，而不是整像素替换。

use crate::constants::{HEADER_CHUNK_MASK, HEADER_KEEP_MASK, HEADER_SIZE};
use crate::error::StegoError;
use crate::grid::{EncodingParameters, PixelGrid};

/// 从头部恢复出的隐藏图像描述。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretHeader {
    pub width: u32,
    pub height: u32,
    pub params: EncodingParameters,
}

/// 将头部覆盖写入网格的前 8 个像素。
///
/// `grid` 应当已经是载体的副本；写入只替换相关通道的最低 2 位。
pub fn write_header(grid: &mut PixelGrid, header: &SecretHeader) {
    write_dimension(grid, 0, header.width);
    write_dimension(grid, 3, header.height);
    write_parameter(grid, 6, header.params.bits());
    write_parameter(grid, 7, header.params.spread());
}

/// 读取并校验头部。
///
/// # Errors
///
/// 头部数值未通过合理性检查时返回 [`StegoError::HeaderInvalid`]：
/// 位数为 0 或超过 8、扩散因子超过 8 或不能整除位数、
/// 载体小于头部本身、或声明的隐藏图像在该载体中放不下。
/// 这是判断载体是否含有隐藏图像的唯一信号：格式中没有魔数，
/// 碰巧通过全部检查的随机低位数据会被当作有效头部接受。
pub fn read_header(carrier: &PixelGrid) -> Result<SecretHeader, StegoError> {
    if carrier.pixel_count() < HEADER_SIZE {
        return Err(StegoError::HeaderInvalid);
    }

    let width = read_dimension(carrier, 0);
    let height = read_dimension(carrier, 3);
    let bits = read_parameter(carrier, 6);
    let spread = read_parameter(carrier, 7);

    if bits == 0 || bits > 8 || spread > 8 {
        return Err(StegoError::HeaderInvalid);
    }

    let available = carrier.pixel_count() - HEADER_SIZE;
    let needed = width as usize * height as usize * usize::from(spread);
    if needed > available {
        return Err(StegoError::HeaderInvalid);
    }

    let params =
        EncodingParameters::new(bits, spread).map_err(|_| StegoError::HeaderInvalid)?;

    Ok(SecretHeader {
        width,
        height,
        params,
    })
}

/// 把一个 18 位的尺寸值写入从 `base` 开始的 3 个像素。
/// 像素 `base + i` 的通道 `j` 承载位偏移 `i*6 + j*2` 处的 2 位。
fn write_dimension(grid: &mut PixelGrid, base: usize, value: u32) {
    let mut value = value;
    for i in 0..3 {
        let pixel = grid.pixel_mut(base + i);
        for channel in pixel.iter_mut() {
            *channel = (*channel & HEADER_KEEP_MASK) | (value as u8 & HEADER_CHUNK_MASK);
            value >>= 2;
        }
    }
}

fn read_dimension(grid: &PixelGrid, base: usize) -> u32 {
    let mut value = 0u32;
    for i in 0..3 {
        let pixel = grid.pixel(base + i);
        for (j, channel) in pixel.iter().enumerate() {
            value |= u32::from(channel & HEADER_CHUNK_MASK) << (i * 6 + j * 2);
        }
    }
    value
}

/// 把一个 4 位的参数值写入下标为 `index` 的像素的前两个通道。
fn write_parameter(grid: &mut PixelGrid, index: usize, value: u8) {
    let mut value = value;
    let pixel = grid.pixel_mut(index);
    for channel in pixel.iter_mut().take(2) {
        *channel = (*channel & HEADER_KEEP_MASK) | (value & HEADER_CHUNK_MASK);
        value >>= 2;
    }
}

fn read_parameter(grid: &PixelGrid, index: usize) -> u8 {
    let pixel = grid.pixel(index);
    (pixel[0] & HEADER_CHUNK_MASK) | ((pixel[1] & HEADER_CHUNK_MASK) << 2)
}
