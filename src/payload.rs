//! # 隐藏图像编解码模块
//!
//! 头部之后的载体像素按光栅顺序划分为长度为 `spread` 的像素组，
//! 每组承载一个隐藏像素：该像素每个通道的高 `bits` 位被切成
//! `spread` 段 (高位段在前)，依次写入组内各载体像素对应通道的
//! 最低 `bits / spread` 位。三个通道共用同一个隐藏像素游标，
//! 每消耗 `spread` 个载体像素前进一次。

use crate::constants::HEADER_SIZE;
use crate::grid::{EncodingParameters, PixelGrid};
use crate::header::SecretHeader;

/// 载体通道中保持不变的高位掩码。
fn keep_mask(bits_per_pixel: u8) -> u8 {
    ((0xFFu16 << bits_per_pixel) & 0xFF) as u8
}

/// 将隐藏图像嵌入 `out` 中头部之后的像素。
///
/// `out` 必须已经是写好头部的载体副本；隐藏数据写完后，
/// 剩余像素保持载体原样。容量由调用方事先保证，
/// 载体过小时放不下的隐藏像素会被静默丢弃 (只嵌入完整的像素组)。
pub fn embed_secret(out: &mut PixelGrid, secret: &PixelGrid, params: EncodingParameters) {
    embed_secret_observed(out, secret, params, |_, _| ())
}

/// 与 [`embed_secret`] 相同，但每完成一个像素组就调用一次 `observer`，
/// 参数为 (已完成组数, 总组数)。
pub fn embed_secret_observed(
    out: &mut PixelGrid,
    secret: &PixelGrid,
    params: EncodingParameters,
    mut observer: impl FnMut(usize, usize),
) {
    let spread = usize::from(params.spread());
    let bits_per_pixel = params.bits_per_pixel();
    let keep = keep_mask(bits_per_pixel);
    let chunk = !keep;

    let capacity_runs = out.pixel_count().saturating_sub(HEADER_SIZE) / spread;
    let total_runs = secret.pixel_count().min(capacity_runs);

    for run in 0..total_runs {
        let source = secret.pixel(run);
        for k in 0..spread {
            // 第 k 段占据样本的位区间 [8 - (k+1)*bpp, 8 - k*bpp)。
            let shift = 8 - (k as u8 + 1) * bits_per_pixel;
            let target = out.pixel_mut(HEADER_SIZE + run * spread + k);
            for (channel, &sample) in target.iter_mut().zip(source.iter()) {
                *channel = (*channel & keep) | ((sample >> shift) & chunk);
            }
        }
        observer(run + 1, total_runs);
    }
}

/// 依据头部描述从载体中重建隐藏图像。
///
/// 恰好读取 `width * height` 个像素组，之后的载体像素一律忽略。
pub fn extract_secret(carrier: &PixelGrid, header: &SecretHeader) -> PixelGrid {
    extract_secret_observed(carrier, header, |_, _| ())
}

/// 与 [`extract_secret`] 相同，但每完成一个像素组就调用一次 `observer`。
pub fn extract_secret_observed(
    carrier: &PixelGrid,
    header: &SecretHeader,
    mut observer: impl FnMut(usize, usize),
) -> PixelGrid {
    let spread = usize::from(header.params.spread());
    let bits = header.params.bits();
    let bits_per_pixel = header.params.bits_per_pixel();
    let chunk = !keep_mask(bits_per_pixel);

    let mut secret = PixelGrid::new(header.width, header.height);
    let total_runs = secret.pixel_count();

    for run in 0..total_runs {
        let mut accumulator: [u8; 3] = [0; 3];
        for k in 0..spread {
            let source = carrier.pixel(HEADER_SIZE + run * spread + k);
            for (acc, &channel) in accumulator.iter_mut().zip(source.iter()) {
                *acc |= channel & chunk;
                if k + 1 < spread {
                    *acc <<= bits_per_pixel;
                } else {
                    // 低 8 - bits 位从未被编码过，把恢复出的值移回高位，
                    // 否则重建图像会整体偏暗。
                    *acc <<= 8 - bits;
                }
            }
        }
        *secret.pixel_mut(run) = accumulator;
        observer(run + 1, total_runs);
    }

    secret
}
