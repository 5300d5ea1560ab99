/// 隐写头部占用的载体像素数。
/// 载体按光栅顺序的前 8 个像素依次记录隐藏图像的宽、高与编码参数。
pub const HEADER_SIZE: usize = 8;

/// 写入头部时保留载体原样的高位掩码。
/// 头部的每个通道只覆盖最低 2 位，高 6 位保持载体原值。
pub const HEADER_KEEP_MASK: u8 = 0b1111_1100;

/// 头部每个通道承载的 2 位数据掩码。
pub const HEADER_CHUNK_MASK: u8 = 0b0000_0011;

/// 隐藏图像宽和高各自的上限。
/// 头部为每个维度分配 18 位 (3 像素 × 3 通道 × 2 位)。
pub const MAX_SECRET_DIMENSION: u32 = (1 << 18) - 1;

/// 详细模式下进度日志的汇报间隔 (以像素组为单位)。
pub const PROGRESS_INTERVAL: usize = 10_000;

/// 允许作为输出格式的无损图像扩展名。
/// 有损压缩会改写最低有效位，使隐藏数据无法恢复。
pub const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tiff", "tif", "qoi"];
