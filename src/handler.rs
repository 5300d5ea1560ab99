//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责协调图像文件 I/O、像素网格转换、调用核心隐写算法
//! 以及向用户报告结果。

use crate::cli::{ExtractArgs, HideArgs};
use crate::constants::{LOSSLESS_EXTENSIONS, PROGRESS_INTERVAL};
use crate::grid::{EncodingParameters, PixelGrid};
use crate::header::read_header;
use crate::logger::Logger;
use crate::payload::extract_secret_observed;
use crate::steganography::{hide_observed, required_pixels};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use std::path::Path;

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体与隐藏图像、检查编码参数与载体容量、调用核心隐写算法，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与编码参数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * `--bits` 与 `--spread` 的组合不合法。
/// * 输出路径不是无损格式，或已存在且未指定 `--force`。
/// * 无法读取载体或隐藏图像文件。
/// * 载体没有足够的空间容纳隐藏图像。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let logger = Logger::new(args.verbose);

    let params = EncodingParameters::new(args.bits, args.spread).context(
        "Invalid combination of --bits and --spread. \nThe spread factor must be between 1 and 8 and evenly divide the number of bits.",
    )?;

    let dest = args.output.clone().unwrap_or_else(|| {
        args.image.with_file_name(format!(
            "hidden_{}_{}B{}A.png",
            file_stem(&args.image),
            params.bits(),
            params.spread()
        ))
    });
    ensure_lossless_output(&dest)?;
    ensure_overwritable(&dest, args.force)?;

    logger.log(&format!(
        "Entered parameters:\n\tNumber of sig. bits:\t{}\n\tSpread factor:\t\t{}",
        params.bits(),
        params.spread()
    ));
    if params.bits() == 8 {
        logger.log("\tEncoding type:\t\tlossless");
    } else {
        logger.log("\tEncoding type:\t\tlossy");
    }

    logger.log("Loading images...");
    let carrier_image = load_rgb_image(&args.image)?;
    let secret_image = load_rgb_image(&args.secret)?;
    let carrier = grid_from_image(&carrier_image);
    let secret = grid_from_image(&secret_image);

    logger.log("Analyzing dimensions...");
    logger.log(&format!(
        "Carrier image (visible) dimensions:\t{} x {} px",
        carrier.width(),
        carrier.height()
    ));
    logger.log(&format!(
        "Secret image (hidden) dimensions:\t{} x {} px",
        secret.width(),
        secret.height()
    ));

    let required = required_pixels(secret.width(), secret.height(), params.spread());
    let available = carrier.pixel_count();
    anyhow::ensure!(
        available >= required,
        "Not enough space in the carrier image to hide the secret image. \nRequired: {} px, Available: {} px",
        required.to_string().red().bold(),
        available.to_string().green().bold()
    );

    logger.log("Encoding the hidden image...");
    let result = hide_observed(&carrier, &secret, params, |done, total| {
        if done % PROGRESS_INTERVAL == 0 || done == total {
            logger.log(&format!("Encoded {done}/{total} pixel runs"));
        }
    })
    .context("Failed to embed the secret image into the carrier.")?;

    logger.log("Processing finished, saving image...");
    image_from_grid(&result).save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    logger.success("Secret image embedded without a trace.");

    println!(
        "The image has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责读取经过隐写的载体图像、读取并校验头部、重建隐藏图像，
/// 最后将其写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 载体图像不是无损格式。
/// * 输出路径不是无损格式，或已存在且未指定 `--force`。
/// * 无法读取载体图像文件。
/// * 头部未通过合理性检查 (载体中很可能没有隐藏图像)。
/// * 无法写入到目标图像文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let logger = Logger::new(args.verbose);

    anyhow::ensure!(
        has_lossless_extension(&args.image),
        "Invalid format of the carrier image: {}. \nHidden data only survives in lossless formats, e.g.: {}",
        args.image.to_string_lossy().red().bold(),
        LOSSLESS_EXTENSIONS.join(", ").green()
    );

    let dest = args.output.clone().unwrap_or_else(|| {
        args.image
            .with_file_name(format!("extracted_{}.png", file_stem(&args.image)))
    });
    ensure_lossless_output(&dest)?;
    ensure_overwritable(&dest, args.force)?;

    logger.log("Analyzing image...");
    let carrier_image = load_rgb_image(&args.image)?;
    let carrier = grid_from_image(&carrier_image);

    let header = read_header(&carrier).with_context(|| {
        format!(
            "No hidden image found in '{}'. \nMake sure you selected the correct carrier image.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    logger.log(&format!(
        "Found the hidden image resolution: {} x {} px",
        header.width, header.height
    ));
    logger.log(&format!(
        "Found the encoding parameters: bits = {}, spread = {}",
        header.params.bits(),
        header.params.spread()
    ));

    logger.log("Extracting the hidden image...");
    let secret = extract_secret_observed(&carrier, &header, |done, total| {
        if done % PROGRESS_INTERVAL == 0 || done == total {
            logger.log(&format!("Decoded {done}/{total} pixel runs"));
        }
    });

    logger.log("Processing finished, saving image...");
    image_from_grid(&secret).save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    logger.success("Hidden image recovered intact.");

    println!(
        "The hidden image has been successfully extracted and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 读取图像文件并统一转换为 RGB 8 位格式。
fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(image.to_rgb8())
}

/// 将解码后的图像转换为编解码器使用的像素网格。
fn grid_from_image(image: &RgbImage) -> PixelGrid {
    let pixels = image.pixels().map(|pixel| pixel.0).collect();
    PixelGrid::from_pixels(image.width(), image.height(), pixels)
}

/// 将编解码结果转换回可保存的图像。
fn image_from_grid(grid: &PixelGrid) -> RgbImage {
    RgbImage::from_fn(grid.width(), grid.height(), |x, y| {
        image::Rgb(grid.pixel((y * grid.width() + x) as usize))
    })
}

fn has_lossless_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            LOSSLESS_EXTENSIONS
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
}

fn ensure_lossless_output(path: &Path) -> Result<()> {
    anyhow::ensure!(
        has_lossless_extension(path),
        "Invalid output format: {}. \nThe output must be a lossless format, e.g.: {}",
        path.to_string_lossy().red().bold(),
        LOSSLESS_EXTENSIONS.join(", ").green()
    );
    Ok(())
}

fn ensure_overwritable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("output"))
}
