use anyhow::Ok;
use image::{ImageBuffer, Rgba};
use img_hide::{
    cli::{ExtractArgs, HideArgs},
    handler::{handle_extract, handle_hide},
};
use rand::RngCore;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 一个辅助函数，用于创建一张纯黑图像，模拟从未隐写过的载体
fn create_black_image(path: &Path, width: u32, height: u32) {
    let img_buf = ImageBuffer::from_pixel(width, height, Rgba([0u8, 0, 0, 255]));
    img_buf.save(path).expect("Failed to create test image.");
}

/// 验证从隐藏到提取的完整流程 (bits = 8 时应当完全无损)
#[test]
fn test_handle_hide_and_extract_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let carrier_path = dir.path().join("carrier.png");
    let secret_path = dir.path().join("secret.png");
    let hidden_path = dir.path().join("hidden.png");
    let extracted_path = dir.path().join("extracted.png");

    create_test_image(&carrier_path, 100, 100);
    create_test_image(&secret_path, 20, 20);

    // 2. 测试 handle_hide
    let hide_args = HideArgs {
        image: carrier_path.clone(),
        secret: secret_path.clone(),
        bits: 8,
        spread: 2,
        output: Some(hidden_path.clone()),
        force: false,
        verbose: false,
    };
    handle_hide(hide_args)?;
    assert!(hidden_path.exists(), "Hidden image should be created.");

    // 3. 测试 handle_extract
    let extract_args = ExtractArgs {
        image: hidden_path.clone(),
        output: Some(extracted_path.clone()),
        force: false,
        verbose: false,
    };
    handle_extract(extract_args)?;
    assert!(extracted_path.exists(), "Extracted image should be created.");

    // 4. 验证结果：bits = 8 时提取结果必须与原图逐字节一致
    let original = image::open(&secret_path)?.to_rgb8();
    let recovered = image::open(&extracted_path)?.to_rgb8();
    assert_eq!(original.dimensions(), recovered.dimensions());
    assert_eq!(
        original.as_raw(),
        recovered.as_raw(),
        "Extracted image must match the original secret."
    );

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_hide_and_extract_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let carrier_path = dir.path().join("carrier.png");
    let secret_path = dir.path().join("secret.png");

    create_test_image(&carrier_path, 100, 100);
    create_test_image(&secret_path, 10, 10);

    // 2. 测试 handle_hide，不提供 output 路径 (默认参数 bits = 6, spread = 3)
    let hide_args = HideArgs {
        image: carrier_path.clone(),
        secret: secret_path.clone(),
        bits: 6,
        spread: 3,
        output: None, // 关键：测试 None 的情况
        force: false,
        verbose: false,
    };
    handle_hide(hide_args)?;

    // 验证带参数后缀的默认输出文件是否已创建
    let expected_hidden_path = dir.path().join("hidden_carrier_6B3A.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // 3. 测试 handle_extract，不提供 output 路径
    let extract_args = ExtractArgs {
        image: expected_hidden_path, // 使用上一步生成的默认文件
        output: None,                // 关键：测试 None 的情况
        force: false,
        verbose: false,
    };
    handle_extract(extract_args)?;

    // 验证默认的提取输出文件是否已创建
    let expected_extracted_path = dir.path().join("extracted_hidden_carrier_6B3A.png");
    assert!(
        expected_extracted_path.exists(),
        "Default extracted image should be created at: {:?}",
        expected_extracted_path
    );

    // 4. 验证结果：bits = 6 时每个通道的低 2 位被截断，其余位必须一致
    let original = image::open(&secret_path)?.to_rgb8();
    let recovered = image::open(&expected_extracted_path)?.to_rgb8();
    assert_eq!(original.dimensions(), recovered.dimensions());
    for (o, r) in original.as_raw().iter().zip(recovered.as_raw()) {
        assert_eq!(*r, *o & 0b1111_1100, "Only the low 2 bits may differ.");
    }

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let carrier_path = dir.path().join("carrier.png");
    let secret_path = dir.path().join("secret.png");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&carrier_path, 50, 50);
    create_test_image(&secret_path, 5, 5);

    // 2. 场景一：测试覆盖保护
    // 先创建一个同名的目标文件，模拟“文件已存在”的场景
    std::fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    // 构建参数，不使用 --force
    let hide_args_no_force = HideArgs {
        image: carrier_path.clone(),
        secret: secret_path.clone(),
        bits: 8,
        spread: 1,
        output: Some(dest_path.clone()),
        force: false,
        verbose: false,
    };

    // 执行并断言操作会失败
    let result = handle_hide(hide_args_no_force);
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    // 构建参数，这次使用 --force
    let hide_args_with_force = HideArgs {
        image: carrier_path.clone(),
        secret: secret_path.clone(),
        bits: 8,
        spread: 1,
        output: Some(dest_path.clone()),
        force: true,
        verbose: false,
    };

    // 执行并断言操作会成功
    let result = handle_hide(hide_args_with_force);
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    // 验证文件确实被覆盖（内容不再是 "this is a dummy file..."）
    let dummy_content = std::fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证载体空间不足时的错误处理
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let carrier_path = dir.path().join("small.png");
    let secret_path = dir.path().join("large.png");
    let dest_path = dir.path().join("dest.png");

    // 创建一张非常小的载体与一张更大的隐藏图像
    create_test_image(&carrier_path, 10, 10);
    create_test_image(&secret_path, 20, 20);

    // 2. 执行并断言错误 (需要 8 + 400 * 3 = 1208 px，载体只有 100 px)
    let hide_args = HideArgs {
        image: carrier_path,
        secret: secret_path,
        bits: 6,
        spread: 3,
        output: Some(dest_path),
        force: false,
        verbose: false,
    };
    let result = handle_hide(hide_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }

    Ok(())
}

/// 验证非法的 bits/spread 组合在任何文件被读取之前就被拒绝
#[test]
fn test_handle_hide_invalid_parameters() -> anyhow::Result<()> {
    let dir = tempdir()?;

    // 5 不能被 2 整除，文件路径是否存在无关紧要
    let hide_args = HideArgs {
        image: dir.path().join("carrier.png"),
        secret: dir.path().join("secret.png"),
        bits: 5,
        spread: 2,
        output: Some(dir.path().join("dest.png")),
        force: false,
        verbose: false,
    };
    let result = handle_hide(hide_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Invalid combination"));
    }

    Ok(())
}

/// 验证从未隐写过的图像会被报告为没有隐藏图像
#[test]
fn test_handle_extract_without_hidden_image() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let carrier_path = dir.path().join("plain.png");

    // 纯黑图像的头部解码出 bits = 0，必定无法通过合理性检查
    create_black_image(&carrier_path, 50, 50);

    let extract_args = ExtractArgs {
        image: carrier_path,
        output: Some(dir.path().join("out.png")),
        force: false,
        verbose: false,
    };
    let result = handle_extract(extract_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("No hidden image found"));
    }

    Ok(())
}

/// 验证有损格式的载体在提取时被直接拒绝
#[test]
fn test_handle_extract_rejects_lossy_carrier() -> anyhow::Result<()> {
    let dir = tempdir()?;

    // 扩展名检查发生在读取文件之前
    let extract_args = ExtractArgs {
        image: dir.path().join("photo.webp"),
        output: Some(dir.path().join("out.png")),
        force: false,
        verbose: false,
    };
    let result = handle_extract(extract_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("lossless"));
    }

    Ok(())
}
