//! 写真取り込みモジュール
//!
//! 記録本体には写真のバイナリを持たせず、データディレクトリの
//! photos/ 配下へ内容ハッシュ名のJPEGとして保存し、記録には
//! ファイル名だけを残す。同じ写真を何度取り込んでも1ファイルになる。

use image::DynamicImage;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GohanLogError, Result};

pub const PHOTOS_DIR_NAME: &str = "photos";

/// 取り込み時の長辺上限（これを超える写真は縮小する）
const MAX_EDGE: u32 = 1280;
const JPEG_QUALITY: u8 = 80;

/// 写真ファイルを取り込み、保存したファイル名を返す
pub fn attach_photo(data_dir: &Path, source: &Path) -> Result<String> {
    if !source.exists() {
        return Err(GohanLogError::FileNotFound(source.display().to_string()));
    }

    let img = image::open(source)
        .map_err(|e| GohanLogError::PhotoLoad(format!("{}: {}", source.display(), e)))?;

    let img = if img.width().max(img.height()) > MAX_EDGE {
        img.thumbnail(MAX_EDGE, MAX_EDGE)
    } else {
        img
    };

    // JPEGはアルファ非対応のためRGBへ落とす
    let img = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(|e| GohanLogError::PhotoLoad(e.to_string()))?;

    let digest = hex::encode(Sha256::digest(&buf));
    let file_name = format!("{}.jpg", &digest[..16]);

    let photos_dir = data_dir.join(PHOTOS_DIR_NAME);
    fs::create_dir_all(&photos_dir)?;
    fs::write(photos_dir.join(&file_name), &buf)?;

    Ok(file_name)
}

/// 記録が参照する写真の絶対パス
pub fn photo_path(data_dir: &Path, file_name: &str) -> PathBuf {
    data_dir.join(PHOTOS_DIR_NAME).join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_attach_missing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let result = attach_photo(dir.path(), Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(GohanLogError::FileNotFound(_))));
    }

    #[test]
    fn test_attach_non_image_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let bogus = dir.path().join("not_a_photo.jpg");
        fs::write(&bogus, b"just text").unwrap();

        let result = attach_photo(dir.path(), &bogus);
        assert!(matches!(result, Err(GohanLogError::PhotoLoad(_))));
    }

    #[test]
    fn test_attach_stores_content_addressed_jpeg() {
        let dir = tempdir().expect("Failed to create temp dir");
        let source = dir.path().join("dish.png");
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 120, 40]));
        img.save(&source).unwrap();

        let name = attach_photo(dir.path(), &source).unwrap();
        assert!(name.ends_with(".jpg"));
        assert!(photo_path(dir.path(), &name).exists());

        // 同じ写真は同じファイル名に落ちる
        let again = attach_photo(dir.path(), &source).unwrap();
        assert_eq!(name, again);
    }
}
