//! # 载体图像模块
//!
//! [`Medium`] 是一个 `rows x cols x 3` 的 8 位采样网格，按行优先、再按列、
//! 最后按通道的顺序平铺存放。图像文件的读写通过 `image` crate 完成。

use image::{ImageFormat, RgbImage};
use std::path::Path;

use crate::constants::CHANNELS;
use crate::error::{Result, StegoError};

/// 载体像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medium {
    rows: usize,
    cols: usize,
    samples: Vec<u8>,
}

impl Medium {
    /// 用平铺的 RGB 采样构造网格。
    ///
    /// # Errors
    ///
    /// 采样数不等于 `rows * cols * 3` 时返回 [`StegoError::InvalidInput`]。
    pub fn new(rows: usize, cols: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| StegoError::InvalidInput(format!("{rows}x{cols} grid is too large")))?;
        if samples.len() != expected {
            return Err(StegoError::InvalidInput(format!(
                "expected {expected} samples for a {rows}x{cols} grid, got {}",
                samples.len()
            )));
        }
        Ok(Self { rows, cols, samples })
    }

    /// 读取任意 `image` 支持的格式，并转换为 RGB8。
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path)?.to_rgb8();
        Ok(Self::from(image))
    }

    /// 以 PNG (无损) 格式保存。
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image()?.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 像素个数，即可用的 "像素行" 数。
    pub fn pixel_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// 按 (行, 列, 通道) 读取单个采样。
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols || channel >= CHANNELS {
            return None;
        }
        self.samples.get((row * self.cols + col) * CHANNELS + channel).copied()
    }

    pub fn to_image(&self) -> Result<RgbImage> {
        let width = u32::try_from(self.cols)
            .map_err(|_| StegoError::InvalidInput("image too wide".into()))?;
        let height = u32::try_from(self.rows)
            .map_err(|_| StegoError::InvalidInput("image too tall".into()))?;
        RgbImage::from_raw(width, height, self.samples.clone())
            .ok_or_else(|| StegoError::InvalidInput("sample buffer does not match dimensions".into()))
    }
}

impl From<RgbImage> for Medium {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            rows: height as usize,
            cols: width as usize,
            samples: image.into_raw(),
        }
    }
}
