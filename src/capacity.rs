//! # 容量规划模块
//!
//! 根据载荷位数与图像尺寸选择嵌入布局 (每像素位数, 是否使用全部通道)，
//! 或校验调用方给出的布局，不足时自动回退。

use log::{debug, warn};

use crate::constants::CHANNELS;
use crate::error::{Result, StegoError};
use crate::header::HeaderConfig;

/// 载荷的嵌入布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddingSetup {
    /// 每个通道使用的低位数。
    pub bits_per_pixel: u32,
    /// 为 `true` 时三个通道各存一个符号，否则每个像素只存一个符号。
    pub use_all_channels: bool,
}

impl EmbeddingSetup {
    /// 头部固定使用的布局：1 位，全部通道。
    pub const HEADER: Self = Self::new(1, true);

    pub const fn new(bits_per_pixel: u32, use_all_channels: bool) -> Self {
        Self {
            bits_per_pixel,
            use_all_channels,
        }
    }

    /// 在 `rows x cols` 的图像中，该布局最多能容纳的位数。
    pub fn capacity(&self, rows: usize, cols: usize) -> u64 {
        let channels = if self.use_all_channels { CHANNELS as u64 } else { 1 };
        rows as u64 * cols as u64 * u64::from(self.bits_per_pixel) * channels
    }
}

/// 容量规划器，持有与头部编解码器相同的配置。
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityPlanner {
    config: HeaderConfig,
}

impl CapacityPlanner {
    pub fn new(config: HeaderConfig) -> Self {
        Self { config }
    }

    /// 为 `message_bits` 位的数据 (已含头部) 选择最省的布局。
    ///
    /// # Errors
    ///
    /// 即使每个通道用满可声明的最大位数也放不下时，返回 [`StegoError::InsufficientCapacity`]。
    pub fn optimal_setup(&self, message_bits: u64, rows: usize, cols: usize) -> Result<EmbeddingSetup> {
        let pixels = rows as u64 * cols as u64;
        let samples = pixels * CHANNELS as u64;
        let max_bits = u64::from(self.config.max_bits_per_pixel());

        if message_bits < pixels {
            return Ok(EmbeddingSetup::new(1, false));
        }
        if message_bits < samples {
            return Ok(EmbeddingSetup::new(1, true));
        }
        // pixels == 0 时上面两个分支都不成立，此处需避免除零
        if samples > 0 {
            let needed = message_bits.div_ceil(samples);
            if needed < max_bits {
                return Ok(EmbeddingSetup::new(needed as u32, true));
            }
        }
        Err(StegoError::InsufficientCapacity {
            required: message_bits,
            available: samples * max_bits,
        })
    }

    /// 确认布局足以容纳 `message_bits` 位载荷与头部。
    ///
    /// 未给出布局时直接调用 [`CapacityPlanner::optimal_setup`]；
    /// 给出的布局容量不足时丢弃它并自动选择。
    pub fn ensure_setup(
        &self,
        setup: Option<EmbeddingSetup>,
        message_bits: u64,
        rows: usize,
        cols: usize,
    ) -> Result<EmbeddingSetup> {
        let total_bits = message_bits + self.config.header_length() as u64;
        let Some(requested) = setup else {
            let chosen = self.optimal_setup(total_bits, rows, cols)?;
            debug!("Chose embedding setup {chosen:?} for {total_bits} bits");
            return Ok(chosen);
        };

        if total_bits > requested.capacity(rows, cols) {
            warn!(
                "Setup {requested:?} cannot hold {total_bits} bits in a {cols}x{rows} image, choosing automatically"
            );
            return self.optimal_setup(total_bits, rows, cols);
        }
        Ok(requested)
    }
}
