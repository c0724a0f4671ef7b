//! # 位平面嵌入
//!
//! 先用固定布局 (1 位, 全部通道) 写入头部，再从头部之后的第一个像素开始，
//! 按所选布局写入载荷。

use log::debug;

use crate::capacity::EmbeddingSetup;
use crate::constants::CHANNELS;
use crate::error::{Result, StegoError};
use crate::header::HeaderCodec;
use crate::medium::Medium;

/// 低 `bits` 位的掩码，`bits` 取 1..=8。
pub(crate) fn low_mask(bits: u32) -> u8 {
    ((1u16 << bits) - 1) as u8
}

/// 将位序列按 `bits` 位一组组成符号，最后一组在低位补零。
fn pack_symbols(payload_bits: &[u8], bits: u32) -> Vec<u8> {
    payload_bits
        .chunks(bits as usize)
        .map(|chunk| {
            let value = chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1));
            value << (bits as usize - chunk.len())
        })
        .collect()
}

/// 头部占用的像素数。
pub fn header_pixels(codec: &HeaderCodec) -> usize {
    codec.header_length().div_ceil(CHANNELS)
}

/// 载荷在给定布局下占用的像素数。
pub fn payload_pixels(payload_bits: usize, setup: EmbeddingSetup) -> usize {
    let symbols = payload_bits.div_ceil(setup.bits_per_pixel as usize);
    if setup.use_all_channels {
        symbols.div_ceil(CHANNELS)
    } else {
        symbols
    }
}

/// 把头部位串与载荷位序列写入 `medium`。
///
/// 写入前完成全部校验，失败时图像保持不变。
///
/// # Arguments
///
/// * `header_bits` - 由 [`HeaderCodec::encode`] 生成的位串。
/// * `payload_bits` - 取值为 0/1 的载荷位序列。
/// * `setup` - 载荷布局。
///
/// # Errors
///
/// * [`StegoError::InvalidInput`]: 头部位串非法或布局的位数不在 1..=8。
/// * [`StegoError::InsufficientCapacity`]: 头部与载荷所需像素数超过图像像素数。
pub fn embed(
    codec: &HeaderCodec,
    medium: &mut Medium,
    header_bits: &str,
    payload_bits: &[u8],
    setup: EmbeddingSetup,
) -> Result<()> {
    if header_bits.len() != codec.header_length()
        || header_bits.bytes().any(|b| b != b'0' && b != b'1')
    {
        return Err(StegoError::InvalidInput(format!(
            "header must be {} bits of '0'/'1'",
            codec.header_length()
        )));
    }
    let bits = setup.bits_per_pixel;
    if !(1..=8).contains(&bits) {
        return Err(StegoError::InvalidInput(format!(
            "cannot embed {bits} bits per channel"
        )));
    }

    let header_rows = header_pixels(codec);
    let payload_rows = payload_pixels(payload_bits.len(), setup);
    let required = header_rows + payload_rows;
    if required > medium.pixel_count() {
        return Err(StegoError::InsufficientCapacity {
            required: required as u64,
            available: medium.pixel_count() as u64,
        });
    }
    debug!(
        "Embedding {} payload bits with {setup:?}: {header_rows} header pixels, {payload_rows} payload pixels",
        payload_bits.len()
    );

    let samples = medium.samples_mut();
    let (header_region, payload_region) = samples.split_at_mut(header_rows * CHANNELS);

    // 头部位串不足三的倍数时，剩余的通道写入 0
    let header_values = header_bits.bytes().map(|b| b - b'0').chain(std::iter::repeat(0));
    for (sample, bit) in header_region.iter_mut().zip(header_values) {
        *sample = (*sample & !1) | bit;
    }

    let mask = low_mask(bits);
    let symbols = pack_symbols(payload_bits, bits);
    if setup.use_all_channels {
        let padded = symbols.iter().copied().chain(std::iter::repeat(0));
        for (sample, symbol) in payload_region[..payload_rows * CHANNELS].iter_mut().zip(padded) {
            *sample = (*sample & !mask) | symbol;
        }
    } else {
        for (pixel, &symbol) in payload_region.chunks_exact_mut(CHANNELS).zip(&symbols) {
            write_single_channel(pixel, symbol, mask);
        }
    }
    Ok(())
}

/// 单通道模式：符号写入第一个通道，其余两个通道复制该符号。
#[cfg(not(feature = "noise-fill"))]
fn write_single_channel(pixel: &mut [u8], symbol: u8, mask: u8) {
    for sample in pixel.iter_mut() {
        *sample = (*sample & !mask) | symbol;
    }
}

/// 单通道模式：符号写入第一个通道，其余两个通道填充随机噪声。
#[cfg(feature = "noise-fill")]
fn write_single_channel(pixel: &mut [u8], symbol: u8, mask: u8) {
    use rand::Rng;

    let mut rng = rand::rng();
    pixel[0] = (pixel[0] & !mask) | symbol;
    for sample in pixel[1..].iter_mut() {
        let noise: u8 = rng.random::<u8>() & mask;
        *sample = (*sample & !mask) | noise;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_zero_padded_on_the_right() {
        assert_eq!(pack_symbols(&[1, 0, 1, 1, 1], 2), vec![0b10, 0b11, 0b10]);
        assert_eq!(pack_symbols(&[1, 1, 0], 4), vec![0b1100]);
        assert!(pack_symbols(&[], 3).is_empty());
    }

    #[test]
    fn masks_cover_low_bits() {
        assert_eq!(low_mask(1), 0b1);
        assert_eq!(low_mask(4), 0b1111);
        assert_eq!(low_mask(8), 0xFF);
    }
}
