//! # 位平面提取
//!
//! 先按固定布局读出头部，再按头部声明的布局重新读取整幅图像，
//! 从对应偏移处取出载荷。

use log::debug;

use crate::bits::bits_to_bytes;
use crate::capacity::EmbeddingSetup;
use crate::constants::CHANNELS;
use crate::embed::low_mask;
use crate::error::{Result, StegoError};
use crate::header::{Header, HeaderCodec};
use crate::medium::Medium;

/// 按行优先、通道顺序读出每个采样的低 `setup.bits_per_pixel` 位 (高位在前)。
/// 单通道布局只读取每个像素的第一个通道。
pub fn extract_bits(medium: &Medium, setup: EmbeddingSetup) -> Vec<u8> {
    let bits = setup.bits_per_pixel;
    let channels = if setup.use_all_channels { CHANNELS } else { 1 };
    let mask = low_mask(bits);

    medium
        .samples()
        .chunks_exact(CHANNELS)
        .flat_map(|pixel| pixel[..channels].iter())
        .flat_map(|&sample| {
            let value = sample & mask;
            (0..bits).rev().map(move |i| (value >> i) & 1)
        })
        .collect()
}

/// 载荷在按 `setup` 重新读取的位序列中的起始偏移。
fn data_start(header_length: usize, setup: EmbeddingSetup) -> usize {
    let bits = setup.bits_per_pixel as usize;
    if setup.use_all_channels {
        header_length * bits + 2 * bits
    } else {
        (header_length * bits).div_ceil(9) * 3
    }
}

/// 从图像中读出头部与载荷字节。
///
/// # Errors
///
/// * [`StegoError::InvalidHeaderEncoding`] / [`StegoError::HeaderLengthMismatch`]: 头部无法解析。
/// * [`StegoError::TruncatedPayload`]: 起始偏移之后的位数少于头部声明的长度。
pub fn extract(codec: &HeaderCodec, medium: &Medium) -> Result<(Header, Vec<u8>)> {
    let header_length = codec.header_length();
    let mut stream = extract_bits(medium, EmbeddingSetup::HEADER);

    let header_bits: String = stream
        .iter()
        .take(header_length)
        .map(|&bit| if bit == 1 { '1' } else { '0' })
        .collect();
    let header = codec.decode(&header_bits)?;

    let setup = EmbeddingSetup::new(header.bits_per_pixel, header.use_all_channels);
    if setup != EmbeddingSetup::HEADER {
        stream = extract_bits(medium, setup);
    }

    let start = data_start(header_length, setup);
    let needed = usize::try_from(header.content_length).unwrap_or(usize::MAX);
    let available = stream.len().saturating_sub(start);
    if needed > available {
        return Err(StegoError::TruncatedPayload { needed, available });
    }
    debug!("Reading {needed} payload bits at offset {start} with {setup:?}");

    let payload = bits_to_bytes(&stream[start..start + needed])?;
    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_for_default_header() {
        for bits in 1..=4 {
            assert_eq!(data_start(52, EmbeddingSetup::new(bits, true)), 54 * bits as usize);
            assert_eq!(data_start(52, EmbeddingSetup::new(bits, false)), 18 * bits as usize);
        }
    }

    #[test]
    fn single_channel_reads_first_channel_only() {
        let medium = Medium::new(1, 2, vec![0b11, 0, 0, 0b10, 1, 1]).unwrap();
        assert_eq!(
            extract_bits(&medium, EmbeddingSetup::new(2, false)),
            vec![1, 1, 1, 0]
        );
        assert_eq!(
            extract_bits(&medium, EmbeddingSetup::new(1, true)),
            vec![1, 0, 0, 0, 1, 1]
        );
    }
}
