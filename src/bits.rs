//! # 位转换工具
//!
//! 头部以 '0'/'1' 组成的位串表示，载荷以取值为 0/1 的字节序列表示。
//! 所有转换均为高位在前 (MSB first)。

use crate::error::{Result, StegoError};

/// 将字符串中的每个字符转换为 8 位大端二进制串并依次拼接。
///
/// # Errors
///
/// 如果某个字符的码点需要超过 8 位，返回 [`StegoError::UnsupportedCharacter`]。
pub fn chars_to_bits(s: &str) -> Result<String> {
    s.chars().try_fold(String::with_capacity(s.len() * 8), |mut bits, c| {
        let code = u32::from(c);
        if code > 0xFF {
            return Err(StegoError::UnsupportedCharacter(c));
        }
        bits.push_str(&format!("{code:08b}"));
        Ok(bits)
    })
}

/// 每 8 位还原为一个字符 (按码点映射)。
///
/// # Errors
///
/// 位串长度不是 8 的倍数，或包含 '0'/'1' 以外的字符时返回 [`StegoError::InvalidInput`]。
pub fn bits_to_chars(bits: &str) -> Result<String> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::InvalidInput(format!(
            "bit string length {} is not a multiple of 8",
            bits.len()
        )));
    }
    bits.as_bytes()
        .chunks_exact(8)
        .map(|group| {
            group
                .iter()
                .try_fold(0u8, |acc, &b| match b {
                    b'0' => Ok(acc << 1),
                    b'1' => Ok((acc << 1) | 1),
                    _ => Err(StegoError::InvalidInput(
                        "bit string contains characters other than '0' and '1'".into(),
                    )),
                })
                .map(char::from)
        })
        .collect()
}

/// 把整数写成恰好 `width` 位的大端二进制串。
pub(crate) fn to_binary(value: u64, width: u32) -> String {
    (0..width)
        .rev()
        .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// 把 '0'/'1' 位串解析为无符号整数。调用方保证位串合法且不超过 64 位。
pub(crate) fn from_binary(bits: &str) -> u64 {
    bits.bytes()
        .fold(0u64, |acc, b| (acc << 1) | u64::from(b == b'1'))
}

/// 将字节序列展开为位序列 (每个元素为 0 或 1)，每字节高位在前。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect()
}

/// 将位序列每 8 位合并为一个字节。
///
/// # Errors
///
/// 位数不是 8 的倍数时返回 [`StegoError::InvalidInput`]。
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::InvalidInput(format!(
            "bit sequence length {} is not a multiple of 8",
            bits.len()
        )));
    }
    Ok(bits
        .chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect())
}
