//! # 头部编解码模块
//!
//! 头部是一个定长位串，依次包含五个字段：
//!
//! | 字段 | 位宽 | 编码 |
//! |---|---|---|
//! | 内容长度 | `content_length_bits` | 无符号大端整数，载荷的位数 |
//! | 文件类型 | `filetype_bytes * 8` | 每字节一个字符，不足时在左侧补零字节 |
//! | 每像素位数 - 1 | `bpp_field_width` | 无符号整数 |
//! | 使用全部通道 | 1 | 标志位 |
//! | 已加密 | 1 | 标志位 |
//!
//! 字段位宽由 [`HeaderConfig`] 决定。编码与解码必须使用相同的配置，
//! 它相当于格式版本常量。

use crate::bits::{bits_to_chars, chars_to_bits, from_binary, to_binary};
use crate::constants::{BPP_FIELD_WIDTH, CONTENT_LENGTH_BITS, FILETYPE_BYTES, MAX_FILETYPE_BYTES};
use crate::error::{Result, StegoError};

/// 头部各字段的位宽配置，进程内构造一次后不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderConfig {
    content_length_bits: u32,
    filetype_bytes: usize,
    bpp_field_width: u32,
}

impl HeaderConfig {
    /// 使用自定义位宽构造配置。
    ///
    /// # Errors
    ///
    /// `content_length_bits` 超过 63、`filetype_bytes` 超过 [`MAX_FILETYPE_BYTES`]
    /// 或 `bpp_field_width` 超过 3 (一个通道只有 8 位) 时返回 [`StegoError::InvalidInput`]。
    pub fn new(content_length_bits: u32, filetype_bytes: usize, bpp_field_width: u32) -> Result<Self> {
        if content_length_bits > 63 {
            return Err(StegoError::InvalidInput(format!(
                "content length field of {content_length_bits} bits is wider than 63"
            )));
        }
        if filetype_bytes > MAX_FILETYPE_BYTES {
            return Err(StegoError::InvalidInput(format!(
                "filetype field of {filetype_bytes} bytes is wider than {MAX_FILETYPE_BYTES}"
            )));
        }
        if bpp_field_width > 3 {
            return Err(StegoError::InvalidInput(format!(
                "bits-per-pixel field of {bpp_field_width} bits allows more than 8 bits per channel"
            )));
        }
        Ok(Self {
            content_length_bits,
            filetype_bytes,
            bpp_field_width,
        })
    }

    pub fn content_length_bits(&self) -> u32 {
        self.content_length_bits
    }

    pub fn filetype_bytes(&self) -> usize {
        self.filetype_bytes
    }

    pub fn bpp_field_width(&self) -> u32 {
        self.bpp_field_width
    }

    /// 头部总位数：`content_length_bits + filetype_bytes * 8 + bpp_field_width + 2`。
    pub fn header_length(&self) -> usize {
        self.content_length_bits as usize + self.filetype_bytes * 8 + self.bpp_field_width as usize + 2
    }

    /// 可声明的最大每像素位数 `2^bpp_field_width`。
    pub fn max_bits_per_pixel(&self) -> u32 {
        1 << self.bpp_field_width
    }

    /// 可声明的最大内容长度 `2^content_length_bits - 1`。
    pub fn max_content_length(&self) -> u64 {
        (1u64 << self.content_length_bits) - 1
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            content_length_bits: CONTENT_LENGTH_BITS,
            filetype_bytes: FILETYPE_BYTES,
            bpp_field_width: BPP_FIELD_WIDTH,
        }
    }
}

/// 头部描述的嵌入参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// 载荷长度 (位)。
    pub content_length: u64,
    /// 被隐藏文件的扩展名。
    pub filetype: String,
    pub bits_per_pixel: u32,
    pub use_all_channels: bool,
    pub encrypted: bool,
}

/// 按 [`HeaderConfig`] 编码和解码头部位串。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderCodec {
    config: HeaderConfig,
}

impl HeaderCodec {
    pub fn new(config: HeaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    pub fn header_length(&self) -> usize {
        self.config.header_length()
    }

    /// 校验头部字段是否能用当前配置表示。
    ///
    /// # Errors
    ///
    /// * [`StegoError::TooLarge`]: 内容长度超出上限，或内容长度字段宽度为 0。
    /// * [`StegoError::FiletypeTooLong`]: 文件类型字段宽度为 0，或扩展名过长。
    /// * [`StegoError::BitsPerPixelOutOfRange`]: 每像素位数为 0 或超过上限。
    pub fn validate(&self, content_length: u64, filetype: &str, bits_per_pixel: u32) -> Result<()> {
        let cfg = &self.config;
        if cfg.content_length_bits == 0 || content_length > cfg.max_content_length() {
            return Err(StegoError::TooLarge {
                value: content_length,
                max: cfg.max_content_length(),
            });
        }
        if cfg.filetype_bytes == 0 || filetype.chars().count() > cfg.filetype_bytes {
            return Err(StegoError::FiletypeTooLong {
                filetype: filetype.to_owned(),
                max: cfg.filetype_bytes,
            });
        }
        if bits_per_pixel == 0 || bits_per_pixel > cfg.max_bits_per_pixel() {
            return Err(StegoError::BitsPerPixelOutOfRange {
                bits: bits_per_pixel,
                max: cfg.max_bits_per_pixel(),
            });
        }
        Ok(())
    }

    /// 将头部编码为位串。先执行 [`HeaderCodec::validate`]。
    pub fn encode(&self, header: &Header) -> Result<String> {
        self.validate(header.content_length, &header.filetype, header.bits_per_pixel)?;
        let cfg = &self.config;

        let padding = cfg.filetype_bytes - header.filetype.chars().count();
        let padded_filetype: String = std::iter::repeat_n('\0', padding)
            .chain(header.filetype.chars())
            .collect();

        let mut bits = String::with_capacity(cfg.header_length());
        bits.push_str(&to_binary(header.content_length, cfg.content_length_bits));
        bits.push_str(&chars_to_bits(&padded_filetype)?);
        bits.push_str(&to_binary(
            u64::from(header.bits_per_pixel - 1),
            cfg.bpp_field_width,
        ));
        bits.push(if header.use_all_channels { '1' } else { '0' });
        bits.push(if header.encrypted { '1' } else { '0' });
        Ok(bits)
    }

    /// 从位串解析头部。文件类型中的所有空字符 (码点 0) 都会被去除。
    ///
    /// # Errors
    ///
    /// * [`StegoError::InvalidHeaderEncoding`]: 包含 '0'/'1' 以外的字符。
    /// * [`StegoError::HeaderLengthMismatch`]: 长度不等于 `header_length`。
    pub fn decode(&self, bits: &str) -> Result<Header> {
        if bits.bytes().any(|b| b != b'0' && b != b'1') {
            return Err(StegoError::InvalidHeaderEncoding);
        }
        let cfg = &self.config;
        if bits.len() != cfg.header_length() {
            return Err(StegoError::HeaderLengthMismatch {
                expected: cfg.header_length(),
                actual: bits.len(),
            });
        }

        let (length_field, rest) = bits.split_at(cfg.content_length_bits as usize);
        let (filetype_field, rest) = rest.split_at(cfg.filetype_bytes * 8);
        let (bpp_field, flags) = rest.split_at(cfg.bpp_field_width as usize);

        let filetype = bits_to_chars(filetype_field)?.replace('\0', "");

        Ok(Header {
            content_length: from_binary(length_field),
            filetype,
            bits_per_pixel: from_binary(bpp_field) as u32 + 1,
            use_all_channels: &flags[..1] == "1",
            encrypted: &flags[1..] == "1",
        })
    }
}
