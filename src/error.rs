//! # 错误类型模块
//!
//! [`StegoError`] 覆盖了从头部校验、容量规划到提取与解密的全部失败情形。
//! 所有错误都是输入的确定性结果，不存在可重试的瞬时错误。

use thiserror::Error;

/// 隐写编解码过程中可能出现的错误。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 传给编解码器的数据形状或取值不合法。
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 字符的码点超过 8 位，无法写入头部。
    #[error("unsupported character {0:?}: only 8-bit characters can be encoded")]
    UnsupportedCharacter(char),

    /// 内容长度超出头部字段可表示的范围。
    #[error("content length {value} exceeds the header limit of {max}")]
    TooLarge { value: u64, max: u64 },

    /// 文件类型 (扩展名) 超出头部字段可容纳的字符数。
    #[error("filetype {filetype:?} is longer than {max} characters")]
    FiletypeTooLong { filetype: String, max: usize },

    /// 每像素位数不在 `1..=max` 范围内。
    #[error("bits per pixel {bits} is out of range 1..={max}")]
    BitsPerPixelOutOfRange { bits: u32, max: u32 },

    /// 载荷即使自动选择布局也无法装入图像。
    #[error("message does not fit into the medium: requires {required}, available {available}")]
    InsufficientCapacity { required: u64, available: u64 },

    /// 头部中包含 '0'/'1' 以外的字符。
    #[error("header contains characters other than '0' and '1'")]
    InvalidHeaderEncoding,

    /// 头部长度与配置不符。
    #[error("header length mismatch: expected {expected} bits, got {actual}")]
    HeaderLengthMismatch { expected: usize, actual: usize },

    /// 头部声明的载荷长度超过图像中实际可读的位数。
    #[error("payload truncated: header declares {needed} bits, only {available} available")]
    TruncatedPayload { needed: usize, available: usize },

    /// 解密失败：密钥错误或密文被篡改。
    #[error("authentication failed: wrong key or tampered ciphertext")]
    AuthenticationFailed,

    /// 图像中的载荷已加密，但没有提供密钥。
    #[error("payload is encrypted but no key was supplied")]
    MissingKey,

    /// 密钥长度不是 AES-GCM 支持的 16 或 32 字节。
    #[error("invalid key length {0}: expected 16 or 32 bytes")]
    InvalidKeyLength(usize),

    /// 图像无法解码。
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// 本库统一使用的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;
