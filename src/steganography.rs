//! # 隐写流程
//!
//! 编码：容量规划 → 头部编码 → 位平面嵌入。
//! 解码：固定布局提取头部 → 头部解码 → 按声明布局提取载荷 → (可选) 解密。

use log::{info, warn};

use crate::bits::bytes_to_bits;
use crate::capacity::{CapacityPlanner, EmbeddingSetup};
use crate::cipher::Cipher;
use crate::embed::embed;
use crate::error::{Result, StegoError};
use crate::extract::extract;
use crate::header::{Header, HeaderCodec, HeaderConfig};
use crate::medium::Medium;

/// 从图像中恢复出的内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revealed {
    /// 明文载荷 (若已加密则为解密后的内容)。
    pub payload: Vec<u8>,
    /// 隐藏时记录的文件扩展名。
    pub filetype: String,
    pub encrypted: bool,
}

/// 持有头部配置的编解码入口。同一配置须同时用于隐藏和恢复。
#[derive(Debug, Clone, Copy, Default)]
pub struct Steganographer {
    codec: HeaderCodec,
    planner: CapacityPlanner,
}

impl Steganographer {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            codec: HeaderCodec::new(config),
            planner: CapacityPlanner::new(config),
        }
    }

    pub fn codec(&self) -> &HeaderCodec {
        &self.codec
    }

    pub fn planner(&self) -> &CapacityPlanner {
        &self.planner
    }

    /// 将 `message` 隐藏进 `medium`，返回实际使用的载荷布局。
    ///
    /// 给出 `key` 时先用 AES-GCM 加密。所有校验都在修改图像之前完成。
    ///
    /// # Errors
    ///
    /// 头部字段校验失败、容量不足或密钥长度非法时返回错误，此时图像不被修改。
    pub fn conceal(
        &self,
        medium: &mut Medium,
        message: &[u8],
        filetype: &str,
        key: Option<&[u8]>,
        setup: Option<EmbeddingSetup>,
    ) -> Result<EmbeddingSetup> {
        let payload = match key {
            Some(key) => Cipher::from_key(key)?.seal(message)?,
            None => message.to_vec(),
        };
        let payload_bits = bytes_to_bits(&payload);

        let setup = self.planner.ensure_setup(
            setup,
            payload_bits.len() as u64,
            medium.rows(),
            medium.cols(),
        )?;
        let header_bits = self.codec.encode(&Header {
            content_length: payload_bits.len() as u64,
            filetype: filetype.to_owned(),
            bits_per_pixel: setup.bits_per_pixel,
            use_all_channels: setup.use_all_channels,
            encrypted: key.is_some(),
        })?;

        embed(&self.codec, medium, &header_bits, &payload_bits, setup)?;
        info!(
            "Hid {} bytes ({} bits) using {} bit(s) per channel, all channels: {}",
            payload.len(),
            payload_bits.len(),
            setup.bits_per_pixel,
            setup.use_all_channels
        );
        Ok(setup)
    }

    /// 从 `medium` 中恢复隐藏的内容。
    ///
    /// # Errors
    ///
    /// * [`StegoError::MissingKey`]: 载荷已加密但没有提供密钥。
    /// * [`StegoError::AuthenticationFailed`]: 密钥错误或密文被篡改。
    /// * 头部或载荷提取失败时传播 [`extract`] 的错误。
    pub fn reveal(&self, medium: &Medium, key: Option<&[u8]>) -> Result<Revealed> {
        let (header, payload) = extract(&self.codec, medium)?;

        let payload = match (header.encrypted, key) {
            (true, None) => return Err(StegoError::MissingKey),
            (true, Some(key)) => Cipher::from_key(key)?.open(&payload)?,
            (false, Some(_)) => {
                warn!("A key was supplied but the hidden payload is not encrypted");
                payload
            }
            (false, None) => payload,
        };
        info!(
            "Recovered {} bytes (filetype {:?}, encrypted: {})",
            payload.len(),
            header.filetype,
            header.encrypted
        );

        Ok(Revealed {
            payload,
            filetype: header.filetype,
            encrypted: header.encrypted,
        })
    }
}
