//! # 认证加密
//!
//! 对 `aes-gcm` 的薄封装。加密结果的格式为 `nonce (12 字节) || 密文 || 标签`，
//! 随机数每次加密随机生成，关联数据为空。

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use rand::RngCore;

use crate::constants::{NONCE_LEN, TAG_LEN};
use crate::error::{Result, StegoError};

/// 按密钥长度选择的 AES-GCM 实例。
#[derive(Clone)]
pub enum Cipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    /// 16 字节密钥选择 AES-128-GCM，32 字节选择 AES-256-GCM。
    pub fn from_key(key: &[u8]) -> Result<Self> {
        match key.len() {
            16 => Aes128Gcm::new_from_slice(key)
                .map(Self::Aes128)
                .map_err(|_| StegoError::InvalidKeyLength(key.len())),
            32 => Aes256Gcm::new_from_slice(key)
                .map(Self::Aes256)
                .map_err(|_| StegoError::InvalidKeyLength(key.len())),
            other => Err(StegoError::InvalidKeyLength(other)),
        }
    }

    /// 加密 `plaintext`，返回 `nonce || 密文 || 标签`。
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);
        let nonce_ref = Nonce::from_slice(&nonce);

        let ciphertext = match self {
            Self::Aes128(cipher) => cipher.encrypt(nonce_ref, plaintext),
            Self::Aes256(cipher) => cipher.encrypt(nonce_ref, plaintext),
        }
        .map_err(|_| StegoError::InvalidInput("plaintext too long for AES-GCM".into()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// 拆出前 12 字节作为随机数并解密其余部分。
    ///
    /// # Errors
    ///
    /// 标签校验失败或数据短于 `nonce + 标签` 时返回 [`StegoError::AuthenticationFailed`]。
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(StegoError::AuthenticationFailed);
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce);

        let plaintext = match self {
            Self::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Self::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        };
        plaintext.map_err(|_| StegoError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_open() {
        let cipher = Cipher::from_key(&[7u8; 32]).unwrap();
        let sealed = cipher.seal(b"attack at dawn").unwrap();
        assert_eq!(sealed.len(), NONCE_LEN + 14 + TAG_LEN);
        assert_eq!(cipher.open(&sealed).unwrap(), b"attack at dawn");
    }

    #[test]
    fn tampering_is_detected() {
        let cipher = Cipher::from_key(&[1u8; 16]).unwrap();
        let mut sealed = cipher.seal(b"payload").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(matches!(cipher.open(&sealed), Err(StegoError::AuthenticationFailed)));
        assert!(matches!(cipher.open(&[0u8; 8]), Err(StegoError::AuthenticationFailed)));
    }

    #[test]
    fn odd_key_sizes_are_rejected() {
        assert!(matches!(Cipher::from_key(b"short"), Err(StegoError::InvalidKeyLength(5))));
    }
}
