//! # lsb_vault 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：自描述的定长头部、容量规划，
//! 以及按位平面写入/读取载荷的编解码器。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cipher;
pub mod cli;
pub mod constants;
pub mod embed;
pub mod error;
pub mod extract;
pub mod handler;
pub mod header;
pub mod medium;
pub mod steganography;

pub use capacity::{CapacityPlanner, EmbeddingSetup};
pub use error::{Result, StegoError};
pub use header::{Header, HeaderCodec, HeaderConfig};
pub use medium::Medium;
pub use steganography::{Revealed, Steganographer};
