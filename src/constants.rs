/// 头部中内容长度字段的默认位宽。
/// 24 位可以表示最多 2^24 - 1 位 (约 2 MiB) 的载荷。
pub const CONTENT_LENGTH_BITS: u32 = 24;

/// 头部中文件类型字段的默认字节数，即扩展名最多 3 个字符。
pub const FILETYPE_BYTES: usize = 3;

/// 自定义配置中文件类型字段允许的最大字节数。
pub const MAX_FILETYPE_BYTES: usize = 255;

/// 头部中 "每像素位数 - 1" 字段的默认位宽。
/// 2 位意味着每个通道最多使用 4 个低位。
pub const BPP_FIELD_WIDTH: u32 = 2;

/// 每个像素的通道数 (RGB)。
pub const CHANNELS: usize = 3;

/// AEAD 随机数长度 (字节)，加密时置于密文之前。
pub const NONCE_LEN: usize = 12;

/// AES-GCM 认证标签长度 (字节)。
pub const TAG_LEN: usize = 16;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const HIDDEN_PREFIX: &str = "hidden_";

/// 未指定输出路径时，恢复文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
