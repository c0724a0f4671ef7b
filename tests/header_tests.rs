use lsb_vault::{Header, HeaderCodec, HeaderConfig, StegoError};
use proptest::prelude::*;

const ONES: &str = "111111111111111111111111";
const ZEROS: &str = "000000000000000000000000";

fn header(
    content_length: u64,
    filetype: &str,
    bits_per_pixel: u32,
    use_all_channels: bool,
    encrypted: bool,
) -> Header {
    Header {
        content_length,
        filetype: filetype.to_owned(),
        bits_per_pixel,
        use_all_channels,
        encrypted,
    }
}

fn codec() -> HeaderCodec {
    HeaderCodec::default()
}

#[test]
fn default_layout_is_52_bits() {
    let config = HeaderConfig::default();
    assert_eq!(config.header_length(), 52);
    assert_eq!(config.max_bits_per_pixel(), 4);
    assert_eq!(config.max_content_length(), (1 << 24) - 1);
}

#[test]
fn custom_widths_change_header_length() -> anyhow::Result<()> {
    let config = HeaderConfig::new(16, 4, 3)?;
    assert_eq!(config.header_length(), 16 + 32 + 3 + 2);
    assert_eq!(config.max_bits_per_pixel(), 8);

    assert!(matches!(HeaderConfig::new(64, 3, 2), Err(StegoError::InvalidInput(_))));
    assert!(matches!(HeaderConfig::new(24, 3, 4), Err(StegoError::InvalidInput(_))));
    assert!(matches!(HeaderConfig::new(24, 256, 2), Err(StegoError::InvalidInput(_))));
    assert!(matches!(HeaderConfig::new(24, usize::MAX, 2), Err(StegoError::InvalidInput(_))));
    assert_eq!(HeaderConfig::new(24, 255, 2)?.header_length(), 24 + 255 * 8 + 2 + 2);
    Ok(())
}

/// 空文件的头部全部为 0
#[test]
fn encode_empty_file() -> anyhow::Result<()> {
    let bits = codec().encode(&header(0, "", 1, false, false))?;
    assert_eq!(bits, format!("{ZEROS}{ZEROS}0000"));
    Ok(())
}

#[test]
fn encode_flags_and_bits_per_pixel() -> anyhow::Result<()> {
    let max = HeaderConfig::default().max_content_length();
    let c = codec();
    assert_eq!(c.encode(&header(max, "", 1, false, false))?, format!("{ONES}{ZEROS}0000"));
    assert_eq!(c.encode(&header(max, "", 1, false, true))?, format!("{ONES}{ZEROS}0001"));
    assert_eq!(c.encode(&header(max, "", 1, true, true))?, format!("{ONES}{ZEROS}0011"));
    assert_eq!(c.encode(&header(max, "", 4, true, true))?, format!("{ONES}{ZEROS}1111"));
    assert_eq!(c.encode(&header(max, "", 3, false, false))?, format!("{ONES}{ZEROS}1000"));
    Ok(())
}

#[test]
fn encode_filetype() -> anyhow::Result<()> {
    let max = HeaderConfig::default().max_content_length();
    let c = codec();
    assert_eq!(
        c.encode(&header(max, "AAA", 4, true, true))?,
        format!("{ONES}{}1111", "01000001".repeat(3))
    );
    assert_eq!(
        c.encode(&header(max, "~~~", 4, true, true))?,
        format!("{ONES}{}1111", "01111110".repeat(3))
    );
    Ok(())
}

/// 较短的扩展名在左侧补零字节，解码时去除
#[test]
fn short_filetype_is_left_padded() -> anyhow::Result<()> {
    let c = codec();
    let bits = c.encode(&header(8, "md", 1, false, false))?;
    assert_eq!(&bits[24..48], "000000000110110101100100");
    assert_eq!(c.decode(&bits)?.filetype, "md");
    Ok(())
}

#[test]
fn content_length_boundary() {
    let c = codec();
    let max = HeaderConfig::default().max_content_length();
    assert!(c.encode(&header(max, "", 1, false, false)).is_ok());
    assert!(matches!(
        c.encode(&header(max + 1, "", 1, false, false)),
        Err(StegoError::TooLarge { .. })
    ));
}

#[test]
fn bits_per_pixel_boundary() {
    let c = codec();
    let max_bits = HeaderConfig::default().max_bits_per_pixel();
    assert!(c.encode(&header(0, "", max_bits, true, true)).is_ok());
    assert!(matches!(
        c.encode(&header(0, "", max_bits + 1, true, true)),
        Err(StegoError::BitsPerPixelOutOfRange { bits: 5, max: 4 })
    ));
    assert!(matches!(
        c.encode(&header(0, "", 0, true, true)),
        Err(StegoError::BitsPerPixelOutOfRange { bits: 0, .. })
    ));
}

#[test]
fn filetype_validation() {
    let c = codec();
    assert!(matches!(
        c.encode(&header(0, "ABCD", 4, true, true)),
        Err(StegoError::FiletypeTooLong { max: 3, .. })
    ));
    assert!(matches!(
        c.encode(&header(0, "€", 1, false, false)),
        Err(StegoError::UnsupportedCharacter('€'))
    ));
}

#[test]
fn zero_width_fields_are_rejected() -> anyhow::Result<()> {
    let no_length = HeaderCodec::new(HeaderConfig::new(0, 3, 2)?);
    assert!(matches!(
        no_length.validate(0, "", 1),
        Err(StegoError::TooLarge { .. })
    ));

    let no_filetype = HeaderCodec::new(HeaderConfig::new(24, 0, 2)?);
    assert!(matches!(
        no_filetype.validate(0, "", 1),
        Err(StegoError::FiletypeTooLong { .. })
    ));
    Ok(())
}

#[test]
fn decode_rejects_wrong_length() {
    let length = codec().header_length();
    assert!(matches!(
        codec().decode(&"0".repeat(length + 1)),
        Err(StegoError::HeaderLengthMismatch { expected: 52, actual: 53 })
    ));
}

#[test]
fn decode_rejects_invalid_characters() {
    let length = codec().header_length();
    assert!(matches!(
        codec().decode(&" ".repeat(length)),
        Err(StegoError::InvalidHeaderEncoding)
    ));
}

#[test]
fn decode_known_headers() -> anyhow::Result<()> {
    let c = codec();
    let max = HeaderConfig::default().max_content_length();

    assert_eq!(c.decode(&format!("{ZEROS}{ZEROS}0000"))?, header(0, "", 1, false, false));
    assert_eq!(c.decode(&format!("{ONES}{ZEROS}0000"))?, header(max, "", 1, false, false));
    assert_eq!(c.decode(&format!("{ONES}{ZEROS}0001"))?, header(max, "", 1, false, true));
    assert_eq!(c.decode(&format!("{ONES}{ZEROS}0011"))?, header(max, "", 1, true, true));
    assert_eq!(c.decode(&format!("{ONES}{ZEROS}1111"))?, header(max, "", 4, true, true));
    assert_eq!(
        c.decode(&format!("{ONES}{}1111", "01000001".repeat(3)))?,
        header(max, "AAA", 4, true, true)
    );
    assert_eq!(
        c.decode(&format!("{ONES}{}1111", "01111110".repeat(3)))?,
        header(max, "~~~", 4, true, true)
    );
    Ok(())
}

proptest! {
    #[test]
    fn decode_inverts_encode(
        content_length in 0u64..(1 << 24),
        filetype in "[a-zA-Z0-9]{1,3}",
        bits_per_pixel in 1u32..=4,
        use_all_channels in any::<bool>(),
        encrypted in any::<bool>(),
    ) {
        let original = header(content_length, &filetype, bits_per_pixel, use_all_channels, encrypted);
        let bits = codec().encode(&original).unwrap();
        prop_assert_eq!(bits.len(), 52);
        prop_assert_eq!(codec().decode(&bits).unwrap(), original);
    }
}
