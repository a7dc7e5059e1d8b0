// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tracing::debug;

/// 解码后的文本及检测到的编码
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    /// 检测到的编码名称（WHATWG 名称，例如 "Shift_JIS"）
    pub encoding: &'static str,
    /// 解码时是否出现替换字符
    pub had_errors: bool,
}

/// 根据原始字节检测编码
///
/// 不参考响应头，也不预设为 UTF-8
pub fn detect_encoding(input: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(input, true);
    detector.guess(None, true)
}

/// 检测编码并解码为UTF-8字符串
///
/// 不会失败：无法解码的字节序列被替换为 U+FFFD。
pub fn decode_html(input: &[u8]) -> DecodedText {
    let encoding = detect_encoding(input);
    debug!("检测到编码: {}", encoding.name());

    // BOM sniffing in decode() may still override the guess
    let (decoded, actual, had_errors) = encoding.decode(input);

    DecodedText {
        text: decoded.into_owned(),
        encoding: actual.name(),
        had_errors,
    }
}
