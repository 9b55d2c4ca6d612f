use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::MimeSniffer;

/// Number of leading bytes inspected by default. Large enough for the tar
/// header magic at offset 257.
pub const DEFAULT_SNIFF_LIMIT: usize = 512;

/// Content sniffer based on leading magic bytes.
#[derive(Debug, Clone, Copy)]
pub struct MagicSniffer {
    limit: usize,
}

impl MagicSniffer {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for MagicSniffer {
    fn default() -> Self {
        Self::new(DEFAULT_SNIFF_LIMIT)
    }
}

impl MimeSniffer for MagicSniffer {
    fn sniff(&self, path: &Path) -> Option<String> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::trace!("Cannot open {:?} for sniffing: {}", path, e);
                return None;
            }
        };

        let mut head = Vec::with_capacity(self.limit);
        if let Err(e) = file.take(self.limit as u64).read_to_end(&mut head) {
            tracing::trace!("Cannot read {:?} for sniffing: {}", path, e);
            return None;
        }

        sniff_bytes(&head).map(str::to_string)
    }

    fn name(&self) -> &str {
        "MagicSniffer"
    }
}

/// Detect a MIME type from the leading bytes of a file.
///
/// Returns `None` for binary content without a known signature so that a
/// suffix-based sniffer can still have a go.
pub fn sniff_bytes(head: &[u8]) -> Option<&'static str> {
    if head.is_empty() {
        return Some("inode/x-empty");
    }

    if let Some(mime) = binary_signature(head) {
        return Some(mime);
    }

    if !looks_like_text(head) {
        return None;
    }

    if let Some(interpreter) = shebang_line(head) {
        return Some(script_mime(interpreter));
    }

    let trimmed = trim_ascii_start(head);
    if starts_with_ignore_case(trimmed, b"<!doctype html") || starts_with_ignore_case(trimmed, b"<html")
    {
        return Some("text/html");
    }

    Some("text/plain")
}

fn binary_signature(head: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"PK\x05\x06", "application/zip"),
        (b"\x1f\x8b", "application/gzip"),
        (b"\xfd7zXZ\x00", "application/x-xz"),
        (b"\x7fELF", "application/x-executable"),
        (b"\xfe\xed\xfa\xce", "application/x-mach-binary"),
        (b"\xfe\xed\xfa\xcf", "application/x-mach-binary"),
        (b"\xce\xfa\xed\xfe", "application/x-mach-binary"),
        (b"\xcf\xfa\xed\xfe", "application/x-mach-binary"),
        (b"ID3", "audio/mpeg"),
        (b"\xff\xfb", "audio/mpeg"),
        (b"fLaC", "audio/flac"),
        (b"OggS", "audio/ogg"),
        (b"\x1aE\xdf\xa3", "video/x-matroska"),
    ];

    if let Some((_, mime)) = SIGNATURES.iter().find(|(magic, _)| head.starts_with(magic)) {
        return Some(*mime);
    }

    if head.len() >= 12 && head.starts_with(b"RIFF") {
        return match &head[8..12] {
            b"WEBP" => Some("image/webp"),
            b"WAVE" => Some("audio/x-wav"),
            b"AVI " => Some("video/x-msvideo"),
            _ => None,
        };
    }

    if head.len() >= 12 && &head[4..8] == b"ftyp" {
        return Some("video/mp4");
    }

    // BMP: the four reserved header bytes are always zero
    if head.len() >= 14 && head.starts_with(b"BM") && head[6..10] == [0, 0, 0, 0] {
        return Some("image/bmp");
    }

    if head.len() >= 4 && head.starts_with(b"BZh") && head[3].is_ascii_digit() && head[3] != b'0'
    {
        return Some("application/x-bzip2");
    }

    if head.len() >= 262 && &head[257..262] == b"ustar" {
        return Some("application/x-tar");
    }

    if head.len() >= 2 && head.starts_with(b"MZ") && head.contains(&0) {
        return Some("application/x-dosexec");
    }

    None
}

/// UTF-8 without NUL bytes. A multi-byte character cut off by the read
/// limit still counts as text.
fn looks_like_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn shebang_line(head: &[u8]) -> Option<&str> {
    let rest = head.strip_prefix(b"#!")?;
    let end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    std::str::from_utf8(&rest[..end]).ok().map(str::trim)
}

fn script_mime(interpreter_line: &str) -> &'static str {
    let mut words = interpreter_line.split_whitespace();
    let mut program = words.next().unwrap_or("");
    if program.ends_with("/env") {
        // `#!/usr/bin/env -S python3 -u`: skip env flags
        program = words.find(|w| !w.starts_with('-')).unwrap_or("");
    }
    let program = program.rsplit('/').next().unwrap_or(program);

    if program.starts_with("python") {
        "text/x-script.python"
    } else if program.ends_with("sh") {
        "text/x-shellscript"
    } else {
        "text/x-script"
    }
}

fn trim_ascii_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn starts_with_ignore_case(bytes: &[u8], prefix: &[u8]) -> bool {
    bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix)
}
