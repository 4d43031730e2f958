//! Byte-level symbol mapping.
//!
//! BPE merges operate on text, but the input may hold any byte sequence. Every
//! byte is therefore replaced by a printable unicode scalar before merging:
//! printable Latin-1 characters stand for themselves and every other byte is
//! assigned a fresh code point starting at 256.

use ahash::AHashMap;
use std::sync::OnceLock;

/// Bijection between the 256 byte values and 256 printable unicode scalars.
#[derive(Debug, Clone)]
pub struct ByteLevelMapper {
    /// Byte to unicode mapping, indexed by byte value
    byte_encoder: [char; 256],
    /// Unicode to byte mapping for decoding
    byte_decoder: AHashMap<char, u8>,
}

impl ByteLevelMapper {
    /// Build the mapping.
    ///
    /// Most callers want [`ByteLevelMapper::global`], which builds it once per
    /// process.
    pub fn new() -> Self {
        let byte_encoder = Self::build_byte_encoder();
        let mut byte_decoder = AHashMap::with_capacity(256);

        for (byte, &ch) in byte_encoder.iter().enumerate() {
            byte_decoder.insert(ch, byte as u8);
        }

        Self {
            byte_encoder,
            byte_decoder,
        }
    }

    /// The process-wide mapping.
    pub fn global() -> &'static ByteLevelMapper {
        static MAPPER: OnceLock<ByteLevelMapper> = OnceLock::new();
        MAPPER.get_or_init(ByteLevelMapper::new)
    }

    fn is_self_mapped(byte: u8) -> bool {
        matches!(byte, b'!'..=b'~' | 0xA1..=0xAC | 0xAE..=0xFF)
    }

    fn build_byte_encoder() -> [char; 256] {
        let mut byte_encoder = ['\0'; 256];
        let mut next = 256u32;

        for byte in 0..=255u8 {
            let codepoint = if Self::is_self_mapped(byte) {
                byte as u32
            } else {
                let codepoint = next;
                next += 1;
                codepoint
            };
            // Allocation stops at U+0143, well below the surrogate range.
            byte_encoder[byte as usize] = char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
        }

        byte_encoder
    }

    /// Map a byte to its symbol.
    #[inline]
    pub fn encode(&self, byte: u8) -> char {
        self.byte_encoder[byte as usize]
    }

    /// Map a symbol back to its byte, or `None` if `ch` is not a byte symbol.
    #[inline]
    pub fn decode(&self, ch: char) -> Option<u8> {
        self.byte_decoder.get(&ch).copied()
    }

    /// Map every byte of `bytes` to its symbol.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.encode(b)).collect()
    }

    /// Map every symbol of `text` back to its byte. Characters that are not
    /// byte symbols are skipped.
    pub fn decode_str(&self, text: &str) -> Vec<u8> {
        text.chars().filter_map(|ch| self.decode(ch)).collect()
    }

    /// All 256 symbols in vocabulary order: self-mapped bytes first, then
    /// the remapped ones, each group in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        let self_mapped = (0..=255u8).filter(|&b| Self::is_self_mapped(b));
        let remapped = (0..=255u8).filter(|&b| !Self::is_self_mapped(b));
        self_mapped.chain(remapped).map(move |b| self.encode(b))
    }
}

impl Default for ByteLevelMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_roundtrip_all_bytes() {
        let mapper = ByteLevelMapper::new();
        for b in 0..=255u8 {
            assert_eq!(mapper.decode(mapper.encode(b)), Some(b));
        }
    }

    #[test]
    fn test_injective() {
        let mapper = ByteLevelMapper::new();
        let symbols: HashSet<char> = mapper.symbols().collect();
        assert_eq!(symbols.len(), 256);
    }

    #[test]
    fn test_symbols_order() {
        let mapper = ByteLevelMapper::new();
        let symbols: Vec<char> = mapper.symbols().collect();
        assert_eq!(symbols[0], '!');
        assert_eq!(symbols[93], '~');
        assert_eq!(symbols[94], '¡');
        assert_eq!(symbols[187], 'ÿ');
        assert_eq!(symbols[188] as u32, 256);
        assert_eq!(symbols[255] as u32, 0x143);
    }

    #[test]
    fn test_printable_bytes_map_to_themselves() {
        let mapper = ByteLevelMapper::new();
        assert_eq!(mapper.encode(b'a'), 'a');
        assert_eq!(mapper.encode(b'!'), '!');
        assert_eq!(mapper.encode(b'~'), '~');
        assert_eq!(mapper.encode(0xA1), '¡');
        assert_eq!(mapper.encode(0xFF), 'ÿ');
    }

    #[test]
    fn test_remapped_bytes_start_at_256() {
        let mapper = ByteLevelMapper::new();
        assert_eq!(mapper.encode(0x00) as u32, 256);
        assert_eq!(mapper.encode(b' '), 'Ġ');
        assert_eq!(mapper.encode(b'\n'), 'Ċ');
        // Soft hyphen is the last gap in the printable ranges.
        assert_eq!(mapper.encode(0xAD) as u32, 0x143);
    }

    #[test]
    fn test_decode_str_skips_foreign_chars() {
        let mapper = ByteLevelMapper::global();
        let encoded = mapper.encode_bytes("héllo wörld".as_bytes());
        assert_eq!(mapper.decode_str(&encoded), "héllo wörld".as_bytes());
        assert_eq!(mapper.decode_str("a\u{4e2d}b"), b"ab".to_vec());
    }
}
