const MSB_MASK: u64 = 0x8080_8080_8080_8080;
const LSB_MASK: u64 = 0x0101_0101_0101_0101;

pub trait ByteBuffer {
    /// Index of the first `needle` in the buffer.
    fn byte_position(&self, needle: u8) -> Option<usize>;

    /// The buffer without a trailing `\n`, `\r\n` or bare `\r`.
    fn trim_line_terminator(&self) -> &Self;
}

impl ByteBuffer for [u8] {
    #[inline(always)]
    fn byte_position(&self, needle: u8) -> Option<usize> {
        let mut i = 0;

        let repeat = LSB_MASK * needle as u64;
        while i + 8 <= self.len() {
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&self[i..i + 8]);

            let xored = u64::from_le_bytes(chunk) ^ repeat;
            let matching_bytes = xored.wrapping_sub(LSB_MASK) & !xored & MSB_MASK;

            if matching_bytes != 0 {
                // Little-endian load: the lowest set high bit is the first match.
                let j = (matching_bytes.trailing_zeros() / 8) as usize;
                return Some(i + j);
            }

            i += 8;
        }

        while i < self.len() {
            if self[i] == needle {
                return Some(i);
            }
            i += 1;
        }

        None
    }

    #[inline(always)]
    fn trim_line_terminator(&self) -> &Self {
        let line = match self {
            [rest @ .., b'\n'] => rest,
            _ => self,
        };

        match line {
            [rest @ .., b'\r'] => rest,
            _ => line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_byte_position() {
        let cases: Vec<(Vec<u8>, Option<usize>, Option<usize>)> = vec![
            (b"Xi;3.4\n".to_vec(), Some(2), Some(6)),
            (b"Lima;5.6\n".to_vec(), Some(4), Some(8)),
            (b"Berlin;12.3\n".to_vec(), Some(6), Some(11)),
            (b"Melbourne;23.4\n".to_vec(), Some(9), Some(14)),
            (b"San Francisco;-5.2\n".to_vec(), Some(13), Some(18)),
            (b"Thiruvananthapuram;31.2\n".to_vec(), Some(18), Some(23)),
            (
                b"Some Very Long Station Name That Goes On Forever;99.9\n".to_vec(),
                Some(48),
                Some(53),
            ),
            (b"".to_vec(), None, None),
            (b"Hell\nBo\n".to_vec(), None, Some(4)),
        ];

        for (input, semicolon, newline) in cases {
            assert_eq!(input.byte_position(b';'), semicolon);
            assert_eq!(input.byte_position(b'\n'), newline);
        }
    }

    #[test]
    fn test_byte_position_matches_naive_search() {
        let line = "Bāgepalli;17.8\r\nSan Fernando;-1.9\nKika;4.3\r\nPālakodu;10.4";
        let bytes = line.as_bytes();

        for start in 0..bytes.len() {
            for needle in [b';', b'\n', b'\r', b'.', 0xc4] {
                let window = &bytes[start..];
                let naive = window.iter().position(|&b| b == needle);
                assert_eq!(window.byte_position(needle), naive, "start {start}");
            }
        }
    }

    #[test]
    fn test_byte_position_first_of_many() {
        let bytes = b"AAAAAAA;;;;;;;;;;;;";
        assert_eq!(bytes.byte_position(b';'), Some(7));

        let bytes = b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA;";
        assert_eq!(bytes.byte_position(b';'), Some(39));
    }

    #[test]
    fn test_byte_position_realistic() {
        let lines = vec![
            "Bāgepalli;17.8",
            "San Fernando;-1.9",
            "Kika;4.3",
            "Bo;6.8",
        ];
        let str = lines.join("\n");
        let bytes = str.as_bytes();

        let mut start = 0;
        for (expected_newline, expected_semicolon) in [(15, 10), (17, 12), (8, 4)] {
            let newline = bytes[start..].byte_position(b'\n').unwrap();
            assert_eq!(newline, expected_newline);

            let line = &bytes[start..start + newline];
            assert_eq!(line.byte_position(b';'), Some(expected_semicolon));

            start += newline + 1;
        }

        assert_eq!(bytes[start..].byte_position(b'\n'), None);
        assert_eq!(&bytes[start..], b"Bo;6.8");
    }

    #[rstest]
    #[case(b"Kika;4.3\n", b"Kika;4.3")]
    #[case(b"Kika;4.3\r\n", b"Kika;4.3")]
    #[case(b"Kika;4.3\r", b"Kika;4.3")]
    #[case(b"Kika;4.3", b"Kika;4.3")]
    #[case(b"\n", b"")]
    #[case(b"\r\n", b"")]
    #[case(b"", b"")]
    #[case(b"Kika;4.3\n\n", b"Kika;4.3\n")]
    #[case(b"Kika;4.3\r\r\n", b"Kika;4.3\r")]
    fn test_trim_line_terminator(#[case] input: &[u8], #[case] expected: &[u8]) {
        assert_eq!(input.trim_line_terminator(), expected);
    }
}
