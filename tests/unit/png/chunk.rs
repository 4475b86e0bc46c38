//! Tests for PNG chunk stream scanning and record encoding

#[cfg(test)]
mod tests {
    use tilepress::PatternError;
    use tilepress::png::chunk::{
        CHUNK_OVERHEAD, ChunkStream, ChunkType, PNG_SIGNATURE, chunk_crc, encode_chunk,
        has_signature, read_u32_be,
    };

    fn minimal_png() -> Vec<u8> {
        let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0];
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend(encode_chunk(ChunkType::IHDR, &ihdr).unwrap());
        bytes.extend(encode_chunk(ChunkType::IDAT, &[1, 2, 3]).unwrap());
        bytes.extend(encode_chunk(ChunkType::IEND, &[]).unwrap());
        bytes
    }

    // Tests record layout of an encoded chunk
    #[test]
    fn test_encode_chunk_layout() {
        let record = encode_chunk(ChunkType::IEND, &[]).unwrap();
        assert_eq!(
            record,
            vec![0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );

        let record = encode_chunk(ChunkType::IDAT, &[7, 7]).unwrap();
        assert_eq!(record.len(), CHUNK_OVERHEAD + 2);
        assert_eq!(read_u32_be(&record, 0), Some(2));
        assert_eq!(read_u32_be(&record, 10), Some(chunk_crc(ChunkType::IDAT, &[7, 7])));
    }

    // Tests signature detection
    #[test]
    fn test_has_signature() {
        assert!(has_signature(&minimal_png()));
        assert!(!has_signature(b"GIF89a"));
        assert!(!has_signature(&PNG_SIGNATURE[..4]));
    }

    // Tests big-endian reads and bounds
    #[test]
    fn test_read_u32_be() {
        let bytes = [0x00, 0x00, 0x2E, 0x23, 0xFF];
        assert_eq!(read_u32_be(&bytes, 0), Some(11811));
        assert_eq!(read_u32_be(&bytes, 2), None);
        assert_eq!(read_u32_be(&bytes, usize::MAX), None);
    }

    // Tests a well-formed stream parses in order with valid CRCs
    #[test]
    fn test_parse_records() {
        let bytes = minimal_png();
        let stream = ChunkStream::parse(&bytes).unwrap();

        let types: Vec<ChunkType> = stream.records().iter().map(|r| r.chunk_type).collect();
        assert_eq!(types, vec![ChunkType::IHDR, ChunkType::IDAT, ChunkType::IEND]);

        let ihdr = stream.find(ChunkType::IHDR).unwrap();
        assert_eq!(ihdr.offset, 8);
        assert_eq!(ihdr.length, 13);
        assert_eq!(ihdr.end(), 33);
        assert_eq!(stream.data(ihdr).map(<[u8]>::len), Some(13));
        assert!(stream.records().iter().all(|record| stream.verify_crc(record)));
        assert_eq!(stream.count(ChunkType::IDAT), 1);
        assert_eq!(stream.count(ChunkType::PHYS), 0);
        assert_eq!(stream.bytes().len(), bytes.len());
    }

    // Tests a corrupted CRC is detected
    #[test]
    fn test_verify_crc_detects_corruption() {
        let mut bytes = minimal_png();
        // Last byte of the IDAT payload
        bytes[43] ^= 0xFF;
        let stream = ChunkStream::parse(&bytes).unwrap();
        let idat = stream.find(ChunkType::IDAT).unwrap();
        assert!(!stream.verify_crc(idat));
    }

    // Tests bytes after IEND are ignored
    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = minimal_png();
        bytes.extend_from_slice(b"garbage");
        let stream = ChunkStream::parse(&bytes).unwrap();
        assert_eq!(stream.records().len(), 3);
    }

    // Tests bad signatures and truncated records are rejected
    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            ChunkStream::parse(b"not a png at all"),
            Err(PatternError::MalformedPng { .. })
        ));

        let bytes = minimal_png();
        let truncated = &bytes[..bytes.len() - 5];
        assert!(matches!(
            ChunkStream::parse(truncated),
            Err(PatternError::MalformedPng { .. })
        ));

        let mut oversized = PNG_SIGNATURE.to_vec();
        oversized.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        oversized.extend_from_slice(b"IDAT");
        assert!(matches!(
            ChunkStream::parse(&oversized),
            Err(PatternError::MalformedPng { .. })
        ));
    }

    // Tests chunk type formatting
    #[test]
    fn test_chunk_type_display() {
        assert_eq!(ChunkType::PHYS.to_string(), "pHYs");
        assert_eq!(format!("{:?}", ChunkType::IHDR), "ChunkType(IHDR)");
        assert_eq!(ChunkType::IEND.bytes(), *b"IEND");
    }
}
