use crate::chunk::ChunkHeader;
use crate::layout::read_i64;

#[test]
fn test_chunk_header_roundtrip() {
    let mut buf = [0u8; 64];
    let header = ChunkHeader { next_chunk: 1 << 30, num_vectors: 11903 };
    header.write_to(&mut buf, 16);

    assert_eq!(ChunkHeader::read(&buf, 16), header);
    assert_eq!(read_i64(&buf, 16), 1 << 30);
    assert_eq!(read_i64(&buf, 24), 11903);
}

#[test]
fn test_zeroed_bytes_decode_as_empty_last_chunk() {
    // Freshly allocated chunks are never written explicitly; the zero fill
    // must already read back as "no entries, end of chain".
    let buf = [0u8; 16];
    let header = ChunkHeader::read(&buf, 0);
    assert_eq!(header, ChunkHeader::default());
    assert_eq!(header.next_chunk, 0);
    assert_eq!(header.num_vectors, 0);
}
