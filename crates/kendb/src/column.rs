use bytes::Bytes;
use storage::{
    CHUNK_SIZE, ChunkHeader, ColumnMeta, Direction, GROWTH_STEP, SharedFileStore, data_cursor,
    read_u64, set_data_cursor, write_u64,
};
use tracing::error;

use crate::error::DatabaseError;

/// Payload accepted by [`Column::add_vector`]: decoded f32 features, or a
/// pre-serialized little-endian buffer of `4 * vector_length` bytes as
/// handed over by ingestion adapters.
#[derive(Clone, Debug)]
pub enum VectorPayload {
    Floats(Vec<f32>),
    Bytes(Bytes),
}

impl From<Vec<f32>> for VectorPayload {
    fn from(features: Vec<f32>) -> Self {
        VectorPayload::Floats(features)
    }
}

impl From<&[f32]> for VectorPayload {
    fn from(features: &[f32]) -> Self {
        VectorPayload::Floats(features.to_vec())
    }
}

impl From<Bytes> for VectorPayload {
    fn from(buf: Bytes) -> Self {
        VectorPayload::Bytes(buf)
    }
}

impl VectorPayload {
    /// Byte length of the feature body, validated against the column's
    /// vector length.
    fn checked_len(&self, vector_length: i64) -> Result<i64, DatabaseError> {
        let expected = vector_length * 4;
        let actual = match self {
            VectorPayload::Floats(features) => features.len() as i64 * 4,
            VectorPayload::Bytes(buf) => buf.len() as i64,
        };
        if actual != expected {
            error!(actual, expected, "cannot add vector to column");
            return Err(DatabaseError::DimensionMismatch { expected, actual });
        }
        Ok(actual)
    }

    fn write_to(&self, dst: &mut [u8]) {
        match self {
            VectorPayload::Floats(features) => dst.copy_from_slice(bytemuck::cast_slice(features)),
            VectorPayload::Bytes(buf) => dst.copy_from_slice(buf),
        }
    }
}

/// Zero-copy f32 view of an entry body inside the mapping.
///
/// Entry bodies are always 4-byte aligned: chunks sit on 64 MiB boundaries
/// of the page-aligned mapping, and the 16 byte chunk header plus the
/// 8 byte timestamp keep every feature array on a multiple of four.
pub(crate) fn read_features(b: &[u8], offset: i64, vector_length: i64) -> &[f32] {
    let start = offset as usize;
    bytemuck::cast_slice(&b[start..start + vector_length as usize * 4])
}

/// One column of `(timestamp, vector)` entries, stored as a chain of
/// chunks. Holds its own metadata record and a handle to the shared store;
/// the owning table is only reachable through offsets, never references.
#[derive(Debug)]
pub struct Column {
    pub(crate) meta: ColumnMeta,
    pub(crate) store: SharedFileStore,
}

impl Column {
    pub(crate) fn new(meta: ColumnMeta, store: SharedFileStore) -> Self {
        Column { meta, store }
    }

    pub fn name(&self) -> String {
        self.meta.name.to_string()
    }

    /// Element count of every vector in this column. Fixed at creation.
    pub fn vector_length(&self) -> i64 {
        self.meta.vector_length
    }

    /// Total number of entries appended so far.
    pub fn len(&self) -> i64 {
        self.meta.num_vectors
    }

    pub fn is_empty(&self) -> bool {
        self.meta.num_vectors == 0
    }

    fn entry_size(&self) -> i64 {
        8 + self.meta.vector_length * 4
    }

    /// Append one `(timestamp, vector)` entry at the tail of the chunk
    /// chain, allocating and linking a fresh chunk when the last one is
    /// full. Timestamps are not required to be ordered.
    pub fn add_vector(
        &mut self,
        timestamp: i64,
        payload: impl Into<VectorPayload>,
    ) -> Result<(), DatabaseError> {
        let payload = payload.into();
        let body_len = payload.checked_len(self.meta.vector_length)?;

        let mut store = self.store.write();

        // Walk the chain to the chunk currently taking appends.
        let b = store.bytes();
        let mut chunk_pos = self.meta.first_chunk_offset;
        let mut header = ChunkHeader::read(b, chunk_pos);
        while header.next_chunk != 0 {
            chunk_pos = header.next_chunk;
            header = ChunkHeader::read(b, header.next_chunk);
        }

        let entry_pos = chunk_pos + ChunkHeader::SIZE + header.num_vectors * self.entry_size();

        if entry_pos + 8 + body_len - chunk_pos <= CHUNK_SIZE {
            let b = store.bytes_mut();
            write_u64(b, entry_pos, timestamp as u64);
            payload.write_to(&mut b[(entry_pos + 8) as usize..(entry_pos + 8 + body_len) as usize]);

            header.num_vectors += 1;
            self.meta.num_vectors += 1;
            self.meta.write_to(b);
            header.write_to(b, chunk_pos);
            return Ok(());
        }

        // The entry does not fit; start a new chunk at the data cursor,
        // growing the file first when the slot would fall past the end.
        let new_chunk_pos = data_cursor(store.bytes());
        if new_chunk_pos + CHUNK_SIZE > store.len() {
            store.grow(GROWTH_STEP)?;
        }

        let b = store.bytes_mut();
        // Freshly allocated space is zero-filled, which already encodes an
        // empty chunk header; only the entry and the counters are written.
        let entry_pos = new_chunk_pos + ChunkHeader::SIZE;
        write_u64(b, entry_pos, timestamp as u64);
        payload.write_to(&mut b[(entry_pos + 8) as usize..(entry_pos + 8 + body_len) as usize]);

        ChunkHeader { next_chunk: 0, num_vectors: 1 }.write_to(b, new_chunk_pos);
        header.next_chunk = new_chunk_pos;
        header.write_to(b, chunk_pos);
        self.meta.num_vectors += 1;
        self.meta.write_to(b);
        set_data_cursor(b, new_chunk_pos + CHUNK_SIZE, Direction::Right);
        Ok(())
    }

    /// Visit every entry in chain order.
    pub(crate) fn for_each_entry(&self, b: &[u8], mut visit: impl FnMut(i64, u64, &[f32])) {
        self.for_each_entry_until(b, |idx, ts, features| {
            visit(idx, ts, features);
            true
        });
    }

    /// Visit entries in chain order until the callback returns `false`.
    pub(crate) fn for_each_entry_until(
        &self,
        b: &[u8],
        mut visit: impl FnMut(i64, u64, &[f32]) -> bool,
    ) {
        let entry_size = self.entry_size();
        let mut idx = 0i64;
        let mut chunk_pos = self.meta.first_chunk_offset;
        while chunk_pos != 0 {
            let header = ChunkHeader::read(b, chunk_pos);
            for i in 0..header.num_vectors {
                let entry_pos = chunk_pos + ChunkHeader::SIZE + i * entry_size;
                let ts = read_u64(b, entry_pos);
                let features = read_features(b, entry_pos + 8, self.meta.vector_length);
                if !visit(idx, ts, features) {
                    return;
                }
                idx += 1;
            }
            chunk_pos = header.next_chunk;
        }
    }

    /// Dump every entry to stdout. Diagnostic helper.
    pub fn print_column_entries(&self) {
        let store = self.store.read();
        self.for_each_entry(store.bytes(), |_, ts, features| {
            println!("Timestamp: {ts} Vector: {features:?}");
        });
    }
}
