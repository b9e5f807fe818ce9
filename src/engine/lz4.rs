use std::io;

use lz4::block;

use crate::engine::Codec;

/// LZ4 block format. The block format does not record the uncompressed
/// size, so decompression relies on the caller's length hint.
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        block::compress(data, None, false)
    }

    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>> {
        block::decompress(data, Some(original_len as i32))
    }
}
