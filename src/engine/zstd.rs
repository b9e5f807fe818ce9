use std::io;

use crate::engine::Codec;

pub struct ZstdCodec;

impl Codec for ZstdCodec {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        zstd::bulk::compress(data, zstd::DEFAULT_COMPRESSION_LEVEL)
    }

    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>> {
        zstd::bulk::decompress(data, original_len)
    }
}
