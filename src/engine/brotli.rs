use std::io;
use std::io::Read;

use crate::engine::Codec;

const BUFFER_SIZE: usize = 4096;
const QUALITY: u32 = 5;
const LG_WINDOW_SIZE: u32 = 22;

pub struct BrotliCodec;

impl Codec for BrotliCodec {
    fn name(&self) -> &'static str {
        "brotli"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        brotli::CompressorReader::new(data, BUFFER_SIZE, QUALITY, LG_WINDOW_SIZE)
            .read_to_end(&mut out)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(original_len);
        brotli::Decompressor::new(data, BUFFER_SIZE).read_to_end(&mut out)?;
        Ok(out)
    }
}
