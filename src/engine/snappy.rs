use std::io;

use snap::raw::{Decoder, Encoder};

use crate::engine::Codec;

pub struct SnappyCodec;

impl Codec for SnappyCodec {
    fn name(&self) -> &'static str {
        "snappy"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        Encoder::new()
            .compress_vec(data)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    fn decompress(&self, data: &[u8], _original_len: usize) -> io::Result<Vec<u8>> {
        Decoder::new()
            .decompress_vec(data)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
