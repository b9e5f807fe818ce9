use std::io;
use std::io::Read;

use xz2::read::{XzDecoder, XzEncoder};

use crate::engine::Codec;

const LEVEL: u32 = 6;

pub struct XzCodec;

impl Codec for XzCodec {
    fn name(&self) -> &'static str {
        "xz"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        XzEncoder::new(data, LEVEL).read_to_end(&mut out)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(original_len);
        XzDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}
