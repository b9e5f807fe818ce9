use std::io;
use std::io::Read;

use flate2::read::{DeflateDecoder, DeflateEncoder, GzDecoder, GzEncoder, ZlibDecoder, ZlibEncoder};
use flate2::Compression;

use crate::engine::Codec;

/// Raw DEFLATE stream, no container.
pub struct DeflateCodec;

impl Codec for DeflateCodec {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        DeflateEncoder::new(data, Compression::default()).read_to_end(&mut out)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(original_len);
        DeflateDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}

/// DEFLATE in a gzip envelope.
pub struct GzipCodec;

impl Codec for GzipCodec {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        GzEncoder::new(data, Compression::default()).read_to_end(&mut out)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(original_len);
        GzDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}

/// DEFLATE in a zlib envelope.
pub struct ZlibCodec;

impl Codec for ZlibCodec {
    fn name(&self) -> &'static str {
        "zlib"
    }

    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        ZlibEncoder::new(data, Compression::default()).read_to_end(&mut out)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8], original_len: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(original_len);
        ZlibDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}
