//! Synthetic corpus-file generation.
//!
//! Generators are explicit instances constructed over a seeded rng, owned
//! by the caller and passed in through [`GeneratorSpec`]; there is no
//! shared generator state anywhere in the crate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

/// Produces one synthetic corpus file per call.
pub trait FileGenerator {
    /// Generator name, used in error reports.
    fn name(&self) -> &str;

    /// Writes one new file into `dir` and returns its path.
    fn generate(&mut self, dir: &Path) -> io::Result<PathBuf>;
}

/// A generator paired with how many files it should produce.
pub struct GeneratorSpec {
    pub generator: Box<dyn FileGenerator>,
    pub quantity: usize,
}

impl GeneratorSpec {
    pub fn new(generator: impl FileGenerator + 'static, quantity: usize) -> Self {
        GeneratorSpec {
            generator: Box::new(generator),
            quantity,
        }
    }
}

const WORDS: &[&str] = &[
    "archive", "beacon", "cascade", "datum", "ember", "fathom", "glacier", "harbor", "isotope",
    "jetty", "kernel", "lattice", "meridian", "nimbus", "orchard", "prism", "quarry", "riverbed",
    "signal", "timber", "updraft", "vertex", "willow", "zenith",
];

/// Writes comma-joined token files: synthetic words, e-mail addresses,
/// URLs or phone numbers, 100–500 tokens per file. The flavor is chosen
/// per file and suffixed to the name, so a corpus built from this
/// generator spans several text shapes.
pub struct TextGenerator {
    rng: StdRng,
}

impl TextGenerator {
    pub fn new(seed: u64) -> Self {
        TextGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn word(&mut self) -> &'static str {
        WORDS[self.rng.gen_range(0..WORDS.len())]
    }

    fn token(&mut self, flavor: usize) -> String {
        match flavor {
            0 => format!("{}{}@example.com", self.word(), self.rng.gen_range(0..100u32)),
            1 => format!(
                "({:03}) {:03}-{:04}",
                self.rng.gen_range(200..1000u32),
                self.rng.gen_range(0..1000u32),
                self.rng.gen_range(0..10000u32)
            ),
            2 => format!("https://{}.example.org/{}", self.word(), self.word()),
            _ => format!("{} {}", self.word(), self.word()),
        }
    }
}

impl FileGenerator for TextGenerator {
    fn name(&self) -> &str {
        "text"
    }

    fn generate(&mut self, dir: &Path) -> io::Result<PathBuf> {
        let flavor = self.rng.gen_range(0..4usize);
        let suffix = ["email", "phone", "url", "words"][flavor];

        let count = self.rng.gen_range(100..=500);
        let tokens: Vec<String> = (0..count).map(|_| self.token(flavor)).collect();

        let path = dir.join(format!("{}{}.txt", Uuid::new_v4(), suffix));
        fs::write(&path, tokens.join(","))?;
        Ok(path)
    }
}

/// Writes uniform random bytes — the incompressible end of the corpus.
pub struct NoiseGenerator {
    rng: StdRng,
    min_len: usize,
    max_len: usize,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_len_range(seed, 16 * 1024, 64 * 1024)
    }

    pub fn with_len_range(seed: u64, min_len: usize, max_len: usize) -> Self {
        NoiseGenerator {
            rng: StdRng::seed_from_u64(seed),
            min_len,
            max_len,
        }
    }
}

impl FileGenerator for NoiseGenerator {
    fn name(&self) -> &str {
        "noise"
    }

    fn generate(&mut self, dir: &Path) -> io::Result<PathBuf> {
        let len = self.rng.gen_range(self.min_len..=self.max_len);
        let mut contents = vec![0u8; len];
        self.rng.fill_bytes(&mut contents);

        let path = dir.join(format!("{}.bin", Uuid::new_v4()));
        fs::write(&path, contents)?;
        Ok(path)
    }
}
