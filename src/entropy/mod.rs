/// Logarithm base used when computing entropy.
///
/// `Nats` (the natural logarithm) is the default and matches the unit the
/// rest of the crate reports; `Bits` (log base 2) is available for callers
/// that want the information content in bits per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntropyBase {
    #[default]
    Nats,
    Bits,
}

/// Calculates the Shannon entropy of a byte sequence.
///
/// The entropy is computed from the empirical frequency of each of the 256
/// possible byte values: `−Σ pᵢ·log(pᵢ)` over the values that actually
/// occur. The result depends only on the frequency distribution, never on
/// the order of the bytes.
///
/// Sequences of length ≤ 1, and sequences containing a single distinct
/// value, carry no information and yield `0.0`.
///
/// # Examples
///
/// ```
/// use corpus_benchmark_rs::entropy::{shannon_entropy, EntropyBase};
///
/// assert_eq!(shannon_entropy(&[7u8; 100], EntropyBase::Nats), 0.0);
///
/// let uniform: Vec<u8> = (0..=255).collect();
/// let bits = shannon_entropy(&uniform, EntropyBase::Bits);
/// assert!((bits - 8.0).abs() < 1e-9);
/// ```
pub fn shannon_entropy(data: &[u8], base: EntropyBase) -> f64 {
    if data.len() <= 1 {
        return 0.0;
    }

    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    let distinct = counts.iter().filter(|&&c| c > 0).count();
    if distinct <= 1 {
        return 0.0;
    }

    // Fixed 0..256 accumulation order keeps the result bit-for-bit
    // reproducible across runs.
    let total = data.len() as f64;
    let mut entropy = 0.0;
    for &count in counts.iter() {
        if count == 0 {
            continue;
        }
        let probability = count as f64 / total;
        entropy -= match base {
            EntropyBase::Nats => probability * probability.ln(),
            EntropyBase::Bits => probability * probability.log2(),
        };
    }

    entropy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_has_zero_entropy() {
        assert_eq!(shannon_entropy(&[], EntropyBase::Nats), 0.0);
    }

    #[test]
    fn single_byte_has_zero_entropy() {
        assert_eq!(shannon_entropy(&[42], EntropyBase::Nats), 0.0);
    }

    #[test]
    fn repeated_byte_has_zero_entropy() {
        let data = vec![0u8; 4096];
        assert_eq!(shannon_entropy(&data, EntropyBase::Nats), 0.0);
        assert_eq!(shannon_entropy(&data, EntropyBase::Bits), 0.0);
    }

    #[test]
    fn uniform_distribution_reaches_the_maximum() {
        let data: Vec<u8> = (0..=255u8).collect();
        let nats = shannon_entropy(&data, EntropyBase::Nats);
        assert!((nats - 256f64.ln()).abs() < 1e-6);

        let bits = shannon_entropy(&data, EntropyBase::Bits);
        assert!((bits - 8.0).abs() < 1e-6);
    }

    #[test]
    fn entropy_ignores_byte_order() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| [b, b.wrapping_add(13)]).collect();
        let mut shuffled = data.clone();
        shuffled.reverse();
        shuffled.rotate_left(17);

        let a = shannon_entropy(&data, EntropyBase::Nats);
        let b = shannon_entropy(&shuffled, EntropyBase::Nats);
        assert_eq!(a, b);
    }

    #[test]
    fn two_value_split_matches_the_closed_form() {
        // 75/25 split: −(0.75·ln 0.75 + 0.25·ln 0.25)
        let mut data = vec![0u8; 75];
        data.extend(vec![255u8; 25]);
        let expected = -(0.75f64 * 0.75f64.ln() + 0.25f64 * 0.25f64.ln());
        assert!((shannon_entropy(&data, EntropyBase::Nats) - expected).abs() < 1e-12);
    }
}
