use std::{fmt, fs::File, io, path::Path};

use nanorand::{Rng, WyRand};

use crate::error::Result;

/// Bit-flip statistics of a mix function, gathered by flipping each input
/// bit in turn and watching which output bits change.
pub struct Stats {
    pub input_bit_len: usize,
    pub output_bit_len: usize,
    pub digest_bit_len: usize,

    // Rounds accumulated so far.
    pub sample_count: usize,

    // `input_bit_len * output_bit_len` flip counts, one row per input bit.
    // Empty when avalanche isn't being measured.
    pub avalanche_chart: Vec<u32>,

    // For every input bit and every ordered pair of distinct output bits,
    // counts of [both flipped, neither, only first, only second].
    pub bic_chart: Vec<[u32; 4]>,
}

/// Smallest, mean and largest of a set of measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Spread {
    fn of<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut n = 0usize;
        let mut spread = Spread {
            min: f64::INFINITY,
            avg: 0.0,
            max: f64::NEG_INFINITY,
        };
        for v in values {
            spread.min = spread.min.min(v);
            spread.max = spread.max.max(v);
            spread.avg += v;
            n += 1;
        }

        if n == 0 {
            return Spread {
                min: 0.0,
                avg: 0.0,
                max: 0.0,
            };
        }
        spread.avg /= n as f64;
        spread
    }
}

/// BIC quadrant frequencies, each row sorted ascending.  Ideal is 0.25
/// across the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BicSummary {
    pub worst: [f64; 4],
    pub avg: [f64; 4],
    pub best: [f64; 4],
}

impl Stats {
    pub fn new(
        input_bit_len: usize,
        output_bit_len: usize,
        digest_bit_len: usize,
        do_avalanche: bool,
        do_bic: bool,
    ) -> Self {
        Self {
            input_bit_len,
            output_bit_len,
            digest_bit_len,
            sample_count: 0,
            avalanche_chart: if do_avalanche {
                vec![0; input_bit_len * output_bit_len]
            } else {
                Vec::new()
            },
            bic_chart: if do_bic {
                vec![[0; 4]; input_bit_len * Self::bic_stride(output_bit_len)]
            } else {
                Vec::new()
            },
        }
    }

    fn bic_stride(output_bit_len: usize) -> usize {
        output_bit_len * output_bit_len.saturating_sub(1)
    }

    pub fn has_avalanche(&self) -> bool {
        !self.avalanche_chart.is_empty()
    }

    pub fn has_bic(&self) -> bool {
        !self.bic_chart.is_empty()
    }

    /// Does nothing when avalanche isn't being measured.
    pub fn record_flip(&mut self, in_bit: usize, out_bit: usize, flipped: bool) {
        if out_bit >= self.output_bit_len {
            return;
        }
        if let Some(count) = self
            .avalanche_chart
            .get_mut(in_bit * self.output_bit_len + out_bit)
        {
            *count += flipped as u32;
        }
    }

    /// Zero for an unmeasured chart or an out-of-range bit pair.
    pub fn flips(&self, in_bit: usize, out_bit: usize) -> u32 {
        if out_bit >= self.output_bit_len {
            return 0;
        }
        self.avalanche_chart
            .get(in_bit * self.output_bit_len + out_bit)
            .copied()
            .unwrap_or(0)
    }

    /// Empty for an unmeasured chart or an out-of-range input bit.
    pub fn row(&self, in_bit: usize) -> &[u32] {
        let start = in_bit * self.output_bit_len;
        self.avalanche_chart
            .get(start..(start + self.output_bit_len))
            .unwrap_or(&[])
    }

    /// Fraction of rounds in which `flips` flips happened.
    fn rate(&self, flips: u32) -> f64 {
        if self.sample_count == 0 {
            0.0
        } else {
            flips as f64 / self.sample_count as f64
        }
    }

    /// How many output bits, in effect, one input bit reaches.
    pub fn row_diffusion(&self, in_bit: usize) -> f64 {
        self.row(in_bit)
            .iter()
            .map(|&flips| 1.0 - p_to_bias(self.rate(flips)))
            .sum()
    }

    pub fn row_entropy(&self, in_bit: usize) -> f64 {
        self.row(in_bit)
            .iter()
            .map(|&flips| p_to_entropy(self.rate(flips)))
            .sum()
    }

    pub fn bias(&self) -> Spread {
        Spread::of(
            self.avalanche_chart
                .iter()
                .map(|&flips| p_to_bias(self.rate(flips))),
        )
    }

    pub fn diffusion(&self) -> Spread {
        Spread::of(self.measured_rows().map(|i| self.row_diffusion(i)))
    }

    pub fn entropy(&self) -> Spread {
        Spread::of(self.measured_rows().map(|i| self.row_entropy(i)))
    }

    // Input bits with an avalanche row; none when avalanche is off.
    fn measured_rows(&self) -> std::ops::Range<usize> {
        if self.has_avalanche() {
            0..self.input_bit_len
        } else {
            0..0
        }
    }

    pub fn row_bic_sorted_quadrants(&self, in_bit: usize) -> [f64; 4] {
        let stride = Self::bic_stride(self.output_bit_len);
        let start = in_bit * stride;

        let mut sum = [0u64; 4];
        let row = self.bic_chart.get(start..(start + stride)).unwrap_or(&[]);
        for &quadrants in row {
            let mut sorted = quadrants;
            sorted.sort_unstable();
            for (total, count) in sum.iter_mut().zip(sorted) {
                *total += count as u64;
            }
        }

        let norm = (stride * self.sample_count).max(1) as f64;
        sum.map(|total| total as f64 / norm)
    }

    /// All zeroes when BIC isn't being measured.
    pub fn bic_quadrants(&self) -> BicSummary {
        if !self.has_bic() || self.input_bit_len == 0 {
            return BicSummary {
                worst: [0.0; 4],
                avg: [0.0; 4],
                best: [0.0; 4],
            };
        }

        let mut summary = BicSummary {
            worst: [f64::INFINITY, f64::INFINITY, f64::INFINITY, 0.0],
            avg: [0.0; 4],
            best: [0.0; 4],
        };

        for i in 0..self.input_bit_len {
            let row = self.row_bic_sorted_quadrants(i);
            for q in 0..3 {
                summary.worst[q] = summary.worst[q].min(row[q]);
            }
            summary.worst[3] = summary.worst[3].max(row[3]);
            for q in 0..4 {
                summary.avg[q] += row[q];
            }
            // The best row is the one whose rarest quadrant is most common.
            if row[0] > summary.best[0] {
                summary.best = row;
            }
        }

        for q in summary.avg.iter_mut() {
            *q /= self.input_bit_len as f64;
        }
        summary
    }

    /// Writes the avalanche chart as a greyscale image: one row per input
    /// bit, one column per output bit, white for "always flips".
    pub fn write_avalanche_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if !self.has_avalanche() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no avalanche chart was computed",
            )
            .into());
        }

        let mut pixels = Vec::with_capacity(self.avalanche_chart.len() * 4);
        for &flips in &self.avalanche_chart {
            let v = (self.rate(flips) * 255.0).round().min(255.0) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }

        png_encode_mini::write_rgba_from_u8(
            &mut File::create(path.as_ref())?,
            &pixels,
            self.output_bit_len as u32,
            self.input_bit_len as u32,
        )?;

        Ok(())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_avalanche() {
            let bias = self.bias();
            let diffusion = self.diffusion();
            let entropy = self.entropy();
            writeln!(f, "    Bias:")?;
            writeln!(f, "        Min: {:0.2}", bias.min)?;
            writeln!(f, "        Avg: {:0.2}", bias.avg)?;
            writeln!(f, "        Max: {:0.2}", bias.max)?;
            writeln!(
                f,
                "    Input Bit Diffusion (digest size = {} bits):",
                self.digest_bit_len
            )?;
            writeln!(f, "        Min: {:0.1} bits", diffusion.min)?;
            writeln!(f, "        Avg: {:0.1} bits", diffusion.avg)?;
            writeln!(f, "        Max: {:0.1} bits", diffusion.max)?;
            writeln!(
                f,
                "    Input Bit Diffusion Entropy (digest size = {} bits):",
                self.digest_bit_len
            )?;
            writeln!(f, "        Min: {:0.1} bits", entropy.min)?;
            writeln!(f, "        Avg: {:0.1} bits", entropy.avg)?;
            writeln!(f, "        Max: {:0.1} bits", entropy.max)?;
        }

        if self.has_bic() {
            let bic = self.bic_quadrants();
            writeln!(f, "    BIC quadrants (sorted):")?;
            for (label, q) in [("Wrst", bic.worst), (" Avg", bic.avg), ("Best", bic.best)] {
                writeln!(
                    f,
                    "        {}: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]",
                    label, q[0], q[1], q[2], q[3]
                )?;
            }
        }

        Ok(())
    }
}

/// Computes flip statistics for a mix function, using a provided input
/// generator.
///
/// - `generate_input`: fills an input block from a round index.  Must be
///   deterministic; the index starts at zero and increments each round.
/// - `mix`: mixes an input block into an output block.  The output buffer
///   is an out parameter only; its previous contents must be ignored.
/// - `input_size` / `output_size`: block sizes of `mix`, in bytes.
/// - `digest_size`: digest size of the hash `mix` belongs to, in bytes.
///   Informational only.
/// - `on_round`: called with the round index before each round, for
///   progress display.
#[allow(clippy::too_many_arguments)]
pub fn compute_stats<F1, F2, F3>(
    generate_input: F1,
    mix: F2,
    input_size: usize,
    output_size: usize,
    digest_size: usize,
    rounds: usize,
    do_avalanche: bool,
    do_bic: bool,
    mut on_round: F3,
) -> Stats
where
    F1: Fn(usize, &mut [u8]),
    F2: Fn(&[u8], &mut [u8]),
    F3: FnMut(usize),
{
    let out_bits = output_size * 8;
    let mut stats = Stats::new(
        input_size * 8,
        out_bits,
        digest_size * 8,
        do_avalanche,
        do_bic,
    );

    let mut input = vec![0u8; input_size];
    let mut output = vec![0u8; output_size];
    let mut input_tweaked = vec![0u8; input_size];
    let mut output_tweaked = vec![0u8; output_size];
    let mut diff = vec![0u8; output_size];

    for round in 0..rounds {
        on_round(round);

        generate_input(round, &mut input[..]);
        mix(&input[..], &mut output[..]);

        for in_bit in 0..(input_size * 8) {
            input_tweaked.copy_from_slice(&input[..]);
            input_tweaked[in_bit / 8] ^= 1 << (in_bit % 8);
            mix(&input_tweaked[..], &mut output_tweaked[..]);

            for ((d, &a), &b) in diff.iter_mut().zip(&output).zip(&output_tweaked) {
                *d = a ^ b;
            }
            let flipped = |bit: usize| diff[bit / 8] & (1 << (bit % 8)) != 0;

            if do_avalanche {
                for out_bit in 0..out_bits {
                    stats.record_flip(in_bit, out_bit, flipped(out_bit));
                }
            }

            // Bit independence criterion.
            if do_bic {
                let stride = Stats::bic_stride(out_bits);
                for i in 0..out_bits {
                    for j in 0..(out_bits - 1) {
                        let k = (in_bit * stride) + (i * (out_bits - 1)) + j;
                        let flipped_a = flipped(i);
                        let flipped_b = flipped((i + j + 1) % out_bits);

                        let quadrant = match (flipped_a, flipped_b) {
                            (true, true) => 0,
                            (false, false) => 1,
                            (true, false) => 2,
                            (false, true) => 3,
                        };
                        stats.bic_chart[k][quadrant] += 1;
                    }
                }
            }
        }

        stats.sample_count += 1;
    }

    stats
}

/// Distance of a flip probability from the ideal 0.5, scaled to [0, 1].
pub fn p_to_bias(p: f64) -> f64 {
    (p * 2.0 - 1.0).abs()
}

/// Binary entropy of a flip probability, in bits.
pub fn p_to_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        let q = 1.0 - p;
        -(p * p.log2()) - (q * q.log2())
    }
}

//-------------------------------------------------------------

/// Generates a random byte stream.
pub fn generate_random(index: usize, bytes: &mut [u8]) {
    let mut rng = WyRand::new_seed(mix64(index as u64));
    rng.fill_bytes(bytes);
}

/// Generates a byte stream with all zero bits except one.
pub fn generate_single_1_bit(index: usize, bytes: &mut [u8]) {
    let bit_idx = index % (bytes.len() * 8);
    bytes.fill(0);
    bytes[bit_idx / 8] = 1 << (bit_idx % 8);
}

/// Generates a byte stream with roughly `n` random bits set to one.
pub fn generate_n_random_bits(index: usize, bytes: &mut [u8], n: usize) {
    let mut rng = WyRand::new_seed(mix64(index as u64 ^ mix64(n as u64)));

    bytes.fill(0);
    for _ in 0..n {
        let bit = rng.generate_range(0..(bytes.len() * 8));
        bytes[bit / 8] |= 1 << (bit % 8);
    }
}

/// Generates a byte stream whose low bytes count up with the round index.
pub fn generate_counting(index: usize, bytes: &mut [u8]) {
    write_low_bytes(index as u64, bytes);
}

/// Generates a byte stream whose low bytes step through gray codes in order.
pub fn generate_gray_code(index: usize, bytes: &mut [u8]) {
    write_low_bytes((index ^ (index >> 1)) as u64, bytes);
}

// Little-endian `n` into the front of `bytes`, truncated to fit, rest zeroed.
fn write_low_bytes(n: u64, bytes: &mut [u8]) {
    let len = bytes.len().min(8);
    bytes[..len].copy_from_slice(&n.to_le_bytes()[..len]);
    bytes[len..].fill(0);
}

/// 64-bit bijective bit mixer, used to decorrelate generator seeds.
fn mix64(mut n: u64) -> u64 {
    // Break zero sensitivity.
    n ^= 0x7be355f7c2e736d2;

    // http://zimbry.blogspot.ch/2011/09/better-bit-mixing-improving-on.html
    // (variant "Mix13")
    n ^= n >> 30;
    n = n.wrapping_mul(0xbf58476d1ce4e5b9);
    n ^= n >> 27;
    n = n.wrapping_mul(0x94d049bb133111eb);
    n ^= n >> 31;

    n
}
