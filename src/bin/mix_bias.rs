use std::io::Write;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use jenkins_hash::{
    mixers::{lookup2, one_at_a_time},
    stats::{
        compute_stats, generate_counting, generate_gray_code, generate_n_random_bits,
        generate_random, generate_single_1_bit,
    },
    Result,
};

struct Mixer<'a> {
    name: &'a str,
    mix_function: &'a dyn Fn(&[u8], &mut [u8]),
    input_size: usize,  // In bytes.
    output_size: usize, // In bytes.
    digest_size: usize, // In bytes.
}

const MIXERS: &[Mixer] = &[
    Mixer {
        name: "lookup2 mix, first block",
        mix_function: &lookup2::mix_input,
        input_size: lookup2::IN_SIZE_BYTES,
        output_size: lookup2::OUT_SIZE_BYTES,
        digest_size: lookup2::DIGEST_SIZE_BYTES,
    },
    Mixer {
        name: "lookup2 hash, 12-byte key",
        mix_function: &lookup2::hash_input,
        input_size: lookup2::IN_SIZE_BYTES,
        output_size: lookup2::HASH_OUT_SIZE_BYTES,
        digest_size: lookup2::DIGEST_SIZE_BYTES,
    },
    Mixer {
        name: "one-at-a-time hash, 4-byte key",
        mix_function: &one_at_a_time::mix_input,
        input_size: one_at_a_time::IN_SIZE_BYTES,
        output_size: one_at_a_time::OUT_SIZE_BYTES,
        digest_size: one_at_a_time::DIGEST_SIZE_BYTES,
    },
];

struct BitPattern<'a> {
    name: &'a str,
    gen_function: &'a dyn Fn(usize, &mut [u8]),

    /// Whether the pattern runs for as many rounds as the input has bits,
    /// instead of the configured round count.
    one_round_per_bit: bool,
}

const PATTERNS: &[BitPattern] = &[
    BitPattern {
        name: "random",
        gen_function: &generate_random,
        one_round_per_bit: false,
    },
    BitPattern {
        name: "counting",
        gen_function: &generate_counting,
        one_round_per_bit: false,
    },
    BitPattern {
        name: "gray code",
        gen_function: &generate_gray_code,
        one_round_per_bit: false,
    },
    BitPattern {
        name: "8 random bits",
        gen_function: &|i, bytes| generate_n_random_bits(i, bytes, 8),
        one_round_per_bit: false,
    },
    BitPattern {
        name: "single-bit",
        gen_function: &generate_single_1_bit,

        // NOTE: with so few rounds even an ideal mixer won't reach perfect
        // avalanche or BIC here; there just aren't enough samples.
        one_round_per_bit: true,
    },
];

fn command() -> Command {
    Command::new("mix_bias")
        .about("Measures avalanche and bit independence of the Jenkins hashes")
        .arg(
            Arg::new("filters")
                .value_name("FILTER")
                .help("Only run mixers whose name contains one of these (case-insensitive)")
                .num_args(0..),
        )
        .arg(
            Arg::new("bic")
                .long("bic")
                .help("Also compute the bit independence criterion")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rounds")
                .long("rounds")
                .value_name("N")
                .help("Rounds per input pattern [default: 65536]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("png_dir")
                .long("png-dir")
                .value_name("DIR")
                .help("Directory to write avalanche charts into [default: .]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no_png")
                .long("no-png")
                .help("Don't write avalanche charts")
                .action(ArgAction::SetTrue),
        )
}

const DEFAULT_ROUNDS: usize = 1 << 16;

struct Config {
    do_bic: bool,
    write_png: bool,
    rounds: usize,
    png_dir: PathBuf,
    name_filters: Vec<String>, // Lowercased.
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            do_bic: matches.get_flag("bic"),
            write_png: !matches.get_flag("no_png"),
            rounds: matches
                .get_one::<usize>("rounds")
                .copied()
                .unwrap_or(DEFAULT_ROUNDS),
            png_dir: matches
                .get_one::<PathBuf>("png_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            name_filters: matches
                .get_many::<String>("filters")
                .map(|filters| filters.map(|f| f.to_lowercase()).collect())
                .unwrap_or_default(),
        }
    }
}

fn main() -> Result<()> {
    let Config {
        do_bic,
        write_png,
        rounds,
        png_dir,
        name_filters,
    } = Config::from_matches(&command().get_matches());
    let do_avalanche = true;

    for mixer in MIXERS.iter() {
        if !name_filters.is_empty() {
            let lower_name = mixer.name.to_lowercase();

            if !name_filters
                .iter()
                .any(|filter| lower_name.contains(filter))
            {
                continue;
            }
        }

        println!("\n================================");
        println!("{}", mixer.name);
        for pattern in PATTERNS.iter() {
            println!("\nInput bit pattern: {}", pattern.name);
            let pattern_rounds = if pattern.one_round_per_bit {
                mixer.input_size * 8
            } else {
                rounds
            };
            let stats = compute_stats(
                pattern.gen_function,
                mixer.mix_function,
                mixer.input_size,
                mixer.output_size,
                mixer.digest_size,
                pattern_rounds,
                do_avalanche,
                do_bic,
                |round| {
                    print!(
                        "\r                                                  \rRound {}/{}",
                        round, pattern_rounds
                    );
                    let _ = std::io::stdout().flush();
                },
            );
            print!("\r                                                  \r");
            print!("{}", stats);

            if write_png {
                stats.write_avalanche_png(
                    png_dir.join(format!("{} - {}.png", mixer.name, pattern.name)),
                )?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    fn config(args: &[&str]) -> Config {
        Config::from_matches(&command().get_matches_from(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = config(&["mix_bias"]);
        assert_eq!(config.rounds, 65536);
        assert_eq!(config.png_dir, PathBuf::from("."));
        assert!(!config.do_bic);
        assert!(config.write_png);
        assert!(config.name_filters.is_empty());
    }

    #[test]
    fn filters_and_flags() {
        let config = config(&[
            "mix_bias", "Lookup2", "--bic", "--rounds", "10", "--png-dir", "out", "--no-png",
        ]);
        assert!(config.do_bic);
        assert!(!config.write_png);
        assert_eq!(config.rounds, 10);
        assert_eq!(config.png_dir, PathBuf::from("out"));
        assert_eq!(config.name_filters, ["lookup2"]);
    }

    #[test]
    fn bad_round_count_rejected() {
        let result = command().try_get_matches_from(["mix_bias", "--rounds", "many"]);
        assert!(result.is_err());
    }
}
