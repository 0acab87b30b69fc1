use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SEED_ENV: &str = "CRAWL_SEED";

/// Where the run seed came from, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Env(u64),
    Config(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Env(seed) | Self::Config(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// `--seed` beats `CRAWL_SEED`, which beats the config file; otherwise `generated` is used.
pub fn resolve_seed(
    cli: Option<u64>,
    env_value: Option<&str>,
    config: Option<u64>,
    generated: u64,
) -> Result<SeedChoice, String> {
    if let Some(seed) = cli {
        return Ok(SeedChoice::Cli(seed));
    }
    if let Some(raw) = env_value.map(str::trim).filter(|raw| !raw.is_empty()) {
        return parse_seed_value(raw).map(SeedChoice::Env);
    }
    Ok(match config {
        Some(seed) => SeedChoice::Config(seed),
        None => SeedChoice::Generated(generated),
    })
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value
        .parse::<u64>()
        .map_err(|_| format!("{SEED_ENV} value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
