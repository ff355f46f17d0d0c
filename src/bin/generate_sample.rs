use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use fl_device_selector::data::model::{
    BATTERY_CAPACITY, COMPANY_NAME, INTERNAL_STORAGE, MOBILE_WEIGHT, MODEL_NAME, PROCESSOR, RAM,
};

/// Write a deterministic sample device table as CSV.
#[derive(Parser, Debug)]
#[command(name = "generate-sample", version)]
struct Args {
    /// Output CSV path
    #[arg(short, long, default_value = "devices_dataset.csv")]
    output: PathBuf,

    /// Number of devices to generate
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// PRNG seed; the same seed always gives the same table
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// (company, model series, processors the company ships)
const CATALOG: &[(&str, &str, &[&str])] = &[
    ("Samsung", "Galaxy", &["Exynos 2400", "Snapdragon 8 Gen 3", "Exynos 1380"]),
    ("Google", "Pixel", &["Tensor G3", "Tensor G4"]),
    ("Apple", "iPhone", &["A16 Bionic", "A17 Pro", "A18 Pro"]),
    ("Xiaomi", "Redmi Note", &["Snapdragon 685", "Dimensity 7200", "Helio G99"]),
    ("OnePlus", "Nord", &["Dimensity 9000", "Snapdragon 7+ Gen 2"]),
    ("Motorola", "Edge", &["Dimensity 8020", "Snapdragon 7s Gen 2"]),
    ("Realme", "GT", &["Snapdragon 8 Gen 2", "Dimensity 8100"]),
];

const RAM_OPTIONS: &[u32] = &[2, 3, 4, 6, 8, 12, 16, 18, 24];
const STORAGE_OPTIONS: &[u32] = &[64, 128, 256, 512];

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        COMPANY_NAME,
        MODEL_NAME,
        MOBILE_WEIGHT,
        RAM,
        PROCESSOR,
        BATTERY_CAPACITY,
        INTERNAL_STORAGE,
    ])?;

    for i in 0..args.count {
        let (company, series, processors) = *rng.pick(CATALOG);
        let model = format!("{company} {series} {}", 10 + i % 40);
        let processor = *rng.pick(processors);
        let ram = format!("{}GB", rng.pick(RAM_OPTIONS));
        // 3000..=6500 mAh in steps of 50.
        let battery = format!("{}mAh", 3000 + 50 * rng.below(71));
        let weight = format!("{}g", 150 + rng.below(90));
        let storage = format!("{}GB", rng.pick(STORAGE_OPTIONS));

        writer.write_record([
            company,
            model.as_str(),
            weight.as_str(),
            ram.as_str(),
            processor,
            battery.as_str(),
            storage.as_str(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {} devices to {}", args.count, args.output.display());
    println!("Wrote {} devices to {}", args.count, args.output.display());
    Ok(())
}
