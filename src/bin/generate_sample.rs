use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Region {
    name: &'static str,
    region_type: &'static str,
    state_name: &'static str,
    state: &'static str,
    metro: &'static str,
    county: &'static str,
    /// Starting home value and mean monthly growth rate.
    base_value: f64,
    monthly_growth: f64,
}

const REGIONS: &[Region] = &[
    Region { name: "Los Angeles", region_type: "city", state_name: "California", state: "CA", metro: "Los Angeles-Long Beach-Anaheim", county: "Los Angeles County", base_value: 910_000.0, monthly_growth: 0.004 },
    Region { name: "San Diego", region_type: "city", state_name: "California", state: "CA", metro: "San Diego-Chula Vista-Carlsbad", county: "San Diego County", base_value: 830_000.0, monthly_growth: 0.005 },
    Region { name: "Austin", region_type: "city", state_name: "Texas", state: "TX", metro: "Austin-Round Rock", county: "Travis County", base_value: 540_000.0, monthly_growth: -0.002 },
    Region { name: "Houston", region_type: "city", state_name: "Texas", state: "TX", metro: "Houston-The Woodlands-Sugar Land", county: "Harris County", base_value: 270_000.0, monthly_growth: 0.002 },
    Region { name: "Columbus", region_type: "city", state_name: "Ohio", state: "OH", metro: "Columbus", county: "Franklin County", base_value: 240_000.0, monthly_growth: 0.006 },
    Region { name: "Austin-Round Rock", region_type: "msa", state_name: "Texas", state: "TX", metro: "", county: "", base_value: 470_000.0, monthly_growth: -0.001 },
    Region { name: "Columbus Metro", region_type: "msa", state_name: "Ohio", state: "OH", metro: "", county: "", base_value: 280_000.0, monthly_growth: 0.005 },
    Region { name: "San Diego-Carlsbad", region_type: "msa", state_name: "California", state: "CA", metro: "", county: "", base_value: 790_000.0, monthly_growth: 0.004 },
];

/// Month-end period labels `2023-01-31` … `2024-12-31`.
fn period_labels() -> Vec<String> {
    let last_day = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut labels = Vec::new();
    for year in [2023u32, 2024] {
        for month in 1..=12u32 {
            let mut day = last_day[month as usize - 1];
            if month == 2 && year % 4 == 0 {
                day = 29;
            }
            labels.push(format!("{year}-{month:02}-{day:02}"));
        }
    }
    labels
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let periods = period_labels();

    let output_path = "assets/sample-data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header = vec![
        "RegionID".to_string(),
        "SizeRank".to_string(),
        "RegionName".to_string(),
        "RegionType".to_string(),
        "StateName".to_string(),
        "State".to_string(),
        "City".to_string(),
        "Metro".to_string(),
        "CountyName".to_string(),
    ];
    header.extend(periods.iter().cloned());
    writer.write_record(&header).context("writing header")?;

    for (idx, region) in REGIONS.iter().enumerate() {
        let mut record = vec![
            format!("{}", 10000 + idx),
            format!("{}", (idx + 1) * 10),
            region.name.to_string(),
            region.region_type.to_string(),
            region.state_name.to_string(),
            region.state.to_string(),
            if region.region_type == "city" { region.name.to_string() } else { String::new() },
            region.metro.to_string(),
            region.county.to_string(),
        ];

        let mut value = region.base_value;
        for _ in &periods {
            let growth = rng.gauss(region.monthly_growth, 0.006);
            value *= 1.0 + growth;
            record.push(format!("{value:.0}"));
        }

        writer.write_record(&record).context("writing region row")?;
    }

    writer.flush().context("flushing output")?;
    println!(
        "Wrote {} regions x {} periods to {output_path}",
        REGIONS.len(),
        periods.len()
    );
    Ok(())
}
