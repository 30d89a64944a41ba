use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const COLUMNS: [&str; 8] = [
    "index",
    "length (m)",
    "width (m)",
    "boundary area (m2)",
    "embodied carbon (kgCO2e)",
    "mobile robot travel time (min)",
    "robot viability rating [wall panels] (0 to 1)",
    "robot viability rating [roof panels] (0 to 1)",
];

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One synthetic design option. Larger footprints cost more carbon but let
/// the robot work with fewer, longer trips.
struct DesignOption {
    length: f64,
    width: f64,
    area: f64,
    carbon: f64,
    travel: f64,
    wall_rating: f64,
    roof_rating: f64,
}

fn generate_option(rng: &mut SimpleRng) -> DesignOption {
    let length = rng.uniform(8.0, 20.0);
    let width = rng.uniform(6.0, 14.0);
    let area = length * width;
    let panel_ratio = rng.uniform(0.2, 1.0);

    let carbon = 35.0 * area * (0.7 + 0.6 * panel_ratio) + rng.uniform(-400.0, 400.0);
    let travel = 900.0 / (1.0 + area / 60.0) * (1.6 - panel_ratio) + rng.uniform(0.0, 25.0);
    let wall_rating = (panel_ratio * 0.8 + rng.uniform(0.0, 0.2)).clamp(0.0, 1.0);
    let roof_rating = (1.0 - width / 14.0 * 0.6 + rng.uniform(-0.1, 0.1)).clamp(0.0, 1.0);

    DesignOption {
        length: round(length, 2),
        width: round(width, 2),
        area: round(area, 2),
        carbon: round(carbon, 1),
        travel: round(travel, 1),
        wall_rating: round(wall_rating, 3),
        roof_rating: round(roof_rating, 3),
    }
}

fn round(v: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (v * scale).round() / scale
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let options: Vec<DesignOption> = (0..200).map(|_| generate_option(&mut rng)).collect();

    // ---- CSV ----
    let csv_path = out_dir.join("design_options.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    writer.write_record(COLUMNS)?;
    for (i, o) in options.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            o.length.to_string(),
            o.width.to_string(),
            o.area.to_string(),
            o.carbon.to_string(),
            o.travel.to_string(),
            o.wall_rating.to_string(),
            o.roof_rating.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    // ---- Parquet ----
    let float_column = |f: fn(&DesignOption) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(options.iter().map(f).collect::<Vec<_>>()))
    };
    let mut fields = vec![Field::new(COLUMNS[0], DataType::Int64, false)];
    fields.extend(
        COLUMNS[1..]
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(0..options.len() as i64)) as ArrayRef,
            float_column(|o| o.length),
            float_column(|o| o.width),
            float_column(|o| o.area),
            float_column(|o| o.carbon),
            float_column(|o| o.travel),
            float_column(|o| o.wall_rating),
            float_column(|o| o.roof_rating),
        ],
    )
    .context("building record batch")?;

    let parquet_path = out_dir.join("design_options.parquet");
    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} design options to {} and {}",
        options.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
