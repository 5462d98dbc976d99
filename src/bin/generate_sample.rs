use std::path::PathBuf;

use anyhow::Result;
use scatterpick::data::sample::{write_sample, DEFAULT_SAMPLE_PATH};

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_PATH));

    let rows = write_sample(&output_path)?;
    println!("Wrote {rows} sample points to {}", output_path.display());
    Ok(())
}
