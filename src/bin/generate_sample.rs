//! Write `sample_metrics.csv`: a synthetic evaluation table with the columns
//! the dashboard expects, for trying uploads without network access.

use anyhow::{Context, Result};

/// SplitMix64 stream: reproducible output without pulling in `rand`.
struct Noise(u64);

impl Noise {
    fn unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as f64 / u64::MAX as f64
    }

    /// Approximately normal: sum of twelve uniforms, centred.
    fn normal(&mut self, sd: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.unit()).sum();
        (sum - 6.0) * sd
    }
}

fn main() -> Result<()> {
    let mut rng = Noise(42);
    let n_rois = 150;
    let output_path = "sample_metrics.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Label", "EV", "MSLL", "Skew", "Kurtosis", "IMG_URL"])?;

    for roi in 0..n_rois {
        // Well-fit ROIs explain more variance and have lower (more negative) MSLL.
        let fit = rng.unit();
        let ev = (0.05 + 0.8 * fit + rng.normal(0.03)).clamp(0.0, 1.0);
        let msll = -0.6 * fit + rng.normal(0.05);
        let skew = rng.normal(0.3);
        let kurtosis = 3.0 + rng.normal(0.6).abs();

        writer.write_record([
            format!("ROI_{roi}"),
            format!("{ev:.4}"),
            format!("{msll:.4}"),
            format!("{skew:.4}"),
            format!("{kurtosis:.4}"),
            format!("https://placehold.co/200x200/png?text=ROI_{roi}"),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rois} ROIs to {output_path}");
    Ok(())
}
