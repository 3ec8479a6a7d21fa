use std::fmt::Write as _;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};

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

/// Exponential approach from `start` to `end` with time constant `tau` (minutes).
fn cooldown(start: f64, end: f64, tau: f64, minutes: f64) -> f64 {
    end + (start - end) * (-minutes / tau).exp()
}

/// One log row for the onokoro57 layout, `minutes` after the start of the run.
fn sample_row(ts: NaiveDateTime, minutes: f64, rng: &mut SimpleRng) -> String {
    let filling = minutes > 1800.0;
    let heater = if minutes > 1200.0 { 35.0 } else { 0.0 };

    let temperatures = [
        cooldown(295.0, 18.5, 300.0, minutes), // target holder bottom
        cooldown(295.0, 18.8, 310.0, minutes),
        cooldown(295.0, 19.1, 320.0, minutes),
        cooldown(295.0, 45.0, 150.0, minutes), // cold head stage 1
        cooldown(295.0, 80.0, 400.0, minutes),
        cooldown(295.0, 85.0, 400.0, minutes),
        cooldown(295.0, 4.2, 250.0, minutes), // 2nd stage
        cooldown(295.0, 4.3, 250.0, minutes),
    ];
    let pressures = [
        if filling { 1.1 } else { 0.02 },
        1.5 - minutes / 10_000.0,
        cooldown(1.0, 1e-5, 60.0, minutes),
        cooldown(1.0, 1e-6, 45.0, minutes),
        cooldown(1.0, 1e-3, 30.0, minutes),
    ];

    let mut line = ts.format("%Y/%m/%d_%Hh%Mm%Ss").to_string();
    for t in temperatures {
        write!(line, "\t{:.3}", t + rng.gauss(0.0, 0.02)).expect("write to String");
    }
    write!(line, "\t{:.3}", 18.0).expect("write to String"); // setpoint
    for (i, p) in pressures.iter().enumerate() {
        // The buffer tank gauge drops out now and then.
        if i == 1 && rng.next_f64() < 0.01 {
            line.push_str("\tN/A");
        } else {
            write!(line, "\t{:.4e}", p * (1.0 + rng.gauss(0.0, 0.01))).expect("write to String");
        }
    }
    for output in [
        heater,
        heater * 0.5,
        if filling { 100.0 } else { 0.0 },
        100.0,
        if filling { 100.0 } else { 0.0 },
    ] {
        write!(line, "\t{output:.1}").expect("write to String");
    }
    line
}

fn main() {
    let mut rng = SimpleRng::new(57);
    let out_dir = Path::new("data/onokoro57/logs");
    std::fs::create_dir_all(out_dir).expect("Failed to create output directory");

    let start = NaiveDate::from_ymd_opt(2025, 6, 27)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid start time");
    let rows_per_file = 24 * 60;
    let n_files = 3;

    for file_idx in 0..n_files {
        let file_start = start + Duration::minutes((file_idx * rows_per_file) as i64);
        let mut text = String::new();
        writeln!(text, "///").expect("write to String");
        writeln!(text, "STRASSE cryogenic target, onokoro57 (synthetic sample)").expect("write to String");
        writeln!(text, "columns: timestamp, 8 temperatures + setpoint [K], 5 pressures [bar], 5 outputs [%]").expect("write to String");
        writeln!(text, "///").expect("write to String");

        for row in 0..rows_per_file {
            let minutes = (file_idx * rows_per_file + row) as f64;
            let ts = file_start + Duration::minutes(row as i64);
            writeln!(text, "{}", sample_row(ts, minutes, &mut rng)).expect("write to String");
        }

        let path = out_dir.join(format!("strasse_{}.txt", file_start.format("%Y%m%d_%H%M%S")));
        std::fs::write(&path, text).expect("Failed to write log file");
        println!("Wrote {rows_per_file} rows to {}", path.display());
    }
}
