//! Writes a synthetic per-game season to `sample_season.parquet` and
//! `sample_season.csv`, for trying the explorer without network access
//! (File → Open…).

use std::path::Path;

use anyhow::{Context, Result};

use hoops_explorer::config::POSITIONS;
use hoops_explorer::data::clean::clean;
use hoops_explorer::data::export::{self, ExportFormat};
use hoops_explorer::data::model::RawTable;

const TEAMS: [&str; 30] = [
    "ATL", "BOS", "BRK", "CHI", "CHO", "CLE", "DAL", "DEN", "DET", "GSW", "HOU", "IND", "LAC",
    "LAL", "MEM", "MIA", "MIL", "MIN", "NOP", "NYK", "OKC", "ORL", "PHI", "PHO", "POR", "SAC",
    "SAS", "TOR", "UTA", "WAS",
];
const FIRST: [&str; 12] = [
    "Jalen", "Marcus", "Tyrese", "Devin", "Kevin", "Anthony", "Jaylen", "Miles", "Cade",
    "Darius", "Isaiah", "Nikola",
];
const LAST: [&str; 12] = [
    "Brooks", "Carter", "Daniels", "Ellis", "Franklin", "Greene", "Hayes", "Irving", "Jordan",
    "Knox", "Lowry", "Mitchell",
];
const HEADERS: [&str; 13] = [
    "Rk", "Player", "Age", "Team", "Pos", "G", "MP", "FG%", "3P%", "TRB", "AST", "STL", "PTS",
];
const PLAYERS: usize = 300;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn player_row(rng: &mut SimpleRng, rank: usize) -> Vec<Option<String>> {
    let name = format!("{} {}", rng.pick(&FIRST), rng.pick(&LAST));
    let pos = rng.pick(&POSITIONS);
    let big = matches!(pos, "C" | "PF");

    let age = rng.gauss(26.5, 4.0).clamp(19.0, 40.0).round();
    let games = rng.gauss(55.0, 18.0).clamp(1.0, 82.0).round();
    let minutes = rng.gauss(21.0, 8.0).clamp(2.0, 38.0);
    let pts = (minutes * rng.gauss(0.46, 0.12)).max(0.0);
    let trb = (minutes * rng.gauss(if big { 0.28 } else { 0.14 }, 0.05)).max(0.0);
    let ast = (minutes * rng.gauss(if big { 0.07 } else { 0.15 }, 0.04)).max(0.0);
    let stl = (minutes * rng.gauss(0.035, 0.01)).max(0.0);
    let fg = rng.gauss(if big { 0.53 } else { 0.45 }, 0.05).clamp(0.2, 0.75);
    // some bigs never attempt a three: an empty cell, zero-filled on load
    let three = (!big || rng.next_f64() > 0.3)
        .then(|| format!("{:.3}", rng.gauss(0.35, 0.05).clamp(0.0, 0.6)));

    vec![
        Some(rank.to_string()),
        Some(name),
        Some(format!("{age:.0}")),
        Some(rng.pick(&TEAMS).to_string()),
        Some(pos.to_string()),
        Some(format!("{games:.0}")),
        Some(format!("{minutes:.1}")),
        Some(format!("{fg:.3}")),
        three,
        Some(format!("{trb:.1}")),
        Some(format!("{ast:.1}")),
        Some(format!("{stl:.1}")),
        Some(format!("{pts:.1}")),
    ]
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let raw = RawTable {
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: (1..=PLAYERS).map(|rank| player_row(&mut rng, rank)).collect(),
    };
    let table = clean(raw);

    for (format, path) in [
        (ExportFormat::Parquet, "sample_season.parquet"),
        (ExportFormat::Csv, "sample_season.csv"),
    ] {
        export::save(&table, format, Path::new(path))
            .with_context(|| format!("writing {path}"))?;
    }

    println!(
        "Wrote {} players ({} columns) to sample_season.parquet and sample_season.csv",
        table.len(),
        table.columns.len()
    );
    Ok(())
}
