// Market Atlas Report Runner — offline summary of the synthetic dataset
//
// Usage:
//   cargo run --release --bin report                      # value mode, serviceType
//   cargo run --release --bin report -- --mode volume     # physical volume
//   cargo run --release --bin report -- --dimension region
//   cargo run --release --bin report -- --yearly          # JSONL per-year snapshots
//   cargo run --release --bin report -- --out-dir results

mod snapshot;

use atlas_engine::{Dashboard, Dimension, EvaluationMode, View};
use serde::Serialize;
use snapshot::{SnapshotRecorder, YearSnapshot};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    mode: EvaluationMode,
    dimension: Dimension,
    yearly: bool,
    out_dir: String,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        mode: EvaluationMode::Value,
        dimension: Dimension::ServiceType,
        yearly: false,
        out_dir: "analytics-results".to_string(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                if i < args.len() {
                    cli.mode = EvaluationMode::parse(&args[i]).unwrap_or(EvaluationMode::Value);
                }
            }
            "--dimension" => {
                i += 1;
                if i < args.len() {
                    cli.dimension =
                        Dimension::parse(&args[i]).unwrap_or(Dimension::ServiceType);
                }
            }
            "--yearly" => {
                cli.yearly = true;
            }
            "--out-dir" => {
                i += 1;
                if i < args.len() {
                    cli.out_dir = args[i].clone();
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Report Shape ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ReportFile {
    timestamp: String,
    version: &'static str,
    evaluation_mode: EvaluationMode,
    record_count: usize,
    generation_ms: f64,
    kpis: atlas_engine::Kpis,
    grouped_bar: atlas_engine::PivotTable,
    region_country_share: Vec<atlas_engine::RegionCountryRow>,
    waterfall: atlas_engine::Waterfall,
    bubbles: Vec<atlas_engine::BubblePoint>,
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let mut dash = Dashboard::new();

    let gen_start = Instant::now();
    let record_count = dash.record_count();
    let generation_ms = gen_start.elapsed().as_secs_f64() * 1000.0;

    dash.set_mode_core(cli.mode);

    println!("\n  Market Atlas Report Runner v0.3.0");
    println!(
        "  Records: {} | Generation: {:.1}ms | Mode: {:?}\n",
        record_count, generation_ms, cli.mode
    );

    let table = dash.grouped_bar_core(View::Standard, cli.dimension);

    // Aligned year × segment table
    print!("  {:<8}", "Year");
    for segment in &table.segments {
        print!(" {:>24}", truncate(segment, 24));
    }
    println!();
    println!("  {}", "-".repeat(8 + 25 * table.segments.len()));
    for row in &table.rows {
        print!("  {:<8}", row.year);
        for segment in &table.segments {
            print!(" {:>24.2}", row.get(segment));
        }
        println!();
    }

    let kpis = dash.kpis_core(View::Standard, cli.dimension);
    println!("\n  KPIs:");
    println!("    Total value (M USD):  {:.2}", kpis.total_value);
    println!("    Total volume (units): {:.0}", kpis.total_volume);
    println!("    Span CAGR:            {:.2}%", kpis.span_cagr);
    println!(
        "    Top segment:          {}",
        kpis.top_segment.as_deref().unwrap_or("n/a")
    );

    let waterfall = dash.waterfall_core();
    println!(
        "\n  Incremental opportunity ({} base {:.2}): total +{:.2} over {} steps",
        waterfall.base_year,
        waterfall.base_value,
        waterfall.total_incremental,
        waterfall.steps.len()
    );

    let bubbles = dash.bubble_chart_core(cli.dimension);
    println!("  Attractiveness bubbles: {} positioned", bubbles.len());

    // ─── Optional per-year JSONL snapshots ──────────────────────────────

    let dir = std::path::Path::new(&cli.out_dir);
    if cli.yearly {
        let mut recorder = SnapshotRecorder::new();
        let records = dash.records_core().to_vec();
        let mut years: Vec<u16> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        for year in years {
            let of_year: Vec<_> = records.iter().filter(|r| r.year == year).collect();
            let prev = recorder.last_total();
            recorder.record(YearSnapshot::from_records(year, &of_year, prev));
        }
        let path = dir.join("yearly.jsonl");
        match recorder.write_jsonl(&path) {
            Ok(()) => println!("  Yearly snapshots ({}) -> {}", recorder.len(), path.display()),
            Err(e) => eprintln!("  Failed to write yearly snapshots: {}", e),
        }
    }

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let report = ReportFile {
        timestamp: format!("{}", ts),
        version: "0.3.0",
        evaluation_mode: cli.mode,
        record_count,
        generation_ms,
        kpis,
        grouped_bar: table,
        region_country_share: dash.region_country_share_core(View::Standard),
        waterfall,
        bubbles,
    };

    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Failed to create {}: {}", dir.display(), e);
        std::process::exit(1);
    }
    let path = dir.join(format!("report-{}.json", report.timestamp));
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                eprintln!("Failed to write report: {}", e);
                std::process::exit(1);
            }
            println!("\n  Report saved to: {}\n", path.display());
        }
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

fn truncate(s: &str, width: usize) -> &str {
    match s.char_indices().nth(width) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Lämpöhuolto", 4), "Lämp");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }
}
