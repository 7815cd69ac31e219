//! Command-line seeder for the PPDB `pendaftar` table.
//!
//! ```bash
//! # 10 records with placeholder documents
//! ppdb-seeder
//!
//! # 50 records, no documents, reproducible
//! ppdb-seeder --count 50 --no-files --seed 7
//!
//! # Preview one record without touching Supabase
//! ppdb-seeder --dry-run
//! ```

use anyhow::Context;
use clap::Parser;
use ppdb_seeder::config::SeederConfig;
use ppdb_seeder::document::render::DEFAULT_TARGET_KB;
use ppdb_seeder::pendaftar::PendaftarGenerator;
use ppdb_seeder::seeder::{self, SeedOptions, SeedReport, Seeder, DEFAULT_SEED_COUNT};
use ppdb_seeder::AppState;

const RULE: &str = "==================================================";

#[derive(Parser)]
#[command(name = "ppdb-seeder")]
#[command(about = "Seed fake pendaftar data and placeholder documents into Supabase")]
#[command(long_about = None)]
struct Cli {
    /// Number of records to create
    #[arg(short, long, default_value_t = DEFAULT_SEED_COUNT)]
    count: u32,

    /// Show sample data without inserting
    #[arg(short, long)]
    dry_run: bool,

    /// Skip file uploads (only create data records)
    #[arg(long)]
    no_files: bool,

    /// Seed for a reproducible batch
    #[arg(long)]
    seed: Option<u64>,

    /// Approximate size of each placeholder JPEG in kilobytes
    #[arg(long, default_value_t = DEFAULT_TARGET_KB)]
    target_kb: u32,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    ppdb_seeder::init_logging();

    let cli = Cli::parse();
    println!("{}", RULE);
    println!("PPDB Test Data Seeder");
    println!("{}", RULE);

    let options = SeedOptions {
        count: cli.count,
        with_files: !cli.no_files,
        seed: cli.seed,
        target_kb: cli.target_kb,
        ..SeedOptions::default()
    };

    if cli.dry_run {
        print_dry_run(&options);
        return Ok(());
    }

    let config = SeederConfig::from_env()
        .context("Set SUPABASE_URL and SUPABASE_SERVICE_KEY in the environment or .env")?;
    let state = AppState::new_with_config(config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to build Supabase clients: {}", e))?;

    let report = Seeder::new(&state).run(&options).await;
    print_summary(&report, &options);

    if report.success_count == 0 && options.count > 0 {
        anyhow::bail!("no records were inserted");
    }
    Ok(())
}

fn print_dry_run(options: &SeedOptions) {
    let mut rng = options.rng();
    let preview = seeder::preview(&PendaftarGenerator::new(), &mut rng);

    println!("\nDRY RUN - sample data (not inserted):\n");
    println!("Data Pendaftar:");
    for (column, value) in preview.record.columns() {
        println!("    {}: {}", column, value);
    }

    println!("\nFiles that would be uploaded:");
    for kind in &preview.documents {
        println!(
            "    - {} ({}.jpg) - ~{}KB placeholder",
            kind.label(),
            kind.key(),
            options.target_kb
        );
    }
    println!("\nAll fields are generated like the sample above.");
}

fn print_summary(report: &SeedReport, options: &SeedOptions) {
    println!("\n{}", RULE);
    println!("SUMMARY");
    println!("{}", RULE);
    println!("   Pendaftar success: {}", report.success_count);
    println!("   Pendaftar failed:  {}", report.error_count);
    println!("   Total pendaftar:   {}", options.count);
    if options.with_files {
        println!("   Files uploaded:    {}", report.files_uploaded);
    }
    println!("{}\n", RULE);
}
