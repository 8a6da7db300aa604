use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use chrono::Local;
use log::{error, info, warn};

use adresar::{
    cluster::{self, ClusterEngine, ClusterMode},
    geocode::GoogleGeocoder,
    group::group_rows,
    io::{read_records, write_groups},
    mapper,
    normalize::Normalizer,
    AdresarConfig, Result, SubstitutionTable,
};

// Exit code when the input record list cannot be obtained
const EXIT_NO_INPUT: i32 = 2;

/// Configuration for one deduplication run
struct RunOptions {
    /// Path to the input CSV (overrides config)
    input: Option<PathBuf>,
    /// Path to the output CSV (overrides config)
    output: Option<PathBuf>,
    /// Directory of JSON substitution mappers (overrides config)
    mappers: Option<PathBuf>,
    /// Similarity threshold override
    threshold: Option<u8>,
    /// Force geocode clustering mode
    geocode: bool,
    /// Path to configuration file
    config_file: Option<String>,
    /// Print usage and exit
    show_help: bool,
}

impl RunOptions {
    /// Parse command line arguments into options
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();

        let mut options = RunOptions {
            input: None,
            output: None,
            mappers: None,
            threshold: None,
            geocode: false,
            config_file: None,
            show_help: false,
        };

        let mut i = 1; // Skip program name
        while i < args.len() {
            match args[i].as_str() {
                "--input" => {
                    if i + 1 < args.len() {
                        options.input = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--output" => {
                    if i + 1 < args.len() {
                        options.output = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--mappers" => {
                    if i + 1 < args.len() {
                        options.mappers = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--threshold" => {
                    if i + 1 < args.len() {
                        options.threshold = args[i + 1].parse().ok();
                        i += 1;
                    }
                },
                "--geocode" => {
                    options.geocode = true;
                },
                "--help" | "-h" => {
                    options.show_help = true;
                },
                arg if arg.ends_with(".ini") => {
                    options.config_file = Some(arg.to_string());
                },
                _ => {
                    // Unrecognized argument, just ignore
                }
            }
            i += 1;
        }

        options
    }

    /// Print help information about command line options
    fn print_help() {
        println!("Adresar Address Deduplicator - Command Line Options:");
        println!("  --input <path>       Input CSV with Name,Address columns");
        println!("  --output <path>      Output CSV of grouped names");
        println!("  --mappers <path>     Directory of JSON substitution mappers");
        println!("  --threshold <0-100>  Similarity threshold for clustering");
        println!("  --geocode            Cluster by geocoded place id instead of similarity");
        println!("  <path>.ini           Load configuration from an INI file");
        println!("  --help, -h           Show this help");
    }
}

fn main() {
    let options = RunOptions::from_args();
    if options.show_help {
        RunOptions::print_help();
        return;
    }

    let mut config = match &options.config_file {
        Some(path) => match AdresarConfig::from_ini(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration {}: {}", path, e);
                process::exit(1);
            }
        },
        None => AdresarConfig::default(),
    };

    // Command line overrides
    if let Some(input) = options.input {
        config.files.input_path = input;
    }
    if let Some(output) = options.output {
        config.files.output_path = output;
    }
    if let Some(mappers) = options.mappers {
        config.files.mappers_dir = mappers;
    }
    if let Some(threshold) = options.threshold {
        config.matcher.threshold = threshold;
    }
    if options.geocode {
        config.matcher.mode = ClusterMode::Geocode;
    }

    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, config.get_log_level())
        .init();

    if let Err(e) = run(&config) {
        error!("Run failed: {}", e);
        process::exit(1);
    }
}

fn run(config: &AdresarConfig) -> Result<()> {
    let start = Instant::now();

    let records = match read_records(&config.files.input_path) {
        Ok(records) => records,
        Err(e) => {
            error!("Missing or unreadable input file {:?}: {}", config.files.input_path, e);
            process::exit(EXIT_NO_INPUT);
        }
    };

    let rows = match config.matcher.mode {
        ClusterMode::Similarity => {
            let sources = mapper::load_sources(&config.files.mappers_dir);
            let table = SubstitutionTable::build(sources);
            info!("Substitution table holds {} entries", table.len());

            let normalizer = Normalizer::new(&table, config.normalizer.mode);
            let canonical: Vec<String> = records
                .iter()
                .map(|record| normalizer.normalize(&record.address))
                .collect();

            let engine = ClusterEngine::new(
                config.matcher.metric.create(),
                config.matcher.threshold,
            );
            let assignment = engine.cluster(canonical.iter().map(|c| c.as_str()));

            group_rows(records.iter().zip(canonical.iter()).map(|(record, canonical)| {
                // cluster() is total over its input, so the identity
                // fallback is never hit in practice
                let key = assignment.key_for(canonical).unwrap_or(canonical);
                (key, record.name.as_str())
            }))
        }
        ClusterMode::Geocode => {
            let api_key = env::var(&config.geocode.api_key_env).map_err(|_| {
                adresar::Error::config(format!(
                    "Geocode mode requires the {} environment variable",
                    config.geocode.api_key_env
                ))
            })?;
            let geocoder = GoogleGeocoder::new(config.geocode.endpoint.clone(), api_key);
            let assignment = cluster::cluster_by_key(&records, &geocoder)?;

            group_rows(records.iter().map(|record| {
                let key = assignment
                    .key_for(&record.address)
                    .unwrap_or(record.address.as_str());
                (key, record.name.as_str())
            }))
        }
    };

    info!("Grouped {} records into {} clusters", records.len(), rows.len());

    // Output failure is logged but deliberately not fatal, unlike a missing
    // input file
    if let Err(e) = write_groups(&config.files.output_path, &rows) {
        warn!("Error saving output file {:?}: {}", config.files.output_path, e);
    }

    info!("Elapsed time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
