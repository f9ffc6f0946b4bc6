use clap::{CommandFactory, Parser};
use directional_hash::cli::{hash_file, show_table};
use directional_hash::options::{DEFAULT_CHUNK_SIZE, DEFAULT_WORKERS};
use directional_hash::pipeline::{Assembly, Encoding};
use directional_hash::{DigestWidth, HashOptions, PatternTable, TransformMode};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("DIRHASH_VERSION");
const PROFILE: &str = env!("DIRHASH_PROFILE");
const GIT_HASH: &str = env!("DIRHASH_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "dirhash")]
#[command(author, about = "Directional hash: weighted bit-reordering streamed into SHA-2 / SHAKE256", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Input file to hash
    input: Option<PathBuf>,

    /// Digest width in bits (256, 512, 1024, 2048)
    #[arg(default_value = "256", value_parser = parse_width)]
    bits: DigestWidth,

    /// Bytes read per chunk
    #[arg(default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Worker threads per chunk
    #[arg(default_value_t = DEFAULT_WORKERS)]
    max_workers: usize,

    /// Print elapsed wall-clock time after the digest
    #[arg(long)]
    time: bool,

    /// Transform variant: static or context
    #[arg(long, default_value = "context", value_parser = parse_mode)]
    mode: TransformMode,

    /// What is fed to the digest: packed bytes or the '0'/'1' text (ascii)
    #[arg(long, default_value = "packed", value_parser = parse_encoding)]
    encoding: Encoding,

    /// How per-byte outputs are packed
    #[arg(long, default_value = "direct", value_parser = parse_assembly)]
    assembly: Assembly,

    /// Print a JSON report instead of the bare digest
    #[arg(long)]
    json: bool,

    /// Print the weighted pattern table and exit
    #[arg(long)]
    dump_table: bool,
}

fn parse_width(s: &str) -> Result<DigestWidth, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_mode(s: &str) -> Result<TransformMode, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_encoding(s: &str) -> Result<Encoding, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_assembly(s: &str) -> Result<Assembly, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    if cli.version {
        println!("dirhash {}", get_version());
        return ExitCode::SUCCESS;
    }

    if cli.dump_table {
        print!("{}", show_table(PatternTable::global()));
        return ExitCode::SUCCESS;
    }

    let input = match cli.input {
        Some(path) => path,
        None => {
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::from(1);
        }
    };

    let options = HashOptions {
        width: cli.bits,
        chunk_size: cli.chunk_size,
        workers: cli.max_workers,
        mode: cli.mode,
        encoding: cli.encoding,
        assembly: cli.assembly,
    };

    // Table build is one-time setup, not part of the timed hash
    PatternTable::global();
    let start = Instant::now();
    let result = hash_file(&input, &options).and_then(|report| {
        if cli.json {
            println!("{}", report.to_json()?);
        } else {
            println!("{}", report.digest);
        }
        Ok(())
    });

    match result {
        Ok(()) => {
            if cli.time {
                println!("Time elapsed: {:.6} seconds", start.elapsed().as_secs_f64());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
