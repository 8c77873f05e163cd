use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rayon::prelude::*;

use commonseq::io::report::{self, MapRow, MappedHit, MatchRow, OutputFormat, Report, ReportMeta};
use commonseq::io::{self, SeqRecord};
use commonseq::matching::{self, MatchOpt};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "commonseq",
    author,
    version,
    about = "Common substrings, fragment overlaps and read placement for sequences",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// All common substrings between every record of A and every record of B
    Common {
        /// FASTA/FASTQ file with the A sequences
        a: String,
        /// FASTA/FASTQ file with the B sequences
        b: String,
        /// Minimum substring length (inclusive)
        #[arg(short, long, default_value_t = matching::DEFAULT_LIMIT)]
        limit: usize,
        /// Fold both sequences to upper case before matching
        #[arg(long)]
        ignore_case: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
        format: OutputFormat,
        /// Output path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Terminal overlaps between every pair of fragments
    Overlap {
        /// FASTA/FASTQ file with the fragments
        fragments: String,
        /// Minimum overlap length (inclusive)
        #[arg(short, long, default_value_t = matching::DEFAULT_OVERLAP_LIMIT)]
        limit: usize,
        #[arg(long)]
        ignore_case: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
        format: OutputFormat,
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Place reads on reference records by longest common substring
    Map {
        /// Reference FASTA file
        #[arg(short = 'r', long = "reference")]
        reference: String,
        /// Reads FASTA/FASTQ file
        reads: String,
        #[arg(short, long, default_value_t = matching::DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long)]
        ignore_case: bool,
        /// Also try the reverse complement of each read
        #[arg(long)]
        both_strands: bool,
        /// Worker threads (0 = all cores)
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
        format: OutputFormat,
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Common { a, b, limit, ignore_case, format, out } => {
            run_common(&a, &b, MatchOpt { limit, ignore_case }, format, out.as_deref())
        }
        Commands::Overlap { fragments, limit, ignore_case, format, out } => {
            run_overlap(&fragments, MatchOpt { limit, ignore_case }, format, out.as_deref())
        }
        Commands::Map { reference, reads, limit, ignore_case, both_strands, threads, format, out } => run_map(
            &reference,
            &reads,
            MatchOpt { limit, ignore_case },
            both_strands,
            threads,
            format,
            out.as_deref(),
        ),
    }
}

fn init_logger(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    // RUST_LOG overrides the flags
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn command_line() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}

fn emit<R: report::TsvRow + serde::Serialize>(rows: Vec<R>, format: OutputFormat, out: Option<&str>) -> Result<()> {
    let rep = Report { meta: ReportMeta::now(command_line()), rows };
    let mut w = report::open_output(out)?;
    report::write_report(&mut *w, &rep, format)
}

fn run_common(a_path: &str, b_path: &str, opt: MatchOpt, format: OutputFormat, out: Option<&str>) -> Result<()> {
    let a_recs = io::read_records_from_path(a_path)?;
    let b_recs = io::read_records_from_path(b_path)?;

    let mut rows = Vec::new();
    for a in &a_recs {
        for b in &b_recs {
            let hits = matching::common_substrings_with_opt(&a.seq, &b.seq, opt);
            debug!("{} x {}: {} matches", a.id, b.id, hits.len());
            rows.extend(hits.into_iter().map(|hit| MatchRow { a_id: a.id.clone(), b_id: b.id.clone(), hit }));
        }
    }
    info!("common: {} matches with limit {}", rows.len(), opt.limit);
    emit(rows, format, out)
}

fn run_overlap(path: &str, opt: MatchOpt, format: OutputFormat, out: Option<&str>) -> Result<()> {
    let frags = io::read_records_from_path(path)?;
    if frags.len() < 2 {
        warn!("'{}' holds a single fragment, nothing to overlap", path);
    }

    let seqs: Vec<&[u8]> = frags.iter().map(|f| f.seq.as_slice()).collect();
    let rows: Vec<MatchRow> = matching::pairwise_terminal_overlaps(&seqs, opt)
        .into_iter()
        .map(|(i, j, hit)| MatchRow { a_id: frags[i].id.clone(), b_id: frags[j].id.clone(), hit })
        .collect();
    info!("overlap: {} joins among {} fragments", rows.len(), frags.len());
    emit(rows, format, out)
}

fn run_map(
    ref_path: &str,
    reads_path: &str,
    opt: MatchOpt,
    both_strands: bool,
    threads: usize,
    format: OutputFormat,
    out: Option<&str>,
) -> Result<()> {
    let refs = io::read_records_from_path(ref_path)?;
    let reads = io::read_records_from_path(reads_path)?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    info!("map: {} reads on {} threads", reads.len(), pool.current_num_threads());
    let rows: Vec<MapRow> = pool.install(|| {
        reads
            .par_iter()
            .map(|read| MapRow { read_id: read.id.clone(), mapped: best_hit(&refs, read, opt, both_strands) })
            .collect()
    });

    let unmapped = rows.iter().filter(|r| r.mapped.is_none()).count();
    info!("map: {} mapped, {} unmapped", rows.len() - unmapped, unmapped);
    emit(rows, format, out)
}

/// Longest hit over all reference records; the first record wins ties.
fn best_hit(refs: &[SeqRecord], read: &SeqRecord, opt: MatchOpt, both_strands: bool) -> Option<MappedHit> {
    matching::map_read_best(refs.iter().map(|r| r.seq.as_slice()), &read.seq, opt, both_strands)
        .map(|(i, h)| MappedHit { ref_id: refs[i].id.clone(), strand: h.strand, hit: h.hit })
}
