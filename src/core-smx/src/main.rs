use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand};
use core_smx::{
    IndexXmlOptions, MAX_URLS_PER_SITEMAP, Namespaces, Sitemap, SitemapIndex, SitemapIndexOptions, SitemapOptions,
    build_sitemap_index, parse_entries, setup_logging,
};

#[derive(Parser)]
#[command(name = "core-smx")]
#[command(about = "Sitemap generator: single documents, partitioned sets and index manifests", long_about = None)]
struct CoreCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one sitemap document from a URL list
    Sitemap {
        /// URL list: one URL per line, or a JSON array of entries
        #[arg(short, long, value_parser = validate_input_file)]
        input: PathBuf,
        /// Base URL prepended to relative entries
        #[arg(long, value_parser = validate_url)]
        hostname: Option<String>,
        #[arg(long, value_parser = validate_url)]
        xsl_url: Option<String>,
        /// Replacement namespace declarations, e.g. 'xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"'
        #[arg(long, value_parser = validate_namespaces)]
        xml_ns: Option<Namespaces>,
        /// Gzip the output
        #[arg(long)]
        gzip: bool,
        /// Output file path for the rendered sitemap
        #[arg(short, long, value_parser = validate_output_file)]
        output: PathBuf,
    },

    /// Partition a URL list into sitemap files plus an index file
    Index(IndexArgs),

    /// Print an index manifest referencing existing sitemap files
    Manifest(ManifestArgs),
}

#[derive(Args)]
struct IndexArgs {
    /// URL list: one URL per line, or a JSON array of entries
    #[arg(short, long, value_parser = validate_input_file)]
    input: PathBuf,
    #[arg(long, value_parser = validate_url)]
    hostname: String,
    /// Existing directory receiving every generated file
    #[arg(short, long, value_parser = validate_target_folder)]
    target_folder: PathBuf,
    /// Filename prefix
    #[arg(short, long, default_value = core_smx::DEFAULT_SITEMAP_NAME)]
    name: String,
    /// Maximum entries per sitemap file
    #[arg(short, long, default_value_t = MAX_URLS_PER_SITEMAP, value_parser = validate_size)]
    size: usize,
    #[arg(long)]
    gzip: bool,
    #[arg(long, value_parser = validate_url)]
    xsl_url: Option<String>,
    /// Maximum number of files written at once
    #[arg(short, long, default_value_t = core_smx::DEFAULT_CONCURRENCY)]
    concurrency: usize,
}

#[derive(Args)]
#[command(group(ArgGroup::new("lastmod_mode").multiple(false)))]
struct ManifestArgs {
    /// Absolute URL of a sitemap file (repeatable)
    #[arg(short, long = "url", required = true, value_parser = validate_url)]
    urls: Vec<String>,
    #[arg(long, value_parser = validate_url)]
    xsl_url: Option<String>,
    /// Last-modified value emitted verbatim
    #[arg(long, group = "lastmod_mode")]
    lastmod: Option<String>,
    /// Use the current time as last-modified value
    #[arg(long, group = "lastmod_mode")]
    lastmod_now: bool,
    /// Last-modified value as milliseconds since the Unix epoch
    #[arg(long, group = "lastmod_mode", value_parser = validate_epoch_ms)]
    lastmod_epoch_ms: Option<DateTime<Utc>>,
}

fn validate_url(s: &str) -> Result<String, String> {
    url::Url::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| format!("Invalid URL: {}", e))
}

fn validate_namespaces(s: &str) -> Result<Namespaces, String> {
    s.parse::<Namespaces>().map_err(|e| e.to_string())
}

fn validate_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("Invalid size: {}", e))?;
    if size == 0 || size > MAX_URLS_PER_SITEMAP {
        return Err(format!("Size must be between 1 and {}, got: {}", MAX_URLS_PER_SITEMAP, size));
    }
    Ok(size)
}

fn validate_epoch_ms(s: &str) -> Result<DateTime<Utc>, String> {
    let millis: i64 = s.parse().map_err(|e| format!("Invalid timestamp: {}", e))?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| format!("Timestamp out of range: {}", millis))
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    Ok(path)
}

fn validate_target_folder(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.is_dir() {
        return Err(format!("Target folder is not an existing directory: {}", path.display()));
    }

    Ok(path)
}

fn validate_output_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if path.exists() && path.is_dir() {
        return Err(format!("Output path is a directory: {}", path.display()));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(format!(
            "Output file parent directory does not exist: {}",
            parent.display()
        ));
    }

    Ok(path)
}

fn main() {
    setup_logging("core_smx=info");
    let cli = CoreCli::parse();

    let outcome = match cli.command {
        Commands::Sitemap {
            input,
            hostname,
            xsl_url,
            xml_ns,
            gzip,
            output,
        } => run_sitemap(input, hostname, xsl_url, xml_ns, gzip, output),
        Commands::Index(args) => run_index(args),
        Commands::Manifest(args) => run_manifest(args),
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1)
    }
}

fn run_sitemap(
    input: PathBuf,
    hostname: Option<String>,
    xsl_url: Option<String>,
    xml_ns: Option<Namespaces>,
    gzip: bool,
    output: PathBuf,
) -> core_smx::Result<()> {
    let entries = parse_entries(&std::fs::read_to_string(&input)?)?;
    let options = SitemapOptions {
        hostname,
        xsl_url,
        xml_ns,
        ..Default::default()
    };

    let mut sitemap = Sitemap::new(entries, options)?;
    let bytes = if gzip {
        sitemap.render_gzip()?
    } else {
        sitemap.render()?.into_bytes()
    };
    std::fs::write(&output, bytes)?;
    tracing::info!("Wrote {} entries to {}", sitemap.len(), output.display());
    Ok(())
}

fn run_index(args: IndexArgs) -> core_smx::Result<()> {
    let entries = parse_entries(&std::fs::read_to_string(&args.input)?)?;
    let mut builder = SitemapIndexOptions::builder()
        .hostname(args.hostname)
        .target_folder(args.target_folder)
        .sitemap_name(args.name)
        .sitemap_size(args.size)
        .gzip(args.gzip)
        .concurrency(args.concurrency);
    if let Some(xsl_url) = args.xsl_url {
        builder = builder.xsl_url(xsl_url);
    }

    let written = SitemapIndex::new(entries, builder.build())?.write_blocking()?;
    println!("{}", written.index.display());
    for path in &written.sitemaps {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_manifest(args: ManifestArgs) -> core_smx::Result<()> {
    let options = IndexXmlOptions {
        urls: args.urls,
        xsl_url: args.xsl_url,
        xml_ns: None,
        lastmod_iso: args.lastmod,
        lastmod_realtime: args.lastmod_now,
        lastmod: args.lastmod_epoch_ms,
    };
    println!("{}", build_sitemap_index(&options)?);
    Ok(())
}
