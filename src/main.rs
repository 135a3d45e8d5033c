use anyhow::{Context, bail};
use clap::Parser;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vidmeta::{Config, ExportTable, Platform, parse_batch, process_with_progress};

#[derive(Parser)]
#[command(
    name = "vidmeta",
    about = "Collect public video metadata into a CSV file",
    long_about = "Fetch view counts, captions, timestamps and other public metadata for a list of\n\
    video URLs from TikTok, Instagram, YouTube, Dailymotion or ShareChat and export them as CSV.\n\n\
    Examples:\n\
      vidmeta https://dai.ly/x1abcde                       # Platform detected from the URL\n\
      vidmeta -p tiktok -i urls.txt                        # One URL per line\n\
      cat urls.txt | vidmeta -p sharechat -d ./out         # Read URLs from stdin\n\
      vidmeta -p youtube -o videos.csv --print URL...      # Custom file, show table"
)]
struct Args {
    /// Video URLs
    #[arg(help = "Video URLs (read from --input or stdin when omitted)")]
    urls: Vec<String>,

    #[arg(
        short = 'p',
        long = "platform",
        help = "tiktok, instagram, youtube, dailymotion or sharechat (detected from the first URL by default)"
    )]
    platform: Option<String>,

    #[arg(short = 'i', long = "input", help = "File with one URL per line")]
    input: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "dir",
        help = "Directory for the platform's default CSV file name"
    )]
    output_dir: Option<PathBuf>,

    #[arg(short = 'o', long = "output", help = "Output CSV file")]
    output: Option<PathBuf>,

    #[arg(
        short = 'w',
        long = "workers",
        help = "Concurrent requests (default 1 for TikTok, 10 otherwise)"
    )]
    workers: Option<usize>,

    #[arg(
        long = "timeout",
        default_value_t = 10,
        help = "Per-request timeout in seconds for TikTok pages (0 disables)"
    )]
    timeout: u64,

    #[arg(long = "yt-dlp", default_value = "yt-dlp", help = "yt-dlp executable")]
    ytdlp: PathBuf,

    #[arg(
        long = "dailymotion-api",
        default_value = vidmeta::config::DEFAULT_DAILYMOTION_API,
        help = "Dailymotion API base URL"
    )]
    dailymotion_api: String,

    #[arg(long = "print", help = "Print the result table after export")]
    print: bool,
}

fn read_urls(args: &Args) -> anyhow::Result<Vec<String>> {
    if !args.urls.is_empty() {
        return Ok(args.urls.iter().flat_map(|u| parse_batch(u)).collect());
    }
    if let Some(path) = &args.input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(parse_batch(&text));
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(vec![]);
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(parse_batch(&text))
}

fn resolve_platform(args: &Args, urls: &[String]) -> anyhow::Result<Platform> {
    if let Some(name) = &args.platform {
        return Platform::from_str(name).map_err(|_| anyhow::anyhow!("unknown platform: {name}"));
    }
    let first = &urls[0];
    Platform::detect(first).with_context(|| {
        format!("cannot detect the platform of {first}; pass --platform")
    })
}

fn output_path(args: &Args, platform: Platform) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }
    let dir = args.output_dir.as_deref().unwrap_or(Path::new("."));
    dir.join(platform.export_filename())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let urls = read_urls(&args)?;
    if urls.is_empty() {
        bail!("Please enter at least one URL.");
    }
    let platform = resolve_platform(&args, &urls)?;

    let config = Config {
        workers: args.workers,
        tiktok_timeout: (args.timeout > 0).then(|| Duration::from_secs(args.timeout)),
        ytdlp_path: args.ytdlp.clone(),
        dailymotion_api: args.dailymotion_api.clone(),
        ..Config::default()
    };

    println!("Processing {} {} URL(s)...", urls.len(), platform);
    let records = process_with_progress(platform, &urls, &config, |done, total| {
        println!("{done}/{total} URLs processed");
    })
    .await?;

    let failed = records.iter().filter(|r| r.is_error()).count();
    let table = ExportTable::from_records(&records);
    let csv = table.to_csv()?;

    let path = output_path(&args, platform);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, csv).with_context(|| format!("failed to write {}", path.display()))?;

    if args.print {
        println!();
        println!("{}", table.render(40));
        println!();
    }

    println!(
        "✓ Done! {} row(s), {} failed. Saved to: {}",
        records.len(),
        failed,
        path.display()
    );
    Ok(())
}
