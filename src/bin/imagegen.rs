//! CLI for imagegen - DALL-E 3 image generation.

use clap::{Parser, ValueEnum};
use imagegen::{
    DallEClient, GenerationPhase, GenerationRequest, ImageQuality, ImageSize, ImageStyle,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "imagegen")]
#[command(about = "Generate DALL-E 3 images from a text prompt and save them locally")]
#[command(version)]
struct Cli {
    /// The text prompt describing the image (interactive mode when omitted)
    prompt: Option<String>,

    /// Image size
    #[arg(long, value_enum, default_value = "1024x1024")]
    size: SizeArg,

    /// Image quality
    #[arg(long, value_enum, default_value = "standard")]
    quality: QualityArg,

    /// Image style
    #[arg(long, value_enum, default_value = "vivid")]
    style: StyleArg,

    /// Folder to save generated images into
    #[arg(long, default_value = "images")]
    folder: PathBuf,

    /// Filename prefix for saved images
    #[arg(long, default_value = "image")]
    prefix: String,

    /// API key (falls back to the OPENAI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SizeArg {
    #[value(name = "1024x1024")]
    Square,
    #[value(name = "1792x1024")]
    Landscape,
    #[value(name = "1024x1792")]
    Portrait,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QualityArg {
    Standard,
    Hd,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Vivid,
    Natural,
}

impl From<SizeArg> for ImageSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Square => ImageSize::Square,
            SizeArg::Landscape => ImageSize::Landscape,
            SizeArg::Portrait => ImageSize::Portrait,
        }
    }
}

impl From<QualityArg> for ImageQuality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Standard => ImageQuality::Standard,
            QualityArg::Hd => ImageQuality::Hd,
        }
    }
}

impl From<StyleArg> for ImageStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Vivid => ImageStyle::Vivid,
            StyleArg::Natural => ImageStyle::Natural,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut builder = DallEClient::builder();
    if let Some(key) = &cli.api_key {
        builder = builder.api_key(key);
    }
    let client = builder.build()?;

    match cli.prompt.clone() {
        Some(prompt) => generate_one(&client, &cli, &prompt).await,
        None => run_interactive(&client, &cli).await,
    }
}

async fn generate_one(client: &DallEClient, cli: &Cli, prompt: &str) -> anyhow::Result<()> {
    let request = GenerationRequest::new(prompt)
        .with_size(cli.size.into())
        .with_quality(cli.quality.into())
        .with_style(cli.style.into());

    let start = Instant::now();
    let bytes = client
        .generate_with_progress(&request, |phase| match phase {
            GenerationPhase::Submitting => {
                println!("Generating image for prompt: '{prompt}'");
                println!("This may take a moment...");
            }
            GenerationPhase::Downloading => println!("Downloading image..."),
        })
        .await?;

    let path = imagegen::persist(&bytes, &cli.folder, &cli.prefix)?;

    println!(
        "Image saved as {} ({:.2}s)",
        path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

async fn run_interactive(client: &DallEClient, cli: &Cli) -> anyhow::Result<()> {
    loop {
        let Some(prompt) = read_line("Enter a prompt for image generation (or 'exit' to quit): ")?
        else {
            break;
        };

        if prompt.is_empty() {
            continue;
        }
        if prompt.eq_ignore_ascii_case("exit") {
            break;
        }

        // A failed generation ends this prompt only, not the session
        if let Err(e) = generate_one(client, cli, &prompt).await {
            eprintln!("Error: {e:#}");
        }

        match read_line("Generate another image? (y/n): ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => {}
            _ => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Prompts on stdout and reads one trimmed line; `None` on EOF.
fn read_line(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
