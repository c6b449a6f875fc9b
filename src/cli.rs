//! CLI argument parsing with clap.

use clap::Parser;

/// AI photoshoot and social image generator powered by Gemini.
///
/// Settings left out fall back to the `[defaults]` table of the config file.
#[derive(Parser, Debug)]
#[command(name = "lumina", version, about)]
pub struct Cli {
    /// Text prompt describing the desired image (or the photoshoot style when
    /// a reference photo is given).
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,

    /// Reference photo of a person for a photoshoot-style generation.
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Aspect ratio: 1:1, 4:5, 9:16, 16:9, 1.91:1.
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    /// Resolution: standard, hd, full-hd, 2k, 4k (2k and 4k use the pro model).
    #[arg(short = 's', long)]
    pub resolution: Option<String>,

    /// Number of images to generate (1-4).
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    /// Model name or alias, overriding the resolution-based choice.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output format: png, jpeg, webp.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Gallery directory images are saved into.
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// List the gallery and exit.
    #[arg(long)]
    pub gallery: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the prompt from either the positional argument or the file flag.
    /// Returns an empty string when neither is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt file cannot be read.
    pub fn resolve_prompt(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path)
        } else {
            Ok(String::new())
        }
    }
}
