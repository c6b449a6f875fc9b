//! Lumina - AI photoshoot and social image generation CLI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod gallery;
mod generate;
mod keys;
mod logging;
mod model;
mod output;
mod params;
mod ports;
mod prompt;
mod reference;
mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use crate::adapters::live::terminal::TerminalKeySelector;
use crate::cli::Cli;
use crate::config::{Config, SELECTED_KEY_ENV};
use crate::context::{RecordingSession, ServiceContext};
use crate::error::ImageError;
use crate::gallery::{save_batch, Gallery};
use crate::generate::generate_images;
use crate::model::select_model;
use crate::params::validate_format;
use crate::ports::image_generator::GeneratedImage;
use crate::ports::{InlineImage, KeySelector};
use crate::reference::load_reference;
use crate::settings::{parse_aspect_ratio, parse_resolution, validate_count, GenerationSettings};

/// Shown for any failure inside the generation loop; details go to the log.
const GENERATION_FAILED: &str = "Failed to generate images. Please try again.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        if e.is_generation_failure() {
            if e.is_entity_not_found() {
                eprintln!(
                    "Hint: the API key cannot access this model. Select a key from a paid \
                     project with {SELECTED_KEY_ENV} or `selected` under [keys] in the config file."
                );
            }
            eprintln!("Error: {GENERATION_FAILED}");
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// One batch, fully resolved from flags, config defaults and built-ins.
struct Job {
    prompt: String,
    settings: GenerationSettings,
    reference: Option<InlineImage>,
    model: String,
    format: String,
    output_dir: PathBuf,
}

impl Job {
    fn from_cli(cli: &Cli, config: &Config, output_dir: PathBuf) -> Result<Self, ImageError> {
        let defaults = &config.defaults;

        let aspect_ratio =
            parse_aspect_ratio(cli.aspect_ratio.as_deref().unwrap_or(&defaults.aspect_ratio))
                .map_err(ImageError::InvalidArgument)?;
        let resolution =
            parse_resolution(cli.resolution.as_deref().unwrap_or(&defaults.resolution))
                .map_err(ImageError::InvalidArgument)?;
        let count =
            validate_count(cli.count.unwrap_or(defaults.count)).map_err(ImageError::InvalidArgument)?;
        let format = cli.format.clone().unwrap_or_else(|| defaults.format.clone());
        validate_format(&format).map_err(ImageError::InvalidArgument)?;

        let prompt = cli.resolve_prompt()?.trim().to_string();
        let reference = cli.reference.as_deref().map(|p| load_reference(Path::new(p))).transpose()?;
        if prompt.is_empty() && reference.is_none() {
            return Err(ImageError::InvalidArgument(
                "Provide a prompt string, -p/--prompt-file, or -r/--reference".to_string(),
            ));
        }

        let model = select_model(resolution, cli.model.as_deref())
            .map_err(ImageError::InvalidArgument)?;

        Ok(Self {
            prompt,
            settings: GenerationSettings { aspect_ratio, resolution, count },
            reference,
            model,
            format,
            output_dir,
        })
    }

    async fn generate(&self, ctx: &ServiceContext) -> Result<Vec<GeneratedImage>, ImageError> {
        generate_images(
            &*ctx.generator,
            &self.model,
            &self.prompt,
            &self.settings,
            self.reference.as_ref(),
        )
        .await
    }
}

async fn run(cli: Cli) -> Result<(), ImageError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;
    let output_dir =
        PathBuf::from(cli.output_dir.as_deref().unwrap_or(&config.defaults.output_dir));

    if cli.gallery {
        return list_gallery(&output_dir);
    }

    let job = Job::from_cli(&cli, &config, output_dir)?;
    // A bad manifest must fail before any request is spent or file written.
    let mut gallery = Gallery::load(&job.output_dir)?;
    tracing::info!(model = %job.model, aspect_ratio = %job.settings.aspect_ratio,
        resolution = %job.settings.resolution, count = job.settings.count,
        reference = job.reference.is_some(), "starting generation");

    // Live / recording / replaying
    let replay_path = std::env::var("LUMINA_REPLAY").ok();
    let is_recording = std::env::var("LUMINA_REC").is_ok_and(|v| v == "true" || v == "1");

    let images = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        let ctx = ServiceContext::replaying(Path::new(cassette_path))?;
        job.generate(&ctx).await?
    } else {
        let session = is_recording.then(RecordingSession::start);
        let result = generate_live(
            &job,
            &config,
            &config_path,
            &TerminalKeySelector,
            &|key| ServiceContext::live(key, session.as_ref()),
        )
        .await;
        if let Some(session) = session {
            match session.finish() {
                Ok(path) => eprintln!("Cassette saved: {}", path.display()),
                Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
            }
        }
        result?
    };

    if images.is_empty() {
        tracing::warn!("no images were returned");
        eprintln!("No images were generated. Try a different prompt.");
        return Ok(());
    }

    // Save images, newest batch first in the gallery
    let entries = save_batch(
        &job.output_dir,
        &images,
        &job.prompt,
        &job.settings,
        &job.format,
        chrono::Utc::now(),
    )?;
    for entry in &entries {
        eprintln!("Saved: {}", job.output_dir.join(&entry.file).display());
    }

    gallery.prepend(entries);
    gallery.save(&job.output_dir)?;

    Ok(())
}

/// Generate against the live API. An "entity not found" failure triggers one
/// key selection and, if a key is chosen, a single retry with it.
/// `connect` builds the context for a given API key.
async fn generate_live(
    job: &Job,
    config: &Config,
    config_path: &Path,
    selector: &dyn KeySelector,
    connect: &dyn Fn(String) -> ServiceContext,
) -> Result<Vec<GeneratedImage>, ImageError> {
    let api_key = keys::resolve_key(&job.model, config, config_path, selector)?;
    let ctx = connect(api_key);

    let first = job.generate(&ctx).await;
    match first {
        Err(e) if e.is_entity_not_found() => {
            tracing::warn!(model = %job.model, "API key cannot access model; selecting another key");
            let Some(key) = keys::reselect_key(selector, config_path)? else {
                return Err(e);
            };
            let retry = connect(key);
            job.generate(&retry).await
        }
        result => result,
    }
}

/// Print the gallery, newest first.
fn list_gallery(dir: &Path) -> Result<(), ImageError> {
    let gallery = Gallery::load(dir)?;
    if gallery.images.is_empty() {
        eprintln!("Gallery {} is empty.", dir.display());
        return Ok(());
    }
    for image in &gallery.images {
        println!(
            "{}  {}  {} {}  {}  {}",
            image.id,
            image.timestamp.format("%Y-%m-%d %H:%M:%S"),
            image.settings.aspect_ratio,
            image.settings.resolution,
            dir.join(&image.file).display(),
            image.prompt,
        );
    }
    Ok(())
}
