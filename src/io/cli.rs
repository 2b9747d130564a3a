//! Command-line interface for generating a collection end to end

use crate::algorithm::executor::{CollectionExecutor, ExecutorConfig, GenerationEvent};
use crate::io::config::{LoadedConfig, load_config};
use crate::io::configuration::{
    DEFAULT_CONFIG_PATH, DEFAULT_LAYERS_DIR, DEFAULT_OUTPUT_DIR, PREVIEW_SIZE,
};
use crate::io::error::Result;
use crate::io::image::{LayerCache, save_image, save_preview};
use crate::io::metadata::{MetadataTemplate, TokenMetadata, write_metadata};
use crate::io::output::OutputLayout;
use crate::io::progress::ProgressManager;
use crate::io::table::write_trait_table;
use crate::model::config::CollectionConfig;
use crate::model::member::Collection;
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "layerloom")]
#[command(
    author,
    version,
    about = "Generate a unique layered image collection from percentage-allocated traits"
)]
/// Command-line arguments for the collection generator
pub struct Cli {
    /// Collection configuration file (JSON)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory holding `<attribute>/<variant>.png` layer images
    #[arg(short, long, default_value = DEFAULT_LAYERS_DIR)]
    pub layers: PathBuf,

    /// Output directory, recreated on every run
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Random seed for reproducible generation (operating system entropy when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Give up after this many failed attempts (retries indefinitely when omitted)
    #[arg(short, long)]
    pub max_attempts: Option<usize>,

    /// Write metadata and the trait table only, skipping image rendering
    #[arg(short = 'n', long)]
    pub no_images: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Check if composites and previews should be rendered
    pub const fn should_render_images(&self) -> bool {
        !self.no_images
    }

    /// Retry and seeding policy derived from the arguments
    pub const fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            seed: self.seed,
            max_attempts: self.max_attempts,
        }
    }
}

/// Orchestrates configuration loading, generation and result export
pub struct CollectionRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CollectionRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate the collection and write every artifact
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration cannot be loaded or fails validation
    /// - The output directory cannot be reset
    /// - Generation fails fatally or exhausts its attempt limit
    /// - Any layer, image, metadata or table operation fails
    pub fn process(&mut self) -> Result<Collection> {
        let start_time = Instant::now();
        let LoadedConfig {
            collection: config,
            metadata,
        } = load_config(&self.cli.config)?;

        let layout = OutputLayout::new(&self.cli.output);
        layout.reset()?;

        let mut executor = CollectionExecutor::new(config, self.cli.executor_config());
        let collection = self.generate(&mut executor)?;
        info!(
            attempts = executor.attempts(),
            members = collection.len(),
            "generation finished"
        );

        self.save(&collection, executor.config(), &metadata, &layout)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        info!(
            output = %layout.root().display(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "results saved"
        );
        Ok(collection)
    }

    fn generate(&mut self, executor: &mut CollectionExecutor) -> Result<Collection> {
        let progress = &mut self.progress_manager;
        let result = executor.run_with(|event| match (event, progress.as_mut()) {
            (GenerationEvent::AttemptStarted { attempt, supply }, Some(pm)) => {
                pm.start_attempt(attempt, supply);
            }
            (GenerationEvent::MemberAccepted { accepted, .. }, Some(pm)) => {
                pm.member_accepted(accepted);
            }
            (GenerationEvent::AttemptFailed { attempt, error }, Some(pm)) => {
                pm.fail_attempt(attempt, error);
            }
            (GenerationEvent::AttemptFailed { attempt, error }, None) => {
                warn!(attempt, error = %error, "attempt failed");
            }
            _ => {}
        });

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish_generation();
        }
        result
    }

    fn save(
        &mut self,
        collection: &Collection,
        config: &CollectionConfig,
        metadata: &MetadataTemplate,
        layout: &OutputLayout,
    ) -> Result<()> {
        let attributes = config.attributes();
        write_trait_table(&layout.table_path(), collection, attributes)?;

        let layers = if self.cli.should_render_images() {
            Some(LayerCache::load(&self.cli.layers, attributes)?)
        } else {
            None
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_saving(collection.len());
        }
        let progress = self.progress_manager.as_ref();

        collection
            .members()
            .par_iter()
            .enumerate()
            .try_for_each(|(index, member)| {
                let id = index + 1;
                let document = TokenMetadata::for_member(id, member, attributes, metadata);
                write_metadata(&layout.metadata_path(id), &document)?;

                if let Some(ref cache) = layers {
                    let img = cache.composite(member)?;
                    save_image(&img, &layout.image_path(id))?;
                    save_preview(&img, &layout.preview_path(id), PREVIEW_SIZE)?;
                }

                if let Some(pm) = progress {
                    pm.member_saved();
                }
                Ok(())
            })
    }
}
