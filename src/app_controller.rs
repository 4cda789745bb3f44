use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::subtitle_processor::{SubtitleCollection, SubtitleFormat};
use crate::sync_service::{SyncOutcome, SyncService, SyncStage};

// @module: Application controller for subtitle realignment

/// Main application controller for subtitle realignment
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Configuration the controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the main workflow: realign `revised_file` onto the cues of `subtitle_file`
    ///
    /// Returns the written path, or `None` when the output already exists and
    /// `force_overwrite` is false.
    pub async fn run(
        &self,
        subtitle_file: PathBuf,
        revised_file: PathBuf,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let start_time = Instant::now();

        if !subtitle_file.exists() {
            return Err(anyhow::anyhow!("Subtitle file does not exist: {:?}", subtitle_file));
        }
        if !revised_file.exists() {
            return Err(anyhow::anyhow!("Revised text file does not exist: {:?}", revised_file));
        }

        let subtitles = self.load_subtitles(&subtitle_file)?;
        let output_format = self.config.output.format.unwrap_or(subtitles.format);
        let output_path = output_file.unwrap_or_else(|| self.default_output_path(&subtitle_file, output_format));

        if output_path.exists() && !force_overwrite {
            warn!("Skipping, output already exists (use -f to force overwrite): {}", output_path.display());
            return Ok(None);
        }

        let revised_text = self.load_revised_text(&revised_file)?;

        let (outcome, sync_duration) = self.sync_with_progress(&subtitles, revised_text).await?;
        let outcome = outcome
            .into_result()
            .context("Realignment produced no usable match")?;

        info!(
            "Aligned {} of {} revised word(s): {} match(es), {} mismatch(es), {} inserted, {} dropped",
            outcome.summary.matches + outcome.summary.mismatches + outcome.summary.gaps_in_original,
            outcome.revised_word_count,
            outcome.summary.matches,
            outcome.summary.mismatches,
            outcome.summary.gaps_in_original,
            outcome.summary.gaps_in_revised
        );

        let empty_cues = outcome.entries.iter().filter(|e| e.text.is_empty()).count();
        if empty_cues > 0 {
            warn!("{} cue(s) received no revised text", empty_cues);
        }

        self.save_synced_subtitles(&subtitles, outcome, &output_path, output_format)?;

        info!(
            "Sync completed in {} (alignment: {}).",
            Self::format_duration(start_time.elapsed()),
            Self::format_duration(sync_duration)
        );

        Ok(Some(output_path))
    }

    /// Default output path: `<stem>.<suffix>.<ext>` next to the subtitle file
    pub fn default_output_path(&self, subtitle_file: &Path, format: SubtitleFormat) -> PathBuf {
        let output_dir = subtitle_file.parent().unwrap_or(Path::new("."));
        FileManager::generate_output_path(
            subtitle_file,
            output_dir,
            &self.config.output.output_suffix,
            format.extension(),
        )
    }

    /// Parse the timed subtitle file
    fn load_subtitles(&self, subtitle_file: &Path) -> Result<SubtitleCollection> {
        let format = match FileManager::detect_file_type(subtitle_file)? {
            FileType::Subtitle(format) => format,
            other => {
                return Err(anyhow::anyhow!(
                    "Not a subtitle file ({:?}): {:?}",
                    other,
                    subtitle_file
                ));
            }
        };

        let subtitles = SubtitleCollection::from_file(subtitle_file, Some(format))?;
        info!("Loaded {} cue(s) from {}", subtitles.entries.len(), subtitle_file.display());
        Ok(subtitles)
    }

    /// Read the revised text; a subtitle file contributes the text of its cues
    fn load_revised_text(&self, revised_file: &Path) -> Result<String> {
        match FileManager::detect_file_type(revised_file)? {
            FileType::Subtitle(format) => {
                info!("Revised file is a {} subtitle, using its cue text", format);
                let revised = SubtitleCollection::from_file(revised_file, Some(format))?;
                Ok(revised
                    .entries
                    .iter()
                    .map(|entry| entry.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            FileType::Text => FileManager::read_to_string(revised_file),
            FileType::Unknown => Err(anyhow::anyhow!(
                "Revised file is not valid UTF-8 text: {:?}",
                revised_file
            )),
        }
    }

    /// Run the sync service on a blocking thread while a spinner shows the stage
    async fn sync_with_progress(&self, subtitles: &SubtitleCollection, revised_text: String) -> Result<(SyncOutcome, Duration)> {
        let sync_start_time = Instant::now();

        let progress_bar = ProgressBar::new(SyncStage::COUNT);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.enable_steady_tick(Duration::from_millis(120));

        let service = SyncService::from_config(&self.config);
        let entries = subtitles.entries.clone();
        let pb = progress_bar.clone();

        let result = tokio::task::spawn_blocking(move || {
            service.sync_with_progress(&entries, &revised_text, |stage| {
                pb.set_position(stage.index());
                pb.set_message(stage.label());
            })
        })
        .await
        .context("Sync task panicked")?;

        progress_bar.finish_and_clear();

        let outcome = result?;
        Ok((outcome, sync_start_time.elapsed()))
    }

    /// Write the synced cues using the original timing
    fn save_synced_subtitles(
        &self,
        subtitles: &SubtitleCollection,
        outcome: SyncOutcome,
        output_path: &Path,
        format: SubtitleFormat,
    ) -> Result<()> {
        let synced = SubtitleCollection {
            source_file: subtitles.source_file.clone(),
            entries: outcome.entries,
            format,
        };

        synced.write_to_file(output_path, format, self.config.output.max_line_length)?;

        info!("Success: {}", output_path.display());
        Ok(())
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
