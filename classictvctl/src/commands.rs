use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use classictv_config::{ClassicTvConfig, ConfigSource};
use classictv_core::generation::{
    GenerationConfig, GenerationProgress, GenerationReport, NoOpReason,
    RunStatus, SkipReason, UserOutcome,
};
use classictv_core::ports::{CatalogStore, UserDirectory};
use classictv_core::{GeneratePlaylistTask, MixedPlaylist, PlaylistGenerator};
use classictv_model::{CatalogItem, SeriesID, UserID, UserRef};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::snapshot::{LibrarySnapshot, SnapshotStores};

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ClassicTvConfig,
    pub source: ConfigSource,
}

pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let (config, source) = match explicit {
        Some(path) => (
            ClassicTvConfig::load_from_file(path)?,
            ConfigSource::File(path.to_path_buf()),
        ),
        None => ClassicTvConfig::load_from_env()?,
    };
    debug!(source = %source, "configuration loaded");
    Ok(LoadedConfig { config, source })
}

fn library_path(
    loaded: &LoadedConfig,
    override_path: Option<&Path>,
) -> Result<PathBuf> {
    override_path
        .map(Path::to_path_buf)
        .or_else(|| loaded.config.library.snapshot_path.clone())
        .ok_or_else(|| {
            anyhow!(
                "no library snapshot configured; pass --library or set \
                 library.snapshot_path"
            )
        })
}

struct Library {
    path: PathBuf,
    snapshot: LibrarySnapshot,
    stores: SnapshotStores,
}

impl Library {
    async fn open(path: PathBuf) -> Result<Self> {
        let snapshot = LibrarySnapshot::load(&path)?;
        let stores = snapshot.stores().await;
        Ok(Self {
            path,
            snapshot,
            stores,
        })
    }

    fn generator(&self) -> PlaylistGenerator {
        PlaylistGenerator::new(
            self.stores.catalog.clone(),
            self.stores.users.clone(),
            self.stores.playlists.clone(),
        )
    }

    async fn save_playlists(&mut self) -> Result<()> {
        self.snapshot.playlists = self.stores.playlists.snapshot().await;
        self.snapshot.save(&self.path)?;
        info!(path = %self.path.display(), "library snapshot updated");
        Ok(())
    }
}

pub async fn generate(
    loaded: &LoadedConfig,
    library: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let mut library = Library::open(library_path(loaded, library)?).await?;
    for warning in &loaded.config.validate().items {
        warn!("{}", warning.message);
    }
    let generation = loaded.config.generation();

    if dry_run {
        return print_dry_run(&library, &generation).await;
    }

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current user");
            signal_token.cancel();
        }
    });

    let (progress_tx, mut progress_rx) =
        watch::channel(GenerationProgress::default());
    let progress_log = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let progress = *progress_rx.borrow();
            debug!(
                completed = progress.completed,
                total = progress.total,
                "{:.0}% done",
                progress.percent()
            );
        }
    });

    let task = GeneratePlaylistTask::new(
        library.generator().with_progress(progress_tx),
        generation,
    );
    let report = task.execute(&cancel).await;
    drop(task);
    let _ = progress_log.await;

    if !report.is_no_op() {
        library.save_playlists().await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub async fn preview(
    loaded: &LoadedConfig,
    user_id: &str,
    library: Option<&Path>,
) -> Result<()> {
    let library = Library::open(library_path(loaded, library)?).await?;
    let generator = library.generator();
    let generation = loaded.config.generation();

    let user = match generator.resolve_user(user_id).await? {
        Ok(user) => user,
        Err(reason) => {
            bail!("cannot preview user '{user_id}': {}", skip_text(reason))
        }
    };
    let plan = generator
        .plan_for_user(&user, &generation)
        .await
        .with_context(|| {
            format!("failed to plan playlist for {}", user.name)
        })?;
    print_plan(&user, &generation, &plan, &library.snapshot.series_names());
    Ok(())
}

pub async fn check_config(loaded: &LoadedConfig) -> Result<()> {
    println!("Configuration source: {}", loaded.source);
    println!();
    print!("{}", loaded.config.to_toml_string()?);

    let mut warnings = loaded.config.validate();

    if let Some(path) = &loaded.config.library.snapshot_path {
        if path.exists() {
            let library = Library::open(path.clone()).await?;
            check_against_library(&loaded.config, &library, &mut warnings)
                .await?;
        } else {
            warnings.push(format!(
                "library snapshot {} does not exist",
                path.display()
            ));
        }
    }

    println!();
    if warnings.is_empty() {
        println!("No problems found.");
        return Ok(());
    }
    println!("Warnings:");
    for warning in &warnings.items {
        println!("  - {}", warning.message);
        if let Some(hint) = &warning.hint {
            println!("    hint: {hint}");
        }
    }
    Ok(())
}

async fn check_against_library(
    config: &ClassicTvConfig,
    library: &Library,
    warnings: &mut classictv_config::ConfigWarnings,
) -> Result<()> {
    let known: Vec<UserID> = library
        .stores
        .users
        .all_users()
        .await?
        .into_iter()
        .map(|user| user.id)
        .collect();
    for raw in &config.user_ids {
        if let Ok(id) = UserID::parse(raw)
            && !known.contains(&id)
        {
            warnings.push(format!("user {raw} is not in the library"));
        }
    }

    for raw in &config.series_ids {
        let Ok(id) = SeriesID::parse(raw) else {
            continue;
        };
        match library.stores.catalog.resolve_by_id(id).await? {
            Some(CatalogItem::Series(_)) => {}
            Some(item) => warnings.push(format!(
                "series {raw} resolves to a {} and will be skipped",
                item.kind()
            )),
            None => {
                warnings.push(format!("series {raw} is not in the library"))
            }
        }
    }
    Ok(())
}

pub async fn library(
    loaded: &LoadedConfig,
    library: Option<&Path>,
) -> Result<()> {
    let library = Library::open(library_path(loaded, library)?).await?;

    println!("Series:");
    for series in &library.snapshot.series {
        println!(
            "  {}  {} ({} episodes)",
            series.id,
            series.name,
            series.episodes.len()
        );
    }
    println!("Users:");
    for user in library.stores.users.all_users().await? {
        println!("  {}  {}", user.id, user.name);
    }
    Ok(())
}

pub fn describe() -> Result<()> {
    let info = GeneratePlaylistTask::info();
    println!("{}", info.name);
    println!("  key:         {}", info.key);
    println!("  category:    {}", info.category);
    println!("  description: {}", info.description);
    let triggers = GeneratePlaylistTask::default_triggers();
    if triggers.is_empty() {
        println!("  triggers:    manual only");
    } else {
        println!("  triggers:    {}", serde_json::to_string(&triggers)?);
    }
    Ok(())
}

async fn print_dry_run(
    library: &Library,
    generation: &GenerationConfig,
) -> Result<()> {
    if generation.series_ids.is_empty() || generation.user_ids.is_empty() {
        println!("Nothing to do: no series or no users configured.");
        return Ok(());
    }

    let generator = library.generator();
    let names = library.snapshot.series_names();
    for raw in &generation.user_ids {
        let user = match generator.resolve_user(raw).await {
            Ok(Ok(user)) => user,
            Ok(Err(reason)) => {
                println!("{raw}: skipped ({})", skip_text(reason));
                continue;
            }
            Err(err) => {
                println!("{raw}: failed: {err}");
                continue;
            }
        };
        match generator.plan_for_user(&user, generation).await {
            Ok(plan) => print_plan(&user, generation, &plan, &names),
            Err(err) => println!("{raw}: failed: {err}"),
        }
    }
    Ok(())
}

fn print_plan(
    user: &UserRef,
    generation: &GenerationConfig,
    plan: &MixedPlaylist,
    series_names: &HashMap<SeriesID, String>,
) {
    let name = generation.naming.playlist_name(user);
    println!("{name} ({} episodes)", plan.len());
    for (index, episode) in plan.episodes().iter().enumerate() {
        let (season, number) = episode.position();
        let series = series_names
            .get(&episode.series_id)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "  {:>4}. {series} S{season:02}E{number:02} {}",
            index + 1,
            episode.name
        );
    }
}

fn print_report(report: &GenerationReport) {
    if let RunStatus::NoOp(reason) = report.status {
        let why = match reason {
            NoOpReason::NoSeriesConfigured => "no series configured",
            NoOpReason::NoUsersConfigured => "no users configured",
        };
        println!("Nothing to do: {why}.");
        return;
    }

    for entry in &report.users {
        match &entry.outcome {
            UserOutcome::Synced {
                playlist_name,
                episodes,
                replaced,
                ..
            } => println!(
                "{}: wrote '{playlist_name}' with {episodes} episodes \
                 (replaced {replaced})",
                entry.configured_id
            ),
            UserOutcome::Skipped { reason } => println!(
                "{}: skipped ({})",
                entry.configured_id,
                skip_text(*reason)
            ),
            UserOutcome::Failed { reason } => {
                println!("{}: failed: {reason}", entry.configured_id)
            }
        }
    }
    println!(
        "{} synced, {} skipped, {} failed",
        report.synced(),
        report.skipped(),
        report.failed()
    );
}

fn skip_text(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::InvalidUserId => "not a valid user id",
        SkipReason::UserNotFound => "user not found",
        SkipReason::NoUnwatchedEpisodes => "no unwatched episodes",
        SkipReason::Cancelled => "run cancelled",
    }
}

