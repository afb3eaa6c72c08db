use std::{
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;
use gbfpib::{GenerateOutcome, Quality, Session, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gbfpib", version, about = "Build party status images from a game snapshot")]
struct Cli {
    /// Snapshot or import JSON; `-` or absent reads stdin.
    input: Option<PathBuf>,

    /// Output resolution: 720p, 1080p or 4k.
    #[arg(long, default_value_t = Quality::K4)]
    quality: Quality,

    /// Do not persist downloaded assets.
    #[arg(long)]
    no_disk_cache: bool,

    /// Do not save skin.png.
    #[arg(long)]
    no_party_skin: bool,

    /// Also save emp.png from imported mastery records.
    #[arg(long)]
    party_emp: bool,

    /// Also save artifact.png from imported artifact records.
    #[arg(long)]
    party_artifact: bool,

    /// Draw the HP gauge on skin.png.
    #[arg(long)]
    show_hp: bool,

    /// Guess hidden weapon skill icons from the grid modifiers.
    #[arg(long)]
    skill_guess: bool,

    /// Content host and path prefix.
    #[arg(long, default_value = gbfpib::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Directory holding the bundled `assets/` folder.
    #[arg(long = "assets", default_value = ".")]
    asset_root: PathBuf,

    /// Directory for the asset cache, imported records and the class table.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Directory the PNGs are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            quality: self.quality,
            disk_cache: !self.no_disk_cache,
            skin: !self.no_party_skin,
            mastery: self.party_emp,
            artifact: self.party_artifact,
            show_hp: self.show_hp,
            skill_guess: self.skill_guess,
            endpoint: self.endpoint.clone(),
            asset_root: self.asset_root.clone(),
            data_dir: self.data_dir.clone(),
            output_dir: self.out_dir.clone(),
            ..Settings::default()
        }
    }
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("read input '{}'", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let text = read_input(cli.input.as_deref())?;
    let session = Session::new(cli.settings()).await?;

    match session.generate_str(&text).await? {
        GenerateOutcome::Party { files } => {
            for file in files {
                eprintln!("wrote {}", file.display());
            }
        }
        GenerateOutcome::MasteryImported { id } => eprintln!("saved mastery record {id}"),
        GenerateOutcome::ArtifactImported { id, equipped } => {
            eprintln!("saved artifact record {id} (equipped: {equipped})");
        }
    }
    Ok(())
}
