//! skinpack-merge CLI
//!
//! Entry point for the `skinpack-merge` command-line tool: a thin,
//! non-interactive driver around the merge library. Folders are
//! processed in the order given; a folder that fails to load is
//! reported and skipped rather than aborting the run.

use clap::{Parser, Subcommand};
use skinpack_merge::{pack, package, MergeSession};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "skinpack-merge")]
#[command(about = "Merge Minecraft Bedrock skin packs into one pack", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge skin pack folders into one combined pack
    Merge {
        /// Skin pack folders, merged in the given order
        #[arg(required = true)]
        folders: Vec<PathBuf>,

        /// Output path: a zip file, or a directory with --json-only
        #[arg(long, short = 'o', default_value = "merged_skinpack.zip")]
        output: PathBuf,

        /// Manifest serialize_name (default: derived from source packs)
        #[arg(long)]
        package_id: Option<String>,

        /// Manifest localization_name (default: derived from source packs)
        #[arg(long)]
        display_name: Option<String>,

        /// Write only the merged JSON config files into a directory
        #[arg(long)]
        json_only: bool,
    },

    /// Inspect a single skin pack folder
    Inspect {
        /// Skin pack folder
        folder: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            folders,
            output,
            package_id,
            display_name,
            json_only,
        } => {
            run_merge(folders, output, package_id, display_name, json_only);
        }
        Commands::Inspect { folder } => {
            run_inspect(folder);
        }
    }
}

fn run_merge(
    folders: Vec<PathBuf>,
    output: PathBuf,
    package_id: Option<String>,
    display_name: Option<String>,
    json_only: bool,
) {
    let mut session = MergeSession::new();
    if let Some(id) = package_id {
        session.set_package_id(id);
    }
    if let Some(name) = display_name {
        session.set_display_name(name);
    }

    for folder in &folders {
        match session.add_folder(folder) {
            Ok(loaded) => {
                println!("Loaded {} ({} skins)", loaded.name, loaded.summary.skin_count)
            }
            Err(e) => eprintln!("Skipping {}: {}", folder.display(), e),
        }
    }

    let result = match session.merge() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Merge failed: {}", e);
            process::exit(1);
        }
    };

    for event in &result.events {
        println!("  {}", event);
    }

    println!();
    println!("Merge statistics:");
    println!("  Skins:          {}", result.stats.total_skins);
    println!("  Geometries:     {}", result.stats.total_geometries);
    println!("  Texture files:  {}", result.stats.texture_count);
    println!("  Source folders: {}", result.stats.folder_count);

    let write_result = if json_only {
        package::write_directory(&result, &output)
    } else {
        package::write_archive(&result, &output)
    };

    match write_result {
        Ok(()) => {
            println!();
            println!("Wrote {}", output.display());
        }
        Err(e) => {
            eprintln!("Failed to write {}: {}", output.display(), e);
            process::exit(1);
        }
    }
}

fn run_inspect(folder: PathBuf) {
    let loaded = match pack::load_folder(&folder) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let summary = &loaded.summary;
    println!("{}", loaded.name);
    println!("  Package id:   {}", loaded.manifest.serialize_name);
    println!("  Display name: {}", loaded.manifest.localization_name);
    println!(
        "  Skins: {} | Geometry files: {} | Textures: {} | Other: {}",
        summary.skin_count, summary.geometry_count, summary.texture_count, summary.other_count
    );
    if !summary.geometries.is_empty() {
        let ids: Vec<_> = summary.geometries.iter().cloned().collect();
        println!("  Referenced geometries: {}", ids.join(", "));
    }
    if !summary.textures.is_empty() {
        let ids: Vec<_> = summary.textures.iter().cloned().collect();
        println!("  Referenced textures: {}", ids.join(", "));
    }
}
