//! `dtn` - export/import DTN format documents for a project file.
//!
//! Stands in for the host editor's dialogs: subcommands take a project JSON
//! file plus explicit paths where the editor would pop a file chooser, and
//! completion/failure messages go to stdout/stderr instead of toasts.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dtn_format_core::{
    export_animation, export_model, import_animations, import_model,
    suggested_animation_file_name, suggested_model_file_name, ImportFile, Project,
};

#[derive(Parser)]
#[command(name = "dtn")]
#[command(about = "Convert editor projects to and from the DTN interchange format", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one animation of a project to a DTN animation document
    ExportAnim {
        /// Path to the project JSON file
        project: PathBuf,

        /// Animation name (default: the selected animation, else the first)
        #[arg(long)]
        animation: Option<String>,

        /// Output file (default: suggested name next to the project)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import DTN animation documents into a project, one animation per file
    ImportAnim {
        /// Path to the project JSON file (rewritten on success)
        project: PathBuf,

        /// DTN animation documents to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Export the project's model tree to a DTN model document
    ExportModel {
        /// Path to the project JSON file
        project: PathBuf,

        /// Output file (default: suggested name next to the project)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a DTN model document (not yet supported)
    ImportModel {
        /// Path to the project JSON file
        project: PathBuf,

        /// DTN model document to import
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    builder.write_style(env_logger::WriteStyle::Auto);
    builder.init();

    let cli = Cli::parse();
    match cli.command {
        Commands::ExportAnim {
            project,
            animation,
            output,
        } => export_anim(&project, animation.as_deref(), output),
        Commands::ImportAnim { project, files } => import_anim(&project, &files),
        Commands::ExportModel { project, output } => export_model_cmd(&project, output),
        Commands::ImportModel { project, file } => import_model_cmd(&project, &file),
    }
}

/// Default output location: the suggested file name next to the project
/// file, matching what the host's save dialog would offer.
fn suggested_path(project_path: &Path, file_name: &str) -> PathBuf {
    match project_path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn load_project(path: &Path) -> Result<Project> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read project {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse project {}", path.display()))
}

fn save_project(path: &Path, project: &Project) -> Result<()> {
    let text = serde_json::to_string_pretty(project)?;
    std::fs::write(path, text).with_context(|| format!("failed to write project {}", path.display()))
}

fn export_anim(project_path: &Path, animation: Option<&str>, output: Option<PathBuf>) -> Result<()> {
    let project = load_project(project_path)?;
    let animation = match animation {
        Some(name) => project
            .animation(name)
            .with_context(|| format!("no animation named '{name}' in the project"))?,
        None => project
            .selected_animation
            .and_then(|i| project.animations.get(i))
            .or_else(|| project.animations.first())
            .context("the project has no animations")?,
    };

    let doc = export_animation(animation);
    let out = output
        .unwrap_or_else(|| suggested_path(project_path, &suggested_animation_file_name(animation)));
    std::fs::write(&out, serde_json::to_string(&doc)?)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("Exported animation as DTN Format to : {}", out.display());
    Ok(())
}

fn import_anim(project_path: &Path, files: &[PathBuf]) -> Result<()> {
    let mut project = load_project(project_path)?;

    let mut imports = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("bad file name: {}", path.display()))?
            .to_string();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        imports.push(ImportFile { name, content });
    }

    let report = import_animations(&mut project, &imports);
    if !report.succeeded.is_empty() {
        save_project(project_path, &project)?;
    }
    println!("{}", report.summary());
    if !report.failed.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn export_model_cmd(project_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let project = load_project(project_path)?;
    let doc = match export_model(&project) {
        Ok(doc) => doc,
        Err(err) => bail!("an error occurred while generating the model: {err}"),
    };

    let out =
        output.unwrap_or_else(|| suggested_path(project_path, &suggested_model_file_name(&project)));
    std::fs::write(&out, serde_json::to_string(&doc)?)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("Exported model to: {}", out.display());
    Ok(())
}

fn import_model_cmd(project_path: &Path, file: &Path) -> Result<()> {
    let mut project = load_project(project_path)?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    import_model(&mut project, &content)?;
    Ok(())
}
