use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use scene_obj::{load_scene, ParseOptions, Scene};

#[derive(Parser)]
#[command(name = "scene-obj")]
#[command(about = "Parse an extended Wavefront scene file and describe the scene graph", long_about = None)]
struct Cli {
    /// Scene file to read
    file: PathBuf,
    /// Do not log progress
    #[arg(short, long)]
    quiet: bool,
    /// Number of progress messages over the whole file
    #[arg(long, default_value_t = 10)]
    reporting_frequency: usize,
    /// Print the scene graph as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let options = ParseOptions { verbose: !cli.quiet, reporting_frequency: cli.reporting_frequency };
    let scene = load_scene(&cli.file, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
    } else {
        print_summary(&scene);
    }
    Ok(())
}

fn print_summary(scene: &Scene) {
    let mut kinds = BTreeMap::<&str, usize>::new();
    for (_, container, _) in scene.graph.walk() {
        for primitive in container.primitives() {
            *kinds.entry(primitive.kind()).or_default() += 1;
        }
    }

    println!("vertices:   {}", scene.vertices().len());
    println!("containers: {}", scene.graph.len());
    for (kind, count) in kinds {
        println!("{:<11} {}", format!("{kind}:"), count);
    }
    if let Some(library) = &scene.root().material_file {
        println!("mtllib:     {library}");
    }

    for (_, container, depth) in scene.graph.walk() {
        println!(
            "{}box material={} group={}{} children={}",
            "  ".repeat(depth),
            container.material.as_deref().unwrap_or("-"),
            container.group_name.as_deref().unwrap_or("-"),
            if container.visible { "" } else { " (invisible)" },
            container.children.len(),
        );
    }

    if !scene.errors().is_empty() {
        println!("{} line(s) could not be interpreted:", scene.errors().len());
        for report in scene.errors() {
            println!("  {}: {} ({})", report.line, report.text.trim(), report.error);
        }
    }
}
