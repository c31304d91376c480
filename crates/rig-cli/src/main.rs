use std::{env, error::Error, path::PathBuf, process::ExitCode};

use rig::{
    batch::{build_skeletons, SkeletonSource},
    export::batch_export,
    host::{Environment, Host, NodeId, Scene},
    skeleton::Skeleton,
};

const USAGE: &str = "Usage:
  rig show <skeleton.json>
  rig build <skeleton.json>...
  rig export <input_dir> <output_dir>";

fn main() -> ExitCode {
    env_logger::init();
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };
    let args: Vec<String> = args.collect();
    let result = match (command.as_str(), args.as_slice()) {
        ("show", [path]) => show(path.into()),
        ("build", paths) if !paths.is_empty() => build(paths),
        ("export", [input, output]) => export(input.into(), output.into()),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn show(path: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut skeleton = Skeleton::default();
    skeleton.load(&path)?;
    println!("{} ({} joints)", skeleton, skeleton.joints().len());
    for joint in skeleton.joints() {
        let translation = joint.translation();
        println!(
            "  {:<24} parent={:<16} t=({:.3}, {:.3}, {:.3})",
            joint.name(),
            joint.parent().unwrap_or("<root>"),
            translation.x,
            translation.y,
            translation.z,
        );
    }
    Ok(())
}

fn build(paths: &[String]) -> Result<(), Box<dyn Error>> {
    let sources = paths
        .iter()
        .map(|path| SkeletonSource::File(path.into()))
        .collect();
    let mut env = Environment::live(Scene::new());
    let built = build_skeletons(&mut env, sources)?;
    println!("Built {} skeletons:", built.len());
    if let Some(host) = env.host() {
        for root in host.roots() {
            print_tree(host, root, 1);
        }
    }
    Ok(())
}

fn print_tree(host: &dyn Host, node: NodeId, depth: usize) {
    let name = host.name(node).unwrap_or_else(|_| node.to_string());
    println!("{}{}", "  ".repeat(depth), name);
    if let Ok(children) = host.children(node) {
        for child in children {
            print_tree(host, child, depth + 1);
        }
    }
}

fn export(input: PathBuf, output: PathBuf) -> Result<(), Box<dyn Error>> {
    let export = batch_export(&input, output)?;
    for event in export.progress().iter() {
        println!("[{:>5.1}%] {}", event.percent, event.path.display());
    }
    let summary = export.wait()?;
    println!(
        "Exported {} documents, skipped {}",
        summary.exported, summary.skipped
    );
    Ok(())
}
