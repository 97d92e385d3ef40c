use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use livestyle::ast::{AstReader, Literal};
use livestyle::catalog::{Platform, Version};
use livestyle::errors::print_error;
use livestyle::native::Modifier;
use livestyle::{Config, Decoder, Element, Environment, Registry, ResolutionContext, Stylesheet};

#[derive(Parser, Debug)]
#[command(name = "livestyle")]
#[command(about = "Decode serialized stylesheets and resolve them against an element", long_about = None)]
struct Cli {
    /// JSON config file with platform, runtime version and environment values.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    platform: Option<Platform>,

    #[arg(long, global = true, value_name = "VERSION")]
    runtime_version: Option<Version>,

    /// Element attribute visible to `attr(...)` references.
    #[arg(long = "attr", global = true, value_name = "NAME=VALUE", value_parser = parse_pair)]
    attrs: Vec<(String, String)>,

    /// Environment value, e.g. `colorScheme=dark`.
    #[arg(long = "env", global = true, value_name = "KEY=VALUE", value_parser = parse_pair)]
    env: Vec<(String, String)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve every class of a stylesheet and print the modifiers as JSON.
    Stylesheet {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only resolve these classes, in this order.
        #[arg(long = "class", value_name = "NAME")]
        classes: Vec<String>,

        /// Fail if any modifier cannot be decoded or resolved.
        #[arg(long)]
        strict: bool,
    },
    /// Decode a single node as TYPE and print the resolved value as JSON.
    Value {
        #[arg(value_name = "TYPE")]
        type_name: String,

        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Command {
    fn file(&self) -> &Path {
        match self {
            Command::Stylesheet { file, .. } | Command::Value { file, .. } => file,
        }
    }
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{}`", s)),
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let file = cli.command.file().to_path_buf();
    if let Err(err) = run(cli) {
        print_error(&file, &err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(platform) = cli.platform {
        config.platform = platform;
    }
    if let Some(version) = cli.runtime_version {
        config.runtime_version = version;
    }
    for (key, value) in cli.env {
        config.environment.insert(key, Literal::String(value));
    }

    let environment = config.environment();
    let element = cli
        .attrs
        .into_iter()
        .fold(Element::new(), |element, (name, value)| element.with(name, value));
    let registry = Registry::builtin(config.platform);

    match cli.command {
        Command::Stylesheet {
            file,
            classes,
            strict,
        } => print_stylesheet(&file, &classes, strict, &registry, &element, &environment),
        Command::Value { type_name, file } => {
            print_value(&file, &type_name, &registry, &element, &environment)
        }
    }
}

fn read(file: &Path) -> Result<Vec<u8>> {
    std::fs::read(file).with_context(|| format!("read stylesheet: {}", file.display()))
}

fn print_stylesheet(
    file: &Path,
    classes: &[String],
    strict: bool,
    registry: &Registry,
    element: &Element,
    environment: &Environment,
) -> Result<()> {
    let (stylesheet, diagnostics) = Stylesheet::parse(&read(file)?, registry)?;
    for diagnostic in &diagnostics {
        eprintln!(
            "warning: dropped modifier {} of class `{}`",
            diagnostic.index, diagnostic.class
        );
        eprintln!("{}", diagnostic.failures.report());
    }

    let selected: Vec<String> = if classes.is_empty() {
        stylesheet.class_names().map(str::to_string).collect()
    } else {
        classes.to_vec()
    };

    let ctx = ResolutionContext::new(element, environment);
    let mut output: BTreeMap<String, Vec<Modifier>> = BTreeMap::new();
    let mut unresolved = 0;
    for class in selected {
        if stylesheet.class(&class).is_none() {
            bail!("unknown class `{}`", class);
        }
        let mut modifiers = Vec::new();
        for (index, result) in stylesheet.resolve_class(&class, &ctx).into_iter().enumerate() {
            match result {
                Ok(modifier) => modifiers.push(modifier),
                Err(err) => {
                    eprintln!("warning: modifier {} of class `{}`: {}", index, class, err);
                    unresolved += 1;
                }
            }
        }
        output.insert(class, modifiers);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);

    if strict && (!diagnostics.is_empty() || unresolved > 0) {
        bail!(
            "{} modifiers failed to decode and {} failed to resolve",
            diagnostics.len(),
            unresolved
        );
    }
    Ok(())
}

fn print_value(
    file: &Path,
    type_name: &str,
    registry: &Registry,
    element: &Element,
    environment: &Environment,
) -> Result<()> {
    let node = AstReader::read(&read(file)?)?;
    let value = Decoder::new(registry).decode_type(&node, type_name)?;
    let resolved = value
        .resolve(&ResolutionContext::new(element, environment))
        .with_context(|| format!("resolve `{}`", type_name))?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
