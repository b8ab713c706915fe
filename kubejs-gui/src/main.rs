use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use kubejs_gui::{load_catalog, load_property_library, EditorSession, RecipeDraft};
use kubejs_gui_config::{
    logging::LoggingConfig, EditorConfiguration, LoadTomlConfiguration, DEFAULT_CONFIG_PATH,
};
use kubejs_gui_inventory::plan_layout;
use kubejs_gui_registry::{PropertyForm, PropertyKind, PropertyState};

#[derive(Parser)]
#[command(name = "kubejs-gui", version)]
#[command(about = "Plan recipe layouts and export KubeJS recipe scripts", long_about = None)]
struct Cli {
    /// Configuration file, created with defaults when missing
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known recipe types by namespace
    Types {
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Print the slot layout of a recipe type as JSON
    Layout { recipe_type: String },
    /// List the editable properties of a recipe type
    Properties { recipe_type: String },
    /// Export a saved draft as a KubeJS script
    Export {
        draft: PathBuf,
        /// Overrides the configured export directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match EditorConfiguration::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_logger(&config.logging);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &EditorConfiguration) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Types { namespace } => {
            let catalog = load_catalog(config);
            for current in catalog.namespaces() {
                if namespace.as_deref().is_some_and(|wanted| wanted != current) {
                    continue;
                }
                println!("{current}");
                for recipe_type in catalog.types_for(current) {
                    println!("  {recipe_type}");
                }
            }
        }
        Commands::Layout { recipe_type } => {
            let layout = plan_layout(&recipe_type);
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Commands::Properties { recipe_type } => {
            let library = load_property_library(config)?;
            let layout = plan_layout(&recipe_type);
            let form = PropertyForm::open(
                &library,
                &recipe_type,
                &PropertyState::new(),
                layout.active_input_slots(),
                layout.active_output_slots(),
            );
            if form.is_empty() {
                println!("{recipe_type} has no editable properties");
            }
            for row in form.rows() {
                let definition = row.definition();
                let detail = match definition.kind() {
                    PropertyKind::Select { options } => options
                        .iter()
                        .map(|option| option.display_name())
                        .collect::<Vec<_>>()
                        .join(" | "),
                    PropertyKind::Value {
                        default_value,
                        hint,
                        ..
                    } => format!("default '{default_value}' {hint}"),
                };
                match row.slot_label() {
                    Some(slot) => println!("{} ({}) [{slot}]: {detail}", row.label(), definition.id()),
                    None => println!("{} ({}): {detail}", row.label(), definition.id()),
                }
            }
        }
        Commands::Export { draft, out } => {
            let library = load_property_library(config)?;
            let draft = RecipeDraft::load(&draft)?;
            let mut session = EditorSession::new(
                &library,
                load_catalog(config),
                &config.default_namespace,
                &config.default_recipe_id,
            );
            session.load_draft(draft)?;
            let directory = out.unwrap_or_else(|| config.export_directory.clone());
            let path = session.export(&directory)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn init_logger(logging: &LoggingConfig) {
    if logging.enabled {
        let mut logger = simple_logger::SimpleLogger::new();
        logger = logger.with_timestamp_format(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));

        if !logging.timestamp {
            logger = logger.without_timestamps();
        }

        if logging.env {
            logger = logger.env();
        }

        logger = logger.with_level(logging.level.into());

        logger = logger.with_colors(logging.color);
        logger = logger.with_threads(logging.threads);
        if let Err(err) = logger.init() {
            eprintln!("Couldn't initialise logger: {err}");
        }
    }
}
