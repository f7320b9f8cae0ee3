use anyhow::{Result, bail};
use std::env;
use todo_snapshot::cli::{Cli, Command, print_help, resolve_format};
use todo_snapshot::config::Config;
use todo_snapshot::context::{AppContext, StandardContext};
use todo_snapshot::plugin::{DisplayPlugin, TodoPlugin};
use todo_snapshot::{logging, output};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = Cli::parse(&args)?;
    let ctx = StandardContext::new(cli.root.clone());

    match cli.command {
        Command::Help => print_help("todo-snapshot"),
        Command::Template => {
            let plugin = TodoPlugin::new(Default::default());
            println!("{}", serde_json::to_string_pretty(&plugin.settings_template())?);
        }
        Command::Init { force } => {
            let path = ctx.get_config_file_path()?;
            if path.exists() && !force {
                bail!(
                    "Config already exists at {}. Use --force to overwrite it.",
                    path.display()
                );
            }
            Config::starter().save(&ctx)?;
            println!("Wrote {}", path.display());
        }
        Command::Render { output, format } => {
            let config = match Config::load(&ctx) {
                Ok(c) => c,
                Err(e) if Config::is_missing_config_error(&e) => {
                    bail!(
                        "No config at {}. Run 'todo-snapshot init' first.",
                        Config::get_path_string(&ctx)?
                    );
                }
                Err(e) => return Err(e),
            };
            logging::init(&ctx, &config.log_level)?;

            let format = resolve_format(format, output.as_deref(), config.output);
            let plugin = TodoPlugin::new(format);
            let artifact = plugin.render(&config.settings, &config.device).await;

            let path = match output {
                Some(p) => p,
                None => ctx.get_output_path(artifact.extension())?,
            };
            output::write_artifact(&path, &artifact)?;
            log::info!("Snapshot written to {}", path.display());
            println!("{}", path.display());
        }
    }
    Ok(())
}
