use clap::Parser;
use cli::{Args, Commands};
use get_core::{CatalogStore, Result};
use install::install_packages;
use list::list_packages;
use logging::setup_logging;
use remove::remove_packages;
use repos::{list_repos, toggle_repo};

mod cli;
mod install;
mod list;
mod logging;
mod remove;
mod repos;
mod utils;

fn handle_cli() -> Result<bool> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = utils::COLOR.write().unwrap();
        *color = false;
    }

    let mut store = CatalogStore::new(&args.config_dir, &args.url);
    store.validate_repos()?;

    match args.command {
        Commands::List => {
            list_packages(&store);
            Ok(true)
        }
        Commands::Install { packages } => install_packages(&mut store, &packages),
        Commands::Remove { packages } => remove_packages(&mut store, &packages),
        Commands::Repos => {
            list_repos(&store);
            Ok(true)
        }
        Commands::Toggle { repo } => {
            toggle_repo(&mut store, &repo)?;
            Ok(true)
        }
    }
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    match handle_cli() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(1);
        }
    }
}
