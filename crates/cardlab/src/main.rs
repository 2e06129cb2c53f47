mod cli;
mod commands;
mod notify;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Catalog { store, json } => commands::catalog::run(&store, json, cli.verbose),
        Commands::Render {
            store,
            region,
            institution,
            document,
            fields,
            attachments,
            viewport,
            json,
        } => commands::render::run(
            &store,
            commands::render::RenderOptions {
                region,
                institution,
                document,
                fields,
                attachments,
                viewport,
                json,
                verbose: cli.verbose,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
