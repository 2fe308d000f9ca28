use std::io::{self, Write};

use clap::{CommandFactory, FromArgMatches, ValueHint};

use crate::config::get_config_path;
use crate::models::Page;
use crate::sorter::TableSorter;

mod action;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod logging;
mod models;
mod panic;
mod print;
mod sorter;
mod tui;
mod utils;
mod widgets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    panic::init()?;

    // Enhance the help message for the config argument
    let help = match get_config_path() {
        Ok(def) => format!("Path to config file (default: {})", def.display()),
        Err(_) => "Path to config file".to_owned(),
    };
    let cmd = cli::Args::command()
        .mut_arg("config", |a| a.help(help).value_hint(ValueHint::FilePath).next_line_help(true));
    let args = cli::Args::from_arg_matches(&cmd.get_matches())?;

    let config = config::Config::new(args.config)?;
    logging::init(&config)?;

    let mut page = Page::load_all(&args.files)?;
    if args.print {
        let mut sorter = TableSorter::install(&page);
        print::apply_sorts(&mut page, &mut sorter, &args.sort)?;
        let mut out = io::stdout().lock();
        print::write_page(&mut out, &page, &sorter)?;
        out.flush()?;
        return Ok(());
    }

    let mut app = app::App::new(config, args.files, page).rates(args.tick_rate, args.frame_rate);
    app.run().await?;

    Ok(())
}
