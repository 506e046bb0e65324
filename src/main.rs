#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod book;
mod cli;
mod config;
mod core;
mod demo;
mod fmt;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    book::Books,
    cli::{Args, Command},
    config::Config,
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let config = Config::read_from(&args.book.config)?;
    let books = Books::open(&args.book.data_dir);

    match args.command {
        Command::Forecast(args) => cli::forecast::run(*args, &books)?,
        Command::Deal(args) => cli::deal::run(*args, &books, &config)?,
        Command::Position(args) => cli::position::run(&args, &books, &config)?,
        Command::Plan(args) => cli::plan::run(&args, &books)?,
        Command::Demo(args) => cli::demo::run(&args, &books)?,
    }

    info!("done!");
    Ok(())
}
