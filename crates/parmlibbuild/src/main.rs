//! parmlibbuild: build a parmlib member from a YAML file and a template.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use parmlib_render::{build_member, DEFAULT_DATASET};

mod cli;
use cli::Cli;

fn main() -> ExitCode {
    // Usage errors exit with clap's status before anything is read or written.
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    println!("YAML file is: {}", cli.yaml.display());
    println!("Template: {}", cli.template);
    println!("Dataset: {}", cli.dataset);
    println!("Member: {}", cli.member.display());

    if cli.dataset != DEFAULT_DATASET {
        log::warn!(
            "--dataset {} is not used to place the member; writing to {}",
            cli.dataset,
            cli.member.display()
        );
    }

    let request = cli.to_request();
    build_member(&request)
        .with_context(|| format!("could not build member {}", cli.member.display()))?;

    log::info!("wrote {}", cli.member.display());
    Ok(())
}

fn report(err: &anyhow::Error) {
    eprintln!("Error: {:#}", err);

    let template_err = err
        .downcast_ref::<parmlib_render::Error>()
        .and_then(parmlib_render::Error::template_error);
    if let Some(template_err) = template_err {
        eprintln!("{}", template_err.display_debug_info());
    }
}
