use clap::{CommandFactory, Parser};

use chargeview_cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    chargeview_observability::init(args.log_format);

    let Some(input) = args.input else {
        Args::command().print_help()?;
        return Ok(());
    };

    chargeview_cli::run(&input)?;
    Ok(())
}
