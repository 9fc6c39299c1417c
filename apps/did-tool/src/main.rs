use clap::Parser as _;
use did_tool::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or("info".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	let cli = Cli::parse();
	let output = cli.command.run()?;
	println!("{output}");
	Ok(())
}
