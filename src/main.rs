use clap::Parser;
use quill::quill::{
    cli::{self, Cli},
    utils::logger,
};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _logger = match logger::init(args.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
            None
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = cli::run(args.command, &mut stdout) {
        log::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
