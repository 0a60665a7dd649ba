use anyhow::Result;

mod cli;
mod dialogue;
mod keys;
mod runtime;
mod session;
mod speech;

fn main() -> Result<()> {
    let args = cli::parse();
    runtime::execute(args)
}
