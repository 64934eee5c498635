use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = batchfs::cli::parse();
    app::run(args)
}
