use anyhow::Result;

fn main() -> Result<()> {
    lacuna::cli::run()
}
