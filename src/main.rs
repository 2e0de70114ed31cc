fn main() -> anyhow::Result<()> {
    waymark::cli::run_cli()
}
