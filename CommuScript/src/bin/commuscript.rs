fn main() -> anyhow::Result<()> {
    commuscript::cli::run_cli()
}
