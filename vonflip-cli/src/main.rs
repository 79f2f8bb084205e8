fn main() -> anyhow::Result<()> {
    vonflip_cli::run()
}
