fn main() -> anyhow::Result<()> {
    groovyscope_cli::run()
}
