fn main() -> anyhow::Result<()> {
    leitner_cli::run()
}
