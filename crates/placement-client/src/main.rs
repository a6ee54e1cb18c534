fn main() -> anyhow::Result<()> {
    placement_client_lib::run()
}
