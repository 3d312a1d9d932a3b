fn main() -> eframe::Result<()> {
    npc_app::init_tracing();
    npc_app::launch()
}
