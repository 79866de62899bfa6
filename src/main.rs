use tracker_frontend::components::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting tracker frontend");
    yew::Renderer::<App>::new().render();
}
