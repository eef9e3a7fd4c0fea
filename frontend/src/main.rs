use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod intro;
mod pages;

use components::loading_animation::LoadingAnimation;
use pages::home::Home;

#[function_component(App)]
fn app() -> Html {
    html! {
        <>
            <LoadingAnimation />
            <Home />
        </>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Starting Bijnis site");
    yew::Renderer::<App>::new().render();
}
