//! Browser entry point. Validates configuration before mounting anything,
//! so a misconfigured build shows the configuration error instead of a
//! broken login screen.

#[cfg(feature = "csr")]
fn main() {
    use dashgate::app::App;
    use dashgate::config::Config;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match Config::from_build_env() {
        Ok(config) => {
            leptos::mount::mount_to_body(move || view! { <App config=config/> });
        }
        Err(e) => {
            let message = e.to_string();
            leptos::logging::error!("startup aborted: {message}");
            leptos::mount::mount_to_body(move || {
                view! { <pre class="config-error">{message}</pre> }
            });
        }
    }
}

#[cfg(not(feature = "csr"))]
fn main() {
    eprintln!("dashgate is a browser application; build for wasm32 with --features csr");
}
