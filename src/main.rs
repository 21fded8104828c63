mod dispatch;
mod dom;
mod dom_view;
mod error;
mod highlight;
mod input;
mod local_store;
mod page;
mod page_config;
mod theme_select;

fn main() {
    console_error_panic_hook::set_once();
    page::start();
}
