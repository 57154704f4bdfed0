pub mod export;
pub mod render;

pub use export::export_as_file;
pub use render::render_page;
