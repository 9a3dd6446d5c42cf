//! HTTP request handlers.

mod assets;
mod navigation;
mod pages;

pub(crate) use assets::get_stylesheet;
pub(crate) use navigation::get_navigation;
pub(crate) use pages::get_page;
